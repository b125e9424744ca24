//! Match table component
//!
//! Renders the current match page with sort markers and paging info.

use super::super::state::DashboardState;
use super::super::utils::{spinner_frame, truncate};
use crate::filters::{SortDirection, SortKey};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Row, Table};

fn sort_marker(state: &DashboardState, key: SortKey) -> &'static str {
    if state.pagination.sort_by != key {
        return "";
    }
    match state.pagination.sort_order {
        SortDirection::Asc => " ▲",
        SortDirection::Desc => " ▼",
    }
}

pub fn render_matches_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header = Row::new(vec![
        Cell::from("Keyword"),
        Cell::from("Matched Value"),
        Cell::from("Field"),
        Cell::from(format!("First Seen [f]{}", sort_marker(state, SortKey::FirstSeenAt))),
        Cell::from(format!("Last Seen [l]{}", sort_marker(state, SortKey::LastSeenAt))),
        Cell::from(format!("Not After [a]{}", sort_marker(state, SortKey::NotAfter))),
        Cell::from("New"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .matches
        .iter()
        .map(|m| {
            let style = if m.is_new {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            Row::new(vec![
                Cell::from(truncate(&m.keyword_value, 16)),
                Cell::from(truncate(&m.matched_value, 40)),
                Cell::from(m.matched_field.to_string()),
                Cell::from(truncate(&m.first_seen_at, 19)),
                Cell::from(truncate(&m.last_seen_at, 19)),
                Cell::from(truncate(m.not_after.as_deref().unwrap_or("—"), 19)),
                Cell::from(if m.is_new { "●" } else { "" }),
            ])
            .style(style)
        })
        .collect();

    let total_pages = state.pagination.total_pages(state.total_matches);
    let mut page_info = format!(
        " Page {} of {} — {} matches  ←/→ ",
        state.pagination.page, total_pages, state.total_matches
    );
    if state.matches_loading() {
        page_info.push_str(&format!("{} ", spinner_frame(state.tick)));
    }

    let block = Block::default()
        .title("MATCHES")
        .title_bottom(Line::from(page_info))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Fill(1),
            Constraint::Length(6),
            Constraint::Length(22),
            Constraint::Length(22),
            Constraint::Length(22),
            Constraint::Length(4),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}
