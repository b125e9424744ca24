//! Filter bar component
//!
//! Renders keyword toggles, date bounds, the debounced search input, the
//! new-only flag, and the clear-filters affordance.

use super::super::state::{DashboardState, InputMode};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

fn field_value(value: &str, empty_label: &str, editing: bool) -> Span<'static> {
    if editing {
        Span::styled(
            format!("{}█", value),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    } else if value.is_empty() {
        Span::styled(empty_label.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(value.to_string(), Style::default().fg(Color::White))
    }
}

pub fn render_filter_bar(f: &mut Frame, area: Rect, state: &DashboardState) {
    let keywords = state.keywords().unwrap_or_default();

    // Keyword toggle row: the first nine keywords get number keys.
    let mut keyword_spans: Vec<Span> = vec![Span::styled(
        "Keywords ",
        Style::default().fg(Color::DarkGray),
    )];
    if keywords.is_empty() {
        keyword_spans.push(Span::styled(
            "none configured",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (i, keyword) in keywords.iter().enumerate().take(9) {
        let selected = state.filters.keyword_ids.contains(&keyword.keyword_id);
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        keyword_spans.push(Span::styled(
            format!("[{}] {}", i + 1, keyword.value),
            style,
        ));
        keyword_spans.push(Span::raw("  "));
    }
    if keywords.len() > 9 {
        keyword_spans.push(Span::styled(
            format!("(+{} more)", keywords.len() - 9),
            Style::default().fg(Color::DarkGray),
        ));
    }

    // Date / search / new-only row.
    let mut detail_spans: Vec<Span> = vec![
        Span::styled("From [b] ", Style::default().fg(Color::DarkGray)),
        if state.input_mode == InputMode::StartDate {
            field_value(state.input_buffer(), "—", true)
        } else {
            field_value(&state.filters.start_date, "—", false)
        },
        Span::raw("   "),
        Span::styled("To [t] ", Style::default().fg(Color::DarkGray)),
        if state.input_mode == InputMode::EndDate {
            field_value(state.input_buffer(), "—", true)
        } else {
            field_value(&state.filters.end_date, "—", false)
        },
        Span::raw("   "),
        Span::styled("Search [/] ", Style::default().fg(Color::DarkGray)),
        field_value(
            state.search_text(),
            "—",
            state.input_mode == InputMode::Search,
        ),
        Span::raw("   "),
        Span::styled("New only [n] ", Style::default().fg(Color::DarkGray)),
        if state.filters.new_only {
            Span::styled("ON", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("off", Style::default().fg(Color::DarkGray))
        },
    ];
    // Only offered when something differs from the empty defaults.
    if state.filters.is_active() {
        detail_spans.push(Span::raw("   "));
        detail_spans.push(Span::styled(
            "Clear filters [c]",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::UNDERLINED),
        ));
    }

    let block = Block::default()
        .title("FILTERS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let paragraph = Paragraph::new(vec![
        Line::from(keyword_spans),
        Line::from(""),
        Line::from(detail_spans),
    ])
    .block(block);

    f.render_widget(paragraph, area);
}
