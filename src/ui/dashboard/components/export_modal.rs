//! Export dialog component
//!
//! Floating dialog driven by the export workflow state machine.

use super::super::state::DashboardState;
use super::super::utils::spinner_frame;
use crate::export::{ExportPhase, filter_summary};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

/// Center a dialog of the given size within the frame.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1]);
    horizontal[1]
}

pub fn render_export_modal(f: &mut Frame, state: &DashboardState) {
    let area = centered_rect(60, 14, f.area());
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();

    match state.export.phase() {
        ExportPhase::RateLimited { retry_after_secs } => {
            lines.push(Line::styled(
                "Rate Limit Exceeded",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                format!(
                    "Export rate limit exceeded. Try again in {} seconds.",
                    retry_after_secs
                ),
                Style::default().fg(Color::Yellow),
            ));
            lines.push(Line::from(""));
        }
        ExportPhase::Error { message } => {
            lines.push(Line::styled(
                "Export Failed",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ));
            lines.push(Line::from(""));
        }
        ExportPhase::Exporting => {
            lines.push(Line::styled(
                format!("{} Exporting…", spinner_frame(state.tick)),
                Style::default().fg(Color::Cyan),
            ));
            lines.push(Line::from(""));
        }
        ExportPhase::Idle => {}
    }

    lines.push(Line::styled(
        "Filter Summary",
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ));
    for summary_line in filter_summary(&state.filters, state.keywords().unwrap_or_default()) {
        lines.push(Line::styled(
            format!("  {}", summary_line),
            Style::default().fg(Color::Cyan),
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "The export will be downloaded as a CSV file containing all matching certificates.",
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::from(""));

    let actions = match state.export.phase() {
        ExportPhase::Idle => Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Green)),
            Span::raw("Download CSV   "),
            Span::styled("[Esc] ", Style::default().fg(Color::Gray)),
            Span::raw("Cancel"),
        ]),
        ExportPhase::Exporting => Line::styled(
            "Export in progress — cannot be dismissed",
            Style::default().fg(Color::DarkGray),
        ),
        ExportPhase::RateLimited { .. } | ExportPhase::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Green)),
            Span::raw("Try Again   "),
            Span::styled("[Esc] ", Style::default().fg(Color::Gray)),
            Span::raw("Cancel"),
        ]),
    };
    lines.push(actions);

    let block = Block::default()
        .title("EXPORT MATCHES")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
