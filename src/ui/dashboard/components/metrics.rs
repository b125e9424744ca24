//! Last-run metric cards
//!
//! Renders the monitor's last-cycle counters and latencies as a card strip

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn render_card(f: &mut Frame, area: Rect, label: &str, value: String, color: Color) {
    let card = Paragraph::new(vec![
        Line::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Line::styled(label.to_string(), Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(card, area);
}

/// Render the metric card strip from the status's last-run metrics.
/// Shows placeholders until the first status load; zeros once loaded
/// without a completed run.
pub fn render_metrics_section(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 6),
            Constraint::Ratio(1, 6),
            Constraint::Ratio(1, 6),
            Constraint::Ratio(1, 6),
            Constraint::Ratio(1, 6),
            Constraint::Ratio(1, 6),
        ])
        .split(area);

    let Some(status) = state.status() else {
        for (i, label) in [
            "Processed",
            "Matches",
            "Parse Errors",
            "Cycle",
            "CT Latency",
            "DB Latency",
        ]
        .iter()
        .enumerate()
        {
            render_card(f, chunks[i], label, "…".to_string(), Color::DarkGray);
        }
        return;
    };

    let metrics = status.metrics_last_run;
    let processed = metrics.map_or(0, |m| m.processed_count);
    let match_count = metrics.map_or(0, |m| m.match_count);
    let parse_errors = metrics.map_or(0, |m| m.parse_error_count);
    let duration_ms = metrics.map_or(0, |m| m.duration_ms);
    let ct_latency_ms = metrics.map_or(0, |m| m.ct_latency_ms);
    let db_latency_ms = metrics.map_or(0, |m| m.db_latency_ms);

    render_card(f, chunks[0], "Processed", processed.to_string(), Color::White);
    render_card(
        f,
        chunks[1],
        "Matches",
        match_count.to_string(),
        if match_count > 0 { Color::Green } else { Color::White },
    );
    render_card(
        f,
        chunks[2],
        "Parse Errors",
        parse_errors.to_string(),
        if parse_errors > 0 { Color::Yellow } else { Color::White },
    );
    render_card(f, chunks[3], "Cycle", format!("{}ms", duration_ms), Color::White);
    render_card(
        f,
        chunks[4],
        "CT Latency",
        format!("{}ms", ct_latency_ms),
        Color::White,
    );
    render_card(
        f,
        chunks[5],
        "DB Latency",
        format!("{}ms", db_latency_ms),
        Color::White,
    );
}
