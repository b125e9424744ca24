//! Dashboard header component
//!
//! Renders the title, monitor status badge, and next-poll gauge

use super::super::state::DashboardState;
use super::super::utils::format_relative_time;
use crate::api::types::MonitorState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

fn state_badge(state: MonitorState) -> Span<'static> {
    let (label, color) = match state {
        MonitorState::Idle => (" IDLE ", Color::Green),
        MonitorState::Running => (" RUNNING ", Color::Yellow),
        MonitorState::Error => (" ERROR ", Color::Red),
    };
    Span::styled(
        label,
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

/// Render the header with title, status badge, and poll countdown gauge.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let mut title_spans = vec![Span::styled(
        format!("CTWATCH v{} — BRAND PROTECTION MONITOR ", version),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    match state.status() {
        Some(status) => {
            title_spans.push(state_badge(status.state));
            title_spans.push(Span::styled(
                format!(
                    "  Last run: {}",
                    format_relative_time(status.last_run_at.as_deref())
                ),
                Style::default().fg(Color::DarkGray),
            ));
        }
        None => {
            title_spans.push(Span::styled(
                "connecting…",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let title = Paragraph::new(Line::from(title_spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Gauge logic: a running monitor takes priority, then the countdown.
    let running = state
        .status()
        .is_some_and(|s| s.state == MonitorState::Running);
    let (progress_text, gauge_color, progress_percent) = if running {
        // Animated gauge - loops every 20 ticks for smooth animation
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            "POLLING — monitor cycle in progress".to_string(),
            Color::LightGreen,
            progress,
        )
    } else {
        match state.next_poll_secs {
            // The zero boundary gets its own signal instead of "0s".
            Some(0) => (
                "POLLING NOW — waiting for monitor cycle".to_string(),
                Color::LightYellow,
                100,
            ),
            Some(remaining) => {
                let interval = state.poll_interval_secs().max(1) as u64;
                let elapsed = interval.saturating_sub(remaining);
                let progress = ((elapsed as f64 / interval as f64) * 100.0) as u16;
                (
                    format!("NEXT POLL in {}s", remaining),
                    Color::LightBlue,
                    progress.min(100),
                )
            }
            None => (
                "NEXT POLL unknown — monitor has never run".to_string(),
                Color::DarkGray,
                0,
            ),
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
