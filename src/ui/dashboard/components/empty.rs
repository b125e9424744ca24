//! Loading and empty states for the dashboard body

use super::super::state::DashboardState;
use super::super::utils::spinner_frame;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn placeholder_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Initial skeleton, shown until both status and keyword list have
/// loaded once.
pub fn render_initial_loading(f: &mut Frame, area: Rect, state: &DashboardState) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::styled(
            format!("{} Loading dashboard…", spinner_frame(state.tick)),
            Style::default().fg(Color::Cyan),
        ),
        Line::styled(
            "Waiting for monitor status and keywords",
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .alignment(Alignment::Center)
    .block(placeholder_block());
    f.render_widget(paragraph, area);
}

/// Onboarding empty state when no keywords are configured. The filter
/// bar and match table are suppressed entirely in this state.
pub fn render_no_keywords(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::styled(
            "No Keywords Configured",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "Add keywords to start monitoring Certificate Transparency logs",
            Style::default().fg(Color::Gray),
        ),
        Line::styled(
            "for potential brand impersonation.",
            Style::default().fg(Color::Gray),
        ),
        Line::from(""),
        Line::styled(
            "Run: ctwatch keywords add --value <brand>   then press [r] to reload",
            Style::default().fg(Color::Cyan),
        ),
    ])
    .alignment(Alignment::Center)
    .block(placeholder_block());
    f.render_widget(paragraph, area);
}

/// Empty state when the filtered listing settles at zero matches. The
/// filter bar stays visible above it.
pub fn render_no_matches(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::styled(
            "No Matches Found",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "No certificates matching your keywords have been detected yet.",
            Style::default().fg(Color::Gray),
        ),
        Line::styled(
            "The monitor is actively scanning Certificate Transparency logs",
            Style::default().fg(Color::Gray),
        ),
        Line::styled(
            "and will display any matches here.",
            Style::default().fg(Color::Gray),
        ),
    ])
    .alignment(Alignment::Center)
    .block(placeholder_block());
    f.render_widget(paragraph, area);
}
