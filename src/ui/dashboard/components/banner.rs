//! Monitor error banner
//!
//! Shown whenever the monitor reports the error state, independent of
//! whatever else the dashboard is rendering. Dismissible with `x`.

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_error_banner(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(status) = state.status() else {
        return;
    };

    let code = status.last_error_code.as_deref().unwrap_or("MONITOR_ERROR");
    let message = status
        .last_error_message
        .as_deref()
        .unwrap_or("The monitor reported an error.");

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", code),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(message.to_string(), Style::default().fg(Color::Red)),
        Span::styled("   dismiss [x]", Style::default().fg(Color::DarkGray)),
    ]);

    let banner = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(banner, area);
}
