//! Dashboard footer component
//!
//! Renders key hints for the current mode

use super::super::state::{DashboardState, InputMode};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let hints = if state.export.is_open() {
        "Enter: download/retry   Esc: cancel"
    } else if state.input_mode != InputMode::None {
        "type to edit   Enter: apply   Esc: cancel"
    } else {
        "1-9: keywords   /: search   b/t: dates   n: new only   f/l/a: sort   ←/→: page   e: export   r: reload   q: quit"
    };

    let uptime = state.start_time.elapsed();
    let session_info = format!(
        "{} · up {}m {}s · ",
        state.environment,
        uptime.as_secs() / 60,
        uptime.as_secs() % 60
    );

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(session_info, Style::default().fg(Color::DarkGray)),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}
