//! Dashboard main renderer

use super::components::{
    banner, empty, export_modal, filter_bar, footer, header, logs, matches_table, metrics,
};
use super::state::{DashboardState, DashboardView};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let show_banner = state.show_error_banner();
    let mut constraints = vec![Constraint::Length(4)];
    if show_banner {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Percentage(25),
        Constraint::Length(2),
    ]);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(f.area());

    let mut next = 0;
    let mut chunk = |chunks: &[Rect]| {
        let area = chunks[next];
        next += 1;
        area
    };

    header::render_header(f, chunk(&main_chunks), state);
    if show_banner {
        banner::render_error_banner(f, chunk(&main_chunks), state);
    }
    metrics::render_metrics_section(f, chunk(&main_chunks), state);

    let content_area = chunk(&main_chunks);
    match state.view() {
        DashboardView::InitialLoading => empty::render_initial_loading(f, content_area, state),
        DashboardView::NoKeywords => empty::render_no_keywords(f, content_area),
        DashboardView::Matches => {
            let content_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(7), Constraint::Fill(1)])
                .split(content_area);

            filter_bar::render_filter_bar(f, content_chunks[0], state);
            if state.show_no_matches() {
                empty::render_no_matches(f, content_chunks[1]);
            } else {
                matches_table::render_matches_table(f, content_chunks[1], state);
            }
        }
    }

    logs::render_logs_panel(f, chunk(&main_chunks), state);
    footer::render_footer(f, chunk(&main_chunks), state);

    // The export dialog floats above everything else.
    if state.export.is_open() {
        export_modal::render_export_modal(f, state);
    }
}
