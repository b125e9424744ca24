//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::filters::FilterState;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::dashboard::state::KeyAction;
use crate::ui::splash::render_splash;
use crate::workers::exporter::ExportRequest;
use crate::workers::match_fetcher::QueryRequest;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc, watch};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// The different screens in the application.
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying monitor health and matches.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Publishes the current query snapshot to the match fetcher.
    query_sender: watch::Sender<QueryRequest>,

    /// Requests a keyword list reload.
    reload_keywords_sender: mpsc::Sender<()>,

    /// Requests a CSV export.
    export_sender: mpsc::Sender<ExportRequest>,

    /// Filters the dashboard starts with.
    initial_filters: FilterState,

    /// Whether to enable background colors.
    with_background_color: bool,
}

impl App {
    /// Creates a new instance of the application.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        shutdown_sender: broadcast::Sender<()>,
        query_sender: watch::Sender<QueryRequest>,
        reload_keywords_sender: mpsc::Sender<()>,
        export_sender: mpsc::Sender<ExportRequest>,
        initial_filters: FilterState,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            shutdown_sender,
            query_sender,
            reload_keywords_sender,
            export_sender,
            initial_filters,
            with_background_color: ui_config.with_background_color,
        }
    }

    fn dashboard_state(&self) -> DashboardState {
        DashboardState::new(
            self.environment.clone(),
            self.initial_filters.clone(),
            self.start_time,
            UIConfig::new(self.with_background_color),
        )
    }
}

/// Publish any commands the dashboard state queued up for the workers.
fn flush_commands(
    state: &mut DashboardState,
    query_sender: &watch::Sender<QueryRequest>,
    reload_keywords_sender: &mpsc::Sender<()>,
    export_sender: &mpsc::Sender<ExportRequest>,
) {
    if let Some(request) = state.take_query_request() {
        let _ = query_sender.send(request);
    }
    if state.take_reload_keywords() {
        let _ = reload_keywords_sender.try_send(());
    }
    if let Some(filters) = state.take_export_request() {
        let _ = export_sender.try_send(ExportRequest { filters });
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        // Update the state based on the current screen
        match &mut app.current_screen {
            Screen::Splash => {}
            Screen::Dashboard(state) => {
                state.update();
                flush_commands(
                    state,
                    &app.query_sender,
                    &app.reload_keywords_sender,
                    &app.export_sender,
                );
            }
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.current_screen = Screen::Dashboard(Box::new(app.dashboard_state()));
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                let mut skip_splash = false;
                match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            let _ = app.shutdown_sender.send(());
                            return Ok(());
                        }
                        // Any other key press skips the splash screen
                        skip_splash = true;
                    }
                    Screen::Dashboard(state) => {
                        if state.handle_key(key.code) == KeyAction::Quit {
                            let _ = app.shutdown_sender.send(());
                            return Ok(());
                        }
                        flush_commands(
                            state,
                            &app.query_sender,
                            &app.reload_keywords_sender,
                            &app.export_sender,
                        );
                    }
                }
                if skip_splash {
                    app.current_screen = Screen::Dashboard(Box::new(app.dashboard_state()));
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
