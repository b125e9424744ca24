//! Dashboard state management
//!
//! Owns every piece of visible state: the three data sources, the filter
//! and pagination stores, the search debouncer, the export workflow, and
//! the activity log. All mutation happens here, driven by the UI loop, so
//! the state has exactly one writer.

use crate::api::types::{Keyword, Match, MonitorState, MonitorStatus};
use crate::consts::cli_consts::status_polling::DEFAULT_MONITOR_INTERVAL_SECS;
use crate::consts::cli_consts::{MAX_ACTIVITY_LOGS, search};
use crate::countdown::seconds_until_next_poll;
use crate::debounce::Debouncer;
use crate::environment::Environment;
use crate::events::Event;
use crate::export::ExportWorkflow;
use crate::filters::{FilterState, Pagination, QuerySnapshot, SortKey};
use crate::ui::app::UIConfig;
use crate::workers::match_fetcher::QueryRequest;
use chrono::Utc;
use crossterm::event::KeyCode;
use std::collections::VecDeque;
use std::time::Instant;

/// Which single-line input currently captures keystrokes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputMode {
    None,
    Search,
    StartDate,
    EndDate,
}

/// What the main dashboard area shows, decided in priority order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DashboardView {
    /// Status or keyword list has never loaded.
    InitialLoading,
    /// Keyword collection is empty; filter bar and table are suppressed.
    NoKeywords,
    /// Filter bar plus match table (or the no-matches empty state).
    Matches,
}

/// Outcome of a key press, for the caller's loop control.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct DashboardState {
    /// The environment in which the application is running.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    // --- data sources ---
    status: Option<MonitorStatus>,
    keywords: Option<Vec<Keyword>>,
    /// Most recently committed match page. Stays visible while a newer
    /// snapshot's fetch is outstanding.
    pub matches: Vec<Match>,
    pub total_matches: u64,
    matches_loading: bool,

    // --- filters, pagination, query identity ---
    pub filters: FilterState,
    pub pagination: Pagination,
    query_generation: u64,
    query_dirty: bool,

    // --- single-line input handling ---
    pub input_mode: InputMode,
    input_buffer: String,
    search_input: Debouncer,

    // --- derived ---
    /// Seconds until the monitor's next expected poll.
    pub next_poll_secs: Option<u64>,

    // --- export workflow ---
    pub export: ExportWorkflow,
    export_request: Option<FilterState>,

    // --- banner & reload ---
    banner_dismissed: bool,
    reload_keywords_requested: bool,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<Event>,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state. The initial query
    /// (generation 0) is already published by session setup, so the state
    /// starts with a fetch in flight and nothing dirty.
    pub fn new(
        environment: Environment,
        initial_filters: FilterState,
        start_time: Instant,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            environment,
            start_time,
            with_background_color: ui_config.with_background_color,
            tick: 0,
            status: None,
            keywords: None,
            matches: Vec::new(),
            total_matches: 0,
            matches_loading: true,
            filters: initial_filters,
            pagination: Pagination::default(),
            query_generation: 0,
            query_dirty: false,
            input_mode: InputMode::None,
            input_buffer: String::new(),
            search_input: Debouncer::new(search::quiet_period()),
            next_poll_secs: None,
            export: ExportWorkflow::default(),
            export_request: None,
            banner_dismissed: false,
            reload_keywords_requested: false,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn status(&self) -> Option<&MonitorStatus> {
        self.status.as_ref()
    }

    pub fn keywords(&self) -> Option<&[Keyword]> {
        self.keywords.as_deref()
    }

    pub fn matches_loading(&self) -> bool {
        self.matches_loading
    }

    /// The search text as currently typed (immediate, not yet settled).
    pub fn search_text(&self) -> &str {
        self.search_input.value()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// Monitor poll cadence in seconds; defaults when the status withholds
    /// it or reports a non-positive value.
    pub fn poll_interval_secs(&self) -> i64 {
        self.status
            .as_ref()
            .and_then(|s| s.poll_interval_seconds)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_MONITOR_INTERVAL_SECS)
    }

    // --- decision rules --------------------------------------------------

    /// Decision rules 1-3, in order.
    pub fn view(&self) -> DashboardView {
        if self.status.is_none() || self.keywords.is_none() {
            DashboardView::InitialLoading
        } else if self.keywords.as_ref().is_some_and(|k| k.is_empty()) {
            DashboardView::NoKeywords
        } else {
            DashboardView::Matches
        }
    }

    /// Rule 4: an error status always surfaces a dismissible banner,
    /// independent of the other rules.
    pub fn show_error_banner(&self) -> bool {
        !self.banner_dismissed
            && self
                .status
                .as_ref()
                .is_some_and(|s| s.state == MonitorState::Error)
    }

    /// The no-matches empty state replaces the table only once a page has
    /// settled empty; a fetch in flight keeps the previous rendering.
    pub fn show_no_matches(&self) -> bool {
        self.matches.is_empty() && !self.matches_loading
    }

    // --- event intake ----------------------------------------------------

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: Event) {
        self.pending_events.push_back(event);
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Update the dashboard state with a new tick: drain queued events,
    /// settle the search debounce, and refresh the countdown.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            if event.should_display() {
                self.add_to_activity_log(event.clone());
            }
            self.process_event(event);
        }

        if let Some(settled) = self.search_input.poll_settled() {
            if settled != self.filters.search {
                self.filters.search = settled;
                self.on_filters_changed();
            }
        }

        self.refresh_countdown();
    }

    fn refresh_countdown(&mut self) {
        self.next_poll_secs = match &self.status {
            Some(status) => seconds_until_next_poll(
                status.last_run_at.as_deref(),
                self.poll_interval_secs(),
                Utc::now(),
            ),
            None => None,
        };
    }

    // --- filter / pagination mutations -----------------------------------

    /// Any filter change returns to page 1 and invalidates the current page.
    fn on_filters_changed(&mut self) {
        self.pagination.reset_page();
        self.bump_query();
    }

    fn bump_query(&mut self) {
        self.query_generation += 1;
        self.query_dirty = true;
        self.matches_loading = true;
    }

    pub fn toggle_keyword_at(&mut self, index: usize) {
        let Some(keywords) = self.keywords.as_ref() else {
            return;
        };
        let Some(keyword) = keywords.get(index) else {
            return;
        };
        let id = keyword.keyword_id.clone();
        self.filters.toggle_keyword(&id);
        self.on_filters_changed();
    }

    pub fn toggle_new_only(&mut self) {
        self.filters.new_only = !self.filters.new_only;
        self.on_filters_changed();
    }

    /// One atomic replacement back to the empty default, plus a debounce
    /// reset so stale search text cannot resurrect later.
    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.search_input.reset(String::new());
        self.on_filters_changed();
    }

    pub fn select_sort(&mut self, key: SortKey) {
        self.pagination.toggle_sort(key);
        self.bump_query();
    }

    pub fn previous_page(&mut self) {
        if self.pagination.page > 1 {
            self.pagination.page -= 1;
            self.bump_query();
        }
    }

    pub fn next_page(&mut self) {
        if self.pagination.page < self.pagination.total_pages(self.total_matches) {
            self.pagination.page += 1;
            self.bump_query();
        }
    }

    // --- commands drained by the UI loop ----------------------------------

    /// The query request to publish, if filters/page/sort changed since
    /// the last call. Exactly one fetch per change.
    pub fn take_query_request(&mut self) -> Option<QueryRequest> {
        if !self.query_dirty {
            return None;
        }
        self.query_dirty = false;
        Some(QueryRequest {
            generation: self.query_generation,
            snapshot: QuerySnapshot::new(self.filters.clone(), &self.pagination),
        })
    }

    pub fn take_reload_keywords(&mut self) -> bool {
        std::mem::take(&mut self.reload_keywords_requested)
    }

    pub fn take_export_request(&mut self) -> Option<FilterState> {
        self.export_request.take()
    }

    // --- key handling -----------------------------------------------------

    pub fn handle_key(&mut self, code: KeyCode) -> KeyAction {
        if self.export.is_open() {
            self.handle_export_modal_key(code);
            return KeyAction::Continue;
        }
        if self.input_mode != InputMode::None {
            self.handle_input_key(code);
            return KeyAction::Continue;
        }
        self.handle_normal_key(code)
    }

    fn handle_export_modal_key(&mut self, code: KeyCode) {
        use crate::export::ExportPhase;
        match code {
            KeyCode::Enter => match self.export.phase() {
                ExportPhase::Idle => {
                    if self.export.begin() {
                        self.export_request = Some(self.filters.clone());
                    }
                }
                ExportPhase::RateLimited { .. } | ExportPhase::Error { .. } => {
                    self.export.retry();
                }
                ExportPhase::Exporting => {}
            },
            // Close is rejected while exporting; `close` enforces that.
            KeyCode::Esc | KeyCode::Char('c') => {
                self.export.close();
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match self.input_mode {
            InputMode::Search => match code {
                KeyCode::Char(c) => {
                    let mut value = self.search_input.value().to_string();
                    value.push(c);
                    self.search_input.set(value);
                }
                KeyCode::Backspace => {
                    let mut value = self.search_input.value().to_string();
                    value.pop();
                    self.search_input.set(value);
                }
                KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::None,
                _ => {}
            },
            InputMode::StartDate | InputMode::EndDate => match code {
                KeyCode::Char(c) => self.input_buffer.push(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => {
                    let value = self.input_buffer.trim().to_string();
                    // Sent as-is; start > end is the server's problem.
                    if self.input_mode == InputMode::StartDate {
                        self.filters.start_date = value;
                    } else {
                        self.filters.end_date = value;
                    }
                    self.input_buffer.clear();
                    self.input_mode = InputMode::None;
                    self.on_filters_changed();
                }
                KeyCode::Esc => {
                    self.input_buffer.clear();
                    self.input_mode = InputMode::None;
                }
                _ => {}
            },
            InputMode::None => {}
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char('e') => self.export.open(),
            KeyCode::Char('x') => self.banner_dismissed = true,
            KeyCode::Char('r') => self.reload_keywords_requested = true,
            _ => {}
        }

        // Filter, sort, and paging interactions only exist while the
        // filter bar and table are on screen.
        if self.view() != DashboardView::Matches {
            return KeyAction::Continue;
        }
        match code {
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('b') => {
                self.input_buffer = self.filters.start_date.clone();
                self.input_mode = InputMode::StartDate;
            }
            KeyCode::Char('t') => {
                self.input_buffer = self.filters.end_date.clone();
                self.input_mode = InputMode::EndDate;
            }
            KeyCode::Char('n') => self.toggle_new_only(),
            KeyCode::Char('c') => {
                if self.filters.is_active() {
                    self.clear_filters();
                }
            }
            KeyCode::Char('f') => self.select_sort(SortKey::FirstSeenAt),
            KeyCode::Char('l') => self.select_sort(SortKey::LastSeenAt),
            KeyCode::Char('a') => self.select_sort(SortKey::NotAfter),
            KeyCode::Left => self.previous_page(),
            KeyCode::Right => self.next_page(),
            KeyCode::Char(c @ '1'..='9') => {
                self.toggle_keyword_at(c as usize - '1' as usize);
            }
            _ => {}
        }
        KeyAction::Continue
    }

    // --- used by updaters -------------------------------------------------

    pub(super) fn set_status(&mut self, status: MonitorStatus) {
        let was_error = self
            .status
            .as_ref()
            .is_some_and(|s| s.state == MonitorState::Error);
        // A fresh transition into the error state re-arms the banner.
        if status.state == MonitorState::Error && !was_error {
            self.banner_dismissed = false;
        }
        self.status = Some(status);
    }

    pub(super) fn set_keywords(&mut self, keywords: Vec<Keyword>) {
        self.keywords = Some(keywords);
    }

    pub(super) fn commit_match_page(&mut self, generation: u64, items: Vec<Match>, total: u64) {
        // Only the result belonging to the current snapshot is committed;
        // a response for a superseded snapshot is discarded.
        if generation != self.query_generation {
            return;
        }
        self.matches = items;
        self.total_matches = total;
        self.matches_loading = false;
    }

    pub(super) fn fail_match_page(&mut self, generation: u64) {
        if generation != self.query_generation {
            return;
        }
        // Keep the last rendered page visible; only the indicator clears.
        self.matches_loading = false;
    }
}
