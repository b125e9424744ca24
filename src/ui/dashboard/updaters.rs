//! Dashboard state update logic
//!
//! Routes typed worker events into state mutations. The staleness rule
//! lives here: match pages are committed only when their generation tag
//! still matches the current query.

use super::state::DashboardState;
use crate::events::{Event, EventPayload};

impl DashboardState {
    /// Process a single event and update relevant state
    pub(super) fn process_event(&mut self, event: Event) {
        match event.payload {
            EventPayload::Status(status) => self.set_status(status),
            EventPayload::Keywords(keywords) => self.set_keywords(keywords),
            EventPayload::MatchPage {
                generation,
                items,
                total,
            } => self.commit_match_page(generation, items, total),
            EventPayload::MatchPageFailed { generation } => self.fail_match_page(generation),
            EventPayload::ExportDone { .. } => self.export.finish_success(),
            EventPayload::ExportFailed(failure) => self.export.finish_failure(failure),
            EventPayload::None => {}
        }
    }
}
