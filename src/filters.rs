//! Filter, sort, and pagination state for the match listing.
//!
//! `FilterState` is the single source of truth for what the operator is
//! looking at; it is replaced wholesale on every change and never mutated
//! in place by consumers. A `QuerySnapshot` freezes filters together with
//! pagination and sort into the unit of request identity used for
//! stale-response rejection.

use crate::consts::cli_consts::matches::PAGE_SIZE;

/// Operator-chosen constraints on the match listing. Empty fields mean
/// "no constraint" and are omitted from requests entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Selected keyword ids, unordered. Empty selects all keywords.
    pub keyword_ids: Vec<String>,
    /// Inclusive ISO date lower bound, or empty. Sent as-is even if it
    /// exceeds `end_date`; ordering is the server's call.
    pub start_date: String,
    /// Inclusive ISO date upper bound, or empty.
    pub end_date: String,
    /// Free-text search, matched case-insensitively server-side.
    pub search: String,
    /// Restrict to matches first seen in the latest cycle.
    pub new_only: bool,
}

impl FilterState {
    /// True iff any field differs from its empty default. Drives the
    /// clear-filters affordance.
    pub fn is_active(&self) -> bool {
        *self != FilterState::default()
    }

    /// Add the id to the selection, or remove it if already selected.
    pub fn toggle_keyword(&mut self, keyword_id: &str) {
        if let Some(pos) = self.keyword_ids.iter().position(|id| id == keyword_id) {
            self.keyword_ids.remove(pos);
        } else {
            self.keyword_ids.push(keyword_id.to_string());
        }
    }

    /// Query parameters for this filter set, omit-if-empty. An empty
    /// string or empty set never serializes to an explicit empty-match
    /// constraint.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.keyword_ids.is_empty() {
            params.push(("keyword_ids", self.keyword_ids.join(",")));
        }
        if !self.start_date.is_empty() {
            params.push(("start_date", self.start_date.clone()));
        }
        if !self.end_date.is_empty() {
            params.push(("end_date", self.end_date.clone()));
        }
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if self.new_only {
            params.push(("new_only", "true".to_string()));
        }
        params
    }

    /// URL-encoded query string for the export endpoint (filters only,
    /// no pagination or sort). Empty when no filters are active.
    pub fn export_query_string(&self) -> String {
        encode_params(&self.query_params())
    }
}

/// Sortable match-table columns, serialized as the API's sort_by values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum SortKey {
    #[strum(serialize = "first_seen_at")]
    FirstSeenAt,
    #[strum(serialize = "last_seen_at")]
    LastSeenAt,
    #[strum(serialize = "not_after")]
    NotAfter,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum SortDirection {
    #[strum(serialize = "asc")]
    Asc,
    #[strum(serialize = "desc")]
    Desc,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current page and sort. Page size is fixed for the lifetime of the
/// process, so only filter and sort-key changes ever reset the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortKey,
    pub sort_order: SortDirection,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
            sort_by: SortKey::FirstSeenAt,
            sort_order: SortDirection::Desc,
        }
    }
}

impl Pagination {
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Selecting the active column flips direction; selecting a different
    /// column sorts it descending. Either way the page resets to 1.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_by == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_by = key;
            self.sort_order = SortDirection::Desc;
        }
        self.page = 1;
    }

    /// Number of pages for the given total, at least 1.
    pub fn total_pages(&self, total: u64) -> u32 {
        (total.div_ceil(self.limit as u64).max(1)) as u32
    }
}

/// An immutable filter + pagination + sort combination. Two identical
/// snapshots describe the same request; the coordinator commits a
/// response only if its snapshot is still the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySnapshot {
    pub filters: FilterState,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortKey,
    pub sort_order: SortDirection,
}

impl QuerySnapshot {
    pub fn new(filters: FilterState, pagination: &Pagination) -> Self {
        Self {
            filters,
            page: pagination.page,
            limit: pagination.limit,
            sort_by: pagination.sort_by,
            sort_order: pagination.sort_order,
        }
    }

    /// Query parameters for the match listing. Filter fields are
    /// omit-if-empty; page, limit, and sort are always present.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.filters.query_params();
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.limit.to_string()));
        params.push(("sort_by", self.sort_by.to_string()));
        params.push(("sort_order", self.sort_order.to_string()));
        params
    }

    /// URL-encoded query string for the match listing request.
    pub fn query_string(&self) -> String {
        encode_params(&self.query_params())
    }
}

impl Default for QuerySnapshot {
    fn default() -> Self {
        Self::new(FilterState::default(), &Pagination::default())
    }
}

fn encode_params(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters_with(f: impl FnOnce(&mut FilterState)) -> FilterState {
        let mut filters = FilterState::default();
        f(&mut filters);
        filters
    }

    #[test]
    // A fully-empty filter set serializes to no optional parameters at all.
    fn empty_filters_omit_every_parameter() {
        let snapshot = QuerySnapshot::default();
        let params = snapshot.query_params();
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["page", "limit", "sort_by", "sort_order"]);
        assert_eq!(FilterState::default().export_query_string(), "");
    }

    #[test]
    fn keyword_ids_serialize_comma_joined() {
        let filters = filters_with(|f| {
            f.keyword_ids = vec!["k1".to_string(), "k2".to_string()];
        });
        let params = filters.query_params();
        assert_eq!(params, vec![("keyword_ids", "k1,k2".to_string())]);
    }

    #[test]
    fn new_only_false_is_omitted() {
        let filters = filters_with(|f| {
            f.search = "phish".to_string();
            f.new_only = false;
        });
        let params = filters.query_params();
        assert_eq!(params, vec![("search", "phish".to_string())]);
    }

    #[test]
    fn search_text_is_url_encoded() {
        let filters = filters_with(|f| f.search = "a b&c".to_string());
        assert_eq!(filters.export_query_string(), "search=a%20b%26c");
    }

    #[test]
    fn is_active_tracks_any_non_default_field() {
        assert!(!FilterState::default().is_active());
        assert!(filters_with(|f| f.keyword_ids = vec!["k1".to_string()]).is_active());
        assert!(filters_with(|f| f.start_date = "2026-08-01".to_string()).is_active());
        assert!(filters_with(|f| f.new_only = true).is_active());
        // Non-default keyword set with empty search and new_only=false is
        // still active.
        let partially_set = filters_with(|f| {
            f.keyword_ids = vec!["k1".to_string()];
            f.search = String::new();
            f.new_only = false;
        });
        assert!(partially_set.is_active());
    }

    #[test]
    fn toggle_keyword_adds_and_removes() {
        let mut filters = FilterState::default();
        filters.toggle_keyword("k1");
        assert_eq!(filters.keyword_ids, vec!["k1"]);
        filters.toggle_keyword("k2");
        filters.toggle_keyword("k1");
        assert_eq!(filters.keyword_ids, vec!["k2"]);
    }

    #[test]
    // Re-selecting the active column flips direction; a new column sorts
    // descending. Both reset to page 1.
    fn sort_toggle_semantics() {
        let mut pagination = Pagination::default();
        pagination.page = 3;

        pagination.toggle_sort(SortKey::FirstSeenAt);
        assert_eq!(pagination.sort_by, SortKey::FirstSeenAt);
        assert_eq!(pagination.sort_order, SortDirection::Asc);
        assert_eq!(pagination.page, 1);

        pagination.page = 2;
        pagination.toggle_sort(SortKey::NotAfter);
        assert_eq!(pagination.sort_by, SortKey::NotAfter);
        assert_eq!(pagination.sort_order, SortDirection::Desc);
        assert_eq!(pagination.page, 1);
    }

    #[test]
    fn identical_snapshots_compare_equal() {
        let filters = filters_with(|f| f.search = "acme".to_string());
        let pagination = Pagination::default();
        let a = QuerySnapshot::new(filters.clone(), &pagination);
        let b = QuerySnapshot::new(filters, &pagination);
        assert_eq!(a, b);
        assert_eq!(a.query_string(), b.query_string());
    }

    #[test]
    fn total_pages_rounds_up_and_floors_at_one() {
        let pagination = Pagination::default();
        assert_eq!(pagination.total_pages(0), 1);
        assert_eq!(pagination.total_pages(20), 1);
        assert_eq!(pagination.total_pages(21), 2);
    }
}
