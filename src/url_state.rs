//! The search results page keeps its whole state in the URL query string.
//!
//! `SearchState::from_query` derives the state from a query string and
//! `next_url` computes the URL an action navigates to. The page never mutates
//! its state any other way, so a shared link or a reload reproduces exactly
//! what was on screen.

use url::form_urlencoded;

use crate::data_models::SearchFilters;
use crate::labels::FilterDimension;
use crate::search_service::SearchRequest;

pub const SEARCH_PATH: &str = "/search";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const PAGE_SIZES: [u32; 3] = [10, 20, 50];

pub mod params {
    pub const QUERY: &str = "query";
    pub const PAGE: &str = "page";
    pub const SIZE: &str = "size";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub filters: SearchFilters,
    /// One-based, as shown to the user.
    pub page: u32,
    pub size: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState {
            query: String::new(),
            filters: SearchFilters::default(),
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// User interactions on the search results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Search(String),
    FilterChange(FilterDimension, String),
    Reset,
    PageChange(u32),
    PageSizeChange(u32),
}

impl SearchState {
    /// Derive the page state from a raw query string (with or without `?`).
    ///
    /// Missing parameters take their defaults, a non-numeric or zero page
    /// becomes 1 and a size outside [`PAGE_SIZES`] becomes the default size.
    pub fn from_query(raw: &str) -> SearchState {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut state = SearchState::default();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let value = value.trim();
            match key.as_ref() {
                params::QUERY => state.query = value.to_string(),
                params::PAGE => state.page = parse_page(value),
                params::SIZE => state.size = normalize_size(value.parse().unwrap_or(0)),
                other => {
                    if let Some(dimension) = FilterDimension::from_key(other) {
                        state.filters = state.filters.with(dimension, value);
                    }
                }
            }
        }
        state
    }

    /// Canonical query string: empty query and filters are omitted, page and
    /// size are always present.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            serializer.append_pair(params::QUERY, &self.query);
        }
        for (dimension, value) in self.filters.active() {
            serializer.append_pair(dimension.key(), value);
        }
        serializer.append_pair(params::PAGE, &self.page.to_string());
        serializer.append_pair(params::SIZE, &self.size.to_string());
        serializer.finish()
    }

    pub fn to_url(&self) -> String {
        format!("{SEARCH_PATH}?{}", self.to_query_string())
    }

    /// The state an action leads to.
    pub fn apply(&self, action: &SearchAction) -> SearchState {
        match action {
            SearchAction::Search(query) => SearchState {
                query: query.trim().to_string(),
                page: 1,
                ..self.clone()
            },
            SearchAction::FilterChange(dimension, value) => SearchState {
                filters: self.filters.with(*dimension, value),
                page: 1,
                ..self.clone()
            },
            SearchAction::Reset => SearchState {
                size: self.size,
                ..SearchState::default()
            },
            SearchAction::PageChange(page) => SearchState {
                page: (*page).max(1),
                ..self.clone()
            },
            SearchAction::PageSizeChange(size) => SearchState {
                size: normalize_size(*size),
                page: 1,
                ..self.clone()
            },
        }
    }

    /// Request for the catalog API. The API pages are zero-based.
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            query: non_empty(&self.query),
            document_type: non_empty(&self.filters.document_type),
            subject_domain: non_empty(&self.filters.subject_domain),
            source: non_empty(&self.filters.source),
            page: Some(self.page.saturating_sub(1)),
            size: Some(self.size),
        }
    }
}

/// URL the page navigates to when `action` happens in state `current`.
pub fn next_url(action: &SearchAction, current: &SearchState) -> String {
    current.apply(action).to_url()
}

fn parse_page(value: &str) -> u32 {
    match value.parse::<u32>() {
        Ok(page) if page >= 1 => page,
        _ => 1,
    }
}

fn normalize_size(size: u32) -> u32 {
    if PAGE_SIZES.contains(&size) {
        size
    } else {
        DEFAULT_PAGE_SIZE
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> SearchState {
        SearchState::from_query(
            "query=%EA%B0%80%EB%AD%84&documentType=REPORT&source=foreign&page=4&size=20",
        )
    }

    #[test]
    fn test_from_query_reads_every_parameter() {
        let state = populated();
        assert_eq!(state.query, "가뭄");
        assert_eq!(state.filters.document_type, "REPORT");
        assert_eq!(state.filters.subject_domain, "");
        assert_eq!(state.filters.source, "foreign");
        assert_eq!(state.page, 4);
        assert_eq!(state.size, 20);
    }

    #[test]
    fn test_from_query_defaults_and_bad_values() {
        assert_eq!(SearchState::from_query(""), SearchState::default());
        let state = SearchState::from_query("?page=0&size=7");
        assert_eq!(state.page, 1);
        assert_eq!(state.size, DEFAULT_PAGE_SIZE);
        assert_eq!(SearchState::from_query("page=abc").page, 1);
    }

    #[test]
    fn test_url_round_trips_state() {
        let state = populated();
        assert_eq!(SearchState::from_query(&state.to_query_string()), state);
    }

    #[test]
    fn test_interactive_state_equals_direct_url() {
        let interactive = SearchState::default()
            .apply(&SearchAction::Search("drought".into()))
            .apply(&SearchAction::FilterChange(FilterDimension::SubjectDomain, "OTHERS".into()))
            .apply(&SearchAction::PageSizeChange(50))
            .apply(&SearchAction::PageChange(3));
        let direct =
            SearchState::from_query("query=drought&subjectDomain=OTHERS&page=3&size=50");
        assert_eq!(interactive, direct);
    }

    #[test]
    fn test_search_and_filter_change_reset_page() {
        let state = populated();
        assert_eq!(state.apply(&SearchAction::Search("x".into())).page, 1);
        let filtered =
            state.apply(&SearchAction::FilterChange(FilterDimension::Source, "domestic".into()));
        assert_eq!(filtered.page, 1);
        assert_eq!(filtered.filters.source, "domestic");
        assert_eq!(filtered.filters.document_type, "REPORT");
    }

    #[test]
    fn test_page_change_keeps_query_and_filters() {
        let state = populated();
        let next = state.apply(&SearchAction::PageChange(9));
        assert_eq!(next.page, 9);
        assert_eq!(next.query, state.query);
        assert_eq!(next.filters, state.filters);
        assert_eq!(next.size, state.size);
    }

    #[test]
    fn test_reset_keeps_only_page_and_size() {
        let url = next_url(&SearchAction::Reset, &populated());
        assert_eq!(url, "/search?page=1&size=20");
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let next = populated().apply(&SearchAction::PageSizeChange(50));
        assert_eq!((next.page, next.size), (1, 50));
    }

    #[test]
    fn test_request_is_zero_based_and_skips_empty_fields() {
        let request = populated().to_request();
        assert_eq!(request.page, Some(3));
        assert_eq!(request.size, Some(20));
        assert_eq!(request.subject_domain, None);
        assert_eq!(request.document_type.as_deref(), Some("REPORT"));
    }
}
