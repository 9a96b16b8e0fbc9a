//! Search results page controller.
//!
//! The URL is the only source of truth: actions produce a URL, and state is
//! re-derived from every URL the page lands on. Each URL change issues one
//! search, identified by a [`Ticket`]. Only the response for the most recent
//! ticket is displayed, so a slow earlier request can never overwrite a newer
//! result.

use crate::data_models::{PageData, SearchResponse, SearchResult};
use crate::pagination::Pagination;
use crate::search_service::{ClientError, SearchRequest};
use crate::url_state::{SearchAction, SearchState};

pub const SEARCH_ERROR_MESSAGE: &str = "검색 중 오류가 발생했습니다.";

/// Identifies one issued search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Results {
    Idle,
    Loading,
    Loaded(PageData<SearchResult>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SearchPage {
    state: SearchState,
    generation: u64,
    results: Results,
}

impl SearchPage {
    /// Mount the page on a URL query and issue its first search.
    pub fn open(raw_query: &str) -> (SearchPage, Ticket) {
        let mut page = SearchPage {
            state: SearchState::from_query(raw_query),
            generation: 0,
            results: Results::Idle,
        };
        let ticket = page.issue();
        (page, ticket)
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn status(&self) -> &Results {
        &self.results
    }

    /// Request for the current state.
    pub fn request(&self) -> SearchRequest {
        self.state.to_request()
    }

    /// URL an action navigates to. The state itself only changes once the
    /// router reports the new URL through [`SearchPage::on_url_change`].
    pub fn dispatch(&mut self, action: &SearchAction) -> String {
        if matches!(action, SearchAction::Reset) {
            self.results = Results::Idle;
        }
        self.state.apply(action).to_url()
    }

    /// The router landed on a new URL: re-derive state and issue a search.
    pub fn on_url_change(&mut self, raw_query: &str) -> Ticket {
        self.state = SearchState::from_query(raw_query);
        self.issue()
    }

    /// Apply a search result. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<SearchResponse, ClientError>,
    ) -> bool {
        if ticket.0 != self.generation {
            log::debug!(
                "discarding stale search response (ticket {}, current {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.results = match result {
            Ok(response) => Results::Loaded(response.data),
            Err(e) => {
                log::error!("search request failed: {:#}", e);
                Results::Failed(SEARCH_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    pub fn results(&self) -> &[SearchResult] {
        match &self.results {
            Results::Loaded(page) => &page.content,
            _ => &[],
        }
    }

    pub fn total_elements(&self) -> u64 {
        match &self.results {
            Results::Loaded(page) => page.total_elements,
            _ => 0,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.results {
            Results::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.results, Results::Loading)
    }

    pub fn pagination(&self) -> Option<Pagination> {
        match &self.results {
            Results::Loaded(page) => Pagination::new(self.state.page, page.total_pages),
            _ => None,
        }
    }

    fn issue(&mut self) -> Ticket {
        self.generation += 1;
        self.results = Results::Loading;
        Ticket(self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::FilterDimension;

    fn response(ids: &[i64], total_pages: u32) -> SearchResponse {
        let content = ids
            .iter()
            .map(|id| SearchResult {
                id: *id,
                title: format!("문서_{id}"),
                author_organization: "행정안전부".into(),
                updated_at: "2025-07-07T10:48:39".into(),
                views: 0,
                extensions: vec!["pdf".into()],
                document_type: "REPORT".into(),
                subject_domain: "OTHERS".into(),
                source: "domestic".into(),
            })
            .collect();
        SearchResponse {
            status: 200,
            message: "OK".into(),
            data: PageData {
                total_pages,
                total_elements: ids.len() as u64,
                ..PageData::from_items(content, 0, 10)
            },
        }
    }

    #[test]
    fn test_open_derives_state_and_issues_search() {
        let (page, _ticket) = SearchPage::open("query=drought&page=2&size=20");
        assert_eq!(page.state().query, "drought");
        assert!(page.is_loading());
        assert_eq!(page.request().page, Some(1));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (mut page, first) = SearchPage::open("query=a");
        let url = page.dispatch(&SearchAction::Search("b".into()));
        let second = page.on_url_change(url.trim_start_matches("/search?"));

        // the fast second request resolves first
        assert!(page.complete(second, Ok(response(&[2], 1))));
        // the slow first request resolves afterwards and must not win
        assert!(!page.complete(first, Ok(response(&[1], 1))));
        assert_eq!(page.results()[0].id, 2);
        assert_eq!(page.state().query, "b");
    }

    #[test]
    fn test_dispatch_does_not_touch_state_until_url_changes() {
        let (mut page, _) = SearchPage::open("query=a&page=3");
        let url = page.dispatch(&SearchAction::FilterChange(
            FilterDimension::DocumentType,
            "REPORT".into(),
        ));
        assert_eq!(url, "/search?query=a&documentType=REPORT&page=1&size=10");
        assert_eq!(page.state().page, 3);
        page.on_url_change(url.trim_start_matches("/search?"));
        assert_eq!(page.state().page, 1);
    }

    #[test]
    fn test_reset_empties_results_and_url() {
        let (mut page, ticket) = SearchPage::open("query=a&source=foreign&size=50");
        page.complete(ticket, Ok(response(&[1, 2, 3], 1)));
        assert_eq!(page.results().len(), 3);

        let url = page.dispatch(&SearchAction::Reset);
        assert_eq!(url, "/search?page=1&size=50");
        assert!(page.results().is_empty());
    }

    #[test]
    fn test_failure_shows_generic_message() {
        let (mut page, ticket) = SearchPage::open("");
        let err = ClientError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        assert!(page.complete(ticket, Err(err)));
        assert_eq!(page.error(), Some(SEARCH_ERROR_MESSAGE));
        assert!(page.results().is_empty());
        assert!(page.pagination().is_none());
    }

    #[test]
    fn test_pagination_follows_loaded_page() {
        let (mut page, ticket) = SearchPage::open("page=5");
        page.complete(ticket, Ok(response(&[1], 10)));
        let pages: Vec<u32> = page.pagination().unwrap().pages.iter().map(|b| b.page).collect();
        assert_eq!(pages, vec![3, 4, 5, 6, 7]);
    }
}
