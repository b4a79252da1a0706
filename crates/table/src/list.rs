//! View-owned list state: the request, the current page, and the guard that
//! keeps a slow superseded response from overwriting a newer one.

use purplepaw_core::ApiError;

use crate::pagination::Pagination;
use crate::request::{PageRequest, PageResult};
use crate::view::{TableEvent, TableHandler};

/// Issued by [`ListState::begin_fetch`]; hand it back with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    request: PageRequest,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Snapshot of the request at the time the fetch started.
    pub fn request(&self) -> &PageRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was started after this one; the response was dropped.
    Stale,
    /// Previous rows are kept; the error is for the view to notify.
    Failed(ApiError),
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    request: PageRequest,
    rows: Vec<T>,
    total_elements: u64,
    total_pages: u32,
    is_loading: bool,
    latest_seq: u64,
}

impl<T> ListState<T> {
    pub fn new(request: PageRequest) -> Self {
        Self {
            request,
            rows: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            is_loading: false,
            latest_seq: 0,
        }
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut PageRequest {
        &mut self.request
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page_number: self.request.page_number,
            page_size: self.request.page_size(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    /// Start a fetch for the current request. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.is_loading = true;
        FetchTicket {
            seq: self.latest_seq,
            request: self.request.clone(),
        }
    }

    /// Accept the response for `ticket`. Last request wins.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageResult<T>, ApiError>,
    ) -> FetchOutcome {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding superseded list response"
            );
            return FetchOutcome::Stale;
        }

        self.is_loading = false;
        match result {
            Ok(page) => {
                self.rows = page.content;
                self.total_elements = page.total_elements;
                self.total_pages = page.total_pages;
                FetchOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(seq = ticket.seq, code = %err.code, "list fetch failed: {}", err.message);
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Apply a table event to the request. Returns true when a refetch is
    /// needed.
    pub fn apply(&mut self, event: &TableEvent) -> bool {
        let before = self.request.clone();
        crate::view::DataTable::dispatch(self, event);
        self.request != before
    }
}

impl<T> TableHandler for ListState<T> {
    fn on_page_change(&mut self, page: u32) {
        if self.total_pages > 0 && page >= self.total_pages {
            tracing::debug!(page, total_pages = self.total_pages, "ignoring out-of-range page");
            return;
        }
        self.request.page_number = page;
    }

    fn on_sort(&mut self, key: &str) {
        self.request.sort = self.request.sort.toggled(key);
    }

    fn on_filter(&mut self, key: &str, value: &str) {
        self.request.set_filter(key, value);
        self.request.page_number = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{SortConfig, SortDirection};

    fn state() -> ListState<&'static str> {
        ListState::new(PageRequest::new(10, SortConfig::ascending("name")))
    }

    fn page(rows: Vec<&'static str>, total_pages: u32) -> PageResult<&'static str> {
        PageResult {
            total_elements: rows.len() as u64,
            content: rows,
            total_pages,
        }
    }

    #[test]
    fn applies_latest_response() {
        let mut list = state();
        let ticket = list.begin_fetch();
        assert!(list.is_loading());

        let outcome = list.complete(ticket, Ok(page(vec!["A"], 1)));
        assert_eq!(outcome, FetchOutcome::Applied);
        assert!(!list.is_loading());
        assert_eq!(list.rows(), &["A"]);
        assert_eq!(list.pagination().total_pages, 1);
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut list = state();
        let slow = list.begin_fetch();
        let fast = list.begin_fetch();

        assert_eq!(list.complete(fast, Ok(page(vec!["new"], 1))), FetchOutcome::Applied);
        assert_eq!(list.complete(slow, Ok(page(vec!["old"], 1))), FetchOutcome::Stale);
        assert_eq!(list.rows(), &["new"]);
    }

    #[test]
    fn stale_response_does_not_clear_loading() {
        let mut list = state();
        let slow = list.begin_fetch();
        let _pending = list.begin_fetch();

        list.complete(slow, Ok(page(vec!["old"], 1)));
        assert!(list.is_loading());
        assert!(list.rows().is_empty());
    }

    #[test]
    fn failure_keeps_previous_rows() {
        let mut list = state();
        let t = list.begin_fetch();
        list.complete(t, Ok(page(vec!["A", "B"], 1)));

        let t = list.begin_fetch();
        let outcome = list.complete(t, Err(ApiError::network("offline")));
        assert_eq!(outcome, FetchOutcome::Failed(ApiError::network("offline")));
        assert!(!list.is_loading());
        assert_eq!(list.rows(), &["A", "B"]);
    }

    #[test]
    fn sort_event_toggles_request() {
        let mut list = state();
        assert!(list.apply(&TableEvent::Sort { key: "name".to_string() }));
        assert_eq!(list.request().sort.sort_direction, SortDirection::Desc);

        assert!(list.apply(&TableEvent::Sort { key: "email".to_string() }));
        assert_eq!(list.request().sort, SortConfig::ascending("email"));
    }

    #[test]
    fn filter_resets_to_first_page() {
        let mut list = state();
        let t = list.begin_fetch();
        list.complete(t, Ok(page(vec!["A"], 3)));
        list.apply(&TableEvent::PageChange { page: 2 });
        assert_eq!(list.request().page_number, 2);

        list.apply(&TableEvent::Filter {
            key: "name".to_string(),
            value: "an".to_string(),
        });
        assert_eq!(list.request().page_number, 0);
        assert_eq!(list.request().filters.get("name").map(String::as_str), Some("an"));
    }

    #[test]
    fn out_of_range_page_is_ignored() {
        let mut list = state();
        let t = list.begin_fetch();
        list.complete(t, Ok(page(vec!["A"], 2)));
        assert!(!list.apply(&TableEvent::PageChange { page: 5 }));
        assert_eq!(list.request().page_number, 0);
    }
}
