//! List views: column sets per resource and the controller that owns a
//! view's request and feeds the table.

use std::sync::Arc;

use purplepaw_api::PageSource;
use purplepaw_table::{
    Column, DataTable, FetchOutcome, ListState, PageRequest, TableEvent, TableRow, TableView,
};

use crate::notify::{Notifier, describe};

pub mod appointments;
pub mod clients;
pub mod inventory;
pub mod pets;
pub mod users;

/// Owns one list view's state. Table events go in, fetches come out.
pub struct ListController<S: PageSource> {
    source: S,
    state: ListState<S::Row>,
    notifier: Arc<dyn Notifier>,
}

impl<S: PageSource> ListController<S> {
    pub fn new(source: S, request: PageRequest, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            source,
            state: ListState::new(request),
            notifier,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &ListState<S::Row> {
        &self.state
    }

    pub fn request_mut(&mut self) -> &mut PageRequest {
        self.state.request_mut()
    }

    /// Fetch the page for the current request. Failures are notified and the
    /// previous rows stay.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.state.begin_fetch();
        let result = self.source.fetch_page(ticket.request()).await;
        let outcome = self.state.complete(ticket, result);
        if let FetchOutcome::Failed(err) = &outcome {
            self.notifier.error(&describe(err));
        }
        outcome
    }

    /// Apply a table event; refetch when it changed the request.
    pub async fn handle(&mut self, event: &TableEvent) -> Option<FetchOutcome> {
        if self.state.apply(event) {
            Some(self.refresh().await)
        } else {
            None
        }
    }

    pub fn view(&self, columns: &[Column<S::Row>]) -> TableView
    where
        S::Row: TableRow,
    {
        DataTable::render(
            columns,
            self.state.rows(),
            &self.state.pagination(),
            self.state.is_loading(),
        )
    }
}
