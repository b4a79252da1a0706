//! `purplepaw-table`
//!
//! Server-paginated list views.
//!
//! **Responsibility:** the paging/sorting/filtering request model, the
//! declarative column set, and the stateless table contract that turns
//! columns + the current page into a renderable [`TableView`] and relays
//! user interaction back as [`TableEvent`]s.
//!
//! The table never fetches. Each list view owns a [`ListState`] that holds
//! the request, applies table events to it and accepts the responses.

pub mod column;
pub mod debounce;
pub mod list;
pub mod pagination;
pub mod request;
pub mod view;

pub use column::{Cell, Column, ColumnKind, RowAction, TableRow, Tone};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer, Scheduler, TimerHandle};
pub use list::{FetchOutcome, FetchTicket, ListState};
pub use pagination::Pagination;
pub use request::{PageRequest, PageResult, SortConfig, SortDirection};
pub use view::{
    DataTable, EMPTY_TEXT, FilterInput, HeaderCell, LOADING_TEXT, NavButton, PageButton,
    PaginationControls, TableBody, TableEvent, TableHandler, TableView,
};

#[cfg(not(target_arch = "wasm32"))]
pub use debounce::{TokioScheduler, TokioTimer};
