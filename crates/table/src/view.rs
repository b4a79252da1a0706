//! The stateless data-table contract.
//!
//! [`DataTable::render`] is a pure function of its inputs (columns, current
//! rows, pagination, loading flag). User interaction is reported as
//! [`TableEvent`]s; what an event means for the request (sort toggling,
//! resetting the page on filter) is decided by the owning view.

use serde::Serialize;

use crate::column::{Cell, Column, TableRow};
use crate::pagination::Pagination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterInput {
    pub key: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
}

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No data available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum TableBody {
    /// A single row spanning all columns.
    Loading { colspan: usize },
    /// A single row spanning all columns.
    Empty { colspan: usize },
    Rows { rows: Vec<Vec<Cell>> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavButton {
    pub disabled: bool,
    /// Page requested when clicked; `None` when disabled.
    pub target: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub page: u32,
    pub label: String,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub summary: String,
    pub page_label: String,
    pub previous: NavButton,
    pub next: NavButton,
    pub pages: Vec<PageButton>,
}

/// Renderable table: everything a front-end needs, nothing it must compute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub filters: Vec<FilterInput>,
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
    pub pagination: PaginationControls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum TableEvent {
    PageChange { page: u32 },
    Sort { key: String },
    Filter { key: String, value: String },
    Action { action: String, row: usize },
}

/// Callbacks a list view implements to receive table events.
pub trait TableHandler {
    fn on_page_change(&mut self, page: u32);

    fn on_sort(&mut self, key: &str);

    fn on_filter(&mut self, key: &str, value: &str);

    fn on_action(&mut self, _action: &str, _row: usize) {}
}

pub struct DataTable;

impl DataTable {
    pub fn render<R: TableRow>(
        columns: &[Column<R>],
        rows: &[R],
        pagination: &Pagination,
        is_loading: bool,
    ) -> TableView {
        let filters = columns
            .iter()
            .filter(|c| c.filterable)
            .map(|c| FilterInput {
                key: c.key.clone(),
                placeholder: format!("Filter by {}", c.label),
            })
            .collect();

        let headers = columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key.clone(),
                label: c.label.clone(),
                sortable: c.sortable,
            })
            .collect();

        let colspan = columns.len();
        let body = if is_loading {
            TableBody::Loading { colspan }
        } else if rows.is_empty() {
            TableBody::Empty { colspan }
        } else {
            TableBody::Rows {
                rows: rows
                    .iter()
                    .map(|row| columns.iter().map(|c| c.cell(row)).collect())
                    .collect(),
            }
        };

        TableView {
            filters,
            headers,
            body,
            pagination: Self::controls(pagination),
        }
    }

    fn controls(pagination: &Pagination) -> PaginationControls {
        let previous_disabled = pagination.previous_disabled();
        let next_disabled = pagination.next_disabled();

        PaginationControls {
            summary: pagination.summary(),
            page_label: pagination.page_label(),
            previous: NavButton {
                disabled: previous_disabled,
                target: (!previous_disabled).then(|| pagination.page_number - 1),
            },
            next: NavButton {
                disabled: next_disabled,
                target: (!next_disabled).then(|| pagination.page_number + 1),
            },
            pages: pagination
                .page_window()
                .into_iter()
                .map(|page| PageButton {
                    page,
                    label: (page + 1).to_string(),
                    current: page == pagination.page_number,
                })
                .collect(),
        }
    }

    /// Relay an event to the owning view.
    pub fn dispatch<H: TableHandler + ?Sized>(handler: &mut H, event: &TableEvent) {
        match event {
            TableEvent::PageChange { page } => handler.on_page_change(*page),
            TableEvent::Sort { key } => handler.on_sort(key),
            TableEvent::Filter { key, value } => handler.on_filter(key, value),
            TableEvent::Action { action, row } => handler.on_action(action, *row),
        }
    }
}

impl TableBody {
    /// Text of the single spanning row, when there are no data rows.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            TableBody::Loading { .. } => Some(LOADING_TEXT),
            TableBody::Empty { .. } => Some(EMPTY_TEXT),
            TableBody::Rows { .. } => None,
        }
    }
}

impl TableView {
    pub fn previous_event(&self) -> Option<TableEvent> {
        self.pagination
            .previous
            .target
            .map(|page| TableEvent::PageChange { page })
    }

    pub fn next_event(&self) -> Option<TableEvent> {
        self.pagination
            .next
            .target
            .map(|page| TableEvent::PageChange { page })
    }

    /// Header click. `None` for non-sortable or unknown columns.
    pub fn sort_event(&self, key: &str) -> Option<TableEvent> {
        self.headers
            .iter()
            .find(|h| h.key == key && h.sortable)
            .map(|h| TableEvent::Sort { key: h.key.clone() })
    }

    /// Filter input change. `None` for columns without a filter input.
    pub fn filter_event(&self, key: &str, value: &str) -> Option<TableEvent> {
        self.filters
            .iter()
            .find(|f| f.key == key)
            .map(|f| TableEvent::Filter {
                key: f.key.clone(),
                value: value.to_string(),
            })
    }

    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows { rows } => rows.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::column::{RowAction, Tone};

    fn columns() -> Vec<Column<serde_json::Value>> {
        vec![
            Column::plain("name", "Name").sortable().filterable(),
            Column::plain("email", "Email").sortable(),
            Column::derived("status", "Status", |row: &serde_json::Value| {
                if row["active"].as_bool().unwrap_or(false) {
                    Cell::badge("Active", Tone::Success)
                } else {
                    Cell::badge("Inactive", Tone::Danger)
                }
            }),
            Column::actions("actions", "Actions", |_| {
                vec![RowAction::new("edit", "Edit", Tone::Info)]
            }),
        ]
    }

    fn pagination(page_number: u32, total_pages: u32) -> Pagination {
        Pagination {
            page_number,
            page_size: 10,
            total_elements: u64::from(total_pages) * 10,
            total_pages,
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl TableHandler for Recorder {
        fn on_page_change(&mut self, page: u32) {
            self.0.push(format!("page:{page}"));
        }
        fn on_sort(&mut self, key: &str) {
            self.0.push(format!("sort:{key}"));
        }
        fn on_filter(&mut self, key: &str, value: &str) {
            self.0.push(format!("filter:{key}={value}"));
        }
        fn on_action(&mut self, action: &str, row: usize) {
            self.0.push(format!("action:{action}@{row}"));
        }
    }

    #[test]
    fn headers_and_filter_inputs_follow_columns() {
        let view = DataTable::render(&columns(), &[], &pagination(0, 0), false);
        assert_eq!(view.headers.len(), 4);
        assert!(view.headers[0].sortable);
        assert!(!view.headers[2].sortable);
        assert_eq!(
            view.filters,
            vec![FilterInput {
                key: "name".to_string(),
                placeholder: "Filter by Name".to_string()
            }]
        );
    }

    #[test]
    fn loading_replaces_rows_with_single_spanning_row() {
        let rows = vec![json!({"name": "A"})];
        let view = DataTable::render(&columns(), &rows, &pagination(0, 1), true);
        assert_eq!(view.body, TableBody::Loading { colspan: 4 });
    }

    #[test]
    fn empty_result_shows_no_data_row() {
        let view = DataTable::render(&columns(), &[], &pagination(0, 0), false);
        assert_eq!(view.body, TableBody::Empty { colspan: 4 });
    }

    #[test]
    fn derived_cells_show_rendered_value_for_every_row() {
        let rows = vec![
            json!({"name": "A", "active": true}),
            json!({"name": "B", "active": false}),
        ];
        let view = DataTable::render(&columns(), &rows, &pagination(0, 1), false);

        let TableBody::Rows { rows } = &view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0][2], Cell::badge("Active", Tone::Success));
        assert_eq!(rows[1][2], Cell::badge("Inactive", Tone::Danger));
        assert_eq!(rows[0][3].to_string(), "[Edit]");
    }

    #[test]
    fn nav_buttons_reflect_boundaries() {
        let first = DataTable::render(&columns(), &[], &pagination(0, 3), false);
        assert!(first.pagination.previous.disabled);
        assert!(!first.pagination.next.disabled);
        assert_eq!(first.previous_event(), None);
        assert_eq!(first.next_event(), Some(TableEvent::PageChange { page: 1 }));

        let last = DataTable::render(&columns(), &[], &pagination(2, 3), false);
        assert!(last.pagination.next.disabled);
        assert_eq!(last.previous_event(), Some(TableEvent::PageChange { page: 1 }));
    }

    #[test]
    fn only_sortable_and_filterable_columns_emit_events() {
        let view = DataTable::render(&columns(), &[], &pagination(0, 1), false);
        assert!(view.sort_event("status").is_none());
        assert!(view.filter_event("email", "x").is_none());

        let mut recorder = Recorder::default();
        for event in [
            view.sort_event("email").unwrap(),
            view.filter_event("name", "ana").unwrap(),
            TableEvent::Action {
                action: "edit".to_string(),
                row: 0,
            },
        ] {
            DataTable::dispatch(&mut recorder, &event);
        }
        assert_eq!(recorder.0, vec!["sort:email", "filter:name=ana", "action:edit@0"]);
    }
}
