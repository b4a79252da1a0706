//! HTML rendering of a [`TableView`] and the list-page wiring around it.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;

use purplepaw_api::PageSource;
use purplepaw_table::{
    Cell, Column, DataTable, FetchOutcome, ListState, PageRequest, TableBody, TableEvent,
    TableRow, TableView, Tone,
};

use crate::notify::{Notifier, describe};

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "neutral",
        Tone::Success => "success",
        Tone::Warning => "warning",
        Tone::Danger => "danger",
        Tone::Info => "info",
        Tone::Accent => "accent",
    }
}

fn render_cell(cell: Cell, row: usize, on_event: Callback<TableEvent>) -> View {
    match cell {
        Cell::Empty => ().into_view(),
        Cell::Text { text } => text.into_view(),
        Cell::Badge { label, tone } => {
            view! { <span class=format!("badge {}", tone_class(tone))>{label}</span> }.into_view()
        }
        Cell::Actions { actions } => actions
            .into_iter()
            .map(|action| {
                let id = action.id.clone();
                view! {
                    <button
                        class=format!("action {}", tone_class(action.tone))
                        on:click=move |_| on_event.call(TableEvent::Action { action: id.clone(), row })
                    >
                        {action.label}
                    </button>
                }
            })
            .collect_view(),
    }
}

/// Stateless table: renders whatever `table` holds and reports interaction.
#[component]
pub fn Table(
    #[prop(into)] table: Signal<TableView>,
    #[prop(into)] on_event: Callback<TableEvent>,
) -> impl IntoView {
    // Filter inputs depend only on the column set; building them once keeps
    // typed text across re-renders.
    let filters = table
        .get_untracked()
        .filters
        .into_iter()
        .map(|filter| {
            let key = filter.key.clone();
            view! {
                <input
                    type="text"
                    placeholder=filter.placeholder
                    on:input=move |ev| on_event.call(TableEvent::Filter {
                        key: key.clone(),
                        value: event_target_value(&ev),
                    })
                />
            }
        })
        .collect_view();

    let body = move || {
        let current = table.get();
        let pagination = current.pagination;

        let headers = current
            .headers
            .into_iter()
            .map(|header| {
                if header.sortable {
                    let key = header.key.clone();
                    view! {
                        <th class="sortable" on:click=move |_| on_event.call(TableEvent::Sort { key: key.clone() })>
                            {header.label}
                        </th>
                    }
                } else {
                    view! { <th>{header.label}</th> }
                }
            })
            .collect_view();

        let placeholder = current.body.placeholder();
        let rows = match current.body {
            TableBody::Loading { colspan } | TableBody::Empty { colspan } => view! {
                <tr><td colspan=colspan class="placeholder">{placeholder}</td></tr>
            }
            .into_view(),
            TableBody::Rows { rows } => rows
                .into_iter()
                .enumerate()
                .map(|(index, cells)| {
                    view! {
                        <tr>
                            {cells
                                .into_iter()
                                .map(|cell| view! { <td>{render_cell(cell, index, on_event)}</td> })
                                .collect_view()}
                        </tr>
                    }
                })
                .collect_view(),
        };

        let previous = pagination.previous;
        let next = pagination.next;
        let pages = pagination
            .pages
            .into_iter()
            .map(|button| {
                let page = button.page;
                view! {
                    <button
                        class:current=button.current
                        on:click=move |_| on_event.call(TableEvent::PageChange { page })
                    >
                        {button.label}
                    </button>
                }
            })
            .collect_view();

        view! {
            <table>
                <thead><tr>{headers}</tr></thead>
                <tbody>{rows}</tbody>
            </table>
            <div class="pagination">
                <span class="summary">{pagination.summary}</span>
                <span class="page-label">{pagination.page_label}</span>
                <button
                    disabled=previous.disabled
                    on:click=move |_| {
                        if let Some(page) = previous.target {
                            on_event.call(TableEvent::PageChange { page });
                        }
                    }
                >
                    "Previous"
                </button>
                {pages}
                <button
                    disabled=next.disabled
                    on:click=move |_| {
                        if let Some(page) = next.target {
                            on_event.call(TableEvent::PageChange { page });
                        }
                    }
                >
                    "Next"
                </button>
            </div>
        }
    };

    view! {
        <div class="data-table">
            <div class="filters">{filters}</div>
            {body}
        </div>
    }
}

/// Handle to a mounted list: refetch, or feed it table events from outside.
#[derive(Clone)]
pub struct ListHandle {
    refetch: Rc<dyn Fn()>,
    events: Rc<dyn Fn(TableEvent)>,
}

impl ListHandle {
    pub fn refetch(&self) {
        (self.refetch)()
    }

    pub fn send(&self, event: TableEvent) {
        (self.events)(event)
    }
}

/// A mounted list: its markup, a handle for outside events, and the rows of
/// the last applied page.
pub struct MountedList<R: 'static> {
    pub view: View,
    pub handle: ListHandle,
    pub rows: Signal<Vec<R>>,
}

/// Row actions that do not change the request. Receives the action id, the
/// row it was clicked on, and a callback that refreshes the list.
pub type ActionHandler<R> = Rc<dyn Fn(&str, R, Rc<dyn Fn()>)>;

/// Mount a server-paginated list. The request lives here; the table only
/// reports events. Overlapping fetches resolve last-request-wins.
pub fn list_view<S>(
    source: S,
    request: PageRequest,
    columns: Vec<Column<S::Row>>,
    notifier: Rc<dyn Notifier>,
    on_action: Option<ActionHandler<S::Row>>,
) -> MountedList<S::Row>
where
    S: PageSource + 'static,
    S::Row: TableRow + Clone + 'static,
{
    let source = Rc::new(source);
    let state = Rc::new(RefCell::new(ListState::<S::Row>::new(request)));
    let version = create_rw_signal(0u64);

    let refetch: Rc<dyn Fn()> = {
        let state = state.clone();
        Rc::new(move || {
            let ticket = state.borrow_mut().begin_fetch();
            version.update(|v| *v += 1);

            let source = source.clone();
            let state = state.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                let result = source.fetch_page(ticket.request()).await;
                let outcome = state.borrow_mut().complete(ticket, result);
                if let FetchOutcome::Failed(err) = &outcome {
                    notifier.error(&describe(err));
                }
                version.update(|v| *v += 1);
            });
        })
    };

    let events: Rc<dyn Fn(TableEvent)> = {
        let state = state.clone();
        let refetch = refetch.clone();
        Rc::new(move |event: TableEvent| {
            if let TableEvent::Action { action, row } = &event {
                let target = state.borrow().rows().get(*row).cloned();
                if let (Some(on_action), Some(target)) = (&on_action, target) {
                    on_action(action, target, refetch.clone());
                }
                return;
            }
            let changed = state.borrow_mut().apply(&event);
            if changed {
                refetch();
            }
        })
    };

    let handle = ListHandle {
        refetch: refetch.clone(),
        events: events.clone(),
    };
    refetch();

    let rows = {
        let state = state.clone();
        Signal::derive(move || {
            let _ = version.get();
            state.borrow().rows().to_vec()
        })
    };
    let table_view = Signal::derive(move || {
        let _ = version.get();
        let state = state.borrow();
        DataTable::render(&columns, state.rows(), &state.pagination(), state.is_loading())
    });
    let on_event = Callback::new(move |event: TableEvent| events(event));

    MountedList {
        view: view! { <Table table=table_view on_event=on_event/> }.into_view(),
        handle,
        rows,
    }
}
