//! Client directory with a debounced name search.

use std::sync::Arc;
use std::time::Duration;

use purplepaw_api::SEARCH_KEY;
use purplepaw_api::models::UserRecord;
use purplepaw_table::{
    Cell, Column, Debouncer, PageRequest, RowAction, Scheduler, SortConfig, Tone,
};

pub const SELECT: &str = "select";

pub fn default_request(page_size: u32) -> PageRequest {
    PageRequest::new(page_size, SortConfig::ascending(SEARCH_KEY))
}

pub fn columns() -> Vec<Column<UserRecord>> {
    vec![
        Column::derived(SEARCH_KEY, "Name", |u: &UserRecord| Cell::text(u.full_name())).sortable(),
        Column::plain("email", "Email").sortable(),
        Column::plain("telefono", "Phone"),
        Column::actions("actions", "Actions", |_: &UserRecord| {
            vec![RowAction::new(SELECT, "Select", Tone::Accent)]
        }),
    ]
}

/// Search input: each keystroke restarts the timer; the term is delivered
/// once typing pauses.
pub struct SearchBox<S: Scheduler> {
    debouncer: Debouncer<S>,
    on_search: Arc<dyn Fn(String) + Send + Sync>,
}

impl<S: Scheduler> SearchBox<S> {
    pub fn new<F>(scheduler: S, delay: Duration, on_search: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        Self {
            debouncer: Debouncer::new(scheduler, delay),
            on_search: Arc::new(on_search),
        }
    }

    pub fn input(&mut self, term: &str) {
        let on_search = self.on_search.clone();
        let term = term.to_string();
        self.debouncer.call(move || on_search(term));
    }

    pub fn clear(&mut self) {
        self.debouncer.cancel();
        (self.on_search)(String::new());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::sync::Mutex;

    use purplepaw_table::{DEFAULT_DEBOUNCE, TokioScheduler};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn search_fires_once_after_typing_pauses() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut search = SearchBox::new(TokioScheduler, DEFAULT_DEBOUNCE, move |term| {
            sink.lock().unwrap().push(term)
        });

        search.input("l");
        tokio::time::sleep(Duration::from_millis(200)).await;
        search.input("lu");
        tokio::time::sleep(Duration::from_millis(200)).await;
        search.input("luna");
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(*seen.lock().unwrap(), vec!["luna".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_search() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut search = SearchBox::new(TokioScheduler, DEFAULT_DEBOUNCE, move |term| {
            sink.lock().unwrap().push(term)
        });

        search.input("lun");
        search.clear();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(*seen.lock().unwrap(), vec![String::new()]);
    }
}
