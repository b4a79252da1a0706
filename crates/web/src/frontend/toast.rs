//! Toast notifications.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::*;

use crate::notify::{Level, Notification, Notifier, TOAST_LIFETIME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Shared toast list. Each toast removes itself after [`TOAST_LIFETIME`].
#[derive(Clone)]
pub struct Toasts {
    entries: RwSignal<Vec<Toast>>,
    next_id: Arc<AtomicU64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            entries: create_rw_signal(Vec::new()),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn entries(&self) -> RwSignal<Vec<Toast>> {
        self.entries
    }

    pub fn dismiss(&self, id: u64) {
        self.entries.update(|t| t.retain(|toast| toast.id != id));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for Toasts {
    fn notify(&self, notification: Notification) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.update(|t| t.push(Toast { id, notification }));

        let entries = self.entries;
        set_timeout(
            move || entries.update(|t| t.retain(|toast| toast.id != id)),
            TOAST_LIFETIME,
        );
    }
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Success => "toast success",
        Level::Error => "toast error",
        Level::Info => "toast info",
    }
}

#[component]
pub fn ToastList() -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let entries = toasts.entries();

    view! {
        <div class="toasts">
            <For
                each=move || entries.get()
                key=|toast| toast.id
                children=move |toast| {
                    let toasts = toasts.clone();
                    let id = toast.id;
                    view! {
                        <div class=level_class(toast.notification.level) on:click=move |_| toasts.dismiss(id)>
                            {toast.notification.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
