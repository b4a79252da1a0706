//! Search debouncing: a keystroke schedules the action, the next keystroke
//! within the delay cancels it.

use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A pending delayed task.
pub trait TimerHandle: Send {
    fn cancel(self: Box<Self>);
}

/// Runs a task after a delay. The native build uses tokio; the browser build
/// plugs in `setTimeout`.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle>;
}

pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    pending: Option<Box<dyn TimerHandle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending task with `task`.
    pub fn call<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(self.scheduler.schedule(self.delay, Box::new(task)));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

impl<S: Scheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use self::native::{TokioScheduler, TokioTimer};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;

    /// Spawns onto the current tokio runtime.
    #[derive(Debug, Clone, Default)]
    pub struct TokioScheduler;

    pub struct TokioTimer(tokio::task::JoinHandle<()>);

    impl TimerHandle for TokioTimer {
        fn cancel(self: Box<Self>) {
            self.0.abort();
        }
    }

    impl Scheduler for TokioScheduler {
        fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle> {
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                task();
            });
            Box::new(TokioTimer(handle))
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Task) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let make = move |term: &str| -> Task {
            let sink = sink.clone();
            let term = term.to_string();
            Box::new(move || sink.lock().unwrap().push(term))
        };
        (log, make)
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_keystroke_fires() {
        let (log, make) = recorder();
        let mut debouncer = Debouncer::new(TokioScheduler, DEFAULT_DEBOUNCE);

        for term in ["m", "ma", "max"] {
            debouncer.call(make(term));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(*log.lock().unwrap(), vec!["max".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_fire() {
        let (log, make) = recorder();
        let mut debouncer = Debouncer::new(TokioScheduler, DEFAULT_DEBOUNCE);

        debouncer.call(make("ana"));
        tokio::time::sleep(Duration::from_millis(700)).await;
        debouncer.call(make("luis"));
        tokio::time::sleep(Duration::from_millis(700)).await;

        assert_eq!(*log.lock().unwrap(), vec!["ana".to_string(), "luis".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_delay() {
        let (log, make) = recorder();
        let mut debouncer = Debouncer::new(TokioScheduler, DEFAULT_DEBOUNCE);

        debouncer.call(make("x"));
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_pending_task() {
        let (log, make) = recorder();
        {
            let mut debouncer = Debouncer::new(TokioScheduler, DEFAULT_DEBOUNCE);
            debouncer.call(make("gone"));
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(log.lock().unwrap().is_empty());
    }
}
