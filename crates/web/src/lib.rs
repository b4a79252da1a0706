//! `purplepaw-web`
//!
//! **Responsibility:** the PurplePaw front-end. Route table, forms, list
//! views and notifications are plain Rust shared by two shells:
//!
//! - the browser app (Leptos, `wasm32` only) in [`frontend`]
//! - the `purplepaw` console binary, built on [`shell::Shell`]

pub mod config;
pub mod console;
pub mod forms;
pub mod layout;
pub mod login;
pub mod notify;
pub mod routes;
pub mod views;

#[cfg(not(target_arch = "wasm32"))]
pub mod shell;
#[cfg(not(target_arch = "wasm32"))]
pub mod storage_fs;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use config::{ClientConfig, ConfigError};
pub use layout::Layout;
pub use login::{AuthFlow, SubmitOutcome};
pub use notify::{Level, Notification, NotificationLog, Notifier};
pub use routes::{Navigation, Page, Router};

#[cfg(not(target_arch = "wasm32"))]
pub use shell::{Shell, ShellError};
#[cfg(not(target_arch = "wasm32"))]
pub use storage_fs::FileStorage;
