//! `purplepaw-core`
//!
//! Shared building blocks for the clinic client.
//!
//! This crate has no IO: it holds the error taxonomy every layer reports in
//! and the identifier types that travel between them.

pub mod error;
pub mod id;

pub use error::{ApiError, ClientResult, ErrorCode};
pub use id::UserId;
