//! Core types and trait definitions for the campus posts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage backend and the API layer both depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod messages;
pub mod model;
pub mod store;
pub mod submission;
pub mod view;

pub use error::{Error, Result};
pub use messages::{Locale, Message};
