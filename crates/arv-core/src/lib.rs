//! Core types and the API contract for the arv dashboard.
//!
//! This crate is deliberately free of HTTP and UI dependencies. The client
//! and TUI crates depend on it; it depends on nothing heavier than serde.

pub mod activity;
pub mod api;
pub mod error;
pub mod event;
pub mod heritage;
pub mod profile;

pub use error::{Error, Result};
