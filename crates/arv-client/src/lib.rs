//! Async HTTP client for the arv dashboard API.
//!
//! Implements [`arv_core::api::DashboardApi`] over JSON REST. Credential
//! handling is read-only: the bearer token is re-read from local disk at
//! each request and never written or refreshed here.

pub mod client;
pub mod credential;
pub mod error;

pub use client::{ApiClient, ApiConfig};
pub use credential::TokenFile;
pub use error::ClientError;
