//! Error type for the HTTP client.

use thiserror::Error;

/// A failed dashboard API call. `Server` carries the backend's own message
/// string when one was returned, so toasts can surface it verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("{0}")]
  Server(String),

  #[error("no stored credential at {0}")]
  MissingCredential(String),
}
