//! Error types for `arv-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("event has no resolvable identifier")]
  MissingEventId,

  #[error("interest must not be empty")]
  EmptyInterest,

  #[error("no profile loaded")]
  NoProfile,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
