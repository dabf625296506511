//! Bearer credential storage.
//!
//! The token lives in a plain file on local disk (written by the login
//! flow, which is not part of this client). It is re-read at each request
//! so an external refresh is picked up without restarting the dashboard.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TokenFile {
  path: PathBuf,
}

impl TokenFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// The stored token, trimmed. `None` when the file is missing or empty.
  pub fn read(&self) -> Option<String> {
    std::fs::read_to_string(&self.path)
      .ok()
      .map(|raw| raw.trim().to_string())
      .filter(|token| !token.is_empty())
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}
