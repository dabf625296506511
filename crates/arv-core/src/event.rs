//! Event wire types and identifier normalization.
//!
//! During the backend's identifier migration an event's primary key may
//! arrive under `_id` or `id`. Both names are collapsed into one canonical
//! field at the ingress boundary; past it the two never coexist.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── RawEvent ─────────────────────────────────────────────────────────────────

/// Wire shape of an event as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
  /// Backend-assigned identifier; preferred when present.
  #[serde(rename = "_id", default)]
  pub backend_id: Option<String>,
  #[serde(default)]
  pub id:         Option<String>,
  pub name:       String,
  #[serde(default)]
  pub date:       String,
  #[serde(default)]
  pub location:   String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category:   String,
  #[serde(rename = "createdBy", default)]
  pub created_by: Option<String>,
}

impl RawEvent {
  /// Collapse the two possible identifier fields into one canonical id,
  /// preferring the backend-assigned `_id`.
  pub fn normalize(self) -> Event {
    Event {
      id: self
        .backend_id
        .or(self.id)
        .filter(|id| !id.is_empty()),
      name: self.name,
      date: self.date,
      location: self.location,
      description: self.description,
      category: self.category,
      created_by: self.created_by,
    }
  }
}

// ─── Event ────────────────────────────────────────────────────────────────────

/// An event with a single canonical identifier.
///
/// `id` is `None` when the backend supplied neither identifier field; such
/// events still render but cannot be edited or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
  pub id:          Option<String>,
  pub name:        String,
  /// Unvalidated date string; the server owns the format.
  pub date:        String,
  pub location:    String,
  pub description: String,
  pub category:    String,
  pub created_by:  Option<String>,
}

impl Event {
  /// The canonical identifier, or an explicit error when unresolvable.
  ///
  /// Every mutation path goes through this; a missing identifier fails
  /// loudly rather than submitting an undefined id.
  pub fn require_id(&self) -> Result<&str> {
    self.id.as_deref().ok_or(Error::MissingEventId)
  }
}

// ─── NewEvent ─────────────────────────────────────────────────────────────────

/// The mutable create/edit draft. Has no identifier; becomes an [`Event`]
/// only after server acceptance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewEvent {
  pub name:        String,
  pub date:        String,
  pub location:    String,
  pub description: String,
  pub category:    String,
}

impl NewEvent {
  /// Draft pre-populated from an existing event, for edit mode.
  pub fn from_event(event: &Event) -> Self {
    Self {
      name:        event.name.clone(),
      date:        event.date.clone(),
      location:    event.location.clone(),
      description: event.description.clone(),
      category:    event.category.clone(),
    }
  }
}

// ─── EventRef ─────────────────────────────────────────────────────────────────

/// A reference to an event as accepted by delete: either a bare identifier
/// string or an object wrapping one under `_id`. Both normalize to the same
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
  Wrapped {
    #[serde(rename = "_id")]
    id: String,
  },
  Bare(String),
}

impl EventRef {
  pub fn into_id(self) -> String {
    match self {
      Self::Bare(id) | Self::Wrapped { id } => id,
    }
  }
}

impl From<&str> for EventRef {
  fn from(id: &str) -> Self {
    Self::Bare(id.to_string())
  }
}

impl From<String> for EventRef {
  fn from(id: String) -> Self {
    Self::Bare(id)
  }
}
