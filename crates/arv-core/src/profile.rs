//! Profile types and the partial-update body.
//!
//! The profile is server-owned. The view holds a read copy; every edit goes
//! through a [`ProfileUpdate`] and the local copy is replaced wholesale with
//! the server's response — there is no client-side merge.

use serde::{Deserialize, Serialize};

// ─── Post ─────────────────────────────────────────────────────────────────────

/// A post authored by the user. Read-only in the dashboard; creation is
/// delegated to the embedded post composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  #[serde(default)]
  pub id:           String,
  pub title:        String,
  #[serde(default)]
  pub content_type: String,
  #[serde(default)]
  pub created_at:   String,
}

// ─── UserProfile ──────────────────────────────────────────────────────────────

/// The server-owned profile record.
///
/// `bookmarks` is a set of heritage-item identifiers, rendered as an ordered
/// list. `interests` entries are unique server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  pub username:  String,
  pub email:     String,
  #[serde(default)]
  pub interests: Vec<String>,
  #[serde(default)]
  pub bookmarks: Vec<String>,
  #[serde(default)]
  pub posts:     Vec<Post>,
}

// ─── ProfileUpdate ────────────────────────────────────────────────────────────

/// A partial profile update. Only `Some` fields go on the wire; the server
/// merges them and responds with the full replacement profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub username:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub interests: Option<Vec<String>>,
}

impl ProfileUpdate {
  pub fn is_empty(&self) -> bool {
    self.username.is_none() && self.email.is_none() && self.interests.is_none()
  }

  /// An update carrying only a new interest list.
  pub fn interests(interests: Vec<String>) -> Self {
    Self {
      interests: Some(interests),
      ..Self::default()
    }
  }
}

// ─── Interest list arithmetic ─────────────────────────────────────────────────

/// The interest list with `interest` appended.
///
/// Duplicates are not filtered here; the server owns the set semantics.
pub fn with_interest(existing: &[String], interest: &str) -> Vec<String> {
  let mut interests = existing.to_vec();
  interests.push(interest.to_string());
  interests
}

/// The interest list with every occurrence of `interest` removed.
pub fn without_interest(existing: &[String], interest: &str) -> Vec<String> {
  existing
    .iter()
    .filter(|i| i.as_str() != interest)
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn add_then_remove_round_trips() {
    let original = strs(&["Music"]);
    let added = with_interest(&original, "Art");
    assert_eq!(added, strs(&["Music", "Art"]));
    assert_eq!(without_interest(&added, "Art"), original);
  }

  #[test]
  fn remove_drops_every_occurrence() {
    let interests = strs(&["Art", "Music", "Art"]);
    assert_eq!(without_interest(&interests, "Art"), strs(&["Music"]));
  }

  #[test]
  fn add_does_not_dedup() {
    // Server-side filtering is authoritative; the client submits as-is.
    let interests = strs(&["Music"]);
    assert_eq!(
      with_interest(&interests, "Music"),
      strs(&["Music", "Music"])
    );
  }

  #[test]
  fn partial_update_serialises_only_set_fields() {
    let update = ProfileUpdate::interests(strs(&["Music", "Art"]));
    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "interests": ["Music", "Art"] })
    );
  }

  #[test]
  fn profile_tolerates_missing_optional_lists() {
    let profile: UserProfile =
      serde_json::from_str(r#"{"username":"mira","email":"m@example.org"}"#)
        .unwrap();
    assert!(profile.interests.is_empty());
    assert!(profile.bookmarks.is_empty());
    assert!(profile.posts.is_empty());
  }
}
