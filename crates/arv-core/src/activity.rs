//! Activity log types and display dispatch.

use serde::Deserialize;

/// What the user did. Unknown wire values map to [`ActivityKind::Other`]
/// instead of failing the whole feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
  Bookmark,
  Comment,
  Share,
  #[serde(other)]
  Other,
}

impl ActivityKind {
  /// Fixed verb shown before the item name. `None` renders the item bare.
  pub fn verb(self) -> Option<&'static str> {
    match self {
      Self::Bookmark => Some("Bookmarked"),
      Self::Comment => Some("Commented on"),
      Self::Share => Some("Shared"),
      Self::Other => None,
    }
  }

  /// Single-cell glyph for the feed. `None` renders no icon.
  pub fn icon(self) -> Option<&'static str> {
    match self {
      Self::Bookmark => Some("♥"),
      Self::Comment => Some("🗨"),
      Self::Share => Some("↗"),
      Self::Other => None,
    }
  }
}

/// One entry in the read-only activity feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
  #[serde(default)]
  pub id:   String,
  #[serde(rename = "type")]
  pub kind: ActivityKind,
  pub item: String,
  #[serde(default)]
  pub date: String,
}
