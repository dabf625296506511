//! Heritage catalog records and the bookmark render policy.

use serde::Deserialize;

/// A resolved bookmark detail record from the heritage catalog.
///
/// Joined to `UserProfile::bookmarks` by title equality; the catalog does
/// not yet return a stable identifier in both places.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeritageItem {
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category:    String,
  #[serde(default)]
  pub image_src:   String,
  #[serde(default)]
  pub href:        String,
}

/// One row of the bookmark panel.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkRow<'a> {
  /// Rich row backed by a resolved catalog record; keyed by title.
  Detailed(&'a HeritageItem),
  /// Fallback row showing the raw identifier from the profile.
  Bare(&'a str),
}

impl BookmarkRow<'_> {
  /// The key submitted to the remove-bookmark endpoint for this row.
  ///
  /// In the rich path this is the item title, not a stable id; two catalog
  /// items sharing a title would collide.
  pub fn removal_key(&self) -> &str {
    match self {
      Self::Detailed(item) => &item.title,
      Self::Bare(id) => id,
    }
  }

  pub fn title(&self) -> &str {
    match self {
      Self::Detailed(item) => &item.title,
      Self::Bare(id) => id,
    }
  }
}

/// Rows for the bookmark panel: resolved detail records when any exist,
/// otherwise the profile's raw identifiers.
pub fn bookmark_rows<'a>(
  bookmarks: &'a [String],
  details: &'a [HeritageItem],
) -> Vec<BookmarkRow<'a>> {
  if !details.is_empty() {
    details.iter().map(BookmarkRow::Detailed).collect()
  } else {
    bookmarks
      .iter()
      .map(|id| BookmarkRow::Bare(id.as_str()))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn item(title: &str) -> HeritageItem {
    HeritageItem {
      title:       title.into(),
      description: "desc".into(),
      category:    "Architecture".into(),
      image_src:   "/img.jpg".into(),
      href:        "/items/x".into(),
    }
  }

  #[test]
  fn prefers_detail_records_when_present() {
    let bookmarks = vec!["item1".to_string()];
    let details = vec![item("Stave Church")];
    let rows = bookmark_rows(&bookmarks, &details);
    assert_eq!(rows, vec![BookmarkRow::Detailed(&details[0])]);
    assert_eq!(rows[0].removal_key(), "Stave Church");
  }

  #[test]
  fn falls_back_to_bare_identifiers() {
    let bookmarks = vec!["item1".to_string(), "item2".to_string()];
    let rows = bookmark_rows(&bookmarks, &[]);
    assert_eq!(
      rows,
      vec![BookmarkRow::Bare("item1"), BookmarkRow::Bare("item2")]
    );
    assert_eq!(rows[0].removal_key(), "item1");
  }

  #[test]
  fn no_bookmarks_no_rows() {
    assert!(bookmark_rows(&[], &[]).is_empty());
  }
}
