//! The `DashboardApi` trait — the remote contract this view consumes.
//!
//! Implemented over HTTP by `arv-client`. Keeping the trait here leaves this
//! crate free of transport dependencies and lets the view state machine be
//! driven by an in-memory fake in tests.
//!
//! All methods return `Send` futures so the trait can be used from
//! multi-threaded async runtimes.

use std::future::Future;

use crate::{
  activity::Activity,
  event::{NewEvent, RawEvent},
  heritage::HeritageItem,
  profile::{ProfileUpdate, UserProfile},
};

pub trait DashboardApi: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Profile ───────────────────────────────────────────────────────────

  /// Fetch the authenticated user's profile.
  fn user_profile(
    &self,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + '_;

  /// Submit a partial update. The response is the full replacement profile
  /// and must be taken as-is; the client never merges.
  fn update_profile<'a>(
    &'a self,
    update: &'a ProfileUpdate,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + 'a;

  // ── Events ────────────────────────────────────────────────────────────

  /// Upcoming events in wire form; identifiers are normalized by the
  /// caller at ingress.
  fn upcoming_events(
    &self,
  ) -> impl Future<Output = Result<Vec<RawEvent>, Self::Error>> + Send + '_;

  fn create_event<'a>(
    &'a self,
    draft: &'a NewEvent,
  ) -> impl Future<Output = Result<RawEvent, Self::Error>> + Send + 'a;

  fn update_event<'a>(
    &'a self,
    id: &'a str,
    draft: &'a NewEvent,
  ) -> impl Future<Output = Result<RawEvent, Self::Error>> + Send + 'a;

  fn delete_event<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Activity ──────────────────────────────────────────────────────────

  fn recent_activities(
    &self,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + '_;

  // ── Bookmarks ─────────────────────────────────────────────────────────

  /// Resolved bookmark detail records. Requires a stored credential; its
  /// absence is an error the caller downgrades to the bare-id fallback.
  fn bookmarked_items(
    &self,
  ) -> impl Future<Output = Result<Vec<HeritageItem>, Self::Error>> + Send + '_;

  fn remove_bookmark<'a>(
    &'a self,
    item_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
