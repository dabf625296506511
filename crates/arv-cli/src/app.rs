//! Dashboard view state machine.
//!
//! All remote state is canonical: every mutation submits, then re-fetches
//! rather than patching local copies optimistically. Failures never leave
//! this module — each operation boundary reduces them to a toast plus a
//! tracing diagnostic.

use std::{collections::VecDeque, sync::Arc};

use arv_core::{
  Error,
  activity::Activity,
  api::DashboardApi,
  event::{Event, EventRef, NewEvent},
  heritage::{BookmarkRow, HeritageItem, bookmark_rows},
  profile::{self, ProfileUpdate, UserProfile},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error};

use crate::post_form::PostForm;

// ─── Tabs ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
  Profile,
  Events,
  Bookmarks,
  Activity,
  Posts,
}

impl Tab {
  pub const ALL: [Tab; 5] = [
    Tab::Profile,
    Tab::Events,
    Tab::Bookmarks,
    Tab::Activity,
    Tab::Posts,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Tab::Profile => "Profile",
      Tab::Events => "Events",
      Tab::Bookmarks => "Bookmarks",
      Tab::Activity => "Activity",
      Tab::Posts => "Posts",
    }
  }

  fn next(self) -> Self {
    let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
    Self::ALL[(i + 1) % Self::ALL.len()]
  }

  fn prev(self) -> Self {
    let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
    Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

// ─── Toasts ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
  Success,
  Info,
  Error,
}

/// A short-lived notification shown in the status bar.
#[derive(Debug, Clone)]
pub struct Toast {
  pub level:   ToastLevel,
  pub message: String,
  /// Remaining event-loop ticks before the toast expires.
  ticks: u16,
}

const TOAST_TICKS: u16 = 80;

// ─── Profile pane state ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
  Username,
  Email,
}

/// Profile pane mode. `Editing` accumulates a partial-update draft; server
/// state is untouched until Save.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileMode {
  Viewing,
  Editing {
    draft: ProfileUpdate,
    field: ProfileField,
  },
}

// ─── Event dialog state ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
  Name,
  Date,
  Location,
  Category,
  Description,
}

impl EventField {
  pub const ALL: [EventField; 5] = [
    EventField::Name,
    EventField::Date,
    EventField::Location,
    EventField::Category,
    EventField::Description,
  ];

  pub fn label(self) -> &'static str {
    match self {
      EventField::Name => "Name",
      EventField::Date => "Date",
      EventField::Location => "Location",
      EventField::Category => "Category",
      EventField::Description => "Description",
    }
  }

  pub fn slot(self, draft: &mut NewEvent) -> &mut String {
    match self {
      EventField::Name => &mut draft.name,
      EventField::Date => &mut draft.date,
      EventField::Location => &mut draft.location,
      EventField::Category => &mut draft.category,
      EventField::Description => &mut draft.description,
    }
  }

  pub fn value(self, draft: &NewEvent) -> &str {
    match self {
      EventField::Name => &draft.name,
      EventField::Date => &draft.date,
      EventField::Location => &draft.location,
      EventField::Category => &draft.category,
      EventField::Description => &draft.description,
    }
  }

  fn next(self) -> Self {
    let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
    Self::ALL[(i + 1) % Self::ALL.len()]
  }

  fn prev(self) -> Self {
    let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
    Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventMode {
  Create,
  Edit { event_id: String },
}

/// Create/edit dialog. One shared draft regardless of mode; `Closed` drops
/// the draft, so opening create always starts from empty fields.
#[derive(Debug, Clone, PartialEq)]
pub enum EventDialog {
  Closed,
  Open {
    mode:  EventMode,
    draft: NewEvent,
    field: EventField,
  },
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level dashboard state, generic over the API so tests can drive it
/// with an in-memory fake.
pub struct App<A: DashboardApi> {
  pub tab: Tab,

  /// True only during the initial combined load. Mutations never set it;
  /// they surface nothing until their re-fetch lands.
  pub loading: bool,

  /// Server-held profile copy. `None` until the first successful load.
  pub profile: Option<UserProfile>,

  /// Upcoming events, identifier-normalized at ingress.
  pub events: Vec<Event>,

  pub activities: Vec<Activity>,

  /// Resolved bookmark detail records; empty when the independent detail
  /// fetch failed or returned nothing.
  pub bookmarked: Vec<HeritageItem>,

  pub profile_mode: ProfileMode,

  /// Add-interest input; `Some` while the input is open.
  pub interest_input: Option<String>,
  pub interest_cursor: usize,

  pub event_dialog: EventDialog,
  pub event_cursor: usize,

  pub bookmark_cursor: usize,
  pub activity_scroll: usize,
  pub post_cursor: usize,

  /// Embedded post composer. The dashboard hosts it but does not own its
  /// contract; keys are forwarded while it has focus.
  pub post_form: PostForm,
  pub compose_active: bool,

  pub toasts: VecDeque<Toast>,

  pub api: Arc<A>,
}

impl<A: DashboardApi> App<A> {
  pub fn new(api: A) -> Self {
    Self {
      tab: Tab::Profile,
      loading: true,
      profile: None,
      events: Vec::new(),
      activities: Vec::new(),
      bookmarked: Vec::new(),
      profile_mode: ProfileMode::Viewing,
      interest_input: None,
      interest_cursor: 0,
      event_dialog: EventDialog::Closed,
      event_cursor: 0,
      bookmark_cursor: 0,
      activity_scroll: 0,
      post_cursor: 0,
      post_form: PostForm::new(),
      compose_active: false,
      toasts: VecDeque::new(),
      api: Arc::new(api),
    }
  }

  // ── Toasts ────────────────────────────────────────────────────────────────

  fn push_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
    self.toasts.push_back(Toast {
      level,
      message: message.into(),
      ticks: TOAST_TICKS,
    });
  }

  fn success(&mut self, message: impl Into<String>) {
    self.push_toast(ToastLevel::Success, message);
  }

  fn info(&mut self, message: impl Into<String>) {
    self.push_toast(ToastLevel::Info, message);
  }

  fn fail(&mut self, message: impl Into<String>) {
    self.push_toast(ToastLevel::Error, message);
  }

  /// Advance toast lifetimes; called once per event-loop tick.
  pub fn tick(&mut self) {
    if let Some(front) = self.toasts.front_mut() {
      front.ticks = front.ticks.saturating_sub(1);
      if front.ticks == 0 {
        self.toasts.pop_front();
      }
    }
  }

  pub fn current_toast(&self) -> Option<&Toast> {
    self.toasts.front()
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Initial combined load: the only path that shows the full-screen
  /// loading indicator.
  pub async fn initial_load(&mut self) {
    self.loading = true;
    self.load_dashboard().await;
    self.load_bookmarked().await;
    self.loading = false;
  }

  /// Fetch profile, upcoming events, and recent activities concurrently.
  ///
  /// All-or-nothing: state is replaced only when all three succeed,
  /// otherwise the first failure is toasted and prior state stays (empty
  /// lists on the initial load).
  pub async fn load_dashboard(&mut self) {
    let (profile, events, activities) = tokio::join!(
      self.api.user_profile(),
      self.api.upcoming_events(),
      self.api.recent_activities(),
    );

    match (profile, events, activities) {
      (Ok(profile), Ok(events), Ok(activities)) => {
        self.profile = Some(profile);
        // Identifiers are normalized here and nowhere else.
        self.events = events.into_iter().map(|e| e.normalize()).collect();
        self.activities = activities;
        self.clamp_cursors();
      }
      (profile, events, activities) => {
        let message = profile
          .err()
          .map(|e| e.to_string())
          .or_else(|| events.err().map(|e| e.to_string()))
          .or_else(|| activities.err().map(|e| e.to_string()))
          .unwrap_or_else(|| "failed to fetch dashboard data".to_string());
        error!(error = %message, "dashboard fetch failed");
        self.fail(message);
      }
    }
  }

  /// Fetch resolved bookmark details. Independent of the dashboard fetch;
  /// failure is logged but never surfaced — the panel falls back to bare
  /// identifier rows.
  pub async fn load_bookmarked(&mut self) {
    match self.api.bookmarked_items().await {
      Ok(items) => {
        self.bookmarked = items;
        self.clamp_cursors();
      }
      Err(e) => debug!(error = %e, "bookmark detail fetch failed"),
    }
  }

  fn clamp_cursors(&mut self) {
    self.event_cursor = self.event_cursor.min(self.events.len().saturating_sub(1));
    let rows = self.bookmark_rows().len();
    self.bookmark_cursor = self.bookmark_cursor.min(rows.saturating_sub(1));
    let interests = self
      .profile
      .as_ref()
      .map(|p| p.interests.len())
      .unwrap_or(0);
    self.interest_cursor = self.interest_cursor.min(interests.saturating_sub(1));
  }

  // ── Profile editor ────────────────────────────────────────────────────────

  pub fn start_editing(&mut self) {
    if self.profile.is_none() {
      self.fail(Error::NoProfile.to_string());
      return;
    }
    self.profile_mode = ProfileMode::Editing {
      draft: ProfileUpdate::default(),
      field: ProfileField::Username,
    };
  }

  /// Discard the draft and return to viewing. No request is issued.
  pub fn cancel_editing(&mut self) {
    self.profile_mode = ProfileMode::Viewing;
  }

  /// Submit the draft as a partial update and replace the local profile
  /// with the server's response exactly. On failure the editor stays open
  /// with the draft intact — server state was never touched, so there is
  /// nothing to roll back.
  pub async fn save_profile(&mut self) {
    if self.profile.is_none() {
      self.fail(Error::NoProfile.to_string());
      return;
    }
    let ProfileMode::Editing { draft, .. } = &self.profile_mode else {
      return;
    };
    let draft = draft.clone();

    match self.api.update_profile(&draft).await {
      Ok(profile) => {
        self.profile = Some(profile);
        self.profile_mode = ProfileMode::Viewing;
        self.success("Profile updated");
      }
      Err(e) => {
        error!(error = %e, "profile update failed");
        self.fail(e.to_string());
      }
    }
  }

  /// The value shown for a profile field: draft when touched, server value
  /// otherwise.
  pub fn profile_display(&self, field: ProfileField) -> &str {
    let server = self.profile.as_ref();
    let draft = match &self.profile_mode {
      ProfileMode::Editing { draft, .. } => Some(draft),
      ProfileMode::Viewing => None,
    };
    match field {
      ProfileField::Username => draft
        .and_then(|d| d.username.as_deref())
        .or(server.map(|p| p.username.as_str()))
        .unwrap_or(""),
      ProfileField::Email => draft
        .and_then(|d| d.email.as_deref())
        .or(server.map(|p| p.email.as_str()))
        .unwrap_or(""),
    }
  }

  /// Type into the focused profile field. The draft slot is seeded from
  /// the server value on first touch so the update stays partial.
  fn profile_draft_char(&mut self, c: char) {
    let Some(profile) = &self.profile else { return };
    let (username, email) = (profile.username.clone(), profile.email.clone());
    if let ProfileMode::Editing { draft, field } = &mut self.profile_mode {
      let (slot, seed) = match field {
        ProfileField::Username => (&mut draft.username, username),
        ProfileField::Email => (&mut draft.email, email),
      };
      slot.get_or_insert_with(|| seed).push(c);
    }
  }

  fn profile_draft_backspace(&mut self) {
    let Some(profile) = &self.profile else { return };
    let (username, email) = (profile.username.clone(), profile.email.clone());
    if let ProfileMode::Editing { draft, field } = &mut self.profile_mode {
      let (slot, seed) = match field {
        ProfileField::Username => (&mut draft.username, username),
        ProfileField::Email => (&mut draft.email, email),
      };
      slot.get_or_insert_with(|| seed).pop();
    }
  }

  // ── Interest list editor ──────────────────────────────────────────────────

  pub fn open_interest_input(&mut self) {
    self.interest_input = Some(String::new());
  }

  /// Submit the open interest input as existing-plus-new. Duplicates are
  /// not filtered client-side; the server owns the set.
  pub async fn add_interest(&mut self) {
    let Some(input) = self.interest_input.clone() else {
      return;
    };
    let interest = input.trim().to_string();
    if interest.is_empty() {
      self.fail(Error::EmptyInterest.to_string());
      return;
    }
    let Some(profile) = &self.profile else {
      self.fail(Error::NoProfile.to_string());
      return;
    };

    let update =
      ProfileUpdate::interests(profile::with_interest(&profile.interests, &interest));
    match self.api.update_profile(&update).await {
      Ok(profile) => {
        self.profile = Some(profile);
        self.interest_input = None;
        self.success("Interest added");
      }
      Err(e) => {
        error!(error = %e, "adding interest failed");
        self.fail(e.to_string());
      }
    }
  }

  /// Remove the interest under the cursor: existing-minus-one, submitted
  /// as a partial update. No optimistic removal before the server confirms.
  pub async fn remove_interest(&mut self) {
    let Some(profile) = &self.profile else {
      self.fail(Error::NoProfile.to_string());
      return;
    };
    let Some(interest) = profile.interests.get(self.interest_cursor).cloned() else {
      return;
    };

    let update =
      ProfileUpdate::interests(profile::without_interest(&profile.interests, &interest));
    match self.api.update_profile(&update).await {
      Ok(profile) => {
        self.profile = Some(profile);
        self.clamp_cursors();
        self.success("Interest removed");
      }
      Err(e) => {
        error!(error = %e, "removing interest failed");
        self.fail(e.to_string());
      }
    }
  }

  // ── Event manager ─────────────────────────────────────────────────────────

  /// Open the dialog in create mode with a fresh, empty draft.
  pub fn open_create_dialog(&mut self) {
    self.event_dialog = EventDialog::Open {
      mode:  EventMode::Create,
      draft: NewEvent::default(),
      field: EventField::Name,
    };
  }

  /// Open the dialog in edit mode for the event under the cursor, copying
  /// its fields into the draft. An event with no resolvable identifier
  /// cannot enter edit mode.
  pub fn open_edit_dialog(&mut self) {
    let Some(event) = self.events.get(self.event_cursor).cloned() else {
      return;
    };
    match event.require_id() {
      Ok(id) => {
        self.event_dialog = EventDialog::Open {
          mode:  EventMode::Edit {
            event_id: id.to_string(),
          },
          draft: NewEvent::from_event(&event),
          field: EventField::Name,
        };
      }
      Err(e) => {
        error!(error = %e, "edit requested for event without identifier");
        self.fail(e.to_string());
      }
    }
  }

  pub fn close_event_dialog(&mut self) {
    self.event_dialog = EventDialog::Closed;
  }

  /// Submit the dialog draft: create or update-by-identifier depending on
  /// mode. Success closes the dialog, drops the draft, and re-fetches
  /// canonical state; failure leaves the dialog open with the draft intact.
  pub async fn submit_event_dialog(&mut self) {
    let EventDialog::Open { mode, draft, .. } = &self.event_dialog else {
      return;
    };
    let (mode, draft) = (mode.clone(), draft.clone());

    let result = match &mode {
      EventMode::Create => self
        .api
        .create_event(&draft)
        .await
        .map(|_| "Event created"),
      EventMode::Edit { event_id } => self
        .api
        .update_event(event_id, &draft)
        .await
        .map(|_| "Event updated"),
    };

    match result {
      Ok(message) => {
        self.event_dialog = EventDialog::Closed;
        self.load_dashboard().await;
        self.success(message);
      }
      Err(e) => {
        error!(error = %e, "event submit failed");
        self.fail(e.to_string());
      }
    }
  }

  /// Delete by reference — a bare identifier or an `_id`-wrapped object
  /// both normalize to the same request. Executes immediately; there is no
  /// confirmation step. On success the event list is re-fetched.
  pub async fn delete_event(&mut self, target: EventRef) {
    let id = target.into_id();
    if id.is_empty() {
      self.fail(Error::MissingEventId.to_string());
      return;
    }

    match self.api.delete_event(&id).await {
      Ok(()) => {
        self.load_dashboard().await;
        self.success("Event deleted");
      }
      Err(e) => {
        error!(error = %e, event_id = %id, "event delete failed");
        self.fail(e.to_string());
      }
    }
  }

  async fn delete_event_under_cursor(&mut self) {
    let Some(event) = self.events.get(self.event_cursor).cloned() else {
      return;
    };
    match event.require_id() {
      Ok(id) => {
        let target = EventRef::from(id);
        self.delete_event(target).await;
      }
      Err(e) => {
        error!(error = %e, "delete requested for event without identifier");
        self.fail(e.to_string());
      }
    }
  }

  fn event_draft_char(&mut self, c: char) {
    if let EventDialog::Open { draft, field, .. } = &mut self.event_dialog {
      field.slot(draft).push(c);
    }
  }

  fn event_draft_backspace(&mut self) {
    if let EventDialog::Open { draft, field, .. } = &mut self.event_dialog {
      field.slot(draft).pop();
    }
  }

  // ── Bookmark panel ────────────────────────────────────────────────────────

  /// Current bookmark rows under the render policy: detail records when
  /// resolved, bare profile identifiers otherwise.
  pub fn bookmark_rows(&self) -> Vec<BookmarkRow<'_>> {
    let bookmarks = self
      .profile
      .as_ref()
      .map(|p| p.bookmarks.as_slice())
      .unwrap_or_default();
    bookmark_rows(bookmarks, &self.bookmarked)
  }

  /// Remove the bookmark under the cursor. On success both the dashboard
  /// data and the detail set are re-fetched — partial state from either
  /// alone would desynchronize the list from the title join.
  pub async fn remove_bookmark(&mut self) {
    let Some(key) = self
      .bookmark_rows()
      .get(self.bookmark_cursor)
      .map(|row| row.removal_key().to_string())
    else {
      return;
    };

    match self.api.remove_bookmark(&key).await {
      Ok(()) => {
        self.load_dashboard().await;
        self.load_bookmarked().await;
        self.success("Bookmark removed");
      }
      Err(e) => {
        error!(error = %e, item = %key, "bookmark removal failed");
        self.fail(e.to_string());
      }
    }
  }

  // ── Post panel ────────────────────────────────────────────────────────────

  /// Per-post Edit/Delete controls exist but are deliberately unwired; the
  /// backend contract for them is not defined yet.
  pub fn post_action_stub(&mut self) {
    self.info("Post editing is not available yet");
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Modal surfaces take precedence over tab-level keys.
    if matches!(self.event_dialog, EventDialog::Open { .. }) {
      self.handle_event_dialog_key(key).await;
      return true;
    }
    if self.interest_input.is_some() {
      self.handle_interest_key(key).await;
      return true;
    }
    if matches!(self.profile_mode, ProfileMode::Editing { .. }) {
      self.handle_profile_edit_key(key).await;
      return true;
    }
    if self.compose_active {
      if !self.post_form.handle_key(key) {
        self.compose_active = false;
      }
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab => self.tab = self.tab.next(),
      KeyCode::BackTab => self.tab = self.tab.prev(),
      KeyCode::Char('1') => self.tab = Tab::Profile,
      KeyCode::Char('2') => self.tab = Tab::Events,
      KeyCode::Char('3') => self.tab = Tab::Bookmarks,
      KeyCode::Char('4') => self.tab = Tab::Activity,
      KeyCode::Char('5') => self.tab = Tab::Posts,
      KeyCode::Char('r') => {
        self.load_dashboard().await;
        self.load_bookmarked().await;
      }
      _ => self.handle_tab_key(key).await,
    }
    true
  }

  async fn handle_tab_key(&mut self, key: KeyEvent) {
    match self.tab {
      Tab::Profile => match key.code {
        KeyCode::Char('e') => self.start_editing(),
        KeyCode::Char('a') => self.open_interest_input(),
        KeyCode::Down | KeyCode::Char('j') => {
          let len = self
            .profile
            .as_ref()
            .map(|p| p.interests.len())
            .unwrap_or(0);
          if len > 0 && self.interest_cursor + 1 < len {
            self.interest_cursor += 1;
          }
        }
        KeyCode::Up | KeyCode::Char('k') => {
          self.interest_cursor = self.interest_cursor.saturating_sub(1);
        }
        KeyCode::Char('d') => self.remove_interest().await,
        _ => {}
      },
      Tab::Events => match key.code {
        KeyCode::Char('n') => self.open_create_dialog(),
        KeyCode::Char('e') => self.open_edit_dialog(),
        KeyCode::Char('d') => self.delete_event_under_cursor().await,
        KeyCode::Down | KeyCode::Char('j') => {
          if !self.events.is_empty() && self.event_cursor + 1 < self.events.len() {
            self.event_cursor += 1;
          }
        }
        KeyCode::Up | KeyCode::Char('k') => {
          self.event_cursor = self.event_cursor.saturating_sub(1);
        }
        _ => {}
      },
      Tab::Bookmarks => match key.code {
        KeyCode::Char('d') => self.remove_bookmark().await,
        KeyCode::Down | KeyCode::Char('j') => {
          let len = self.bookmark_rows().len();
          if len > 0 && self.bookmark_cursor + 1 < len {
            self.bookmark_cursor += 1;
          }
        }
        KeyCode::Up | KeyCode::Char('k') => {
          self.bookmark_cursor = self.bookmark_cursor.saturating_sub(1);
        }
        _ => {}
      },
      Tab::Activity => match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
          if self.activity_scroll + 1 < self.activities.len() {
            self.activity_scroll += 1;
          }
        }
        KeyCode::Up | KeyCode::Char('k') => {
          self.activity_scroll = self.activity_scroll.saturating_sub(1);
        }
        _ => {}
      },
      Tab::Posts => match key.code {
        KeyCode::Char('c') => self.compose_active = true,
        KeyCode::Char('e') | KeyCode::Char('d') => self.post_action_stub(),
        KeyCode::Down | KeyCode::Char('j') => {
          let len = self
            .profile
            .as_ref()
            .map(|p| p.posts.len())
            .unwrap_or(0);
          if len > 0 && self.post_cursor + 1 < len {
            self.post_cursor += 1;
          }
        }
        KeyCode::Up | KeyCode::Char('k') => {
          self.post_cursor = self.post_cursor.saturating_sub(1);
        }
        _ => {}
      },
    }
  }

  async fn handle_profile_edit_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.cancel_editing(),
      KeyCode::Enter => self.save_profile().await,
      KeyCode::Tab | KeyCode::BackTab => {
        if let ProfileMode::Editing { field, .. } = &mut self.profile_mode {
          *field = match field {
            ProfileField::Username => ProfileField::Email,
            ProfileField::Email => ProfileField::Username,
          };
        }
      }
      KeyCode::Backspace => self.profile_draft_backspace(),
      KeyCode::Char(c) => self.profile_draft_char(c),
      _ => {}
    }
  }

  async fn handle_interest_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.interest_input = None,
      KeyCode::Enter => self.add_interest().await,
      KeyCode::Backspace => {
        if let Some(input) = &mut self.interest_input {
          input.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(input) = &mut self.interest_input {
          input.push(c);
        }
      }
      _ => {}
    }
  }

  async fn handle_event_dialog_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.close_event_dialog(),
      KeyCode::Enter => self.submit_event_dialog().await,
      KeyCode::Tab | KeyCode::Down => {
        if let EventDialog::Open { field, .. } = &mut self.event_dialog {
          *field = field.next();
        }
      }
      KeyCode::BackTab | KeyCode::Up => {
        if let EventDialog::Open { field, .. } = &mut self.event_dialog {
          *field = field.prev();
        }
      }
      KeyCode::Backspace => self.event_draft_backspace(),
      KeyCode::Char(c) => self.event_draft_char(c),
      _ => {}
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
  };

  use arv_core::activity::ActivityKind;
  use arv_core::event::RawEvent;

  use super::*;

  #[derive(Debug)]
  struct FakeError(String);

  impl std::fmt::Display for FakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "{}", self.0)
    }
  }

  impl std::error::Error for FakeError {}

  /// In-memory backend. Events are stored as wire JSON so tests can
  /// express dual-identifier shapes exactly as the server would send them.
  #[derive(Default)]
  struct FakeApi {
    profile:     Mutex<Option<UserProfile>>,
    events:      Mutex<Vec<serde_json::Value>>,
    activities:  Mutex<Vec<Activity>>,
    items:       Mutex<Vec<HeritageItem>>,
    items_fail:  AtomicBool,
    mutate_fail: AtomicBool,
    calls:       Mutex<Vec<String>>,
    updates:     Mutex<Vec<ProfileUpdate>>,
    created:     Mutex<Vec<NewEvent>>,
  }

  impl FakeApi {
    fn record(&self, call: impl Into<String>) {
      self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
      self.calls.lock().unwrap().clone()
    }

    fn clear_calls(&self) {
      self.calls.lock().unwrap().clear();
    }

    fn check_mutate(&self) -> Result<(), FakeError> {
      if self.mutate_fail.load(Ordering::SeqCst) {
        Err(FakeError("server rejected the change".into()))
      } else {
        Ok(())
      }
    }
  }

  impl DashboardApi for FakeApi {
    type Error = FakeError;

    async fn user_profile(&self) -> Result<UserProfile, FakeError> {
      self.record("profile");
      self
        .profile
        .lock()
        .unwrap()
        .clone()
        .ok_or_else(|| FakeError("profile unavailable".into()))
    }

    async fn update_profile(
      &self,
      update: &ProfileUpdate,
    ) -> Result<UserProfile, FakeError> {
      self.record("update_profile");
      self.check_mutate()?;
      self.updates.lock().unwrap().push(update.clone());

      let mut guard = self.profile.lock().unwrap();
      let profile = guard
        .as_mut()
        .ok_or_else(|| FakeError("profile unavailable".into()))?;
      if let Some(username) = &update.username {
        profile.username = username.clone();
      }
      if let Some(email) = &update.email {
        profile.email = email.clone();
      }
      if let Some(interests) = &update.interests {
        profile.interests = interests.clone();
      }
      Ok(profile.clone())
    }

    async fn upcoming_events(&self) -> Result<Vec<RawEvent>, FakeError> {
      self.record("events");
      let events = self.events.lock().unwrap().clone();
      Ok(
        events
          .into_iter()
          .map(|v| serde_json::from_value(v).unwrap())
          .collect(),
      )
    }

    async fn create_event(&self, draft: &NewEvent) -> Result<RawEvent, FakeError> {
      self.record("create_event");
      self.check_mutate()?;
      self.created.lock().unwrap().push(draft.clone());

      let mut events = self.events.lock().unwrap();
      let id = format!("ev-{}", events.len() + 1);
      let mut value = serde_json::to_value(draft).unwrap();
      value["_id"] = serde_json::Value::String(id);
      events.push(value.clone());
      Ok(serde_json::from_value(value).unwrap())
    }

    async fn update_event(
      &self,
      id: &str,
      draft: &NewEvent,
    ) -> Result<RawEvent, FakeError> {
      self.record(format!("update_event {id}"));
      self.check_mutate()?;

      let mut value = serde_json::to_value(draft).unwrap();
      value["_id"] = serde_json::Value::String(id.to_string());
      let mut events = self.events.lock().unwrap();
      for slot in events.iter_mut() {
        if slot.get("_id").and_then(|v| v.as_str()) == Some(id) {
          *slot = value.clone();
        }
      }
      Ok(serde_json::from_value(value).unwrap())
    }

    async fn delete_event(&self, id: &str) -> Result<(), FakeError> {
      self.record(format!("delete_event {id}"));
      self.check_mutate()?;
      self
        .events
        .lock()
        .unwrap()
        .retain(|v| v.get("_id").and_then(|v| v.as_str()) != Some(id));
      Ok(())
    }

    async fn recent_activities(&self) -> Result<Vec<Activity>, FakeError> {
      self.record("activities");
      Ok(self.activities.lock().unwrap().clone())
    }

    async fn bookmarked_items(&self) -> Result<Vec<HeritageItem>, FakeError> {
      self.record("bookmarked");
      if self.items_fail.load(Ordering::SeqCst) {
        return Err(FakeError("no stored credential".into()));
      }
      Ok(self.items.lock().unwrap().clone())
    }

    async fn remove_bookmark(&self, item_id: &str) -> Result<(), FakeError> {
      self.record(format!("remove_bookmark {item_id}"));
      self.check_mutate()?;
      if let Some(profile) = self.profile.lock().unwrap().as_mut() {
        profile.bookmarks.retain(|b| b != item_id);
      }
      self
        .items
        .lock()
        .unwrap()
        .retain(|item| item.title != item_id);
      Ok(())
    }
  }

  // ── Fixtures ──────────────────────────────────────────────────────────

  fn profile_fixture() -> UserProfile {
    UserProfile {
      username:  "mira".into(),
      email:     "mira@example.org".into(),
      interests: vec!["Music".into()],
      bookmarks: vec!["item1".into()],
      posts:     vec![],
    }
  }

  fn event_json(id_field: &str, id: &str) -> serde_json::Value {
    serde_json::json!({
      id_field: id,
      "name": "Fest",
      "date": "2025-05-01",
      "location": "Park",
      "description": "desc",
      "category": "Festival",
    })
  }

  fn fake() -> FakeApi {
    let api = FakeApi::default();
    *api.profile.lock().unwrap() = Some(profile_fixture());
    *api.events.lock().unwrap() = vec![event_json("_id", "e1")];
    *api.activities.lock().unwrap() = vec![Activity {
      id:   "a1".into(),
      kind: ActivityKind::Bookmark,
      item: "Stave Church".into(),
      date: "2025-04-02".into(),
    }];
    api
  }

  async fn loaded(api: FakeApi) -> App<FakeApi> {
    let mut app = App::new(api);
    app.initial_load().await;
    app
  }

  fn has_error_toast(app: &App<FakeApi>) -> bool {
    app.toasts.iter().any(|t| t.level == ToastLevel::Error)
  }

  // ── Data loader ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn initial_load_populates_and_normalizes() {
    let api = fake();
    *api.events.lock().unwrap() = vec![
      event_json("_id", "e1"),
      event_json("id", "e2"),
      serde_json::json!({ "name": "Orphan", "date": "2025-06-01" }),
    ];

    let app = loaded(api).await;
    assert!(!app.loading);
    assert_eq!(app.profile.as_ref().unwrap().username, "mira");
    let ids: Vec<_> = app.events.iter().map(|e| e.id.as_deref()).collect();
    assert_eq!(ids, vec![Some("e1"), Some("e2"), None]);
    assert_eq!(app.activities.len(), 1);
  }

  #[tokio::test]
  async fn initial_load_failure_leaves_lists_empty() {
    let api = fake();
    *api.profile.lock().unwrap() = None;

    let app = loaded(api).await;
    assert!(app.profile.is_none());
    assert!(app.events.is_empty());
    assert!(app.activities.is_empty());
    assert!(has_error_toast(&app));
  }

  #[tokio::test]
  async fn bookmark_detail_failure_falls_back_to_bare_rows() {
    let api = fake();
    api.items_fail.store(true, Ordering::SeqCst);

    let app = loaded(api).await;
    // The detail fetch failed quietly; the panel shows raw identifiers.
    assert!(!has_error_toast(&app));
    let rows = app.bookmark_rows();
    assert_eq!(rows, vec![BookmarkRow::Bare("item1")]);
  }

  // ── Profile editor ────────────────────────────────────────────────────

  #[tokio::test]
  async fn save_replaces_local_profile_with_server_response() {
    let mut app = loaded(fake()).await;
    app.start_editing();
    app.profile_draft_char('!');
    assert_eq!(app.profile_display(ProfileField::Username), "mira!");

    app.save_profile().await;
    assert_eq!(app.profile_mode, ProfileMode::Viewing);
    let profile = app.profile.as_ref().unwrap();
    assert_eq!(profile.username, "mira!");
    // Untouched fields came back from the server, not from a local merge.
    assert_eq!(profile.email, "mira@example.org");

    let updates = app.api.updates.lock().unwrap().clone();
    assert_eq!(updates[0].username.as_deref(), Some("mira!"));
    assert_eq!(updates[0].email, None);
  }

  #[tokio::test]
  async fn save_failure_keeps_editing_with_draft_intact() {
    let mut app = loaded(fake()).await;
    app.start_editing();
    app.profile_draft_char('x');
    app.api.mutate_fail.store(true, Ordering::SeqCst);

    app.save_profile().await;
    assert!(has_error_toast(&app));
    match &app.profile_mode {
      ProfileMode::Editing { draft, .. } => {
        assert_eq!(draft.username.as_deref(), Some("mirax"));
      }
      other => panic!("expected editing mode, got {other:?}"),
    }
    // Server copy untouched.
    assert_eq!(app.profile.as_ref().unwrap().username, "mira");
  }

  #[tokio::test]
  async fn cancel_discards_draft_without_request() {
    let mut app = loaded(fake()).await;
    app.api.clear_calls();
    app.start_editing();
    app.profile_draft_char('x');
    app.cancel_editing();

    assert_eq!(app.profile_mode, ProfileMode::Viewing);
    assert_eq!(app.profile_display(ProfileField::Username), "mira");
    assert!(app.api.calls().is_empty());
  }

  // ── Interest list editor ──────────────────────────────────────────────

  #[tokio::test]
  async fn add_interest_submits_existing_plus_new() {
    let mut app = loaded(fake()).await;
    app.open_interest_input();
    app.interest_input = Some("Art".into());
    app.add_interest().await;

    let updates = app.api.updates.lock().unwrap().clone();
    assert_eq!(
      updates[0].interests.as_deref(),
      Some(&["Music".to_string(), "Art".to_string()][..])
    );
    assert_eq!(
      app.profile.as_ref().unwrap().interests,
      vec!["Music".to_string(), "Art".to_string()]
    );
    assert_eq!(app.interest_input, None);
  }

  #[tokio::test]
  async fn add_then_remove_restores_original_interests() {
    let mut app = loaded(fake()).await;
    app.interest_input = Some("Art".into());
    app.add_interest().await;

    app.interest_cursor = 1; // "Art"
    app.remove_interest().await;
    assert_eq!(
      app.profile.as_ref().unwrap().interests,
      vec!["Music".to_string()]
    );
  }

  #[tokio::test]
  async fn empty_interest_is_rejected_without_a_request() {
    let mut app = loaded(fake()).await;
    app.api.clear_calls();
    app.interest_input = Some("   ".into());
    app.add_interest().await;

    assert!(has_error_toast(&app));
    assert!(app.api.calls().is_empty());
    // Input stays open for correction.
    assert!(app.interest_input.is_some());
  }

  #[tokio::test]
  async fn failed_interest_removal_preserves_state() {
    let mut app = loaded(fake()).await;
    app.api.mutate_fail.store(true, Ordering::SeqCst);
    app.remove_interest().await;

    assert!(has_error_toast(&app));
    assert_eq!(
      app.profile.as_ref().unwrap().interests,
      vec!["Music".to_string()]
    );
  }

  // ── Event manager ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_dialog_starts_from_empty_draft() {
    let mut app = loaded(fake()).await;
    app.open_edit_dialog(); // leaves residue in a shared-draft design
    app.close_event_dialog();
    app.open_create_dialog();

    match &app.event_dialog {
      EventDialog::Open { mode, draft, .. } => {
        assert_eq!(*mode, EventMode::Create);
        assert_eq!(*draft, NewEvent::default());
      }
      other => panic!("expected open dialog, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn edit_dialog_copies_fields_and_records_id() {
    let mut app = loaded(fake()).await;
    app.open_edit_dialog();

    match &app.event_dialog {
      EventDialog::Open { mode, draft, .. } => {
        assert_eq!(
          *mode,
          EventMode::Edit {
            event_id: "e1".into()
          }
        );
        assert_eq!(draft.name, "Fest");
        assert_eq!(draft.date, "2025-05-01");
        assert_eq!(draft.location, "Park");
        assert_eq!(draft.category, "Festival");
        assert_eq!(draft.description, "desc");
      }
      other => panic!("expected open dialog, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn event_without_identifier_cannot_enter_edit_mode() {
    let api = fake();
    *api.events.lock().unwrap() =
      vec![serde_json::json!({ "name": "Orphan", "date": "2025-06-01" })];

    let mut app = loaded(api).await;
    app.open_edit_dialog();
    assert_eq!(app.event_dialog, EventDialog::Closed);
    assert!(has_error_toast(&app));
  }

  #[tokio::test]
  async fn create_submits_draft_and_reloads() {
    let mut app = loaded(fake()).await;
    app.open_create_dialog();
    if let EventDialog::Open { draft, .. } = &mut app.event_dialog {
      *draft = NewEvent {
        name:        "Fest".into(),
        date:        "2025-05-01".into(),
        location:    "Park".into(),
        description: "desc".into(),
        category:    "Festival".into(),
      };
    }
    app.api.clear_calls();
    app.submit_event_dialog().await;

    let created = app.api.created.lock().unwrap().clone();
    assert_eq!(created[0].name, "Fest");
    assert_eq!(created[0].category, "Festival");
    assert_eq!(app.event_dialog, EventDialog::Closed);
    // Canonical state re-fetched, no optimistic merge.
    assert!(app.api.calls().contains(&"events".to_string()));
    assert_eq!(app.events.len(), 2);
  }

  #[tokio::test]
  async fn submit_failure_keeps_dialog_open_with_draft() {
    let mut app = loaded(fake()).await;
    app.open_create_dialog();
    if let EventDialog::Open { draft, .. } = &mut app.event_dialog {
      draft.name = "Fest".into();
    }
    app.api.mutate_fail.store(true, Ordering::SeqCst);
    app.submit_event_dialog().await;

    assert!(has_error_toast(&app));
    match &app.event_dialog {
      EventDialog::Open { draft, .. } => assert_eq!(draft.name, "Fest"),
      other => panic!("expected open dialog, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn delete_accepts_bare_and_wrapped_references() {
    let mut app = loaded(fake()).await;
    app.api.clear_calls();

    let bare: EventRef = serde_json::from_str(r#""e1""#).unwrap();
    app.delete_event(bare).await;

    *app.api.events.lock().unwrap() = vec![event_json("_id", "e1")];
    let wrapped: EventRef = serde_json::from_str(r#"{"_id":"e1"}"#).unwrap();
    app.delete_event(wrapped).await;

    let deletes: Vec<_> = app
      .api
      .calls()
      .into_iter()
      .filter(|c| c.starts_with("delete_event"))
      .collect();
    assert_eq!(deletes, vec!["delete_event e1", "delete_event e1"]);
  }

  #[tokio::test]
  async fn delete_failure_only_notifies() {
    let mut app = loaded(fake()).await;
    app.api.mutate_fail.store(true, Ordering::SeqCst);
    app.api.clear_calls();
    app.delete_event_under_cursor().await;

    assert!(has_error_toast(&app));
    // Exactly one attempt, no retry, no reload.
    assert_eq!(app.api.calls(), vec!["delete_event e1"]);
    assert_eq!(app.events.len(), 1);
  }

  // ── Bookmark panel ────────────────────────────────────────────────────

  #[tokio::test]
  async fn bookmark_removal_refetches_both_sources() {
    let api = fake();
    *api.items.lock().unwrap() = vec![HeritageItem {
      title:       "item1".into(),
      description: "desc".into(),
      category:    "Architecture".into(),
      image_src:   "/img.jpg".into(),
      href:        "/items/item1".into(),
    }];

    let mut app = loaded(api).await;
    app.api.clear_calls();
    app.remove_bookmark().await;

    let calls = app.api.calls();
    assert_eq!(calls[0], "remove_bookmark item1");
    // Dual re-fetch: dashboard data and detail records.
    assert!(calls.contains(&"profile".to_string()));
    assert!(calls.contains(&"events".to_string()));
    assert!(calls.contains(&"activities".to_string()));
    assert!(calls.contains(&"bookmarked".to_string()));
    assert!(app.bookmark_rows().is_empty());
  }

  // ── Post panel ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn post_controls_are_stubbed() {
    let mut app = loaded(fake()).await;
    app.api.clear_calls();
    app.post_action_stub();

    assert!(app.api.calls().is_empty());
    assert_eq!(
      app.current_toast().map(|t| t.level),
      Some(ToastLevel::Info)
    );
  }
}
