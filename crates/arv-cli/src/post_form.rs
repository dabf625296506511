//! Embedded post composer.
//!
//! Post creation belongs to the community post service, not to the
//! dashboard; this component is hosted opaquely — the dashboard renders it
//! and forwards keys while it has focus, but owns none of its contract.

use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerField {
  Title,
  Content,
}

impl ComposerField {
  pub fn label(self) -> &'static str {
    match self {
      ComposerField::Title => "Title",
      ComposerField::Content => "Content",
    }
  }
}

#[derive(Debug, Clone)]
pub struct PostForm {
  pub title:   String,
  pub content: String,
  pub field:   ComposerField,
}

impl PostForm {
  pub fn new() -> Self {
    Self {
      title:   String::new(),
      content: String::new(),
      field:   ComposerField::Title,
    }
  }

  pub fn value(&self, field: ComposerField) -> &str {
    match field {
      ComposerField::Title => &self.title,
      ComposerField::Content => &self.content,
    }
  }

  /// Handle a key while focused. Returns `false` when the composer
  /// releases focus back to the dashboard.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => return false,
      KeyCode::Tab | KeyCode::BackTab => {
        self.field = match self.field {
          ComposerField::Title => ComposerField::Content,
          ComposerField::Content => ComposerField::Title,
        };
      }
      KeyCode::Backspace => {
        match self.field {
          ComposerField::Title => self.title.pop(),
          ComposerField::Content => self.content.pop(),
        };
      }
      KeyCode::Char(c) => match self.field {
        ComposerField::Title => self.title.push(c),
        ComposerField::Content => self.content.push(c),
      },
      _ => {}
    }
    true
  }
}

impl Default for PostForm {
  fn default() -> Self {
    Self::new()
  }
}
