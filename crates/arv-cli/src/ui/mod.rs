//! TUI rendering — orchestrates all panes.

pub mod activity;
pub mod bookmarks;
pub mod events;
pub mod posts;
pub mod profile;

use arv_core::api::DashboardApi;
use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, EventDialog, Tab, ToastLevel};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<A: DashboardApi>(f: &mut Frame, app: &App<A>) {
  let area = f.area();

  // Full-screen indicator for the initial combined load only; mutations
  // re-fetch without one.
  if app.loading {
    draw_loading(f, area);
    return;
  }

  // Vertical stack: header, tab bar, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // tab bar
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_tabs(f, rows[1], app);
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);

  // Modal overlays.
  if matches!(app.event_dialog, EventDialog::Open { .. }) {
    events::draw_dialog(f, area, app);
  }
  if app.interest_input.is_some() {
    profile::draw_interest_input(f, area, app);
  }
}

fn draw_loading(f: &mut Frame, area: Rect) {
  let message = Paragraph::new(Line::from(Span::styled(
    "Loading dashboard…",
    Style::default().fg(Color::DarkGray),
  )))
  .centered();
  let y = area.y + area.height / 2;
  f.render_widget(message, Rect { y, height: 1, ..area });
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " arv  My Dashboard",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Tab bar ──────────────────────────────────────────────────────────────────

fn draw_tabs<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let mut spans = vec![Span::raw(" ")];
  for (i, tab) in Tab::ALL.iter().enumerate() {
    let style = if *tab == app.tab {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(format!(" {} {} ", i + 1, tab.title()), style));
    spans.push(Span::raw(" "));
  }
  f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  match app.tab {
    Tab::Profile => profile::draw(f, area, app),
    Tab::Events => events::draw(f, area, app),
    Tab::Bookmarks => bookmarks::draw(f, area, app),
    Tab::Activity => activity::draw(f, area, app),
    Tab::Posts => posts::draw(f, area, app),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  // A live toast outranks the key hints.
  if let Some(toast) = app.current_toast() {
    let (tag, color) = match toast.level {
      ToastLevel::Success => (" OK ", Color::Green),
      ToastLevel::Info => (" ·· ", Color::Cyan),
      ToastLevel::Error => (" !! ", Color::Red),
    };
    let line = Line::from(vec![
      Span::styled(
        tag,
        Style::default()
          .fg(Color::Black)
          .bg(color)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(format!("  {}", toast.message), Style::default().fg(color)),
    ]);
    f.render_widget(
      Paragraph::new(line).style(Style::default().bg(Color::Black)),
      area,
    );
    return;
  }

  let hints = if matches!(app.event_dialog, EventDialog::Open { .. }) {
    "Type to edit  Tab/↓ next field  Enter submit  Esc cancel"
  } else if app.interest_input.is_some() {
    "Type the interest  Enter add  Esc cancel"
  } else if app.compose_active {
    "Type to compose  Tab switch field  Esc leave composer"
  } else {
    match app.tab {
      Tab::Profile => "e edit  a add interest  j/k select  d remove  Tab next tab  q quit",
      Tab::Events => "n new  e edit  d delete  j/k navigate  r reload  q quit",
      Tab::Bookmarks => "j/k navigate  d remove  r reload  q quit",
      Tab::Activity => "j/k scroll  r reload  q quit",
      Tab::Posts => "c compose  j/k select  e/d post actions  q quit",
    }
  };

  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      format!("  {hints}"),
      Style::default().fg(Color::DarkGray),
    )))
    .style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// A centered rect for modal dialogs.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

/// Clear the dialog area and draw its bordered block, returning the inner
/// area for content.
pub(crate) fn dialog_block(f: &mut Frame, area: Rect, title: &str) -> Rect {
  f.render_widget(Clear, area);
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);
  inner
}
