//! Events pane — upcoming event list and the create/edit dialog.

use arv_core::api::DashboardApi;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, EventDialog, EventField, EventMode};

/// Render the event list into `area`.
pub fn draw<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let block = Block::default()
    .title(format!(" Upcoming Cultural Events ({}) ", app.events.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.events.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "No upcoming events — press n to create one.",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .events
    .iter()
    .enumerate()
    .map(|(i, event)| {
      let is_cursor = i == app.event_cursor;
      let title_style = if is_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().add_modifier(Modifier::BOLD)
      };

      let mut title = vec![Span::styled(event.name.clone(), title_style)];
      if event.id.is_none() {
        // Unresolvable identifier: visible, but edit/delete will refuse it.
        title.push(Span::styled(
          "  (no identifier — read-only)",
          Style::default().fg(Color::Red),
        ));
      }

      let meta = Line::from(Span::styled(
        format!(
          "    {}  {}  {}",
          event.date, event.location, event.category
        ),
        Style::default().fg(Color::DarkGray),
      ));
      let description = Line::from(Span::styled(
        format!("    {}", event.description),
        Style::default().fg(Color::Gray),
      ));

      ListItem::new(vec![Line::from(title), meta, description])
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.event_cursor));
  f.render_stateful_widget(List::new(items), inner, &mut state);
}

/// Modal create/edit dialog drawn over the whole view.
pub fn draw_dialog<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let EventDialog::Open { mode, draft, field } = &app.event_dialog else {
    return;
  };

  let title = match mode {
    EventMode::Create => "Create New Event",
    EventMode::Edit { .. } => "Edit Event",
  };
  let dialog = super::centered_rect(54, 9, area);
  let inner = super::dialog_block(f, dialog, title);

  let lines: Vec<Line> = EventField::ALL
    .iter()
    .map(|&slot| {
      let focused = slot == *field;
      let marker = if focused { "▌" } else { " " };
      let value = slot.value(draft);
      let shown = if focused {
        format!("{value}_")
      } else {
        value.to_string()
      };
      let value_style = if focused {
        Style::default().fg(Color::Yellow)
      } else {
        Style::default()
      };
      Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(
          format!("{:>12}: ", slot.label()),
          Style::default().fg(Color::DarkGray),
        ),
        Span::styled(shown, value_style),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}
