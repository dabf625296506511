//! Activity pane — read-only feed of recent interactions.

use arv_core::api::DashboardApi;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the activity feed into `area`.
pub fn draw<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let block = Block::default()
    .title(" Recent Activity ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.activities.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "No recent activity",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .activities
    .iter()
    .map(|activity| {
      let mut spans = Vec::new();
      // Unknown kinds render with no icon and no verb.
      if let Some(icon) = activity.kind.icon() {
        spans.push(Span::styled(
          format!("{icon} "),
          Style::default().fg(Color::Magenta),
        ));
      }
      if let Some(verb) = activity.kind.verb() {
        spans.push(Span::raw(format!("{verb} ")));
      }
      spans.push(Span::styled(
        activity.item.clone(),
        Style::default().add_modifier(Modifier::BOLD),
      ));

      ListItem::new(vec![
        Line::from(spans),
        Line::from(Span::styled(
          format!("    {}", activity.date),
          Style::default().fg(Color::DarkGray),
        )),
      ])
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.activity_scroll));
  f.render_stateful_widget(List::new(items), inner, &mut state);
}
