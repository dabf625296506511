//! Bookmarks pane — saved heritage items.
//!
//! Rich rows when detail records resolved; bare identifier rows otherwise.

use arv_core::{api::DashboardApi, heritage::BookmarkRow};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the bookmark panel into `area`.
pub fn draw<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let rows = app.bookmark_rows();

  let block = Block::default()
    .title(format!(" Your Bookmarked Content ({}) ", rows.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if rows.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "No bookmarked content yet. Explore the catalog to find heritage to save.",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = rows
    .iter()
    .enumerate()
    .map(|(i, row)| {
      let is_cursor = i == app.bookmark_cursor;
      let title_style = if is_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().add_modifier(Modifier::BOLD)
      };

      match row {
        BookmarkRow::Detailed(item) => ListItem::new(vec![
          Line::from(Span::styled(item.title.clone(), title_style)),
          Line::from(vec![
            Span::styled(
              format!("    {}", item.description),
              Style::default().fg(Color::Gray),
            ),
          ]),
          Line::from(vec![
            Span::styled(
              format!("    [{}]  ", item.category),
              Style::default().fg(Color::Cyan),
            ),
            Span::styled(item.href.clone(), Style::default().fg(Color::DarkGray)),
          ]),
        ]),
        BookmarkRow::Bare(id) => ListItem::new(vec![
          Line::from(Span::styled(id.to_string(), title_style)),
          Line::from(Span::styled(
            "    Added to bookmarks",
            Style::default().fg(Color::DarkGray),
          )),
        ]),
      }
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.bookmark_cursor));
  f.render_stateful_widget(List::new(items), inner, &mut state);
}
