//! Posts pane — the embedded composer and the user's post list.

use arv_core::api::DashboardApi;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::App,
  post_form::{ComposerField, PostForm},
};

/// Render the posts pane: composer on top, post list below.
pub fn draw<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(5), Constraint::Min(0)])
    .split(area);

  draw_composer(f, rows[0], &app.post_form, app.compose_active);
  draw_post_list(f, rows[1], app);
}

/// The composer belongs to the community post service; the dashboard only
/// hosts it and forwards keys while focused.
fn draw_composer(f: &mut Frame, area: Rect, form: &PostForm, focused: bool) {
  let border = if focused { Color::Cyan } else { Color::DarkGray };
  let block = Block::default()
    .title(" Create New Post ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines: Vec<Line> = [ComposerField::Title, ComposerField::Content]
    .iter()
    .map(|&slot| {
      let active = focused && slot == form.field;
      let marker = if active { "▌" } else { " " };
      let value = form.value(slot);
      let shown = if active {
        format!("{value}_")
      } else {
        value.to_string()
      };
      Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled(
          format!("{:>8}: ", slot.label()),
          Style::default().fg(Color::DarkGray),
        ),
        Span::raw(shown),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_post_list<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let posts = app
    .profile
    .as_ref()
    .map(|p| p.posts.as_slice())
    .unwrap_or_default();

  let block = Block::default()
    .title(format!(" Your Posts ({}) ", posts.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if posts.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "No posts yet — create your first post to share with the community.",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = posts
    .iter()
    .enumerate()
    .map(|(i, post)| {
      let is_cursor = i == app.post_cursor;
      let title_style = if is_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().add_modifier(Modifier::BOLD)
      };
      ListItem::new(vec![
        Line::from(Span::styled(post.title.clone(), title_style)),
        Line::from(Span::styled(
          format!("    Posted on {}  ·  {}", post.created_at, post.content_type),
          Style::default().fg(Color::DarkGray),
        )),
      ])
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.post_cursor));
  f.render_stateful_widget(List::new(items), inner, &mut state);
}
