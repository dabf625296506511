//! Profile pane — account fields and the interest list.

use arv_core::api::DashboardApi;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, ProfileField, ProfileMode};

/// Render the profile pane into `area`.
pub fn draw<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let block = Block::default()
    .title(" Your Cultural Profile ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(profile) = &app.profile else {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "Profile unavailable — press r to retry.",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  };

  let editing_field = match &app.profile_mode {
    ProfileMode::Editing { field, .. } => Some(*field),
    ProfileMode::Viewing => None,
  };

  let mut lines = vec![
    field_line("Username", app.profile_display(ProfileField::Username),
      editing_field == Some(ProfileField::Username)),
    field_line("Email", app.profile_display(ProfileField::Email),
      editing_field == Some(ProfileField::Email)),
    Line::default(),
    Line::from(Span::styled(
      "Cultural Interests",
      Style::default().add_modifier(Modifier::BOLD),
    )),
  ];

  if profile.interests.is_empty() {
    lines.push(Line::from(Span::styled(
      "  No interests yet — press a to add one.",
      Style::default().fg(Color::DarkGray),
    )));
  }
  for (i, interest) in profile.interests.iter().enumerate() {
    let style = if i == app.interest_cursor && editing_field.is_none() {
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    lines.push(Line::from(vec![
      Span::raw("  • "),
      Span::styled(interest.clone(), style),
    ]));
  }

  lines.push(Line::default());
  lines.push(match editing_field {
    Some(_) => Line::from(Span::styled(
      "Editing — Enter saves, Esc cancels without a request.",
      Style::default().fg(Color::Yellow),
    )),
    None => Line::from(Span::styled(
      "Press e to edit your profile.",
      Style::default().fg(Color::DarkGray),
    )),
  });

  f.render_widget(Paragraph::new(lines), inner);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
  let marker = if focused { "▌" } else { " " };
  let value_style = if focused {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default()
  };
  let shown = if focused {
    format!("{value}_")
  } else {
    value.to_string()
  };
  Line::from(vec![
    Span::styled(marker, Style::default().fg(Color::Yellow)),
    Span::styled(
      format!("{label:>9}: "),
      Style::default().fg(Color::DarkGray),
    ),
    Span::styled(shown, value_style),
  ])
}

/// Modal input for a new interest.
pub fn draw_interest_input<A: DashboardApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let Some(input) = &app.interest_input else { return };

  let dialog = super::centered_rect(44, 5, area);
  let inner = super::dialog_block(f, dialog, "Add New Interest");

  let lines = vec![
    Line::from(vec![
      Span::styled("Interest: ", Style::default().fg(Color::DarkGray)),
      Span::styled(format!("{input}_"), Style::default().fg(Color::Yellow)),
    ]),
    Line::default(),
    Line::from(Span::styled(
      "e.g. Classical Music",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}
