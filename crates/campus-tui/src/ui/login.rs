//! Login form.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Clear, Paragraph, Wrap},
};

use super::{dim, titled};
use crate::app::{App, LoginField};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let [row] = Layout::vertical([Constraint::Length(14)])
    .flex(Flex::Center)
    .areas(area);
  let [form] = Layout::horizontal([Constraint::Length(60)])
    .flex(Flex::Center)
    .areas(row);

  let block = titled("Sign in");
  let inner = block.inner(form);
  f.render_widget(Clear, form);
  f.render_widget(block, form);

  let form_state = &app.login;
  let masked = "•".repeat(form_state.password.chars().count());

  let mut lines = vec![
    Line::from(Span::styled(
      "Student Information System",
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::raw(""),
    input_line("Email", &form_state.email, form_state.focus == LoginField::Email),
    input_line("Password", &masked, form_state.focus == LoginField::Password),
    Line::raw(""),
  ];

  match &form_state.error {
    Some(err) => lines.push(Line::styled(err.clone(), Style::default().fg(Color::Red))),
    None => lines.push(Line::raw("")),
  }

  lines.push(Line::raw(""));
  lines.push(Line::styled("Demo accounts:", dim()));
  for user in app.store.users() {
    lines.push(Line::styled(
      format!("  {:<28} {}", user.email, user.role),
      dim(),
    ));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
  let (marker, style) = if focused {
    ("▸ ", Style::default().fg(Color::Yellow))
  } else {
    ("  ", Style::default())
  };
  let cursor = if focused { "_" } else { "" };
  Line::from(vec![
    Span::styled(marker, style),
    Span::styled(format!("{label:<10}"), dim()),
    Span::styled(format!("{value}{cursor}"), style),
  ])
}
