//! Read-only profile of the signed-in user, with a role summary.

use campus_core::{
  entity::{Role, User},
  metrics,
};
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  text::Line,
  widgets::Paragraph,
};

use super::{dim, field, titled};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let summary = app.user().and_then(|user| summary(app, user));
  let summary_height = summary
    .as_ref()
    .map_or(0, |(_, lines)| u16::try_from(lines.len() + 2).unwrap_or(u16::MAX));
  let [account, summary_area, record] = Layout::vertical([
    Constraint::Length(7),
    Constraint::Length(summary_height),
    Constraint::Min(0),
  ])
  .areas(area);

  let lines = match app.user() {
    Some(user) => vec![
      field("Name", user.name.clone()),
      field("Email", user.email.clone()),
      field("Role", user.role.to_string()),
      field("User ID", user.id.clone()),
    ],
    None => vec![Line::styled("Not signed in.", dim())],
  };
  f.render_widget(Paragraph::new(lines).block(titled("Account")), account);

  if let Some((title, lines)) = summary {
    f.render_widget(Paragraph::new(lines).block(titled(title)), summary_area);
  }

  let lines = match app.linked_student() {
    Some(s) => {
      let mut lines = vec![
        field("Student ID", s.student_id.clone()),
        field("Program", s.program.clone()),
        field("Batch", s.batch.clone()),
        field("Status", s.status.to_string()),
        field("Enrolled", s.enrollment_date.format("%B %e, %Y").to_string()),
      ];
      if let Some(phone) = &s.phone {
        lines.push(field("Phone", phone.clone()));
      }
      if let Some(address) = &s.address {
        lines.push(field("Address", address.one_line()));
      }
      lines
    }
    None => vec![Line::styled("No student record is linked to this account.", dim())],
  };
  f.render_widget(Paragraph::new(lines).block(titled("Student Record")), record);
}

/// Academic figures for a student, teaching load for faculty. Admins get none.
fn summary(app: &App, user: &User) -> Option<(&'static str, Vec<Line<'static>>)> {
  let store = &app.store;
  match user.role {
    Role::Student => {
      let student = app.linked_student()?;
      let gpa = metrics::average_gpa(store.grades_for_student(&student.id));
      let credits: u32 = store
        .courses_for_student(&student.id)
        .iter()
        .map(|c| c.credits)
        .sum();
      let rate = metrics::attendance_rate(store.attendance_for_student(&student.id));
      Some((
        "Academic Summary",
        vec![
          field("Current GPA", format!("{gpa:.2}")),
          field("Credits", credits.to_string()),
          field("Attendance", rate.to_string()),
        ],
      ))
    }
    Role::Faculty => Some((
      "Teaching Summary",
      vec![
        field("Courses", store.courses_taught_by(&user.name).len().to_string()),
        field("Students", store.students_taught_by(&user.name).to_string()),
      ],
    )),
    Role::Admin => None,
  }
}
