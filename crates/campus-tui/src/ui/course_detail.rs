//! Course detail view with Overview / Students / Attendance tabs.

use campus_core::{
  entity::{Course, Student},
  metrics,
};
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Tabs, Wrap},
};
use strum::IntoEnumIterator;

use super::{
  attendance_color, course_status_color, detail_offset, dim, field, letter_span, titled,
};
use crate::app::{App, CourseTab};

pub fn draw(f: &mut Frame, area: Rect, app: &App, id: &str, tab: CourseTab) {
  let Some(course) = app.store.course(id) else {
    f.render_widget(
      Paragraph::new(Line::styled(format!("Course {id} not found."), dim()))
        .block(titled("Course")),
      area,
    );
    return;
  };

  let block = titled(format!("{} · {}", course.course_code, course.name));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let [tabs_area, body] =
    Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

  let titles: Vec<Line> = CourseTab::iter().map(|t| Line::from(t.to_string())).collect();
  let selected = CourseTab::iter().position(|t| t == tab).unwrap_or(0);
  f.render_widget(
    Tabs::new(titles).select(selected).highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ),
    tabs_area,
  );

  let lines = match tab {
    CourseTab::Overview => overview(app, course),
    CourseTab::Students => students(app, course),
    CourseTab::Attendance => attendance(app, course),
  };

  let offset = detail_offset(app, lines.len());
  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .scroll((offset, 0)),
    body,
  );
}

fn overview(app: &App, c: &Course) -> Vec<Line<'static>> {
  let enrolled = app.store.enrollment_count(&c.id);
  let capacity_style = if enrolled >= c.max_students as usize {
    Style::default().fg(Color::Red)
  } else {
    Style::default()
  };

  let mut lines = vec![
    Line::raw(c.description.clone()),
    Line::raw(""),
    field("Instructor", c.instructor.clone()),
    field("Department", c.department.clone()),
    field("Semester", c.semester.clone()),
    field("Credits", c.credits.to_string()),
    field("Schedule", c.schedule.summary()),
    field("Location", c.schedule.location.clone()),
    Line::from(vec![
      Span::styled(format!("{:<14}", "Capacity"), dim()),
      Span::styled(format!("{enrolled} / {}", c.max_students), capacity_style),
    ]),
    Line::from(vec![
      Span::styled(format!("{:<14}", "Status"), dim()),
      Span::styled(
        c.status.to_string(),
        Style::default().fg(course_status_color(c.status)),
      ),
    ]),
  ];
  if c.enrolled_students as usize != enrolled {
    lines.push(Line::styled(
      format!(
        "Catalog lists {} enrolled; {enrolled} enrollment records found.",
        c.enrolled_students
      ),
      Style::default().fg(Color::Yellow),
    ));
  }
  lines
}

fn students(app: &App, c: &Course) -> Vec<Line<'static>> {
  let store = &app.store;
  let students = store.students_for_course(&c.id);
  if students.is_empty() {
    return vec![Line::styled("No students enrolled.", dim())];
  }
  students
    .iter()
    .map(|s| {
      let grade = store.grade_for(&s.id, &c.id);
      Line::from(vec![
        Span::raw(format!("{:<9}", s.student_id)),
        Span::raw(format!("{:<24}", s.full_name())),
        Span::styled(format!("{:<28}", s.email), dim()),
        letter_span(grade.and_then(|g| g.letter_grade.as_deref())),
      ])
    })
    .collect()
}

fn attendance(app: &App, c: &Course) -> Vec<Line<'static>> {
  let store = &app.store;
  let records = store.attendance_for_course(&c.id);
  if records.is_empty() {
    return vec![Line::styled("No attendance recorded.", dim())];
  }

  let mut lines = vec![
    Line::styled(
      format!("Rate {}", metrics::attendance_rate(records.iter().copied())),
      Style::default().add_modifier(Modifier::BOLD),
    ),
    Line::raw(""),
  ];
  for r in records {
    let name = store
      .student(&r.student_id)
      .map_or_else(|| "Unknown Student".to_owned(), Student::full_name);
    lines.push(Line::from(vec![
      Span::raw(format!("{}  ", r.date.format("%Y-%m-%d"))),
      Span::raw(format!("{name:<24}")),
      Span::styled(
        r.status.to_string(),
        Style::default().fg(attendance_color(r.status)),
      ),
    ]));
  }
  lines
}
