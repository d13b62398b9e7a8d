//! Student detail view with Overview / Courses / Grades / Attendance tabs.

use campus_core::{entity::Student, integrity, metrics};
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Tabs, Wrap},
};
use strum::IntoEnumIterator;

use super::{
  attendance_color, detail_offset, dim, field, letter_span, student_status_color, titled,
};
use crate::app::{App, StudentTab};

pub fn draw(f: &mut Frame, area: Rect, app: &App, id: &str, tab: StudentTab) {
  let Some(student) = app.store.student(id) else {
    f.render_widget(
      Paragraph::new(Line::styled(format!("Student {id} not found."), dim()))
        .block(titled("Student")),
      area,
    );
    return;
  };

  let block = titled(format!("{} · {}", student.full_name(), student.student_id));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let [tabs_area, body] =
    Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

  let titles: Vec<Line> = StudentTab::iter().map(|t| Line::from(t.to_string())).collect();
  let selected = StudentTab::iter().position(|t| t == tab).unwrap_or(0);
  f.render_widget(
    Tabs::new(titles).select(selected).highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ),
    tabs_area,
  );

  let lines = match tab {
    StudentTab::Overview => overview(app, student),
    StudentTab::Courses => courses(app, student),
    StudentTab::Grades => grades(app, student),
    StudentTab::Attendance => attendance(app, student),
  };

  let offset = detail_offset(app, lines.len());
  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .scroll((offset, 0)),
    body,
  );
}

fn overview(app: &App, s: &Student) -> Vec<Line<'static>> {
  let store = &app.store;
  let gpa = metrics::average_gpa(store.grades_for_student(&s.id));
  let rate = metrics::attendance_rate(store.attendance_for_student(&s.id));

  let mut lines = vec![
    field("Email", s.email.clone()),
    field("Program", s.program.clone()),
    field("Batch", s.batch.clone()),
    Line::from(vec![
      Span::styled(format!("{:<14}", "Status"), dim()),
      Span::styled(
        s.status.to_string(),
        Style::default().fg(student_status_color(s.status)),
      ),
    ]),
    field("Enrolled", s.enrollment_date.format("%B %e, %Y").to_string()),
  ];
  if let Some(phone) = &s.phone {
    lines.push(field("Phone", phone.clone()));
  }
  if let Some(dob) = s.date_of_birth {
    lines.push(field("Born", dob.format("%B %e, %Y").to_string()));
  }
  if let Some(gender) = &s.gender {
    lines.push(field("Gender", gender.clone()));
  }
  if let Some(address) = &s.address {
    lines.push(field("Address", address.one_line()));
  }
  lines.push(Line::raw(""));
  lines.push(field("GPA", format!("{gpa:.2}")));
  lines.push(field("Attendance", rate.to_string()));
  lines.push(field(
    "Courses",
    store.courses_for_student(&s.id).len().to_string(),
  ));
  lines
}

fn courses(app: &App, s: &Student) -> Vec<Line<'static>> {
  let courses = app.store.courses_for_student(&s.id);
  if courses.is_empty() {
    return vec![Line::styled("Not enrolled in any course.", dim())];
  }
  courses
    .iter()
    .flat_map(|c| {
      [
        Line::from(vec![
          Span::styled(format!("{:<8}", c.course_code), Style::default().fg(Color::Cyan)),
          Span::styled(c.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
          Span::styled(format!("  {} credits", c.credits), dim()),
        ]),
        Line::styled(
          format!("        {} · {}", c.instructor, c.schedule.summary()),
          dim(),
        ),
      ]
    })
    .collect()
}

fn grades(app: &App, s: &Student) -> Vec<Line<'static>> {
  let store = &app.store;
  let grades = store.grades_for_student(&s.id);
  if grades.is_empty() {
    return vec![Line::styled("No grades recorded.", dim())];
  }

  let mut lines = Vec::new();
  for g in grades {
    let course = store
      .course(&g.course_id)
      .map_or_else(|| "Unknown Course".to_owned(), |c| format!("{} {}", c.course_code, c.name));
    lines.push(Line::from(vec![
      Span::styled(course, Style::default().add_modifier(Modifier::BOLD)),
      Span::raw("  "),
      letter_span(g.letter_grade.as_deref()),
      Span::styled(
        g.total_score
          .map(|t| format!("  {t:.1}%"))
          .unwrap_or_default(),
        dim(),
      ),
      Span::styled(
        recomputed_note(g.total_score, metrics::weighted_total(g)),
        Style::default().fg(Color::Yellow),
      ),
    ]));
    for a in &g.assignments {
      lines.push(component(&a.name, a.score, a.max_score, a.weight));
    }
    if let Some(m) = g.midterm_exam {
      lines.push(component("Midterm", m.score, m.max_score, m.weight));
    }
    if let Some(e) = g.final_exam {
      lines.push(component("Final", e.score, e.max_score, e.weight));
    }
    if let Some(comments) = &g.comments {
      lines.push(Line::styled(format!("  “{comments}”"), dim()));
    }
    lines.push(Line::raw(""));
  }
  lines
}

/// Flags a stored total that disagrees with its components.
fn recomputed_note(stored: Option<f64>, derived: Option<f64>) -> String {
  match (stored, derived) {
    (Some(stored), Some(derived))
      if (stored - derived).abs() > integrity::TOTAL_SCORE_TOLERANCE =>
    {
      format!("  (components give {derived:.2}%)")
    }
    _ => String::new(),
  }
}

fn component(name: &str, score: f64, max: f64, weight: f64) -> Line<'static> {
  Line::from(vec![
    Span::raw(format!("  {name:<16}")),
    Span::raw(format!("{score:>6.1} / {max:<6.1}")),
    Span::styled(format!("  weight {:.0}%", weight * 100.0), dim()),
  ])
}

fn attendance(app: &App, s: &Student) -> Vec<Line<'static>> {
  let store = &app.store;
  let records = store.attendance_for_student(&s.id);
  if records.is_empty() {
    return vec![Line::styled("No attendance recorded.", dim())];
  }

  let tally = metrics::AttendanceTally::from_records(records.iter().copied());
  let mut lines = vec![
    Line::from(vec![
      Span::styled(format!("Rate {}", tally.rate()), Style::default().add_modifier(Modifier::BOLD)),
      Span::styled(
        format!(
          "   present {}  absent {}  late {}  excused {}",
          tally.present, tally.absent, tally.late, tally.excused
        ),
        dim(),
      ),
    ]),
    Line::raw(""),
  ];
  for r in records {
    let course = store
      .course(&r.course_id)
      .map_or("Unknown", |c| c.course_code.as_str());
    let mut spans = vec![
      Span::raw(format!("{}  ", r.date.format("%Y-%m-%d"))),
      Span::raw(format!("{course:<8}")),
      Span::styled(
        format!("{:<8}", r.status.as_ref()),
        Style::default().fg(attendance_color(r.status)),
      ),
    ];
    if let Some(notes) = &r.notes {
      spans.push(Span::styled(format!("  {notes}"), dim()));
    }
    lines.push(Line::from(spans));
  }
  lines
}
