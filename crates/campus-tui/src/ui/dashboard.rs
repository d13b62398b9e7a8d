//! Landing page: headline numbers, the user's courses, deadlines and
//! announcements.

use campus_core::{
  entity::{CourseStatus, Deadline, DeadlineKind},
  metrics,
};
use chrono::NaiveDate;
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};

use super::{dim, titled};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let [welcome, stats, lower] = Layout::vertical([
    Constraint::Length(1),
    Constraint::Length(4),
    Constraint::Min(0),
  ])
  .areas(area);
  let [left, news] =
    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
      .areas(lower);
  let [courses, deadlines] =
    Layout::vertical([Constraint::Min(0), Constraint::Length(5)]).areas(left);

  let name = app.user().map_or("", |u| u.name.as_str());
  f.render_widget(
    Paragraph::new(Line::from(vec![
      Span::raw(" Welcome back, "),
      Span::styled(name.to_owned(), Style::default().add_modifier(Modifier::BOLD)),
    ])),
    welcome,
  );

  draw_stats(f, stats, app);
  draw_my_courses(f, courses, app);
  draw_deadlines(f, deadlines, app);
  draw_announcements(f, news, app);
}

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
  let store = &app.store;
  let active = store
    .courses()
    .iter()
    .filter(|c| c.status == CourseStatus::Active)
    .count();

  let cards = [
    ("Total Students", store.students().len().to_string(), Color::Blue),
    ("Active Courses", active.to_string(), Color::Green),
    (
      "Attendance Rate",
      metrics::attendance_rate(store.attendance()).to_string(),
      Color::Yellow,
    ),
    ("Enrollments", store.enrollments().len().to_string(), Color::Magenta),
  ];

  let slots = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
  for ((label, value, color), slot) in cards.into_iter().zip(slots.iter()) {
    let body = Paragraph::new(Line::from(Span::styled(
      value,
      Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(titled(label));
    f.render_widget(body, *slot);
  }
}

fn draw_my_courses(f: &mut Frame, area: Rect, app: &App) {
  let courses = app.my_courses();
  let lines: Vec<Line> = if courses.is_empty() {
    vec![Line::styled("No courses.", dim())]
  } else {
    courses
      .iter()
      .flat_map(|c| {
        [
          Line::from(vec![
            Span::styled(format!("{:<8}", c.course_code), Style::default().fg(Color::Cyan)),
            Span::styled(c.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
          ]),
          Line::styled(
            format!("        {} · {}", c.instructor, c.schedule.summary()),
            dim(),
          ),
        ]
      })
      .collect()
  };
  f.render_widget(Paragraph::new(lines).block(titled("My Courses")), area);
}

fn draw_deadlines(f: &mut Frame, area: Rect, app: &App) {
  let lines: Vec<Line> = if app.store.deadlines().is_empty() {
    vec![Line::styled("Nothing due.", dim())]
  } else {
    app
      .store
      .deadlines()
      .iter()
      .map(|d| deadline_line(d, app.today))
      .collect()
  };
  f.render_widget(Paragraph::new(lines).block(titled("Upcoming Deadlines")), area);
}

fn deadline_line(d: &Deadline, today: NaiveDate) -> Line<'static> {
  let kind_color = match d.kind {
    DeadlineKind::Exam => Color::Red,
    DeadlineKind::Assignment => Color::Cyan,
  };
  let days = d.days_left(today);
  let (countdown, color) = match days {
    n if n < 0 => ("Overdue".to_owned(), Color::Red),
    0 => ("Due today".to_owned(), Color::Yellow),
    1 => ("1 day left".to_owned(), Color::Yellow),
    n => (format!("{n} days left"), Color::Gray),
  };
  Line::from(vec![
    Span::styled(format!("{:<11}", d.kind.as_ref()), Style::default().fg(kind_color)),
    Span::styled(d.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
    Span::styled(format!("  due {}  ", d.due_date.format("%Y-%m-%d")), dim()),
    Span::styled(countdown, Style::default().fg(color)),
  ])
}

fn draw_announcements(f: &mut Frame, area: Rect, app: &App) {
  let mut lines = Vec::new();
  for a in app.store.announcements() {
    lines.push(Line::from(vec![
      Span::styled(a.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
      Span::styled(format!("  {}", a.date.format("%b %e, %Y")), dim()),
    ]));
    lines.push(Line::raw(a.content.clone()));
    lines.push(Line::raw(""));
  }
  if lines.is_empty() {
    lines.push(Line::styled("No announcements.", dim()));
  }
  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: true })
      .block(titled("Announcements")),
    area,
  );
}
