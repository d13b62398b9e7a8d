use std::sync::Arc;

use campus_core::{Store, session::Session};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use strum::IntoEnumIterator;

use super::draw;
use crate::app::{App, CourseTab, Detail, Page, StudentTab};

fn app(email: Option<&str>) -> App {
  let store = Arc::new(Store::seeded().unwrap());
  let mut session = Session::default();
  if let Some(email) = email {
    session.login(&store, email, "password").unwrap();
  }
  let today = NaiveDate::from_ymd_opt(2023, 9, 5).unwrap();
  App::new(store, session, String::new(), today)
}

/// Render one frame and return the screen as text, row by row.
fn render(app: &App) -> String {
  let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
  terminal.draw(|f| draw(f, app)).unwrap();
  let buffer = terminal.backend().buffer();
  buffer
    .content
    .chunks(buffer.area.width as usize)
    .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
    .collect::<Vec<_>>()
    .join("\n")
}

fn press(app: &mut App, code: KeyCode) {
  app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

#[test]
fn login_screen_lists_demo_accounts() {
  let screen = render(&app(None));
  assert!(screen.contains("Sign in"));
  assert!(screen.contains("student@edutrack.com"));
}

#[test]
fn every_page_renders() {
  let mut app = app(Some("admin@edutrack.com"));
  for page in Page::iter() {
    app.open_page(page);
    let screen = render(&app);
    assert!(screen.contains("Admin User"), "{page} lost the header");
  }
}

#[test]
fn dashboard_shows_stats_and_announcements() {
  let screen = render(&app(Some("student@edutrack.com")));
  assert!(screen.contains("Welcome back, Student User"));
  assert!(screen.contains("Total Students"));
  assert!(screen.contains("83%"));
  assert!(screen.contains("CS304"));
}

#[test]
fn student_table_shows_summary() {
  let mut app = app(Some("admin@edutrack.com"));
  app.open_page(Page::Students);
  let screen = render(&app);
  assert!(screen.contains("Showing 5 of 5 students"));
  assert!(screen.contains("Alex Johnson"));
}

#[test]
fn grade_letters_render() {
  let mut app = app(Some("admin@edutrack.com"));
  app.open_page(Page::Grades);
  let screen = render(&app);
  assert!(screen.contains("Showing 3 of 3 grades"));
  assert!(screen.contains("A-"));
}

#[test]
fn attendance_marks_missing_days() {
  let mut app = app(Some("faculty@edutrack.com"));
  app.open_page(Page::Attendance);
  assert!(render(&app).contains("Press c to choose a course."));

  press(&mut app, KeyCode::Char('c'));
  press(&mut app, KeyCode::Char('w'));
  let screen = render(&app);
  assert!(screen.contains("present"));
  assert!(screen.contains("Not Recorded"));
}

#[test]
fn detail_tabs_render() {
  let mut app = app(Some("admin@edutrack.com"));
  for tab in StudentTab::iter() {
    app.detail = Some(Detail::Student {
      id: "1".into(),
      tab,
    });
    assert!(render(&app).contains("Alex Johnson"));
  }
  for tab in CourseTab::iter() {
    app.detail = Some(Detail::Course {
      id: "1".into(),
      tab,
    });
    assert!(render(&app).contains("CS101"));
  }
}

#[test]
fn missing_detail_record_renders_placeholder() {
  let mut app = app(Some("admin@edutrack.com"));
  app.detail = Some(Detail::Course {
    id:  "404".into(),
    tab: CourseTab::Overview,
  });
  assert!(render(&app).contains("Course 404 not found."));
}

#[test]
fn dashboard_counts_down_to_deadlines() {
  let screen = render(&app(Some("student@edutrack.com")));
  assert!(screen.contains("Upcoming Deadlines"));
  assert!(screen.contains("Mid-term Exam: CS101  due 2023-10-15  40 days left"));
  assert!(screen.contains("Lab Report: CS304  due 2023-10-05  30 days left"));

  let mut late = app(Some("student@edutrack.com"));
  late.today = NaiveDate::from_ymd_opt(2023, 10, 12).unwrap();
  let screen = render(&late);
  assert!(screen.contains("3 days left"));
  assert!(screen.contains("Overdue"));
}

#[test]
fn profile_summary_follows_role() {
  let mut student = app(Some("student@edutrack.com"));
  student.open_page(Page::Profile);
  let screen = render(&student);
  assert!(screen.contains("Academic Summary"));
  assert!(screen.contains("Current GPA   3.60"));
  assert!(screen.contains("Credits       7"));
  assert!(screen.contains("Attendance    83%"));

  let mut faculty = app(Some("faculty@edutrack.com"));
  faculty.open_page(Page::Profile);
  let screen = render(&faculty);
  assert!(screen.contains("Teaching Summary"));
  assert!(screen.contains("Courses       1"));
  assert!(screen.contains("Students      2"));

  let mut admin = app(Some("admin@edutrack.com"));
  admin.open_page(Page::Profile);
  let screen = render(&admin);
  assert!(!screen.contains("Academic Summary"));
  assert!(!screen.contains("Teaching Summary"));
}

#[test]
fn stored_total_shown_beside_recomputed_one() {
  let mut app = app(Some("admin@edutrack.com"));
  app.detail = Some(Detail::Student {
    id:  "1".into(),
    tab: StudentTab::Grades,
  });
  let screen = render(&app);
  assert!(screen.contains("87.7%  (components give 87.55%)"));
  assert!(screen.contains("91.2%"));
  assert!(!screen.contains("components give 91.20%"));
}

#[test]
fn detail_scroll_stops_at_last_line() {
  let mut app = app(Some("admin@edutrack.com"));
  app.detail = Some(Detail::Student {
    id:  "1".into(),
    tab: StudentTab::Overview,
  });
  render(&app);
  let lines = app.detail_lines.get();
  assert!(lines > 1);

  for _ in 0..500 {
    press(&mut app, KeyCode::Char('j'));
  }
  assert_eq!(app.detail_scroll, lines - 1);
  assert!(render(&app).contains("Courses       2"));

  press(&mut app, KeyCode::Char('k'));
  assert_eq!(app.detail_scroll, lines - 2);
}
