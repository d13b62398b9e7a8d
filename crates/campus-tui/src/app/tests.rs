use std::sync::Arc;

use campus_core::{Store, listing::StudentSortKey, query::SortDirection, session::Session};
use chrono::{Datelike, NaiveDate, Weekday};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

fn signed_out() -> App {
  let store = Arc::new(Store::seeded().unwrap());
  App::new(store, Session::default(), String::new(), day(2023, 9, 5))
}

fn signed_in(email: &str) -> App {
  let store = Arc::new(Store::seeded().unwrap());
  let mut session = Session::default();
  session.login(&store, email, "password").unwrap();
  App::new(store, session, email.to_owned(), day(2023, 9, 5))
}

fn press(app: &mut App, code: KeyCode) -> bool {
  app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_str(app: &mut App, s: &str) {
  for c in s.chars() {
    press(app, KeyCode::Char(c));
  }
}

// ─── Login ────────────────────────────────────────────────────────────────────

#[test]
fn login_form_signs_in() {
  let mut app = signed_out();
  assert_eq!(app.screen, Screen::Login);

  type_str(&mut app, "admin@edutrack.com");
  press(&mut app, KeyCode::Tab);
  type_str(&mut app, "password");
  press(&mut app, KeyCode::Enter);

  assert_eq!(app.screen, Screen::Main);
  assert_eq!(app.page, Page::Dashboard);
  assert_eq!(app.user().map(|u| u.name.as_str()), Some("Admin User"));
  assert!(app.login.password.is_empty());
}

#[test]
fn failed_login_stays_on_form() {
  let mut app = signed_out();
  type_str(&mut app, "admin@edutrack.com");
  press(&mut app, KeyCode::Tab);
  type_str(&mut app, "hunter2");
  press(&mut app, KeyCode::Enter);

  assert_eq!(app.screen, Screen::Login);
  assert!(app.login.error.is_some());
  assert!(app.login.password.is_empty());
  assert!(!app.session.is_authenticated());
}

#[test]
fn blank_login_reports_missing_credentials() {
  let mut app = signed_out();
  press(&mut app, KeyCode::Enter);
  assert_eq!(app.screen, Screen::Login);
  assert!(app.login.error.is_some());
}

#[test]
fn q_is_typed_on_the_login_form() {
  let mut app = signed_out();
  assert!(press(&mut app, KeyCode::Char('q')));
  assert_eq!(app.login.email, "q");
}

#[test]
fn ctrl_c_quits_anywhere() {
  let mut app = signed_out();
  assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn logout_returns_to_login_with_email_kept() {
  let mut app = signed_in("faculty@edutrack.com");
  press(&mut app, KeyCode::Char('2'));
  press(&mut app, KeyCode::Char('x'));

  assert_eq!(app.screen, Screen::Login);
  assert!(!app.session.is_authenticated());
  assert_eq!(app.login.email, "faculty@edutrack.com");
  assert_eq!(app.login.focus, LoginField::Password);
}

// ─── Navigation ───────────────────────────────────────────────────────────────

#[test]
fn tab_and_digits_switch_pages() {
  let mut app = signed_in("admin@edutrack.com");
  press(&mut app, KeyCode::Tab);
  assert_eq!(app.page, Page::Students);
  press(&mut app, KeyCode::BackTab);
  assert_eq!(app.page, Page::Dashboard);
  press(&mut app, KeyCode::BackTab);
  assert_eq!(app.page, Page::Profile);
  press(&mut app, KeyCode::Char('4'));
  assert_eq!(app.page, Page::Grades);
  assert!(!press(&mut app, KeyCode::Char('q')));
}

#[test]
fn enter_opens_detail_and_esc_closes_it() {
  let mut app = signed_in("admin@edutrack.com");
  press(&mut app, KeyCode::Char('2'));
  press(&mut app, KeyCode::Enter);
  assert_eq!(
    app.detail,
    Some(Detail::Student {
      id:  "1".into(),
      tab: StudentTab::Overview,
    })
  );

  press(&mut app, KeyCode::Right);
  press(&mut app, KeyCode::Right);
  assert!(matches!(
    app.detail,
    Some(Detail::Student {
      tab: StudentTab::Grades,
      ..
    })
  ));
  press(&mut app, KeyCode::Left);
  press(&mut app, KeyCode::Left);
  press(&mut app, KeyCode::Left);
  assert!(matches!(
    app.detail,
    Some(Detail::Student {
      tab: StudentTab::Attendance,
      ..
    })
  ));

  press(&mut app, KeyCode::Esc);
  assert!(app.detail.is_none());
  assert_eq!(app.page, Page::Students);
}

#[test]
fn course_detail_opens_from_catalog() {
  let mut app = signed_in("admin@edutrack.com");
  press(&mut app, KeyCode::Char('3'));
  // Name order puts "Computer Networks" first.
  press(&mut app, KeyCode::Enter);
  assert_eq!(
    app.detail,
    Some(Detail::Course {
      id:  "5".into(),
      tab: CourseTab::Overview,
    })
  );
}

// ─── Listings ─────────────────────────────────────────────────────────────────

#[test]
fn sort_keys_cycle_and_reverse() {
  let mut app = signed_in("admin@edutrack.com");
  press(&mut app, KeyCode::Char('2'));

  let first = |app: &App| app.student_listing().items[0].id.clone();
  assert_eq!(first(&app), "1");

  press(&mut app, KeyCode::Char('s'));
  assert_eq!(app.students.sort.key, StudentSortKey::Id);
  assert_eq!(app.students.sort.direction, SortDirection::Asc);

  press(&mut app, KeyCode::Char('r'));
  assert_eq!(app.students.sort.direction, SortDirection::Desc);
  assert_eq!(first(&app), "5");
  assert_eq!(app.student_listing().len(), 5);
}

#[test]
fn search_narrows_and_esc_clears() {
  let mut app = signed_in("admin@edutrack.com");
  press(&mut app, KeyCode::Char('2'));
  press(&mut app, KeyCode::Char('/'));
  assert!(app.search_active);

  // Typed while searching, so these do not switch page or quit.
  type_str(&mut app, "mia");
  assert_eq!(app.page, Page::Students);
  assert_eq!(app.student_listing().len(), 1);

  press(&mut app, KeyCode::Enter);
  assert!(!app.search_active);
  assert_eq!(app.students.text, "mia");

  press(&mut app, KeyCode::Char('/'));
  press(&mut app, KeyCode::Esc);
  assert!(app.students.text.is_empty());
  assert_eq!(app.student_listing().len(), 5);
}

#[test]
fn cursor_stays_within_listing() {
  let mut app = signed_in("admin@edutrack.com");
  press(&mut app, KeyCode::Char('2'));
  for _ in 0..10 {
    press(&mut app, KeyCode::Down);
  }
  assert_eq!(app.cursor, 4);
  press(&mut app, KeyCode::Char('f'));
  assert_eq!(app.cursor, 0);
}

#[test]
fn status_filter_cycles_through_values() {
  let mut app = signed_in("admin@edutrack.com");
  press(&mut app, KeyCode::Char('2'));
  press(&mut app, KeyCode::Char('f'));
  assert_eq!(app.students.status, Filter::Only(campus_core::entity::StudentStatus::Active));
  press(&mut app, KeyCode::Char('f'));
  assert_eq!(app.student_listing().len(), 0);
}

#[test]
fn grades_sort_cycles_from_none() {
  let mut app = signed_in("admin@edutrack.com");
  press(&mut app, KeyCode::Char('4'));
  assert!(app.grades.sort.is_none());
  press(&mut app, KeyCode::Char('s'));
  assert!(app.grades.sort.is_some());

  press(&mut app, KeyCode::Char('c'));
  assert_eq!(app.grades.course, Filter::Only("1".to_owned()));
  assert_eq!(app.grade_listing().len(), 1);
}

// ─── Attendance ───────────────────────────────────────────────────────────────

#[test]
fn attendance_needs_a_course() {
  let mut app = signed_in("faculty@edutrack.com");
  press(&mut app, KeyCode::Char('5'));
  assert!(app.roster_listing().is_none());

  press(&mut app, KeyCode::Char('c'));
  assert_eq!(app.attendance.course.as_deref(), Some("1"));
  assert_eq!(app.roster_listing().map(|l| l.len()), Some(2));
}

#[test]
fn week_view_spans_monday_to_friday() {
  let mut app = signed_in("faculty@edutrack.com");
  press(&mut app, KeyCode::Char('5'));
  press(&mut app, KeyCode::Char('w'));
  assert_eq!(app.attendance.mode, AttendanceMode::Week);

  let dates = app.attendance.dates();
  assert_eq!(dates.len(), 5);
  assert_eq!(dates[0], day(2023, 9, 4));
  assert_eq!(dates[0].weekday(), Weekday::Mon);
  assert_eq!(dates[4], day(2023, 9, 8));

  press(&mut app, KeyCode::Right);
  assert_eq!(app.attendance.date, day(2023, 9, 12));
  press(&mut app, KeyCode::Char('t'));
  assert_eq!(app.attendance.date, day(2023, 9, 5));
}

#[test]
fn day_view_steps_one_day() {
  let mut app = signed_in("faculty@edutrack.com");
  press(&mut app, KeyCode::Char('5'));
  press(&mut app, KeyCode::Left);
  assert_eq!(app.attendance.date, day(2023, 9, 4));
  assert_eq!(app.attendance.dates(), vec![day(2023, 9, 4)]);
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

#[test]
fn student_dashboard_lists_own_courses() {
  let app = signed_in("student@edutrack.com");
  let codes: Vec<&str> = app.my_courses().iter().map(|c| c.course_code.as_str()).collect();
  assert_eq!(codes, ["CS101", "CS304"]);
  assert_eq!(app.linked_student().map(|s| s.id.as_str()), Some("1"));
}

#[test]
fn staff_dashboard_lists_first_three_courses() {
  let app = signed_in("admin@edutrack.com");
  assert_eq!(app.my_courses().len(), 3);
  assert!(app.linked_student().is_none());
}
