//! Application state machine and event dispatcher.

use std::{cell::Cell, sync::Arc};

use campus_core::{
  Store,
  entity::{Course, Role, Student, User},
  listing::{
    CourseQuery, CourseSortKey, GradeQuery, GradeRow, RosterQuery, StudentQuery,
    StudentSortKey,
  },
  query::{Filter, Listing},
  session::Session,
};
use chrono::{Days, NaiveDate, Weekday};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::{Display, EnumIter, IntoEnumIterator};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Signed out; only the login form is shown.
  Login,
  /// Signed in; the page tabs are shown.
  Main,
}

/// Top-level pages, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Page {
  Dashboard,
  Students,
  Courses,
  Grades,
  Attendance,
  Profile,
}

impl Page {
  pub fn index(self) -> usize {
    Self::iter().position(|p| p == self).unwrap_or(0)
  }

  pub fn from_index(i: usize) -> Option<Self> { Self::iter().nth(i) }

  pub fn next(self) -> Self {
    Self::from_index(self.index() + 1).unwrap_or(Self::Dashboard)
  }

  pub fn prev(self) -> Self {
    match self.index() {
      0 => Self::Profile,
      i => Self::from_index(i - 1).unwrap_or(Self::Dashboard),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum StudentTab {
  Overview,
  Courses,
  Grades,
  Attendance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum CourseTab {
  Overview,
  Students,
  Attendance,
}

/// Step to the neighbouring variant of a tab enum, wrapping at both ends.
fn step<T: IntoEnumIterator + PartialEq + Copy>(current: T, forward: bool) -> T {
  let all: Vec<T> = T::iter().collect();
  let i = all.iter().position(|t| *t == current).unwrap_or(0);
  let n = all.len();
  let j = if forward { (i + 1) % n } else { (i + n - 1) % n };
  all[j]
}

/// A drill-down view opened from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
  Student { id: String, tab: StudentTab },
  Course { id: String, tab: CourseTab },
}

// ─── Login form ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
  Email,
  Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
  pub email:    String,
  pub password: String,
  pub focus:    LoginField,
  /// Shown under the form after a failed attempt.
  pub error:    Option<String>,
}

impl LoginForm {
  fn new(email: String) -> Self {
    let focus = if email.is_empty() {
      LoginField::Email
    } else {
      LoginField::Password
    };
    Self {
      email,
      password: String::new(),
      focus,
      error: None,
    }
  }

  fn focused_mut(&mut self) -> &mut String {
    match self.focus {
      LoginField::Email => &mut self.email,
      LoginField::Password => &mut self.password,
    }
  }

  fn switch_focus(&mut self) {
    self.focus = match self.focus {
      LoginField::Email => LoginField::Password,
      LoginField::Password => LoginField::Email,
    };
  }
}

// ─── Attendance page state ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AttendanceMode {
  Day,
  Week,
}

#[derive(Debug, Clone)]
pub struct AttendanceView {
  /// Entity id of the selected course; nothing is listed until one is picked.
  pub course: Option<String>,
  pub date:   NaiveDate,
  pub mode:   AttendanceMode,
  pub roster: RosterQuery,
}

impl AttendanceView {
  /// The dates shown as columns: the selected day, or Monday–Friday of its
  /// week.
  pub fn dates(&self) -> Vec<NaiveDate> {
    match self.mode {
      AttendanceMode::Day => vec![self.date],
      AttendanceMode::Week => self
        .date
        .week(Weekday::Mon)
        .first_day()
        .iter_days()
        .take(5)
        .collect(),
    }
  }

  fn shift(&mut self, forward: bool) {
    let days = Days::new(match self.mode {
      AttendanceMode::Day => 1,
      AttendanceMode::Week => 7,
    });
    let moved = if forward {
      self.date.checked_add_days(days)
    } else {
      self.date.checked_sub_days(days)
    };
    if let Some(date) = moved {
      self.date = date;
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub store:   Arc<Store>,
  pub session: Session,

  /// Login gate or page view.
  pub screen: Screen,
  pub page:   Page,
  /// Drill-down view covering the current page, if any.
  pub detail: Option<Detail>,

  pub login: LoginForm,

  pub students:   StudentQuery,
  pub courses:    CourseQuery,
  pub grades:     GradeQuery,
  pub attendance: AttendanceView,

  /// Whether keystrokes go into the current page's search box.
  pub search_active: bool,

  /// Cursor position within the current page's *filtered* listing.
  pub cursor: usize,

  /// Scroll offset within a detail tab.
  pub detail_scroll: usize,

  /// Line count of the detail tab last drawn; bounds `detail_scroll`.
  pub detail_lines: Cell<usize>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub today: NaiveDate,
}

impl App {
  /// `email` pre-fills the login form.
  pub fn new(store: Arc<Store>, session: Session, email: String, today: NaiveDate) -> Self {
    let screen = if session.is_authenticated() {
      Screen::Main
    } else {
      Screen::Login
    };
    Self {
      store,
      session,
      screen,
      page: Page::Dashboard,
      detail: None,
      login: LoginForm::new(email),
      students: StudentQuery::default(),
      courses: CourseQuery::default(),
      grades: GradeQuery::default(),
      attendance: AttendanceView {
        course: None,
        date:   today,
        mode:   AttendanceMode::Day,
        roster: RosterQuery::default(),
      },
      search_active: false,
      cursor: 0,
      detail_scroll: 0,
      detail_lines: Cell::new(0),
      status_msg: String::new(),
      today,
    }
  }

  pub fn user(&self) -> Option<&User> { self.session.current() }

  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn student_listing(&self) -> Listing<&Student> {
    self.students.apply(self.store.students())
  }

  pub fn course_listing(&self) -> Listing<&Course> {
    self.courses.apply(self.store.courses())
  }

  pub fn grade_listing(&self) -> Listing<GradeRow<'_>> { self.grades.apply(&self.store) }

  /// Students of the selected attendance course that match the roster search.
  pub fn roster_listing(&self) -> Option<Listing<&Student>> {
    let course_id = self.attendance.course.as_deref()?;
    Some(self.attendance.roster.apply(&self.store, course_id))
  }

  /// The student record a student-role user signs in as.
  pub fn linked_student(&self) -> Option<&Student> {
    let id = self.user()?.student_id.as_deref()?;
    self.store.student(id)
  }

  /// Courses on the dashboard: a student's own enrollments, otherwise the
  /// first three courses in the catalog.
  pub fn my_courses(&self) -> Vec<&Course> {
    match self.user().map(|u| u.role) {
      Some(Role::Student) => self
        .linked_student()
        .map(|s| self.store.courses_for_student(&s.id))
        .unwrap_or_default(),
      _ => self.store.courses().iter().take(3).collect(),
    }
  }

  fn list_len(&self) -> usize {
    match self.page {
      Page::Students => self.student_listing().len(),
      Page::Courses => self.course_listing().len(),
      Page::Grades => self.grade_listing().len(),
      Page::Attendance => self.roster_listing().map_or(0, |l| l.len()),
      Page::Dashboard | Page::Profile => 0,
    }
  }

  pub fn has_search(&self) -> bool {
    !matches!(self.page, Page::Dashboard | Page::Profile)
  }

  /// Text of the current page's search box.
  pub fn search_text(&self) -> &str {
    match self.page {
      Page::Students => &self.students.text,
      Page::Courses => &self.courses.text,
      Page::Grades => &self.grades.text,
      Page::Attendance => &self.attendance.roster.text,
      Page::Dashboard | Page::Profile => "",
    }
  }

  fn search_text_mut(&mut self) -> Option<&mut String> {
    match self.page {
      Page::Students => Some(&mut self.students.text),
      Page::Courses => Some(&mut self.courses.text),
      Page::Grades => Some(&mut self.grades.text),
      Page::Attendance => Some(&mut self.attendance.roster.text),
      Page::Dashboard | Page::Profile => None,
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.screen {
      Screen::Login => {
        self.handle_login_key(key);
        true
      }
      Screen::Main if self.search_active => {
        self.handle_search_key(key);
        true
      }
      Screen::Main if self.detail.is_some() => self.handle_detail_key(key),
      Screen::Main => self.handle_page_key(key),
    }
  }

  fn handle_login_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
        self.login.switch_focus();
      }
      KeyCode::Enter => self.submit_login(),
      KeyCode::Backspace => {
        self.login.focused_mut().pop();
      }
      KeyCode::Esc => self.login.error = None,
      KeyCode::Char(c) => self.login.focused_mut().push(c),
      _ => {}
    }
  }

  fn submit_login(&mut self) {
    let result = self
      .session
      .login(&self.store, &self.login.email, &self.login.password)
      .map(|u| u.name.clone());
    match result {
      Ok(name) => {
        self.login.password.clear();
        self.login.error = None;
        self.screen = Screen::Main;
        self.open_page(Page::Dashboard);
        self.status_msg = format!("Signed in as {name}");
      }
      Err(e) => {
        self.login.password.clear();
        self.login.focus = LoginField::Password;
        self.login.error = Some(e.to_string());
      }
    }
  }

  fn logout(&mut self) {
    self.session.logout();
    self.screen = Screen::Login;
    self.detail = None;
    self.search_active = false;
    self.login = LoginForm::new(std::mem::take(&mut self.login.email));
    self.status_msg = "Signed out".into();
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        if let Some(text) = self.search_text_mut() {
          text.clear();
        }
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        if let Some(text) = self.search_text_mut() {
          text.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(text) = self.search_text_mut() {
          text.push(c);
        }
      }
      _ => return,
    }
    self.cursor = 0;
  }

  fn handle_page_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('x') => self.logout(),

      KeyCode::Tab => self.open_page(self.page.next()),
      KeyCode::BackTab => self.open_page(self.page.prev()),
      KeyCode::Char(c @ '1'..='6') => {
        let i = c as usize - '1' as usize;
        if let Some(page) = Page::from_index(i) {
          self.open_page(page);
        }
      }

      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.list_len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      KeyCode::Char('/') if self.has_search() => {
        self.search_active = true;
        self.cursor = 0;
      }
      KeyCode::Enter => self.open_detail_at_cursor(),

      _ => self.handle_page_specific_key(key.code),
    }
    true
  }

  fn handle_page_specific_key(&mut self, code: KeyCode) {
    match (self.page, code) {
      (Page::Students, KeyCode::Char('s')) => {
        let next = step(self.students.sort.key, true);
        self.students.sort.toggle(next);
      }
      (Page::Students, KeyCode::Char('r')) => {
        let key: StudentSortKey = self.students.sort.key;
        self.students.sort.toggle(key);
      }
      (Page::Students, KeyCode::Char('f')) => {
        let options: Vec<_> = campus_core::entity::StudentStatus::iter().collect();
        self.students.status = self.students.status.cycle(&options);
      }
      (Page::Students, KeyCode::Char('p')) => {
        let options = owned(self.store.programs());
        self.students.program = self.students.program.cycle(&options);
      }

      (Page::Courses, KeyCode::Char('s')) => {
        let next = step(self.courses.sort.key, true);
        self.courses.sort.toggle(next);
      }
      (Page::Courses, KeyCode::Char('r')) => {
        let key: CourseSortKey = self.courses.sort.key;
        self.courses.sort.toggle(key);
      }
      (Page::Courses, KeyCode::Char('f')) => {
        let options: Vec<_> = campus_core::entity::CourseStatus::iter().collect();
        self.courses.status = self.courses.status.cycle(&options);
      }
      (Page::Courses, KeyCode::Char('p')) => {
        let options = owned(self.store.departments());
        self.courses.department = self.courses.department.cycle(&options);
      }

      (Page::Grades, KeyCode::Char('s')) => self.grades.cycle_sort(),
      (Page::Grades, KeyCode::Char('c')) => {
        let options = owned(self.store.courses().iter().map(|c| c.id.as_str()));
        self.grades.course = self.grades.course.cycle(&options);
      }
      (Page::Grades, KeyCode::Char('u')) => {
        let options = owned(self.store.students().iter().map(|s| s.id.as_str()));
        self.grades.student = self.grades.student.cycle(&options);
      }

      (Page::Attendance, KeyCode::Char('c')) => {
        let options = owned(self.store.courses().iter().map(|c| c.id.as_str()));
        let current = self
          .attendance
          .course
          .clone()
          .map_or(Filter::All, Filter::Only);
        self.attendance.course = current.cycle(&options).as_option().cloned();
      }
      (Page::Attendance, KeyCode::Char('w')) => {
        self.attendance.mode = match self.attendance.mode {
          AttendanceMode::Day => AttendanceMode::Week,
          AttendanceMode::Week => AttendanceMode::Day,
        };
      }
      (Page::Attendance, KeyCode::Left | KeyCode::Char('h')) => self.attendance.shift(false),
      (Page::Attendance, KeyCode::Right | KeyCode::Char('l')) => self.attendance.shift(true),
      (Page::Attendance, KeyCode::Char('t')) => self.attendance.date = self.today,

      _ => return,
    }
    self.cursor = 0;
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('x') => self.logout(),

      KeyCode::Esc | KeyCode::Backspace => {
        self.detail = None;
        self.detail_scroll = 0;
      }

      KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.step_detail_tab(true),
      KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.step_detail_tab(false),

      KeyCode::Down | KeyCode::Char('j') => {
        let last = self.detail_lines.get().saturating_sub(1);
        self.detail_scroll = self.detail_scroll.saturating_add(1).min(last);
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      _ => {}
    }
    true
  }

  fn step_detail_tab(&mut self, forward: bool) {
    match &mut self.detail {
      Some(Detail::Student { tab, .. }) => *tab = step(*tab, forward),
      Some(Detail::Course { tab, .. }) => *tab = step(*tab, forward),
      None => return,
    }
    self.detail_scroll = 0;
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Switch to `page`, closing any detail view.
  pub fn open_page(&mut self, page: Page) {
    tracing::debug!(%page, "open page");
    self.page = page;
    self.detail = None;
    self.search_active = false;
    self.cursor = 0;
    self.detail_scroll = 0;
  }

  fn open_detail_at_cursor(&mut self) {
    let detail = match self.page {
      Page::Students => self
        .student_listing()
        .items
        .get(self.cursor)
        .map(|s| Detail::Student {
          id:  s.id.clone(),
          tab: StudentTab::Overview,
        }),
      Page::Courses => self
        .course_listing()
        .items
        .get(self.cursor)
        .map(|c| Detail::Course {
          id:  c.id.clone(),
          tab: CourseTab::Overview,
        }),
      Page::Grades => self
        .grade_listing()
        .items
        .get(self.cursor)
        .and_then(|row| row.student)
        .map(|s| Detail::Student {
          id:  s.id.clone(),
          tab: StudentTab::Grades,
        }),
      Page::Attendance => self
        .roster_listing()
        .and_then(|l| l.items.get(self.cursor).copied())
        .map(|s| Detail::Student {
          id:  s.id.clone(),
          tab: StudentTab::Attendance,
        }),
      Page::Dashboard | Page::Profile => None,
    };
    if detail.is_some() {
      self.detail = detail;
      self.detail_scroll = 0;
    }
  }
}

fn owned<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
  values.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests;
