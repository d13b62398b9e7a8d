//! [`Dataset`] holds the raw collections; [`Store`] is the read-only, indexed
//! view built from it.
//!
//! A store is built once at start-up and never mutated. Resolvers live in
//! [`crate::resolve`] and derived figures in [`crate::metrics`]; both borrow
//! from the store.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  entity::{
    Announcement, Attendance, Course, Deadline, Enrollment, Grade, Student,
    User,
  },
  integrity::{self, Issue, Severity, Strictness},
};

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// The seed collections, exactly as deserialised.
///
/// Collection order is significant: resolvers preserve it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
  #[serde(default)]
  pub users:         Vec<User>,
  #[serde(default)]
  pub students:      Vec<Student>,
  #[serde(default)]
  pub courses:       Vec<Course>,
  #[serde(default)]
  pub enrollments:   Vec<Enrollment>,
  #[serde(default)]
  pub grades:        Vec<Grade>,
  #[serde(default)]
  pub attendance:    Vec<Attendance>,
  #[serde(default)]
  pub announcements: Vec<Announcement>,
  #[serde(default)]
  pub deadlines:     Vec<Deadline>,
}

impl Dataset {
  /// Parse a dataset from its JSON form.
  pub fn from_json_str(raw: &str) -> Result<Self> {
    Ok(serde_json::from_str(raw)?)
  }

  /// Read and parse a dataset file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json_str(&raw)
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Read-only access to a validated [`Dataset`].
///
/// Id lookups go through hash indexes. When a dataset repeats an id the
/// first record wins, and the duplicate is reported as an integrity issue.
#[derive(Debug, Clone)]
pub struct Store {
  data:            Dataset,
  student_by_id:   HashMap<String, usize>,
  course_by_id:    HashMap<String, usize>,
  issues:          Vec<Issue>,
}

impl Store {
  /// Index `data`, run the integrity checks and apply `strictness`.
  ///
  /// Under [`Strictness::Strict`] any error-severity issue rejects the
  /// dataset. Otherwise the issues are kept (see [`Store::issues`]) and,
  /// under [`Strictness::Warn`], logged.
  pub fn load(data: Dataset, strictness: Strictness) -> Result<Self> {
    let issues = integrity::check(&data);

    if strictness == Strictness::Strict {
      let errors: Vec<Issue> = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .cloned()
        .collect();
      if !errors.is_empty() {
        return Err(Error::Integrity(errors));
      }
    }

    if strictness != Strictness::Lenient {
      for issue in &issues {
        match issue.severity() {
          Severity::Error => tracing::warn!(%issue, "dataset integrity error"),
          Severity::Warning => tracing::info!(%issue, "dataset integrity warning"),
        }
      }
    }

    let store = Self {
      student_by_id: first_index(data.students.iter().map(|s| s.id.as_str())),
      course_by_id: first_index(data.courses.iter().map(|c| c.id.as_str())),
      data,
      issues,
    };

    tracing::info!(
      users = store.data.users.len(),
      students = store.data.students.len(),
      courses = store.data.courses.len(),
      enrollments = store.data.enrollments.len(),
      grades = store.data.grades.len(),
      attendance = store.data.attendance.len(),
      issues = store.issues.len(),
      "dataset loaded"
    );

    Ok(store)
  }

  /// The built-in seed dataset, loaded with [`Strictness::Warn`].
  pub fn seeded() -> Result<Self> {
    Self::load(Dataset::seed()?, Strictness::Warn)
  }

  /// Integrity issues found at load time.
  pub fn issues(&self) -> &[Issue] { &self.issues }

  // ── Collections ───────────────────────────────────────────────────────

  pub fn users(&self) -> &[User] { &self.data.users }

  pub fn students(&self) -> &[Student] { &self.data.students }

  pub fn courses(&self) -> &[Course] { &self.data.courses }

  pub fn enrollments(&self) -> &[Enrollment] { &self.data.enrollments }

  pub fn grades(&self) -> &[Grade] { &self.data.grades }

  pub fn attendance(&self) -> &[Attendance] { &self.data.attendance }

  pub fn announcements(&self) -> &[Announcement] { &self.data.announcements }

  pub fn deadlines(&self) -> &[Deadline] { &self.data.deadlines }

  // ── Point lookups ─────────────────────────────────────────────────────

  /// The student with entity id `id`.
  pub fn student(&self, id: &str) -> Option<&Student> {
    self.student_by_id.get(id).map(|&i| &self.data.students[i])
  }

  /// The course with entity id `id`.
  pub fn course(&self, id: &str) -> Option<&Course> {
    self.course_by_id.get(id).map(|&i| &self.data.courses[i])
  }

  /// The user whose email matches `email`, ignoring ASCII case.
  pub fn user_by_email(&self, email: &str) -> Option<&User> {
    self
      .data
      .users
      .iter()
      .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
  }
}

/// Map each id to the position of its first occurrence.
fn first_index<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
  let mut index = HashMap::new();
  for (i, id) in ids.enumerate() {
    index.entry(id.to_owned()).or_insert(i);
  }
  index
}
