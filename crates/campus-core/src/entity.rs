//! Entity types: the records that make up a campus dataset.
//!
//! Every entity is identified by an opaque string id. Cross-entity fields
//! (`student_id`, `course_id`) hold those ids and are resolved through
//! [`crate::store::Store`]; nothing here follows a reference on its own.
//!
//! Serde names follow the dataset's JSON shape: camelCase keys and lowercase
//! enum values.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// ─── Users ───────────────────────────────────────────────────────────────────

/// What a signed-in user is allowed to see.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Admin,
  Faculty,
  Student,
}

/// An account that can sign in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub role:       Role,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avatar:     Option<String>,
  /// For student accounts, the [`Student::id`] this user signs in as.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub student_id: Option<String>,
}

// ─── Students ────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StudentStatus {
  Active,
  Inactive,
  Graduated,
  Suspended,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  pub street:   String,
  pub city:     String,
  pub state:    String,
  pub zip_code: String,
  pub country:  String,
}

impl Address {
  /// Single-line rendering, e.g. `123 University Ave, College Town, CA 90210, USA`.
  pub fn one_line(&self) -> String {
    format!(
      "{}, {}, {} {}, {}",
      self.street, self.city, self.state, self.zip_code, self.country
    )
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  pub id:              String,
  /// Human-readable student code (e.g. `CS10001`); unique per dataset.
  pub student_id:      String,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  #[serde(default)]
  pub phone:           Option<String>,
  #[serde(default)]
  pub date_of_birth:   Option<NaiveDate>,
  #[serde(default)]
  pub gender:          Option<String>,
  #[serde(default)]
  pub address:         Option<Address>,
  pub enrollment_date: NaiveDate,
  pub status:          StudentStatus,
  pub program:         String,
  pub batch:           String,
  #[serde(default)]
  pub avatar:          Option<String>,
}

impl Student {
  /// `first last`, the form used for display, search and sorting.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

// ─── Courses ─────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CourseStatus {
  Active,
  Inactive,
  Upcoming,
}

/// When and where a course meets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
  pub days:       Vec<Weekday>,
  /// `HH:MM`, kept as written in the dataset.
  pub start_time: String,
  pub end_time:   String,
  pub location:   String,
}

impl Schedule {
  /// e.g. `Mon, Wed 09:00 - 10:30`.
  pub fn summary(&self) -> String {
    let days = self
      .days
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(", ");
    format!("{days} {} - {}", self.start_time, self.end_time)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
  pub id:                String,
  /// Catalog code (e.g. `CS101`); unique per dataset.
  pub course_code:       String,
  pub name:              String,
  pub description:       String,
  pub credits:           u32,
  pub department:        String,
  pub semester:          String,
  /// Instructor's display name. Not a reference to a [`User`].
  pub instructor:        String,
  pub schedule:          Schedule,
  pub max_students:      u32,
  /// Enrollment figure as stored in the dataset. It is never reconciled
  /// with the enrollment table; see [`crate::store::Store::enrollment_count`]
  /// for the derived value.
  pub enrolled_students: u32,
  pub status:            CourseStatus,
}

// ─── Enrollments ─────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EnrollmentStatus {
  Enrolled,
  Dropped,
  Completed,
}

/// The join record between a [`Student`] and a [`Course`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
  pub id:              String,
  pub student_id:      String,
  pub course_id:       String,
  pub enrollment_date: NaiveDate,
  pub status:          EnrollmentStatus,
}

// ─── Grades ──────────────────────────────────────────────────────────────────

/// One graded assignment within a [`Grade`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
  pub id:        String,
  pub name:      String,
  pub score:     f64,
  pub max_score: f64,
  /// Fraction of the final mark, e.g. `0.15`.
  pub weight:    f64,
}

/// A midterm or final exam result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamScore {
  pub score:     f64,
  pub max_score: f64,
  pub weight:    f64,
}

/// The marks a student earned in one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
  pub id:           String,
  pub student_id:   String,
  pub course_id:    String,
  #[serde(default)]
  pub assignments:  Vec<Assignment>,
  #[serde(default)]
  pub midterm_exam: Option<ExamScore>,
  #[serde(default)]
  pub final_exam:   Option<ExamScore>,
  /// Stored percentage; not recomputed from the components.
  #[serde(default)]
  pub total_score:  Option<f64>,
  #[serde(default)]
  pub letter_grade: Option<String>,
  #[serde(default)]
  pub gpa:          Option<f64>,
  #[serde(default)]
  pub comments:     Option<String>,
}

impl Grade {
  /// Every weighted component as `(score, max_score, weight)`, assignments
  /// first, then midterm, then final.
  pub fn components(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
    self
      .assignments
      .iter()
      .map(|a| (a.score, a.max_score, a.weight))
      .chain(
        [self.midterm_exam, self.final_exam]
          .into_iter()
          .flatten()
          .map(|e| (e.score, e.max_score, e.weight)),
      )
  }

  /// Sum of all component weights; expected to be `1.0`.
  pub fn weight_sum(&self) -> f64 { self.components().map(|(_, _, w)| w).sum() }
}

// ─── Attendance ──────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
  Present,
  Absent,
  Late,
  Excused,
}

impl AttendanceStatus {
  /// Whether this status counts towards the attendance rate.
  pub fn counts_as_present(self) -> bool {
    matches!(self, Self::Present | Self::Late)
  }
}

/// One student's attendance at one meeting of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
  pub id:         String,
  pub student_id: String,
  pub course_id:  String,
  pub date:       NaiveDate,
  pub status:     AttendanceStatus,
  #[serde(default)]
  pub notes:      Option<String>,
}

// ─── Announcements ───────────────────────────────────────────────────────────

/// A dashboard notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
  pub id:      String,
  pub title:   String,
  pub date:    NaiveDate,
  pub content: String,
}

// ─── Deadlines ───────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeadlineKind {
  Exam,
  Assignment,
}

/// An upcoming exam or hand-in shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
  pub id:       String,
  pub title:    String,
  pub due_date: NaiveDate,
  #[serde(rename = "type")]
  pub kind:     DeadlineKind,
}

impl Deadline {
  /// Whole days from `today` until the due date; negative once it has passed.
  pub fn days_left(&self, today: NaiveDate) -> i64 {
    (self.due_date - today).num_days()
  }
}
