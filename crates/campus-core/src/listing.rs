//! Per-page queries built on [`crate::query`].
//!
//! | Page | Text fields | Filters | Sort keys |
//! |------|-------------|---------|-----------|
//! | Students | full name, code, email | status, program | name, id, program, status |
//! | Courses | name, code, instructor | status, department | name, code, instructor, students |
//! | Grades | student name, course name, course code, student code | course, student | student, course, score |
//! | Attendance roster | full name, code | — | — |

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  entity::{Course, CourseStatus, Grade, Student, StudentStatus},
  query::{self, Filter, Listing, Sort, collate, text_matches},
  store::Store,
};

// ─── Students ────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StudentSortKey {
  #[default]
  Name,
  Id,
  Program,
  Status,
}

impl StudentSortKey {
  pub fn compare(self, a: &Student, b: &Student) -> Ordering {
    match self {
      Self::Name => collate(&a.full_name(), &b.full_name()),
      Self::Id => collate(&a.student_id, &b.student_id),
      Self::Program => collate(&a.program, &b.program),
      Self::Status => collate(a.status.as_ref(), b.status.as_ref()),
    }
  }
}

/// Search, filter and sort state for the student roster.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentQuery {
  pub text:    String,
  pub status:  Filter<StudentStatus>,
  pub program: Filter<String>,
  pub sort:    Sort<StudentSortKey>,
}

impl Default for StudentQuery {
  fn default() -> Self {
    Self {
      text:    String::new(),
      status:  Filter::All,
      program: Filter::All,
      sort:    Sort::asc(StudentSortKey::Name),
    }
  }
}

impl StudentQuery {
  pub fn matches(&self, student: &Student) -> bool {
    text_matches(
      &self.text,
      [
        student.full_name().as_str(),
        student.student_id.as_str(),
        student.email.as_str(),
      ],
    ) && self.status.matches(&student.status)
      && self.program.matches(student.program.as_str())
  }

  pub fn apply<'a>(&self, students: &'a [Student]) -> Listing<&'a Student> {
    let sort = self.sort;
    query::run(
      students,
      |s| self.matches(s),
      Some(|a: &&Student, b: &&Student| sort.direction.apply(sort.key.compare(a, b))),
    )
  }
}

// ─── Courses ─────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CourseSortKey {
  #[default]
  Name,
  Code,
  Instructor,
  /// The stored `enrolledStudents` figure.
  Students,
}

impl CourseSortKey {
  pub fn compare(self, a: &Course, b: &Course) -> Ordering {
    match self {
      Self::Name => collate(&a.name, &b.name),
      Self::Code => collate(&a.course_code, &b.course_code),
      Self::Instructor => collate(&a.instructor, &b.instructor),
      Self::Students => a.enrolled_students.cmp(&b.enrolled_students),
    }
  }
}

/// Search, filter and sort state for the course catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseQuery {
  pub text:       String,
  pub status:     Filter<CourseStatus>,
  pub department: Filter<String>,
  pub sort:       Sort<CourseSortKey>,
}

impl Default for CourseQuery {
  fn default() -> Self {
    Self {
      text:       String::new(),
      status:     Filter::All,
      department: Filter::All,
      sort:       Sort::asc(CourseSortKey::Name),
    }
  }
}

impl CourseQuery {
  pub fn matches(&self, course: &Course) -> bool {
    text_matches(
      &self.text,
      [
        course.name.as_str(),
        course.course_code.as_str(),
        course.instructor.as_str(),
      ],
    ) && self.status.matches(&course.status)
      && self.department.matches(course.department.as_str())
  }

  pub fn apply<'a>(&self, courses: &'a [Course]) -> Listing<&'a Course> {
    let sort = self.sort;
    query::run(
      courses,
      |c| self.matches(c),
      Some(|a: &&Course, b: &&Course| sort.direction.apply(sort.key.compare(a, b))),
    )
  }
}

// ─── Grades ──────────────────────────────────────────────────────────────────

/// A grade joined with its student and course. Either side may be missing
/// when the grade's reference dangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeRow<'a> {
  pub grade:   &'a Grade,
  pub student: Option<&'a Student>,
  pub course:  Option<&'a Course>,
}

impl<'a> GradeRow<'a> {
  pub fn join(store: &'a Store, grade: &'a Grade) -> Self {
    Self {
      grade,
      student: store.student(&grade.student_id),
      course: store.course(&grade.course_id),
    }
  }

  pub fn student_name(&self) -> String {
    self
      .student
      .map(Student::full_name)
      .unwrap_or_else(|| "Unknown Student".to_owned())
  }

  pub fn student_code(&self) -> &str {
    self.student.map_or("Unknown", |s| s.student_id.as_str())
  }

  pub fn course_name(&self) -> &str {
    self.course.map_or("Unknown Course", |c| c.name.as_str())
  }

  pub fn course_code(&self) -> &str {
    self.course.map_or("Unknown", |c| c.course_code.as_str())
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GradeSortKey {
  #[default]
  Student,
  Course,
  /// Stored total score; grades without one sort first.
  Score,
}

impl GradeSortKey {
  pub fn compare(self, a: &GradeRow<'_>, b: &GradeRow<'_>) -> Ordering {
    match self {
      Self::Student => collate(&a.student_name(), &b.student_name()),
      Self::Course => collate(a.course_name(), b.course_name()),
      Self::Score => {
        let (x, y) = (a.grade.total_score, b.grade.total_score);
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
      }
    }
  }
}

/// Search and filter state for the grades page. The course and student
/// filters hold entity ids. With no sort the dataset order is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeQuery {
  pub text:    String,
  pub course:  Filter<String>,
  pub student: Filter<String>,
  pub sort:    Option<Sort<GradeSortKey>>,
}

impl GradeQuery {
  pub fn matches(&self, row: &GradeRow<'_>) -> bool {
    text_matches(
      &self.text,
      [
        row.student_name().as_str(),
        row.course_name(),
        row.course_code(),
        row.student_code(),
      ],
    ) && self.course.matches(row.grade.course_id.as_str())
      && self.student.matches(row.grade.student_id.as_str())
  }

  pub fn apply<'a>(&self, store: &'a Store) -> Listing<GradeRow<'a>> {
    let rows = store.grades().iter().map(|g| GradeRow::join(store, g));
    let compare = self.sort.map(|sort| {
      move |a: &GradeRow<'a>, b: &GradeRow<'a>| {
        sort.direction.apply(sort.key.compare(a, b))
      }
    });
    query::run(rows, |row| self.matches(row), compare)
  }

  /// Cycle the sort: none → each key ascending → that key descending → …
  /// → none.
  pub fn cycle_sort(&mut self) {
    use strum::IntoEnumIterator;

    let keys: Vec<GradeSortKey> = GradeSortKey::iter().collect();
    self.sort = match self.sort {
      None => keys.first().copied().map(Sort::asc),
      Some(s) if s.direction == query::SortDirection::Asc => Some(Sort::desc(s.key)),
      Some(s) => keys
        .iter()
        .position(|k| *k == s.key)
        .and_then(|i| keys.get(i + 1))
        .copied()
        .map(Sort::asc),
    };
  }
}

// ─── Attendance roster ───────────────────────────────────────────────────────

/// Name/code search over the students enrolled in one course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterQuery {
  pub text: String,
}

impl RosterQuery {
  pub fn matches(&self, student: &Student) -> bool {
    text_matches(
      &self.text,
      [student.full_name().as_str(), student.student_id.as_str()],
    )
  }

  /// Students of `course_id` matching the search, in enrollment order.
  pub fn apply<'a>(&self, store: &'a Store, course_id: &str) -> Listing<&'a Student> {
    query::run(
      store.students_for_course(course_id),
      |s| self.matches(s),
      None::<fn(&&Student, &&Student) -> Ordering>,
    )
  }
}
