//! Load-time integrity checks.
//!
//! The dataset's invariants (unique codes, resolvable references, weights
//! summing to one) are not enforced by its format. They are checked once, when
//! a [`crate::store::Store`] is built, and never again at query time.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{entity::EnrollmentStatus, metrics::weighted_total, store::Dataset};

/// Allowed distance between a grade's weight sum and `1.0`.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Allowed distance, in percentage points, between a stored `totalScore` and
/// the total recomputed from its components. Stored totals carry one decimal.
pub const TOTAL_SCORE_TOLERANCE: f64 = 0.05;

// ─── Strictness ──────────────────────────────────────────────────────────────

/// How [`crate::store::Store::load`] reacts to integrity issues.
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
pub enum Strictness {
  /// Keep every issue, log nothing.
  Lenient,
  /// Keep every issue and log it.
  #[default]
  Warn,
  /// Reject the dataset if any error-severity issue exists.
  Strict,
}

// ─── Issues ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  /// A broken reference or duplicate key; resolvers will silently skip it.
  Error,
  /// Suspicious but harmless to the resolvers.
  Warning,
}

/// Which collection a dangling reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
  Users,
  Students,
  Courses,
  Enrollments,
  Grades,
  Attendance,
}

/// One violated invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
  DuplicateId {
    collection: Collection,
    id:         String,
  },
  DuplicateStudentCode {
    code: String,
  },
  DuplicateCourseCode {
    code: String,
  },
  /// A record in `collection` names a student that does not exist.
  DanglingStudent {
    collection: Collection,
    record_id:  String,
    student_id: String,
  },
  /// A record in `collection` names a course that does not exist.
  DanglingCourse {
    collection: Collection,
    record_id:  String,
    course_id:  String,
  },
  WeightSum {
    grade_id: String,
    sum:      f64,
  },
  /// The stored `totalScore` differs from the weighted component total.
  TotalScoreDrift {
    grade_id: String,
    stored:   f64,
    derived:  f64,
  },
  /// The stored `enrolledStudents` differs from the enrollment table.
  EnrollmentDrift {
    course_id: String,
    stored:    u32,
    derived:   usize,
  },
  OverCapacity {
    course_id: String,
    enrolled:  u32,
    max:       u32,
  },
}

impl Issue {
  pub fn severity(&self) -> Severity {
    match self {
      Self::DuplicateId { .. }
      | Self::DuplicateStudentCode { .. }
      | Self::DuplicateCourseCode { .. }
      | Self::DanglingStudent { .. }
      | Self::DanglingCourse { .. } => Severity::Error,
      Self::WeightSum { .. }
      | Self::TotalScoreDrift { .. }
      | Self::EnrollmentDrift { .. }
      | Self::OverCapacity { .. } => Severity::Warning,
    }
  }
}

impl fmt::Display for Issue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::DuplicateId { collection, id } => {
        write!(f, "duplicate id {id:?} in {collection}")
      }
      Self::DuplicateStudentCode { code } => {
        write!(f, "student code {code:?} is used more than once")
      }
      Self::DuplicateCourseCode { code } => {
        write!(f, "course code {code:?} is used more than once")
      }
      Self::DanglingStudent {
        collection,
        record_id,
        student_id,
      } => write!(
        f,
        "{collection} record {record_id:?} references missing student {student_id:?}"
      ),
      Self::DanglingCourse {
        collection,
        record_id,
        course_id,
      } => write!(
        f,
        "{collection} record {record_id:?} references missing course {course_id:?}"
      ),
      Self::WeightSum { grade_id, sum } => {
        write!(f, "grade {grade_id:?} component weights sum to {sum:.4}, not 1")
      }
      Self::TotalScoreDrift {
        grade_id,
        stored,
        derived,
      } => write!(
        f,
        "grade {grade_id:?} stores a total of {stored:.1} but its components give {derived:.2}"
      ),
      Self::EnrollmentDrift {
        course_id,
        stored,
        derived,
      } => write!(
        f,
        "course {course_id:?} stores {stored} enrolled students but has {derived} enrollments"
      ),
      Self::OverCapacity {
        course_id,
        enrolled,
        max,
      } => write!(
        f,
        "course {course_id:?} has {enrolled} enrolled students, above its limit of {max}"
      ),
    }
  }
}

// ─── Checks ──────────────────────────────────────────────────────────────────

/// Run every check against `data`, in collection order.
pub fn check(data: &Dataset) -> Vec<Issue> {
  let mut issues = Vec::new();

  duplicate_ids(
    &mut issues,
    Collection::Users,
    data.users.iter().map(|u| u.id.as_str()),
  );
  duplicate_ids(
    &mut issues,
    Collection::Students,
    data.students.iter().map(|s| s.id.as_str()),
  );
  duplicate_ids(
    &mut issues,
    Collection::Courses,
    data.courses.iter().map(|c| c.id.as_str()),
  );
  duplicate_ids(
    &mut issues,
    Collection::Enrollments,
    data.enrollments.iter().map(|e| e.id.as_str()),
  );
  duplicate_ids(
    &mut issues,
    Collection::Grades,
    data.grades.iter().map(|g| g.id.as_str()),
  );
  duplicate_ids(
    &mut issues,
    Collection::Attendance,
    data.attendance.iter().map(|a| a.id.as_str()),
  );

  for code in repeated(data.students.iter().map(|s| s.student_id.as_str())) {
    issues.push(Issue::DuplicateStudentCode { code });
  }
  for code in repeated(data.courses.iter().map(|c| c.course_code.as_str())) {
    issues.push(Issue::DuplicateCourseCode { code });
  }

  let students: HashSet<&str> =
    data.students.iter().map(|s| s.id.as_str()).collect();
  let courses: HashSet<&str> =
    data.courses.iter().map(|c| c.id.as_str()).collect();

  for user in &data.users {
    if let Some(student_id) = &user.student_id
      && !students.contains(student_id.as_str())
    {
      issues.push(Issue::DanglingStudent {
        collection: Collection::Users,
        record_id:  user.id.clone(),
        student_id: student_id.clone(),
      });
    }
  }

  let references = data
    .enrollments
    .iter()
    .map(|e| (Collection::Enrollments, &e.id, &e.student_id, &e.course_id))
    .chain(
      data
        .grades
        .iter()
        .map(|g| (Collection::Grades, &g.id, &g.student_id, &g.course_id)),
    )
    .chain(
      data
        .attendance
        .iter()
        .map(|a| (Collection::Attendance, &a.id, &a.student_id, &a.course_id)),
    );
  for (collection, record_id, student_id, course_id) in references {
    if !students.contains(student_id.as_str()) {
      issues.push(Issue::DanglingStudent {
        collection,
        record_id: record_id.clone(),
        student_id: student_id.clone(),
      });
    }
    if !courses.contains(course_id.as_str()) {
      issues.push(Issue::DanglingCourse {
        collection,
        record_id: record_id.clone(),
        course_id: course_id.clone(),
      });
    }
  }

  for grade in &data.grades {
    // A grade with no components has nothing to weigh.
    if grade.components().next().is_none() {
      continue;
    }
    let sum = grade.weight_sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
      issues.push(Issue::WeightSum {
        grade_id: grade.id.clone(),
        sum,
      });
    }
    if let (Some(stored), Some(derived)) = (grade.total_score, weighted_total(grade))
      && (stored - derived).abs() > TOTAL_SCORE_TOLERANCE
    {
      issues.push(Issue::TotalScoreDrift {
        grade_id: grade.id.clone(),
        stored,
        derived,
      });
    }
  }

  for course in &data.courses {
    let derived = data
      .enrollments
      .iter()
      .filter(|e| {
        e.course_id == course.id && e.status == EnrollmentStatus::Enrolled
      })
      .count();
    if derived != course.enrolled_students as usize {
      issues.push(Issue::EnrollmentDrift {
        course_id: course.id.clone(),
        stored: course.enrolled_students,
        derived,
      });
    }
    if course.enrolled_students > course.max_students {
      issues.push(Issue::OverCapacity {
        course_id: course.id.clone(),
        enrolled:  course.enrolled_students,
        max:       course.max_students,
      });
    }
  }

  issues
}

fn duplicate_ids<'a>(
  issues: &mut Vec<Issue>,
  collection: Collection,
  ids: impl Iterator<Item = &'a str>,
) {
  for id in repeated(ids) {
    issues.push(Issue::DuplicateId { collection, id });
  }
}

/// Values that occur more than once, each reported once, in order of their
/// second occurrence.
fn repeated<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
  let mut seen = HashSet::new();
  let mut reported = HashSet::new();
  let mut out = Vec::new();
  for value in values {
    if !seen.insert(value) && reported.insert(value) {
      out.push(value.to_owned());
    }
  }
  out
}
