//! Relationship resolvers.
//!
//! Each resolver maps an id to related records through the enrollment join
//! table or a direct filter. An id with no matches yields an empty `Vec`;
//! references that do not resolve are skipped. Output order always follows
//! the order of the underlying collection.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::{
  entity::{
    Attendance, AttendanceStatus, Course, EnrollmentStatus, Grade, Student,
  },
  store::Store,
};

impl Store {
  // ── Join-table resolvers ──────────────────────────────────────────────

  /// Students enrolled in `course_id`, in enrollment-table order.
  pub fn students_for_course(&self, course_id: &str) -> Vec<&Student> {
    self
      .enrollments()
      .iter()
      .filter(|e| e.course_id == course_id)
      .filter_map(|e| self.student(&e.student_id))
      .collect()
  }

  /// Courses `student_id` is enrolled in, in enrollment-table order.
  pub fn courses_for_student(&self, student_id: &str) -> Vec<&Course> {
    self
      .enrollments()
      .iter()
      .filter(|e| e.student_id == student_id)
      .filter_map(|e| self.course(&e.course_id))
      .collect()
  }

  // ── Direct filters ────────────────────────────────────────────────────

  pub fn grades_for_student(&self, student_id: &str) -> Vec<&Grade> {
    self
      .grades()
      .iter()
      .filter(|g| g.student_id == student_id)
      .collect()
  }

  pub fn attendance_for_student(&self, student_id: &str) -> Vec<&Attendance> {
    self
      .attendance()
      .iter()
      .filter(|a| a.student_id == student_id)
      .collect()
  }

  pub fn attendance_for_course(&self, course_id: &str) -> Vec<&Attendance> {
    self
      .attendance()
      .iter()
      .filter(|a| a.course_id == course_id)
      .collect()
  }

  /// Courses whose instructor is exactly `name`.
  pub fn courses_taught_by(&self, name: &str) -> Vec<&Course> {
    self.courses().iter().filter(|c| c.instructor == name).collect()
  }

  /// Distinct students enrolled in any course taught by `name`.
  pub fn students_taught_by(&self, name: &str) -> usize {
    self
      .courses_taught_by(name)
      .iter()
      .flat_map(|c| self.students_for_course(&c.id))
      .map(|s| s.id.as_str())
      .collect::<HashSet<_>>()
      .len()
  }

  // ── Page helpers ──────────────────────────────────────────────────────

  /// The first grade recorded for `student_id` in `course_id`.
  pub fn grade_for(&self, student_id: &str, course_id: &str) -> Option<&Grade> {
    self
      .grades()
      .iter()
      .find(|g| g.student_id == student_id && g.course_id == course_id)
  }

  /// Attendance status of `student_id` in `course_id` on `date`, or `None`
  /// when nothing was recorded.
  pub fn attendance_on(
    &self,
    student_id: &str,
    course_id: &str,
    date: NaiveDate,
  ) -> Option<AttendanceStatus> {
    self
      .attendance()
      .iter()
      .find(|a| {
        a.student_id == student_id && a.course_id == course_id && a.date == date
      })
      .map(|a| a.status)
  }

  /// Number of `enrolled`-status enrollments for `course_id`, derived from
  /// the join table rather than read from
  /// [`Course::enrolled_students`](crate::entity::Course::enrolled_students).
  pub fn enrollment_count(&self, course_id: &str) -> usize {
    self
      .enrollments()
      .iter()
      .filter(|e| {
        e.course_id == course_id && e.status == EnrollmentStatus::Enrolled
      })
      .count()
  }

  /// Distinct student programs, in first-seen order.
  pub fn programs(&self) -> Vec<&str> {
    distinct(self.students().iter().map(|s| s.program.as_str()))
  }

  /// Distinct course departments, in first-seen order.
  pub fn departments(&self) -> Vec<&str> {
    distinct(self.courses().iter().map(|c| c.department.as_str()))
  }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
  let mut out: Vec<&str> = Vec::new();
  for value in values {
    if !out.contains(&value) {
      out.push(value);
    }
  }
  out
}
