//! Derived metrics over grade and attendance records.
//!
//! All functions are total: empty input yields zero, never an error.
//! Results keep full precision; rounding for display is the caller's job.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::entity::{Attendance, AttendanceStatus, Grade};

// ─── GPA ─────────────────────────────────────────────────────────────────────

/// Arithmetic mean of each grade's GPA. A grade without a GPA counts as
/// `0.0`; no grades at all gives `0.0`.
pub fn average_gpa<I>(grades: I) -> f64
where
  I: IntoIterator,
  I::Item: Borrow<Grade>,
{
  let (sum, count) = grades.into_iter().fold((0.0, 0usize), |(sum, n), g| {
    (sum + g.borrow().gpa.unwrap_or(0.0), n + 1)
  });
  if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Recompute a grade's percentage from its components.
///
/// Each component contributes `score / max_score * weight`; the sum is
/// normalised by the total weight so that partial weightings still produce a
/// percentage. Components with a non-positive `max_score` are ignored.
/// Returns `None` when nothing is left to weigh.
pub fn weighted_total(grade: &Grade) -> Option<f64> {
  let (earned, weight) = grade
    .components()
    .filter(|&(_, max, _)| max > 0.0)
    .fold((0.0, 0.0), |(earned, weight), (score, max, w)| {
      (earned + score / max * w, weight + w)
    });
  (weight > 0.0).then(|| earned / weight * 100.0)
}

// ─── Attendance ──────────────────────────────────────────────────────────────

/// A whole-number percentage.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Percent(pub u8);

impl fmt::Display for Percent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}%", self.0)
  }
}

/// Share of records that are `present` or `late`, rounded to the nearest
/// whole percent. No records gives `0%`.
pub fn attendance_rate<I>(records: I) -> Percent
where
  I: IntoIterator,
  I::Item: Borrow<Attendance>,
{
  AttendanceTally::from_records(records).rate()
}

/// Per-status counts for a set of attendance records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceTally {
  pub present: usize,
  pub absent:  usize,
  pub late:    usize,
  pub excused: usize,
}

impl AttendanceTally {
  pub fn from_records<I>(records: I) -> Self
  where
    I: IntoIterator,
    I::Item: Borrow<Attendance>,
  {
    let mut tally = Self::default();
    for record in records {
      tally.add(record.borrow().status);
    }
    tally
  }

  pub fn add(&mut self, status: AttendanceStatus) {
    match status {
      AttendanceStatus::Present => self.present += 1,
      AttendanceStatus::Absent => self.absent += 1,
      AttendanceStatus::Late => self.late += 1,
      AttendanceStatus::Excused => self.excused += 1,
    }
  }

  pub fn count(&self, status: AttendanceStatus) -> usize {
    match status {
      AttendanceStatus::Present => self.present,
      AttendanceStatus::Absent => self.absent,
      AttendanceStatus::Late => self.late,
      AttendanceStatus::Excused => self.excused,
    }
  }

  /// Records whose status counts towards the rate.
  pub fn attended(&self) -> usize {
    AttendanceStatus::iter()
      .filter(|s| s.counts_as_present())
      .map(|s| self.count(s))
      .sum()
  }

  pub fn total(&self) -> usize {
    self.present + self.absent + self.late + self.excused
  }

  pub fn rate(&self) -> Percent {
    let total = self.total();
    if total == 0 {
      return Percent(0);
    }
    let attended = self.attended() as f64;
    Percent((attended / total as f64 * 100.0).round() as u8)
  }
}

// ─── Letter grades ───────────────────────────────────────────────────────────

/// Display bucket for a letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeTier {
  A,
  B,
  C,
  D,
  F,
}

impl GradeTier {
  /// Classify by the first character of `letter` (`"B+"` → `B`). Anything
  /// that does not start with `A`–`D`, including the empty string, falls into
  /// the `F` bucket.
  pub fn from_letter(letter: &str) -> Self {
    match letter.chars().next() {
      Some('A') => Self::A,
      Some('B') => Self::B,
      Some('C') => Self::C,
      Some('D') => Self::D,
      _ => Self::F,
    }
  }
}
