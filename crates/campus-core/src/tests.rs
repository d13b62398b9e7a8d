//! Tests for the store, resolvers, metrics and listings against the
//! embedded seed dataset.

use chrono::NaiveDate;
use strum::IntoEnumIterator;

use crate::{
  Error, Strictness,
  entity::{
    Attendance, AttendanceStatus, CourseStatus, DeadlineKind, Enrollment,
    EnrollmentStatus, Grade, StudentStatus,
  },
  integrity::{self, Issue, Severity},
  listing::{
    CourseQuery, CourseSortKey, GradeQuery, GradeSortKey, RosterQuery,
    StudentQuery, StudentSortKey,
  },
  metrics::{
    AttendanceTally, GradeTier, Percent, attendance_rate, average_gpa,
    weighted_total,
  },
  query::{Filter, Sort, SortDirection, collate, parse_named, text_matches},
  session::Session,
  store::{Dataset, Store},
};

fn store() -> Store { Store::seeded().expect("seed dataset loads") }

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn grade_with_gpa(gpa: Option<f64>) -> Grade {
  Grade {
    id:           "g".into(),
    student_id:   "1".into(),
    course_id:    "1".into(),
    assignments:  Vec::new(),
    midterm_exam: None,
    final_exam:   None,
    total_score:  None,
    letter_grade: None,
    gpa,
    comments:     None,
  }
}

fn attendance(status: AttendanceStatus) -> Attendance {
  Attendance {
    id: "a".into(),
    student_id: "1".into(),
    course_id: "1".into(),
    date: date(2023, 9, 1),
    status,
    notes: None,
  }
}

fn dangling_enrollment() -> Enrollment {
  Enrollment {
    id:              "99".into(),
    student_id:      "404".into(),
    course_id:       "1".into(),
    enrollment_date: date(2023, 8, 30),
    status:          EnrollmentStatus::Enrolled,
  }
}

// ─── Seed ────────────────────────────────────────────────────────────────────

#[test]
fn seed_has_expected_shape() {
  let s = store();
  assert_eq!(s.users().len(), 3);
  assert_eq!(s.students().len(), 5);
  assert_eq!(s.courses().len(), 5);
  assert_eq!(s.enrollments().len(), 10);
  assert_eq!(s.grades().len(), 3);
  assert_eq!(s.attendance().len(), 6);
  assert_eq!(s.announcements().len(), 3);
  assert_eq!(s.deadlines().len(), 3);
}

#[test]
fn deadline_countdown() {
  let s = store();
  let exam = &s.deadlines()[0];
  assert_eq!(exam.kind, DeadlineKind::Exam);
  assert_eq!(exam.days_left(date(2023, 9, 5)), 40);
  assert_eq!(exam.days_left(date(2023, 10, 15)), 0);
  assert_eq!(exam.days_left(date(2023, 10, 20)), -5);
}

#[test]
fn seed_reports_only_drift_warnings() {
  let s = store();
  assert_eq!(s.issues().len(), 7);
  assert!(s.issues().iter().all(|i| i.severity() == Severity::Warning));

  let enrollment = s
    .issues()
    .iter()
    .filter(|i| matches!(i, Issue::EnrollmentDrift { derived: 2, .. }))
    .count();
  assert_eq!(enrollment, 5);

  let totals: Vec<&str> = s
    .issues()
    .iter()
    .filter_map(|i| match i {
      Issue::TotalScoreDrift { grade_id, .. } => Some(grade_id.as_str()),
      _ => None,
    })
    .collect();
  assert_eq!(totals, ["1", "3"]);
}

#[test]
fn stored_total_checked_against_components() {
  let issues = integrity::check(&Dataset::seed().unwrap());
  let drift = issues.iter().find_map(|i| match i {
    Issue::TotalScoreDrift {
      grade_id,
      stored,
      derived,
    } if grade_id == "1" => Some((*stored, *derived)),
    _ => None,
  });
  let (stored, derived) = drift.expect("grade 1 total drifts");
  assert_eq!(stored, 87.7);
  assert!((derived - 87.55).abs() < 1e-9);

  // Grade 2's stored total matches its components.
  assert!(!issues.iter().any(|i| matches!(
    i,
    Issue::TotalScoreDrift { grade_id, .. } if grade_id == "2"
  )));

  let mut data = Dataset::seed().unwrap();
  data.grades[0].total_score = Some(87.55);
  data.grades[2].total_score = None;
  assert!(
    !integrity::check(&data)
      .iter()
      .any(|i| matches!(i, Issue::TotalScoreDrift { .. }))
  );

  let shown = Issue::TotalScoreDrift {
    grade_id: "1".into(),
    stored:   87.7,
    derived:  87.55,
  };
  assert_eq!(shown.severity(), Severity::Warning);
  assert!(shown.to_string().contains("components give 87.55"));
}

#[test]
fn seed_loads_under_strict() {
  let data = Dataset::seed().unwrap();
  assert!(Store::load(data, Strictness::Strict).is_ok());
}

// ─── Resolvers ───────────────────────────────────────────────────────────────

#[test]
fn students_for_course_follows_enrollment_order() {
  let s = store();
  let names: Vec<String> = s
    .students_for_course("1")
    .into_iter()
    .map(|st| st.full_name())
    .collect();
  assert_eq!(names, ["Alex Johnson", "James Smith"]);
}

#[test]
fn courses_for_student_follows_enrollment_order() {
  let s = store();
  let codes: Vec<&str> = s
    .courses_for_student("1")
    .into_iter()
    .map(|c| c.course_code.as_str())
    .collect();
  assert_eq!(codes, ["CS101", "CS304"]);
}

#[test]
fn course_and_student_resolvers_are_inverse() {
  let s = store();
  for course in s.courses() {
    for student in s.students() {
      let in_course = s
        .students_for_course(&course.id)
        .iter()
        .any(|st| st.id == student.id);
      let in_student = s
        .courses_for_student(&student.id)
        .iter()
        .any(|c| c.id == course.id);
      assert_eq!(in_course, in_student, "course {} student {}", course.id, student.id);
    }
  }
}

#[test]
fn students_for_course_lists_each_enrollment_once() {
  let s = store();
  for course in s.courses() {
    let enrolled = s
      .enrollments()
      .iter()
      .filter(|e| e.course_id == course.id)
      .count();
    assert_eq!(s.students_for_course(&course.id).len(), enrolled);
  }
}

#[test]
fn unknown_ids_resolve_to_empty() {
  let s = store();
  assert!(s.students_for_course("nope").is_empty());
  assert!(s.courses_for_student("nope").is_empty());
  assert!(s.grades_for_student("nope").is_empty());
  assert!(s.attendance_for_student("nope").is_empty());
  assert!(s.attendance_for_course("nope").is_empty());
}

#[test]
fn direct_filters_keep_source_order() {
  let s = store();
  let grade_ids: Vec<&str> = s
    .grades_for_student("1")
    .iter()
    .map(|g| g.id.as_str())
    .collect();
  assert_eq!(grade_ids, ["1", "2"]);

  let attendance_ids: Vec<&str> = s
    .attendance_for_course("3")
    .iter()
    .map(|a| a.id.as_str())
    .collect();
  assert_eq!(attendance_ids, ["5", "6"]);
  assert_eq!(s.attendance_for_student("1").len(), 6);
}

#[test]
fn point_lookups() {
  let s = store();
  assert_eq!(s.student("4").map(|st| st.first_name.as_str()), Some("Sophia"));
  assert_eq!(s.course("5").map(|c| c.course_code.as_str()), Some("CS320"));
  assert!(s.student("6").is_none());
  assert_eq!(
    s.user_by_email(" Faculty@EduTrack.com ").map(|u| u.id.as_str()),
    Some("2")
  );
  assert_eq!(s.grade_for("1", "3").map(|g| g.id.as_str()), Some("2"));
  assert!(s.grade_for("5", "3").is_none());
}

#[test]
fn courses_by_instructor() {
  let s = store();
  let taught = s.courses_taught_by("Dr. Alan Turing");
  assert_eq!(taught.len(), 1);
  assert_eq!(taught[0].course_code, "CS101");
  assert_eq!(s.students_taught_by("Dr. Alan Turing"), 2);
  assert!(s.courses_taught_by("dr. alan turing").is_empty());
  assert_eq!(s.students_taught_by("Nobody"), 0);
}

#[test]
fn attendance_on_a_date() {
  let s = store();
  assert_eq!(
    s.attendance_on("1", "1", date(2023, 9, 12)),
    Some(AttendanceStatus::Absent)
  );
  assert_eq!(
    s.attendance_on("1", "3", date(2023, 9, 6)),
    Some(AttendanceStatus::Late)
  );
  assert_eq!(s.attendance_on("1", "1", date(2023, 9, 13)), None);
  assert_eq!(s.attendance_on("3", "1", date(2023, 9, 12)), None);
}

#[test]
fn enrollment_count_is_derived() {
  let s = store();
  assert_eq!(s.enrollment_count("1"), 2);
  assert_eq!(s.course("1").unwrap().enrolled_students, 30);
  assert_eq!(s.enrollment_count("nope"), 0);
}

#[test]
fn distinct_filter_options() {
  let s = store();
  assert_eq!(s.programs(), ["Computer Science"]);
  assert_eq!(s.departments(), ["Computer Science"]);
}

// ─── Integrity ───────────────────────────────────────────────────────────────

#[test]
fn dangling_enrollment_rejected_when_strict() {
  let mut data = Dataset::seed().unwrap();
  data.enrollments.push(dangling_enrollment());

  let err = Store::load(data, Strictness::Strict).unwrap_err();
  match err {
    Error::Integrity(issues) => {
      assert_eq!(issues.len(), 1);
      assert!(matches!(
        &issues[0],
        Issue::DanglingStudent { student_id, .. } if student_id == "404"
      ));
    }
    other => panic!("expected integrity error, got {other:?}"),
  }
}

#[test]
fn dangling_enrollment_dropped_by_resolver_when_lenient() {
  let mut data = Dataset::seed().unwrap();
  data.enrollments.push(dangling_enrollment());

  for strictness in [Strictness::Warn, Strictness::Lenient] {
    let s = Store::load(data.clone(), strictness).unwrap();
    assert_eq!(s.students_for_course("1").len(), 2);
    assert!(s.issues().iter().any(|i| i.severity() == Severity::Error));
  }
}

#[test]
fn duplicate_codes_and_ids_are_errors() {
  let mut data = Dataset::seed().unwrap();
  let mut twin = data.students[0].clone();
  twin.id = "1".into();
  data.students.push(twin);
  let mut course = data.courses[1].clone();
  course.course_code = "CS101".into();
  data.courses[1] = course;

  let s = Store::load(data, Strictness::Lenient).unwrap();
  let issues = s.issues();
  assert!(issues.iter().any(|i| matches!(i, Issue::DuplicateId { id, .. } if id == "1")));
  assert!(
    issues
      .iter()
      .any(|i| matches!(i, Issue::DuplicateStudentCode { code } if code == "CS10001"))
  );
  assert!(
    issues
      .iter()
      .any(|i| matches!(i, Issue::DuplicateCourseCode { code } if code == "CS101"))
  );
  // First record wins the id.
  assert_eq!(s.student("1").unwrap().first_name, "Alex");
}

#[test]
fn weight_and_capacity_warnings() {
  let mut data = Dataset::seed().unwrap();
  data.grades[0].assignments.pop();
  data.courses[0].enrolled_students = 40;

  let issues = Store::load(data, Strictness::Lenient).unwrap().issues().to_vec();
  assert!(issues.iter().any(|i| matches!(
    i,
    Issue::WeightSum { grade_id, sum } if grade_id == "1" && (sum - 0.85).abs() < 1e-9
  )));
  assert!(issues.iter().any(|i| matches!(
    i,
    Issue::OverCapacity { course_id, enrolled: 40, max: 35 } if course_id == "1"
  )));
}

#[test]
fn user_linked_to_missing_student() {
  let mut data = Dataset::seed().unwrap();
  data.users[2].student_id = Some("77".into());
  let err = Store::load(data, Strictness::Strict).unwrap_err();
  assert!(matches!(err, Error::Integrity(_)));
  assert!(err.to_string().contains("users record \"3\""));
}

#[test]
fn dataset_parse_errors_surface() {
  assert!(matches!(
    Dataset::from_json_str("{\"students\": 3}"),
    Err(Error::Serialization(_))
  ));
  assert!(matches!(
    Dataset::from_path("/definitely/not/here.json"),
    Err(Error::Io { .. })
  ));
  let empty = Dataset::from_json_str("{}").unwrap();
  assert!(empty.students.is_empty());
  assert!(empty.deadlines.is_empty());
}

// ─── Metrics ─────────────────────────────────────────────────────────────────

#[test]
fn average_gpa_of_nothing_is_zero() {
  assert_eq!(average_gpa(Vec::<Grade>::new()), 0.0);
}

#[test]
fn average_gpa_is_the_mean() {
  let grades = [grade_with_gpa(Some(3.5)), grade_with_gpa(Some(3.7))];
  assert!((average_gpa(&grades) - 3.6).abs() < 1e-12);
}

#[test]
fn average_gpa_counts_missing_as_zero() {
  let grades = [grade_with_gpa(Some(4.0)), grade_with_gpa(None)];
  assert!((average_gpa(&grades) - 2.0).abs() < 1e-12);
}

#[test]
fn average_gpa_for_seeded_student() {
  let s = store();
  assert!((average_gpa(s.grades_for_student("1")) - 3.6).abs() < 1e-12);
  assert_eq!(format!("{:.2}", average_gpa(s.grades_for_student("2"))), "3.00");
}

#[test]
fn attendance_rate_of_nothing_is_zero() {
  assert_eq!(attendance_rate(Vec::<Attendance>::new()), Percent(0));
  assert_eq!(Percent(0).to_string(), "0%");
}

#[test]
fn late_counts_as_present() {
  let records = [
    attendance(AttendanceStatus::Present),
    attendance(AttendanceStatus::Absent),
    attendance(AttendanceStatus::Late),
    attendance(AttendanceStatus::Absent),
  ];
  assert_eq!(attendance_rate(&records), Percent(50));
}

#[test]
fn attended_follows_status_rule() {
  let tally = AttendanceTally::from_records([
    attendance(AttendanceStatus::Present),
    attendance(AttendanceStatus::Late),
    attendance(AttendanceStatus::Excused),
    attendance(AttendanceStatus::Absent),
  ]);
  let expected = AttendanceStatus::iter()
    .filter(|s| s.counts_as_present())
    .count();
  assert_eq!(tally.attended(), expected);
  assert_eq!(tally.attended(), 2);
  assert!(!AttendanceStatus::Excused.counts_as_present());
  assert_eq!(tally.rate(), Percent(50));
}

#[test]
fn attendance_rate_rounds_to_nearest() {
  let s = store();
  // 5 of 6.
  assert_eq!(attendance_rate(s.attendance_for_student("1")), Percent(83));
  assert_eq!(attendance_rate(s.attendance_for_course("1")), Percent(75));
  assert_eq!(attendance_rate(s.attendance_for_course("3")), Percent(100));
}

#[test]
fn tally_counts_each_status() {
  let s = store();
  let tally = AttendanceTally::from_records(s.attendance_for_student("1"));
  assert_eq!(
    tally,
    AttendanceTally {
      present: 4,
      absent:  1,
      late:    1,
      excused: 0,
    }
  );
  assert_eq!(tally.total(), 6);
}

#[test]
fn weighted_total_recomputes_components() {
  let s = store();
  let total = weighted_total(&s.grades()[0]).unwrap();
  assert!((total - 87.55).abs() < 1e-9, "got {total}");
  assert_eq!(weighted_total(&grade_with_gpa(None)), None);
}

#[test]
fn letter_grade_tiers() {
  assert_eq!(GradeTier::from_letter("A-"), GradeTier::A);
  assert_eq!(GradeTier::from_letter("B+"), GradeTier::B);
  assert_eq!(GradeTier::from_letter("C"), GradeTier::C);
  assert_eq!(GradeTier::from_letter("D+"), GradeTier::D);
  assert_eq!(GradeTier::from_letter("F"), GradeTier::F);
  assert_eq!(GradeTier::from_letter("E"), GradeTier::F);
  assert_eq!(GradeTier::from_letter("a"), GradeTier::F);
  assert_eq!(GradeTier::from_letter(""), GradeTier::F);
}

// ─── Pipeline pieces ─────────────────────────────────────────────────────────

#[test]
fn text_match_is_case_insensitive_substring() {
  assert!(text_matches("", ["anything"]));
  assert!(text_matches("ALEX", ["Alex Johnson"]));
  assert!(text_matches("john", ["nope", "Alex Johnson"]));
  assert!(!text_matches("zed", ["Alex Johnson", "CS10001"]));
  assert!(!text_matches("x", std::iter::empty::<&str>()));
}

#[test]
fn collation_orders_case_insensitively_first() {
  use std::cmp::Ordering::*;
  assert_eq!(collate("apple", "Banana"), Less);
  assert_eq!(collate("Apple", "apple"), Greater);
  assert_eq!(collate("apple", "apple"), Equal);
  assert_eq!(collate("Data Structures", "Database"), Less);
  assert_eq!(collate("CS10002", "CS10010"), Less);
  assert_eq!(collate("abc", "ab"), Greater);
}

#[test]
fn filter_cycle_and_parse() {
  let options = vec!["a".to_owned(), "b".to_owned()];
  let f = Filter::All;
  let f = f.cycle(&options);
  assert_eq!(f, Filter::Only("a".to_owned()));
  let f = f.cycle(&options);
  assert_eq!(f, Filter::Only("b".to_owned()));
  assert_eq!(f.cycle(&options), Filter::All);
  assert_eq!(Filter::Only("zz".to_owned()).cycle(&options), Filter::All);
  assert_eq!(Filter::<String>::All.cycle(&[]), Filter::All);

  assert_eq!("all".parse::<Filter<StudentStatus>>().unwrap(), Filter::All);
  assert_eq!(
    "graduated".parse::<Filter<StudentStatus>>().unwrap(),
    Filter::Only(StudentStatus::Graduated)
  );
  assert!("expelled".parse::<Filter<StudentStatus>>().is_err());
}

#[test]
fn named_parse_reports_the_kind() {
  let key: StudentSortKey = parse_named("sort key", "program").unwrap();
  assert_eq!(key, StudentSortKey::Program);
  let status: Filter<CourseStatus> = parse_named("course status", "ALL").unwrap();
  assert!(status.is_all());

  let err = parse_named::<GradeSortKey>("sort key", "height").unwrap_err();
  assert!(matches!(&err, Error::UnknownName { kind: "sort key", value } if value == "height"));
  assert_eq!(err.to_string(), r#"unknown sort key "height""#);
}

#[test]
fn sort_toggle_flips_or_switches() {
  let mut sort = Sort::asc(StudentSortKey::Name);
  sort.toggle(StudentSortKey::Name);
  assert_eq!(sort.direction, SortDirection::Desc);
  sort.toggle(StudentSortKey::Id);
  assert_eq!(sort, Sort::asc(StudentSortKey::Id));
}

// ─── Listings ────────────────────────────────────────────────────────────────

#[test]
fn student_search_for_alex() {
  let s = store();
  let query = StudentQuery {
    text: "Alex".into(),
    ..Default::default()
  };
  let listing = query.apply(s.students());
  assert_eq!(listing.len(), 1);
  assert_eq!(listing.items[0].full_name(), "Alex Johnson");
  assert_eq!(listing.summary("students"), "Showing 1 of 5 students");
}

#[test]
fn student_default_order_is_by_name() {
  let s = store();
  let names: Vec<String> = StudentQuery::default()
    .apply(s.students())
    .items
    .iter()
    .map(|st| st.full_name())
    .collect();
  assert_eq!(
    names,
    [
      "Alex Johnson",
      "Ethan Brown",
      "James Smith",
      "Mia Williams",
      "Sophia Garcia"
    ]
  );
}

#[test]
fn changing_sort_keeps_the_matched_set() {
  let s = store();
  let mut query = StudentQuery {
    text: "cs1000".into(),
    ..Default::default()
  };
  let by_name = query.apply(s.students());

  query.sort = Sort::desc(StudentSortKey::Id);
  let by_id = query.apply(s.students());

  let codes: Vec<&str> = by_id.items.iter().map(|st| st.student_id.as_str()).collect();
  assert_eq!(codes, ["CS10005", "CS10004", "CS10003", "CS10002", "CS10001"]);

  let mut a: Vec<&str> = by_name.items.iter().map(|st| st.id.as_str()).collect();
  let mut b: Vec<&str> = by_id.items.iter().map(|st| st.id.as_str()).collect();
  a.sort_unstable();
  b.sort_unstable();
  assert_eq!(a, b);
}

#[test]
fn ties_keep_source_order_in_both_directions() {
  let s = store();
  for direction in [SortDirection::Asc, SortDirection::Desc] {
    let query = StudentQuery {
      sort: Sort {
        key: StudentSortKey::Program,
        direction,
      },
      ..Default::default()
    };
    let ids: Vec<&str> = query
      .apply(s.students())
      .items
      .iter()
      .map(|st| st.id.as_str())
      .collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5"]);
  }
}

#[test]
fn student_categorical_filters() {
  let s = store();
  let graduated = StudentQuery {
    status: Filter::Only(StudentStatus::Graduated),
    ..Default::default()
  };
  assert!(graduated.apply(s.students()).is_empty());

  let cs = StudentQuery {
    program: Filter::Only("Computer Science".into()),
    ..Default::default()
  };
  assert_eq!(cs.apply(s.students()).len(), 5);
}

#[test]
fn course_catalog_search_and_sort() {
  let s = store();
  let by_instructor = CourseQuery {
    text: "turing".into(),
    ..Default::default()
  };
  let listing = by_instructor.apply(s.courses());
  assert_eq!(listing.len(), 1);
  assert_eq!(listing.items[0].course_code, "CS101");

  let names: Vec<&str> = CourseQuery::default()
    .apply(s.courses())
    .items
    .iter()
    .map(|c| c.name.as_str())
    .collect();
  assert_eq!(
    names,
    [
      "Computer Networks",
      "Data Structures and Algorithms",
      "Database Systems",
      "Introduction to Computer Science",
      "Software Engineering"
    ]
  );

  let by_size = CourseQuery {
    sort: Sort::asc(CourseSortKey::Students),
    ..Default::default()
  };
  let codes: Vec<&str> = by_size
    .apply(s.courses())
    .items
    .iter()
    .map(|c| c.course_code.as_str())
    .collect();
  assert_eq!(codes, ["CS320", "CS304", "CS101", "CS202", "CS401"]);

  let upcoming = CourseQuery {
    status: Filter::Only(CourseStatus::Upcoming),
    ..Default::default()
  };
  assert_eq!(upcoming.apply(s.courses()).summary("courses"), "Showing 0 of 5 courses");
}

#[test]
fn grade_rows_join_and_filter() {
  let s = store();
  let all = GradeQuery::default().apply(&s);
  assert_eq!(all.total, 3);
  let ids: Vec<&str> = all.items.iter().map(|r| r.grade.id.as_str()).collect();
  assert_eq!(ids, ["1", "2", "3"]);
  assert_eq!(all.items[2].student_name(), "Mia Williams");
  assert_eq!(all.items[2].course_code(), "CS202");

  let by_text = GradeQuery {
    text: "database".into(),
    ..Default::default()
  };
  let listing = by_text.apply(&s);
  assert_eq!(listing.len(), 1);
  assert_eq!(listing.items[0].grade.id, "2");

  let by_course = GradeQuery {
    course: Filter::Only("2".into()),
    ..Default::default()
  };
  assert_eq!(by_course.apply(&s).items[0].grade.id, "3");

  let by_student = GradeQuery {
    student: Filter::Only("1".into()),
    text: "cs10001".into(),
    ..Default::default()
  };
  assert_eq!(by_student.apply(&s).len(), 2);
}

#[test]
fn grade_sort_by_score_and_cycle() {
  let s = store();
  let mut query = GradeQuery {
    sort: Some(Sort::desc(GradeSortKey::Score)),
    ..Default::default()
  };
  let ids: Vec<&str> = query
    .apply(&s)
    .items
    .iter()
    .map(|r| r.grade.id.as_str())
    .collect();
  assert_eq!(ids, ["2", "1", "3"]);

  // score desc is the last step before unsorted.
  query.cycle_sort();
  assert_eq!(query.sort, None);
  query.cycle_sort();
  assert_eq!(query.sort, Some(Sort::asc(GradeSortKey::Student)));
  query.cycle_sort();
  assert_eq!(query.sort, Some(Sort::desc(GradeSortKey::Student)));
  query.cycle_sort();
  assert_eq!(query.sort, Some(Sort::asc(GradeSortKey::Course)));
}

#[test]
fn grade_rows_tolerate_dangling_references() {
  let mut data = Dataset::seed().unwrap();
  data.grades[0].student_id = "404".into();
  let s = Store::load(data, Strictness::Lenient).unwrap();
  let rows = GradeQuery {
    text: "unknown student".into(),
    ..Default::default()
  }
  .apply(&s);
  assert_eq!(rows.len(), 1);
  assert_eq!(rows.items[0].student_code(), "Unknown");
}

#[test]
fn roster_search_within_course() {
  let s = store();
  let everyone = RosterQuery::default().apply(&s, "1");
  assert_eq!(everyone.total, 2);
  assert_eq!(everyone.len(), 2);

  let james = RosterQuery {
    text: "CS10003".into(),
  }
  .apply(&s, "1");
  assert_eq!(james.len(), 1);
  assert_eq!(james.items[0].first_name, "James");
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[test]
fn login_and_logout() {
  let s = store();
  let mut session = Session::default();
  assert!(!session.is_authenticated());

  let user = session.login(&s, "student@edutrack.com", "password").unwrap();
  assert_eq!(user.student_id.as_deref(), Some("1"));
  assert!(session.is_authenticated());

  session.logout();
  assert!(session.current().is_none());
  session.logout();
}

#[test]
fn login_failures_leave_session_untouched() {
  let s = store();
  let mut session = Session::new("hunter2");
  assert!(matches!(
    session.login(&s, "", "hunter2"),
    Err(Error::MissingCredentials)
  ));
  assert!(matches!(
    session.login(&s, "admin@edutrack.com", ""),
    Err(Error::MissingCredentials)
  ));
  assert!(matches!(
    session.login(&s, "admin@edutrack.com", "password"),
    Err(Error::InvalidCredentials)
  ));
  assert!(matches!(
    session.login(&s, "ghost@edutrack.com", "hunter2"),
    Err(Error::InvalidCredentials)
  ));
  assert!(!session.is_authenticated());

  session.login(&s, "ADMIN@edutrack.com", "hunter2").unwrap();
  assert_eq!(session.current().map(|u| u.id.as_str()), Some("1"));
}
