//! Grade book: every grade joined with its student and course.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  text::Span,
  widgets::{Cell, Paragraph, Row, Table, TableState},
};

use super::{
  cursor_style, dim, header_style, letter_span, search_line,
  students::sort_label,
  titled,
};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let listing = app.grade_listing();
  let query = &app.grades;
  let store = &app.store;

  let block = titled(listing.summary("grades"));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let [controls, table_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

  // Filters hold entity ids; show the human-facing codes instead.
  let course = query
    .course
    .as_option()
    .map(|id| store.course(id).map_or(id.as_str(), |c| c.course_code.as_str()));
  let student = query
    .student
    .as_option()
    .map(|id| store.student(id).map_or(id.as_str(), |s| s.student_id.as_str()));

  let mut controls_line = search_line(app);
  controls_line.spans.push(Span::styled(
    format!(
      "   course: {}  student: {}  sort: {}",
      course.unwrap_or("all"),
      student.unwrap_or("all"),
      query.sort.map_or_else(|| "none".to_owned(), sort_label),
    ),
    dim(),
  ));
  f.render_widget(Paragraph::new(controls_line), controls);

  let rows: Vec<Row> = listing
    .items
    .iter()
    .map(|row| {
      let g = row.grade;
      Row::new(vec![
        Cell::from(row.student_name()),
        Cell::from(row.student_code().to_owned()),
        Cell::from(row.course_code().to_owned()),
        Cell::from(row.course_name().to_owned()),
        Cell::from(g.total_score.map_or_else(|| "—".to_owned(), |s| format!("{s:.1}%"))),
        Cell::from(letter_span(g.letter_grade.as_deref())),
        Cell::from(g.gpa.map_or_else(|| "—".to_owned(), |v| format!("{v:.1}"))),
      ])
    })
    .collect();

  let table = Table::new(rows, [
    Constraint::Percentage(22),
    Constraint::Length(9),
    Constraint::Length(8),
    Constraint::Percentage(30),
    Constraint::Length(7),
    Constraint::Length(6),
    Constraint::Length(5),
  ])
  .header(
    Row::new(["Student", "ID", "Code", "Course", "Score", "Grade", "GPA"])
      .style(header_style()),
  )
  .row_highlight_style(cursor_style());

  let mut state = TableState::default();
  state.select((!listing.is_empty()).then_some(app.cursor));
  f.render_stateful_widget(table, table_area, &mut state);
}
