//! Course catalog table.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::Style,
  text::Span,
  widgets::{Cell, Paragraph, Row, Table, TableState},
};

use super::{
  course_status_color, cursor_style, dim, header_style, search_line,
  students::{filter_label, sort_label},
  titled,
};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let listing = app.course_listing();
  let query = &app.courses;

  let block = titled(listing.summary("courses"));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let [controls, table_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

  let mut controls_line = search_line(app);
  controls_line.spans.push(Span::styled(
    format!(
      "   status: {}  department: {}  sort: {}",
      filter_label(&query.status),
      filter_label(&query.department),
      sort_label(query.sort),
    ),
    dim(),
  ));
  f.render_widget(Paragraph::new(controls_line), controls);

  let rows: Vec<Row> = listing
    .items
    .iter()
    .map(|c| {
      Row::new(vec![
        Cell::from(c.course_code.clone()),
        Cell::from(c.name.clone()),
        Cell::from(c.instructor.clone()),
        Cell::from(c.credits.to_string()),
        Cell::from(format!("{}/{}", c.enrolled_students, c.max_students)),
        Cell::from(Span::styled(
          c.status.to_string(),
          Style::default().fg(course_status_color(c.status)),
        )),
      ])
    })
    .collect();

  let table = Table::new(rows, [
    Constraint::Length(8),
    Constraint::Percentage(35),
    Constraint::Percentage(25),
    Constraint::Length(7),
    Constraint::Length(9),
    Constraint::Length(9),
  ])
  .header(
    Row::new(["Code", "Name", "Instructor", "Credits", "Students", "Status"])
      .style(header_style()),
  )
  .row_highlight_style(cursor_style());

  let mut state = TableState::default();
  state.select((!listing.is_empty()).then_some(app.cursor));
  f.render_stateful_widget(table, table_area, &mut state);
}
