//! Student roster table.

use campus_core::query::{Filter, Sort, SortDirection};
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::Style,
  text::Span,
  widgets::{Cell, Paragraph, Row, Table, TableState},
};

use super::{cursor_style, dim, header_style, search_line, student_status_color, titled};
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let listing = app.student_listing();
  let query = &app.students;

  let block = titled(listing.summary("students"));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let [controls, table_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

  let mut controls_line = search_line(app);
  controls_line.spans.push(Span::styled(
    format!(
      "   status: {}  program: {}  sort: {}",
      filter_label(&query.status),
      filter_label(&query.program),
      sort_label(query.sort),
    ),
    dim(),
  ));
  f.render_widget(Paragraph::new(controls_line), controls);

  let rows: Vec<Row> = listing
    .items
    .iter()
    .map(|s| {
      Row::new(vec![
        Cell::from(s.student_id.clone()),
        Cell::from(s.full_name()),
        Cell::from(s.email.clone()),
        Cell::from(s.program.clone()),
        Cell::from(s.batch.clone()),
        Cell::from(Span::styled(
          s.status.to_string(),
          Style::default().fg(student_status_color(s.status)),
        )),
      ])
    })
    .collect();

  let table = Table::new(rows, [
    Constraint::Length(9),
    Constraint::Percentage(22),
    Constraint::Percentage(30),
    Constraint::Percentage(22),
    Constraint::Length(6),
    Constraint::Length(10),
  ])
  .header(Row::new(["ID", "Name", "Email", "Program", "Batch", "Status"]).style(header_style()))
  .row_highlight_style(cursor_style());

  let mut state = TableState::default();
  state.select((!listing.is_empty()).then_some(app.cursor));
  f.render_stateful_widget(table, table_area, &mut state);
}

pub(crate) fn filter_label<T: std::fmt::Display>(filter: &Filter<T>) -> String {
  filter
    .as_option()
    .map_or_else(|| "all".to_owned(), ToString::to_string)
}

pub(crate) fn sort_label<K: std::fmt::Display>(sort: Sort<K>) -> String {
  let arrow = match sort.direction {
    SortDirection::Asc => "↑",
    SortDirection::Desc => "↓",
  };
  format!("{}{arrow}", sort.key)
}
