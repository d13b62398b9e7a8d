//! Attendance sheet for one course over a day or a school week.

use campus_core::metrics::AttendanceTally;
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Cell, Paragraph, Row, Table, TableState},
};

use super::{attendance_color, cursor_style, dim, header_style, search_line, titled};
use crate::app::{App, AttendanceMode};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let view = &app.attendance;
  let store = &app.store;
  let course = view.course.as_deref().and_then(|id| store.course(id));

  let title = match course {
    Some(c) => format!("Attendance · {} {}", c.course_code, c.name),
    None => "Attendance".to_owned(),
  };
  let block = titled(title);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let [controls, table_area] =
    Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

  let dates = view.dates();
  let range = match (view.mode, dates.first(), dates.last()) {
    (AttendanceMode::Week, Some(first), Some(last)) => {
      format!("{} – {}", first.format("%a %b %e"), last.format("%a %b %e, %Y"))
    }
    _ => view.date.format("%A, %B %e, %Y").to_string(),
  };
  f.render_widget(
    Paragraph::new(vec![
      Line::from(vec![
        Span::styled(format!("{} view  ", view.mode), dim()),
        Span::styled(range, Style::default().add_modifier(Modifier::BOLD)),
      ]),
      search_line(app),
    ]),
    controls,
  );

  let (Some(course), Some(listing)) = (course, app.roster_listing()) else {
    f.render_widget(
      Paragraph::new(Line::styled("Press c to choose a course.", dim())),
      table_area,
    );
    return;
  };

  let mut tally = AttendanceTally::default();
  let rows: Vec<Row> = listing
    .items
    .iter()
    .map(|s| {
      let mut cells = vec![
        Cell::from(s.student_id.clone()),
        Cell::from(s.full_name()),
      ];
      for date in &dates {
        let cell = match store.attendance_on(&s.id, &course.id, *date) {
          Some(status) => {
            tally.add(status);
            Span::styled(status.to_string(), Style::default().fg(attendance_color(status)))
          }
          None => Span::styled("Not Recorded", dim()),
        };
        cells.push(Cell::from(cell));
      }
      Row::new(cells)
    })
    .collect();

  let mut header = vec!["ID".to_owned(), "Name".to_owned()];
  header.extend(dates.iter().map(|d| match view.mode {
    AttendanceMode::Day => "Status".to_owned(),
    AttendanceMode::Week => d.format("%a %m/%d").to_string(),
  }));

  let mut widths = vec![Constraint::Length(9), Constraint::Length(20)];
  widths.extend(dates.iter().map(|_| Constraint::Length(13)));

  let [table_area, totals] =
    Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(table_area);

  let table = Table::new(rows, widths)
    .header(Row::new(header).style(header_style()))
    .row_highlight_style(cursor_style());

  let mut state = TableState::default();
  state.select((!listing.is_empty()).then_some(app.cursor));
  f.render_stateful_widget(table, table_area, &mut state);

  f.render_widget(
    Paragraph::new(Line::styled(
      format!(
        "{}   present {}  absent {}  late {}  excused {}   rate {}",
        listing.summary("students"),
        tally.present,
        tally.absent,
        tally.late,
        tally.excused,
        tally.rate(),
      ),
      dim(),
    )),
    totals,
  );
}
