//! TUI rendering for the login screen and every page.

pub mod attendance;
pub mod course_detail;
pub mod courses;
pub mod dashboard;
pub mod grades;
pub mod login;
pub mod profile;
pub mod student_detail;
pub mod students;

use campus_core::{
  entity::{AttendanceStatus, CourseStatus, StudentStatus},
  metrics::GradeTier,
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Tabs},
};
use strum::IntoEnumIterator;

use crate::app::{App, Detail, Page, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, page tabs, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // tabs
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Login => login::draw(f, rows[1].union(rows[2]), app),
    Screen::Main => {
      draw_tabs(f, rows[1], app);
      draw_body(f, rows[2], app);
    }
  }
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = app.today.format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " campus",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = match app.user() {
    Some(user) => format!("{} ({})  {date} ", user.name, user.role),
    None => format!("{date} "),
  };
  let right = Span::styled(right, Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Tabs ─────────────────────────────────────────────────────────────────────

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
  let titles: Vec<Line> = Page::iter()
    .enumerate()
    .map(|(i, page)| Line::from(format!("{} {page}", i + 1)))
    .collect();

  let tabs = Tabs::new(titles)
    .select(app.page.index())
    .style(Style::default().fg(Color::Gray))
    .highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    );
  f.render_widget(tabs, area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match &app.detail {
    Some(Detail::Student { id, tab }) => student_detail::draw(f, area, app, id, *tab),
    Some(Detail::Course { id, tab }) => course_detail::draw(f, area, app, id, *tab),
    None => match app.page {
      Page::Dashboard => dashboard::draw(f, area, app),
      Page::Students => students::draw(f, area, app),
      Page::Courses => courses::draw(f, area, app),
      Page::Grades => grades::draw(f, area, app),
      Page::Attendance => attendance::draw(f, area, app),
      Page::Profile => profile::draw(f, area, app),
    },
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match (&app.screen, &app.detail) {
    (Screen::Login, _) => ("LOGIN", "Tab switch field  Enter sign in  Ctrl-C quit"),
    (Screen::Main, _) if app.search_active => {
      ("SEARCH", "Type to filter  Esc clear  Enter done")
    }
    (Screen::Main, Some(_)) => (
      "DETAIL",
      "←→/hl tab  ↑↓/jk scroll  Esc back  x logout  q quit",
    ),
    (Screen::Main, None) => ("NORMAL", page_hints(app.page)),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    format!("{}  │  {hints}", app.status_msg)
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::Gray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

fn page_hints(page: Page) -> &'static str {
  match page {
    Page::Dashboard | Page::Profile => "Tab/1-6 pages  x logout  q quit",
    Page::Students | Page::Courses => {
      "/ search  f status  p group  s sort  r reverse  Enter open  q quit"
    }
    Page::Grades => "/ search  c course  u student  s sort  Enter open  q quit",
    Page::Attendance => {
      "c course  w day/week  ←→ date  t today  / search  Enter open  q quit"
    }
  }
}

// ─── Shared widgets ───────────────────────────────────────────────────────────

/// Bordered block with a padded title.
pub(crate) fn titled(title: impl std::fmt::Display) -> Block<'static> {
  Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

pub(crate) fn cursor_style() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

pub(crate) fn header_style() -> Style {
  Style::default()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD)
}

pub(crate) fn dim() -> Style { Style::default().fg(Color::DarkGray) }

pub(crate) fn tier_color(tier: GradeTier) -> Color {
  match tier {
    GradeTier::A => Color::Green,
    GradeTier::B => Color::Blue,
    GradeTier::C => Color::Cyan,
    GradeTier::D => Color::Yellow,
    GradeTier::F => Color::Red,
  }
}

/// A letter grade coloured by its tier, or a dim dash when absent.
pub(crate) fn letter_span(letter: Option<&str>) -> Span<'static> {
  match letter {
    Some(l) => Span::styled(
      l.to_owned(),
      Style::default()
        .fg(tier_color(GradeTier::from_letter(l)))
        .add_modifier(Modifier::BOLD),
    ),
    None => Span::styled("—", dim()),
  }
}

pub(crate) fn attendance_color(status: AttendanceStatus) -> Color {
  match status {
    AttendanceStatus::Present => Color::Green,
    AttendanceStatus::Absent => Color::Red,
    AttendanceStatus::Late => Color::Yellow,
    AttendanceStatus::Excused => Color::Blue,
  }
}

pub(crate) fn student_status_color(status: StudentStatus) -> Color {
  match status {
    StudentStatus::Active => Color::Green,
    StudentStatus::Inactive => Color::Gray,
    StudentStatus::Graduated => Color::Blue,
    StudentStatus::Suspended => Color::Red,
  }
}

pub(crate) fn course_status_color(status: CourseStatus) -> Color {
  match status {
    CourseStatus::Active => Color::Green,
    CourseStatus::Inactive => Color::Gray,
    CourseStatus::Upcoming => Color::Blue,
  }
}

/// One-line search bar for the current page, with a cursor while typing.
pub(crate) fn search_line(app: &App) -> Line<'static> {
  let text = app.search_text();
  if app.search_active {
    Line::styled(format!("/{text}_"), Style::default().fg(Color::Yellow))
  } else if text.is_empty() {
    Line::styled("/ to search", dim())
  } else {
    Line::styled(format!("/{text}"), Style::default().fg(Color::Yellow))
  }
}

/// Record how many lines a detail tab has and return the scroll offset,
/// clamped so the last line stays on screen.
pub(crate) fn detail_offset(app: &App, line_count: usize) -> u16 {
  app.detail_lines.set(line_count);
  let offset = app.detail_scroll.min(line_count.saturating_sub(1));
  u16::try_from(offset).unwrap_or(u16::MAX)
}

/// `label: value` with the label dimmed.
pub(crate) fn field(label: &str, value: impl Into<String>) -> Line<'static> {
  Line::from(vec![
    Span::styled(format!("{label:<14}"), dim()),
    Span::raw(value.into()),
  ])
}

#[cfg(test)]
mod tests;
