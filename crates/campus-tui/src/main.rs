//! `campus`: terminal UI for the campus student-information store.
//!
//! # Usage
//!
//! ```text
//! campus                              # bundled demo data
//! campus --dataset school.json --strictness strict
//! campus --dataset school.json --check
//! ```
//!
//! Every account accepts the demo password (`password` unless configured).

mod app;
mod settings;
mod ui;

use std::{
  fs::File,
  io,
  path::PathBuf,
  process::ExitCode,
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use campus_core::{
  Dataset, Store, Strictness,
  integrity::{self, Severity},
  session::Session,
};
use clap::Parser;
use settings::{Overrides, Settings};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "campus", version, about = "Terminal UI for campus student records")]
struct Args {
  /// Path to a TOML config file. Missing files are ignored.
  #[arg(short, long, value_name = "FILE", default_value = "campus.toml")]
  config: PathBuf,

  /// JSON dataset to load instead of the bundled demo data.
  #[arg(short, long, value_name = "FILE", env = "CAMPUS_DATASET")]
  dataset: Option<PathBuf>,

  /// How to treat integrity problems: lenient, warn or strict.
  #[arg(long, env = "CAMPUS_STRICTNESS")]
  strictness: Option<Strictness>,

  /// Log file for the interactive UI.
  #[arg(long, value_name = "FILE", env = "CAMPUS_LOG_FILE")]
  log_file: Option<PathBuf>,

  /// Validate the dataset, print every issue and exit. Exits non-zero when
  /// any issue is an error.
  #[arg(long)]
  check: bool,

  /// Pre-fill the login form with this email.
  #[arg(long, env = "CAMPUS_EMAIL")]
  email: Option<String>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
  let args = Args::parse();

  let settings = Settings::load(&args.config)?.apply(Overrides {
    dataset:    args.dataset,
    strictness: args.strictness,
    log_file:   args.log_file,
    email:      args.email,
  });

  init_tracing(&settings, args.check)?;

  let data = match &settings.dataset {
    Some(path) => Dataset::from_path(path)
      .with_context(|| format!("failed to load dataset {}", path.display()))?,
    None => Dataset::seed().context("failed to parse bundled demo data")?,
  };

  if args.check {
    return Ok(check(&data));
  }

  let store = Store::load(data, settings.strictness).context("dataset rejected")?;
  let session = Session::new(settings.demo_password.clone());
  let today = chrono::Local::now().date_naive();
  let mut app = App::new(
    Arc::new(store),
    session,
    settings.email.clone().unwrap_or_default(),
    today,
  );

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result.map(|()| ExitCode::SUCCESS)
}

/// The UI owns the terminal, so logs go to a file; `--check` logs to stderr.
fn init_tracing(settings: &Settings, to_stderr: bool) -> Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();

  if to_stderr {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .init();
  } else {
    let file = File::create(&settings.log_file)
      .with_context(|| format!("failed to create log file {}", settings.log_file.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  }
  Ok(())
}

/// Print every integrity issue, one per line.
fn check(data: &Dataset) -> ExitCode {
  let issues = integrity::check(data);
  let mut errors = 0;
  for issue in &issues {
    let label = match issue.severity() {
      Severity::Error => {
        errors += 1;
        "error"
      }
      Severity::Warning => "warning",
    };
    println!("{label}: {issue}");
  }
  println!(
    "{} issue(s), {errors} error(s): {} users, {} students, {} courses",
    issues.len(),
    data.users.len(),
    data.students.len(),
    data.courses.len(),
  );
  if errors == 0 {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250)).context("polling events")? {
      continue;
    }

    match event::read().context("reading event")? {
      // Windows reports releases too.
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}
