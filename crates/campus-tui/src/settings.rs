//! Runtime settings: config file, then `CAMPUS_*` environment variables,
//! then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use campus_core::{Strictness, session::DEFAULT_DEMO_PASSWORD};
use serde::Deserialize;

/// Resolved settings for one run.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// JSON dataset to load; the bundled seed data when unset.
  #[serde(default)]
  pub dataset:       Option<PathBuf>,
  #[serde(default)]
  pub strictness:    Strictness,
  /// Password accepted for every account.
  #[serde(default = "default_demo_password")]
  pub demo_password: String,
  /// Where the TUI writes its log; the terminal itself is busy.
  #[serde(default = "default_log_file")]
  pub log_file:      PathBuf,
  /// Pre-fills the login form.
  #[serde(default)]
  pub email:         Option<String>,
}

fn default_demo_password() -> String { DEFAULT_DEMO_PASSWORD.to_owned() }

fn default_log_file() -> PathBuf { PathBuf::from("campus.log") }

impl Default for Settings {
  fn default() -> Self {
    Self {
      dataset:       None,
      strictness:    Strictness::default(),
      demo_password: default_demo_password(),
      log_file:      default_log_file(),
      email:         None,
    }
  }
}

/// Values given on the command line. Each one that is set wins over the
/// file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
  pub dataset:    Option<PathBuf>,
  pub strictness: Option<Strictness>,
  pub log_file:   Option<PathBuf>,
  pub email:      Option<String>,
}

impl Settings {
  /// Layer the config file at `path` (optional) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CAMPUS"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn apply(mut self, overrides: Overrides) -> Self {
    if let Some(dataset) = overrides.dataset {
      self.dataset = Some(dataset);
    }
    if let Some(strictness) = overrides.strictness {
      self.strictness = strictness;
    }
    if let Some(log_file) = overrides.log_file {
      self.log_file = log_file;
    }
    if overrides.email.is_some() {
      self.email = overrides.email;
    }
    self
  }
}
