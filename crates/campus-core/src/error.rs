//! Error types for `campus-core`.

use std::path::PathBuf;

use thiserror::Error;

use crate::integrity::Issue;

#[derive(Debug, Error)]
pub enum Error {
  #[error("email and password are both required")]
  MissingCredentials,

  #[error("invalid email or password")]
  InvalidCredentials,

  #[error("dataset rejected: {} integrity error(s), first: {}", .0.len(), first_issue(.0))]
  Integrity(Vec<Issue>),

  #[error("failed to read dataset {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("unknown {kind} {value:?}")]
  UnknownName { kind: &'static str, value: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

fn first_issue(issues: &[Issue]) -> String {
  issues
    .first()
    .map(ToString::to_string)
    .unwrap_or_else(|| "none".to_owned())
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
