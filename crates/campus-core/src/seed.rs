//! The built-in demo dataset.
//!
//! Embedded at compile time from `seed.json` so the binary runs without any
//! files on disk.

use crate::{Result, store::Dataset};

const SEED_JSON: &str = include_str!("seed.json");

impl Dataset {
  /// Parse the embedded demo dataset.
  pub fn seed() -> Result<Self> { Self::from_json_str(SEED_JSON) }
}
