//! Loading pipeline for Kickoff.
//!
//! Reads the five source files, reconciles team names, and loads everything
//! into any [`RecordSink`](kickoff_core::sink::RecordSink) in foreign-key
//! order. See [`run`] for the sequence.

pub mod error;
pub mod loader;
pub mod sources;
pub mod summary;

pub use error::{Error, Result};
pub use loader::run;
pub use sources::Sources;
pub use summary::{LoadSummary, Outcome, TableReport};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `kickoff.toml` and `KICKOFF_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoadConfig {
  /// Directory holding the five source files.
  pub data_dir:       PathBuf,
  /// SQLite database file; created if missing.
  pub store_path:     PathBuf,
  /// Where the quarantine artifact goes; `<data_dir>/quarantine` if unset.
  pub quarantine_dir: Option<PathBuf>,
  pub files:          SourceFiles,
}

impl Default for LoadConfig {
  fn default() -> Self {
    Self {
      data_dir:       PathBuf::from("."),
      store_path:     PathBuf::from("kickoff.db"),
      quarantine_dir: None,
      files:          SourceFiles::default(),
    }
  }
}

impl LoadConfig {
  pub fn quarantine_path(&self) -> PathBuf {
    self
      .quarantine_dir
      .clone()
      .unwrap_or_else(|| self.data_dir.join("quarantine"))
      .join("quarantined_shootouts.csv")
  }
}

/// File names of the sources, relative to `data_dir`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceFiles {
  pub countries:    String,
  pub former_names: String,
  pub shootouts:    String,
  pub goalscorers:  String,
  pub results:      String,
}

impl Default for SourceFiles {
  fn default() -> Self {
    Self {
      countries:    "countries.csv".into(),
      former_names: "former_names.csv".into(),
      shootouts:    "shootouts.csv".into(),
      goalscorers:  "goalscorers.csv".into(),
      results:      "results.csv".into(),
    }
  }
}
