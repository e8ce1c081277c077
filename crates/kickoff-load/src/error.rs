//! Fatal errors: anything here aborts the run.
//!
//! Per-table insert failures are not errors; they are recorded in the
//! [`LoadSummary`](crate::LoadSummary) and the run continues.

use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot load source {name}: {source}")]
  Source {
    name:   &'static str,
    #[source]
    source: kickoff_csv::Error,
  },

  #[error("truncating target tables failed: {0}")]
  Truncate(#[source] BoxError),

  #[error("fetching {what} keys failed: {source}")]
  KeyFetch {
    what:   &'static str,
    #[source]
    source: BoxError,
  },

  #[error("store returned unusable keys: {0}")]
  Keys(#[from] kickoff_core::Error),

  #[error("cannot write quarantine file {path}: {source}")]
  Quarantine {
    path:   PathBuf,
    #[source]
    source: kickoff_csv::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
