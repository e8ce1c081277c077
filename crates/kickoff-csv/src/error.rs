//! Error types for the kickoff-csv codec.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot read {path}: {source}")]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot write {path}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed CSV: {0}")]
  Csv(#[from] csv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
