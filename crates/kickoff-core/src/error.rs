//! Error types for `kickoff-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("key query result is missing column {0:?}")]
  MissingColumn(&'static str),

  #[error("unusable value in key column {column:?}: {value}")]
  MalformedKey { column: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
