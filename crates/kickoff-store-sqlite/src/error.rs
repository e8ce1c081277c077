//! Error type for `kickoff-store-sqlite`.

use kickoff_core::sink::Table;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  /// A bulk insert was rolled back. `example` renders the row that failed.
  #[error("insert into {table} failed at row {row}: {source}; example: {example}")]
  Insert {
    table:   Table,
    row:     usize,
    example: String,
    #[source]
    source:  rusqlite::Error,
  },

  #[error("insert into {table}: row {row} has {found} values for {expected} columns")]
  ColumnCount {
    table:    Table,
    row:      usize,
    expected: usize,
    found:    usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
