//! SQLite backend for the Kickoff loader.
//!
//! Implements [`kickoff_core::sink::RecordSink`] over a single blocking
//! [`rusqlite::Connection`]. Every truncate and bulk insert runs in its own
//! transaction.

mod encode;
mod schema;
mod sink;

pub mod error;

pub use error::{Error, Result};
pub use sink::SqliteSink;

#[cfg(test)]
mod tests;
