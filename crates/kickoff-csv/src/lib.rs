//! Delimited-text codec for Kickoff.
//!
//! Reads source files into [`kickoff_core::source::RawTable`] and writes the
//! quarantine artifact. Pure synchronous; no database dependencies.

pub mod error;
mod quarantine;
mod read;

pub use error::{Error, Result};
pub use quarantine::{QUARANTINE_HEADER, write_quarantine};
pub use read::{decode, read_table, table_from_str};
