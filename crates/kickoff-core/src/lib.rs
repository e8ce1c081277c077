//! Core types and reconciliation logic for the Kickoff results loader.
//!
//! This crate is deliberately free of file-format and database dependencies.
//! It cleans raw tables, reconciles team and country names into one identity
//! space, and links records to store-generated surrogate keys through the
//! [`sink::RecordSink`] abstraction. All other crates depend on it.

pub mod error;
pub mod identity;
pub mod link;
pub mod normalize;
pub mod record;
pub mod sink;
pub mod source;

pub use error::{Error, Result};

/// Sentinel name used for a missing venue country. Never becomes an identity
/// and never resolves to a surrogate key.
pub const UNKNOWN: &str = "Unknown";
