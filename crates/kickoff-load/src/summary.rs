//! What a run did, table by table.

use std::path::PathBuf;

use kickoff_core::{identity::ConsistencyReport, sink::Table};
use serde::Serialize;

/// Counts for one target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
  pub table:       Table,
  /// Rows handed to the sink.
  pub attempted:   usize,
  /// Rows the sink committed; 0 if the batch was rolled back.
  pub inserted:    usize,
  /// Records dropped for an unresolved required key.
  pub unmapped:    usize,
  /// Records dropped as duplicates of the table's unique key.
  pub duplicates:  usize,
  /// Records written to the quarantine artifact.
  pub quarantined: usize,
  /// The sink's error if the batch was rolled back.
  pub error:       Option<String>,
}

impl TableReport {
  pub fn new(table: Table) -> Self {
    Self {
      table,
      attempted: 0,
      inserted: 0,
      unmapped: 0,
      duplicates: 0,
      quarantined: 0,
      error: None,
    }
  }
}

/// Whether every table loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
  Completed,
  /// At least one table's insert was rolled back; the others loaded.
  Degraded,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
  /// In load order.
  pub tables:          Vec<TableReport>,
  /// Names that received a synthesized identity this run.
  pub virtual_names:   Vec<String>,
  pub consistency:     ConsistencyReport,
  /// Unrecognized or unclassified identities as persisted, read back after
  /// the load.
  pub unrecognized:    Vec<String>,
  pub quarantine_file: Option<PathBuf>,
}

impl LoadSummary {
  pub fn outcome(&self) -> Outcome {
    if self.tables.iter().any(|t| t.error.is_some()) {
      Outcome::Degraded
    } else {
      Outcome::Completed
    }
  }

  pub fn table(&self, table: Table) -> Option<&TableReport> {
    self.tables.iter().find(|t| t.table == table)
  }
}
