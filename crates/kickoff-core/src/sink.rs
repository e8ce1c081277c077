//! The `RecordSink` trait and the values that cross it.
//!
//! The trait is implemented by storage backends (e.g. `kickoff-store-sqlite`).
//! The loader depends on this abstraction, not on any concrete backend.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The five target tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
  Countries,
  FormerNames,
  Matches,
  Goals,
  PenaltyShootouts,
}

impl Table {
  /// Every table, parents before children.
  pub const ALL: [Table; 5] = [
    Table::Countries,
    Table::FormerNames,
    Table::Matches,
    Table::Goals,
    Table::PenaltyShootouts,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Table::Countries => "countries",
      Table::FormerNames => "former_names",
      Table::Matches => "matches",
      Table::Goals => "goals",
      Table::PenaltyShootouts => "penalty_shootouts",
    }
  }

  /// Tables holding a foreign key into this one.
  pub fn dependents(self) -> &'static [Table] {
    match self {
      Table::Countries => &[
        Table::FormerNames,
        Table::Matches,
        Table::Goals,
        Table::PenaltyShootouts,
      ],
      Table::Matches => &[Table::Goals, Table::PenaltyShootouts],
      Table::FormerNames | Table::Goals | Table::PenaltyShootouts => &[],
    }
  }

  /// `tables` plus everything that transitively depends on them, children
  /// first.
  pub fn cascade(tables: &[Table]) -> Vec<Table> {
    let mut out: Vec<Table> = Vec::new();
    let mut stack: Vec<Table> = tables.to_vec();
    while let Some(t) = stack.pop() {
      if !out.contains(&t) {
        out.push(t);
        stack.extend_from_slice(t.dependents());
      }
    }
    // Declaration order is parent-first; reverse it for deletion.
    out.sort_by(|a, b| b.cmp(a));
    out
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

// ─── Values ──────────────────────────────────────────────────────────────────

/// A single cell crossing the sink boundary.
///
/// Missing values are always [`Value::Null`]; there are no numeric sentinels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
  Bool(bool),
  /// A calendar date with no time component.
  Date(NaiveDate),
}

impl Value {
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Value::Integer(n) => Some(*n),
      Value::Bool(b) => Some(i64::from(*b)),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::Text(s) => Some(s.as_str()),
      _ => None,
    }
  }

  /// A date, or text holding an ISO date.
  pub fn as_date(&self) -> Option<NaiveDate> {
    match self {
      Value::Date(d) => Some(*d),
      Value::Text(s) => crate::normalize::parse_date(Some(s.as_str())),
      _ => None,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => f.write_str("NULL"),
      Value::Integer(n) => write!(f, "{n}"),
      Value::Real(x) => write!(f, "{x}"),
      Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
      Value::Bool(b) => write!(f, "{b}"),
      Value::Date(d) => write!(f, "'{}'", d.format("%Y-%m-%d")),
    }
  }
}

impl From<i64> for Value {
  fn from(n: i64) -> Self { Value::Integer(n) }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<NaiveDate> for Value {
  fn from(d: NaiveDate) -> Self { Value::Date(d) }
}

impl From<String> for Value {
  fn from(s: String) -> Self { Value::Text(s) }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self { Value::Text(s.to_owned()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(v: Option<T>) -> Self { v.map_or(Value::Null, Into::into) }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// A record ready for insertion into one target table.
pub trait InsertRow {
  const TABLE: Table;
  const COLUMNS: &'static [&'static str];

  /// One value per entry in [`COLUMNS`](Self::COLUMNS), in the same order.
  fn values(&self) -> Vec<Value>;
}

/// Render a row as `(v1, v2, …)` for diagnostics.
pub fn render_row(values: &[Value]) -> String {
  let cells: Vec<String> = values.iter().map(ToString::to_string).collect();
  format!("({})", cells.join(", "))
}

/// The result of [`RecordSink::query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<Value>>,
}

impl ResultSet {
  /// Position of `name` among the columns.
  pub fn column(&self, name: &'static str) -> crate::Result<usize> {
    self
      .columns
      .iter()
      .position(|c| c == name)
      .ok_or(crate::Error::MissingColumn(name))
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the persisted store.
///
/// Every call is an independent, short-lived interaction; a failure in one
/// leaves no partial state from another.
pub trait RecordSink {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Clear `tables` and everything depending on them, and reset their
  /// surrogate-key sequences.
  fn truncate(&mut self, tables: &[Table]) -> Result<(), Self::Error>;

  /// Insert all `rows` atomically. On any failure nothing is inserted and the
  /// error describes one offending row.
  fn bulk_insert(
    &mut self,
    table: Table,
    columns: &[&str],
    rows: &[Vec<Value>],
  ) -> Result<usize, Self::Error>;

  /// Run a read-only query.
  fn query(&self, sql: &str) -> Result<ResultSet, Self::Error>;

  /// Insert typed rows via [`bulk_insert`](Self::bulk_insert).
  fn insert_rows<R: InsertRow>(&mut self, rows: &[R]) -> Result<usize, Self::Error> {
    let values: Vec<Vec<Value>> = rows.iter().map(InsertRow::values).collect();
    self.bulk_insert(R::TABLE, R::COLUMNS, &values)
  }
}
