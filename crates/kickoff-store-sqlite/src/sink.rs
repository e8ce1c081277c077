//! [`SqliteSink`]: the SQLite implementation of [`RecordSink`].

use std::path::Path;

use kickoff_core::sink::{RecordSink, ResultSet, Table, Value, render_row};
use rusqlite::Connection;

use crate::{
  Error, Result,
  encode::{decode_value, encode_value},
  schema::SCHEMA,
};

// ─── Sink ────────────────────────────────────────────────────────────────────

/// A Kickoff store backed by a single SQLite file.
pub struct SqliteSink {
  conn: Connection,
}

impl SqliteSink {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    Self::init(conn)
  }

  /// Open an in-memory store, useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    Self::init(conn)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// Number of rows currently in `table`.
  pub fn count(&self, table: Table) -> Result<usize> {
    let n: i64 = self.conn.query_row(
      &format!("SELECT COUNT(*) FROM {}", table.name()),
      [],
      |r| r.get(0),
    )?;
    Ok(usize::try_from(n).unwrap_or_default())
  }
}

fn insert_sql(table: Table, columns: &[&str]) -> String {
  let cols = columns
    .iter()
    .map(|c| format!("\"{c}\""))
    .collect::<Vec<_>>()
    .join(", ");
  let params = (1..=columns.len())
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ");
  format!("INSERT INTO {} ({cols}) VALUES ({params})", table.name())
}

// ─── RecordSink impl ─────────────────────────────────────────────────────────

impl RecordSink for SqliteSink {
  type Error = Error;

  fn truncate(&mut self, tables: &[Table]) -> Result<()> {
    let order = Table::cascade(tables);
    let tx = self.conn.transaction()?;
    for table in &order {
      tx.execute(&format!("DELETE FROM {}", table.name()), [])?;
    }
    for table in &order {
      tx.execute("DELETE FROM sqlite_sequence WHERE name = ?1", [table.name()])?;
    }
    tx.commit()?;
    tracing::debug!(tables = ?order, "truncated");
    Ok(())
  }

  fn bulk_insert(&mut self, table: Table, columns: &[&str], rows: &[Vec<Value>]) -> Result<usize> {
    if let Some((row, values)) = rows
      .iter()
      .enumerate()
      .find(|(_, values)| values.len() != columns.len())
    {
      return Err(Error::ColumnCount {
        table,
        row,
        expected: columns.len(),
        found: values.len(),
      });
    }

    let sql = insert_sql(table, columns);
    // Dropping `tx` on an early return rolls everything back.
    let tx = self.conn.transaction()?;
    {
      let mut stmt = tx.prepare(&sql)?;
      for (row, values) in rows.iter().enumerate() {
        stmt
          .execute(rusqlite::params_from_iter(values.iter().map(encode_value)))
          .map_err(|source| Error::Insert {
            table,
            row,
            example: format!("{sql}; {}", render_row(values)),
            source,
          })?;
      }
    }
    tx.commit()?;
    Ok(rows.len())
  }

  fn query(&self, sql: &str) -> Result<ResultSet> {
    let mut stmt = self.conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
    let width = columns.len();

    let rows = stmt
      .query_map([], |r| {
        (0..width)
          .map(|i| r.get_ref(i).map(decode_value))
          .collect::<rusqlite::Result<Vec<_>>>()
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(ResultSet { columns, rows })
  }
}
