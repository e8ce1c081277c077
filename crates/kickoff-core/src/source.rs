//! The tabular record source: one [`RawTable`] per input file.
//!
//! Cells are kept as optional text. Typing happens in
//! [`normalize`](crate::normalize), where each source decides what a
//! malformed cell means.

use std::collections::HashMap;

/// Header plus rows of optional cells, as read from a delimited file.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
  headers: Vec<String>,
  index:   HashMap<String, usize>,
  rows:    Vec<Vec<Option<String>>>,
}

impl RawTable {
  pub fn new(headers: Vec<String>) -> Self {
    let index = headers
      .iter()
      .enumerate()
      .map(|(i, h)| (h.clone(), i))
      .collect();
    Self { headers, index, rows: Vec::new() }
  }

  /// Build a table from string literals; empty strings become missing cells.
  pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
    let mut table = Self::new(headers.iter().map(|h| (*h).to_owned()).collect());
    for row in rows {
      table.push_row(
        row
          .iter()
          .map(|cell| (!cell.is_empty()).then(|| (*cell).to_owned()))
          .collect(),
      );
    }
    table
  }

  /// Append a row. Short rows are padded with missing cells.
  pub fn push_row(&mut self, mut cells: Vec<Option<String>>) {
    if cells.len() < self.headers.len() {
      cells.resize(self.headers.len(), None);
    }
    self.rows.push(cells);
  }

  pub fn headers(&self) -> &[String] { &self.headers }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
    self.rows.iter().map(move |cells| RawRow { table: self, cells })
  }
}

/// A borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
  table: &'a RawTable,
  cells: &'a [Option<String>],
}

impl<'a> RawRow<'a> {
  /// The trimmed cell under `name`. Blank cells and unknown columns are
  /// `None`.
  pub fn field(&self, name: &str) -> Option<&'a str> {
    let idx = *self.table.index.get(name)?;
    self
      .cells
      .get(idx)?
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
  }

  /// The first present cell among several header spellings.
  pub fn field_any(&self, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| self.field(name))
  }

  /// Like [`field`](Self::field) but owned.
  pub fn text(&self, name: &str) -> Option<String> {
    self.field(name).map(str::to_owned)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_and_missing_cells_read_as_none() {
    let table = RawTable::from_rows(&["a", "b"], &[&["  x ", "   "]]);
    let row = table.rows().next().unwrap();
    assert_eq!(row.field("a"), Some("x"));
    assert_eq!(row.field("b"), None);
    assert_eq!(row.field("c"), None);
  }

  #[test]
  fn short_rows_are_padded() {
    let mut table = RawTable::new(vec!["a".into(), "b".into()]);
    table.push_row(vec![Some("1".into())]);
    let row = table.rows().next().unwrap();
    assert_eq!(row.field("a"), Some("1"));
    assert_eq!(row.field("b"), None);
  }

  #[test]
  fn field_any_takes_first_present_alias() {
    let table = RawTable::from_rows(&["sids"], &[&["TRUE"]]);
    let row = table.rows().next().unwrap();
    assert_eq!(row.field_any(&["SIDS", "sids"]), Some("TRUE"));
  }
}
