use std::{borrow::Cow, path::Path};

use kickoff_core::source::RawTable;

use crate::{Error, Result};

/// Read a CSV file with a header row into a [`RawTable`].
pub fn read_table(path: impl AsRef<Path>) -> Result<RawTable> {
  let path = path.as_ref();
  let bytes = std::fs::read(path).map_err(|source| Error::Read {
    path: path.to_path_buf(),
    source,
  })?;
  table_from_str(&decode(&bytes))
}

/// Decode file bytes: UTF-8 when valid, otherwise Windows-1252, the Latin-1
/// superset the source files were exported in. A leading UTF-8 BOM is dropped
/// either way.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
  let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
  match std::str::from_utf8(bytes) {
    Ok(s) => Cow::Borrowed(s),
    Err(_) => encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0,
  }
}

/// Parse CSV text with a header row. Rows may be shorter or longer than the
/// header; missing cells read as `None` and extra cells are ignored.
pub fn table_from_str(content: &str) -> Result<RawTable> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(content.as_bytes());

  let headers = reader
    .headers()?
    .iter()
    .map(|h| h.trim().to_owned())
    .collect::<Vec<_>>();
  let width = headers.len();
  let mut table = RawTable::new(headers);

  for record in reader.records() {
    let record = record?;
    table.push_row(
      record
        .iter()
        .take(width)
        .map(|cell| (!cell.is_empty()).then(|| cell.to_owned()))
        .collect(),
    );
  }

  Ok(table)
}
