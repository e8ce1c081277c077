use std::path::Path;

use kickoff_core::link::QuarantinedShootout;

use crate::{Error, Result};

/// Columns of the quarantine artifact, in order.
pub const QUARANTINE_HEADER: [&str; 8] = [
  "date",
  "home_team",
  "away_team",
  "winner",
  "first_shooter",
  "match_id",
  "winner_id",
  "first_shooter_id",
];

/// Write quarantined shootouts to `path` as UTF-8 CSV.
///
/// With no records, nothing is written and a file left by an earlier run is
/// removed. Returns whether a file was written.
pub fn write_quarantine(path: impl AsRef<Path>, records: &[QuarantinedShootout]) -> Result<bool> {
  let path = path.as_ref();
  let write_err = |source| Error::Write { path: path.to_path_buf(), source };

  if records.is_empty() {
    match std::fs::remove_file(path) {
      Ok(()) => {}
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => return Err(write_err(e)),
    }
    return Ok(false);
  }

  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).map_err(write_err)?;
  }

  let mut writer = csv::Writer::from_path(path)?;
  writer.write_record(QUARANTINE_HEADER)?;
  for q in records {
    let id = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
    writer.write_record([
      q.record.date.format("%Y-%m-%d").to_string(),
      q.record.home_team.clone(),
      q.record.away_team.clone(),
      q.record.winner.clone(),
      q.record.first_shooter.clone().unwrap_or_default(),
      id(q.match_id),
      id(q.winner_id),
      id(q.first_shooter_id),
    ])?;
  }
  writer.flush().map_err(write_err)?;
  Ok(true)
}
