//! The load sequence.
//!
//! Order is fixed by the foreign keys and by the two points where surrogate
//! keys have to be read back from the store:
//!
//! 1. resolve identities (virtual entries for unknown teams), check closure
//! 2. truncate every target table
//! 3. insert countries, fetch `display_name → country_id`
//! 4. insert former names and matches
//! 5. fetch `(date, home, away) → match_id`
//! 6. insert goals; quarantine orphaned shootouts, insert the rest
//! 7. read back unrecognized identities
//!
//! Truncation and key fetches are fatal. A failed insert rolls back that
//! table only and the run moves on.

use std::path::Path;

use kickoff_core::{
  identity::{ReferencedNames, check_consistency, resolve_identities},
  link::{
    IdentityKeyMap, Linked, MatchKeyMap, link_former_names, link_goals, link_matches,
    link_shootouts,
  },
  sink::{InsertRow, RecordSink, Table},
};

use crate::{Error, LoadSummary, Result, Sources, TableReport};

pub const COUNTRY_KEYS_SQL: &str = "SELECT country_id, display_name FROM countries";

pub const MATCH_KEYS_SQL: &str = "
SELECT m.match_id, m.match_date,
       hc.display_name AS home_team_name,
       ac.display_name AS away_team_name
FROM matches m
JOIN countries hc ON m.home_team_id = hc.country_id
JOIN countries ac ON m.away_team_id = ac.country_id";

pub const UNRECOGNIZED_SQL: &str = "
SELECT display_name, status, developed_or_developing
FROM countries
WHERE status = 'Unrecognized'
   OR developed_or_developing = 'Unknown'
ORDER BY display_name";

/// Load `sources` into `sink`, writing orphaned shootouts to
/// `quarantine_path`.
pub fn run<S: RecordSink>(sink: &mut S, sources: &Sources, quarantine_path: &Path) -> Result<LoadSummary> {
  // ── Identities ────────────────────────────────────────────────────────
  let referenced = ReferencedNames::collect(
    &sources.results.records,
    &sources.goals.records,
    &sources.shootouts.records,
    &sources.former_names.records,
  );
  let identities = resolve_identities(&sources.countries.records, &referenced);
  tracing::info!(
    total = identities.countries.len(),
    virtual_count = identities.virtual_names.len(),
    "resolved identities"
  );

  let consistency = check_consistency(
    &identities.countries,
    &sources.results.records,
    &sources.goals.records,
    &sources.shootouts.records,
    &sources.former_names.records,
  );

  // ── Truncate ──────────────────────────────────────────────────────────
  sink
    .truncate(&Table::ALL)
    .map_err(|e| Error::Truncate(Box::new(e)))?;
  tracing::info!("truncated target tables");

  let mut tables = Vec::with_capacity(Table::ALL.len());

  // ── Countries ─────────────────────────────────────────────────────────
  let mut report = TableReport::new(Table::Countries);
  insert(sink, &identities.countries, &mut report);
  tables.push(report);

  let ids = IdentityKeyMap::from_rows(&fetch(sink, "country", COUNTRY_KEYS_SQL)?)?;
  tracing::info!(count = ids.len(), "fetched country keys");

  // ── Former names ──────────────────────────────────────────────────────
  let linked = link_former_names(&sources.former_names.records, &ids);
  tables.push(load_linked(sink, linked));

  // ── Matches ───────────────────────────────────────────────────────────
  let linked = link_matches(&sources.results.records, &ids);
  tables.push(load_linked(sink, linked));

  let matches = MatchKeyMap::from_rows(&fetch(sink, "match", MATCH_KEYS_SQL)?)?;
  tracing::info!(count = matches.len(), "fetched match keys");

  // ── Goals ─────────────────────────────────────────────────────────────
  let linked = link_goals(&sources.goals.records, &ids, &matches);
  tables.push(load_linked(sink, linked));

  // ── Shootouts ─────────────────────────────────────────────────────────
  let (linked, quarantined) = link_shootouts(&sources.shootouts.records, &ids, &matches);
  let written = kickoff_csv::write_quarantine(quarantine_path, &quarantined).map_err(|source| {
    Error::Quarantine { path: quarantine_path.to_path_buf(), source }
  })?;
  if written {
    tracing::warn!(
      count = quarantined.len(),
      path = %quarantine_path.display(),
      "quarantined orphaned shootouts"
    );
  }
  let mut report = load_linked(sink, linked);
  report.quarantined = quarantined.len();
  tables.push(report);

  // ── Report ────────────────────────────────────────────────────────────
  let unrecognized = unrecognized_identities(sink);

  let summary = LoadSummary {
    tables,
    virtual_names: identities.virtual_names,
    consistency,
    unrecognized,
    quarantine_file: written.then(|| quarantine_path.to_path_buf()),
  };
  tracing::info!(outcome = ?summary.outcome(), "load finished");
  Ok(summary)
}

fn fetch<S: RecordSink>(
  sink: &S,
  what: &'static str,
  sql: &str,
) -> Result<kickoff_core::sink::ResultSet> {
  sink
    .query(sql)
    .map_err(|e| Error::KeyFetch { what, source: Box::new(e) })
}

/// Log the link drops for `R`'s table, then insert what survived.
fn load_linked<S: RecordSink, R: InsertRow>(sink: &mut S, linked: Linked<R>) -> TableReport {
  let table = R::TABLE;
  let mut report = TableReport::new(table);
  report.unmapped = linked.unmapped;
  report.duplicates = linked.duplicates;

  if linked.unmapped > 0 {
    tracing::warn!(%table, count = linked.unmapped, "dropped rows with unresolved keys");
  }
  if linked.duplicates > 0 {
    tracing::info!(%table, count = linked.duplicates, "removed duplicate rows");
  }

  insert(sink, &linked.rows, &mut report);
  report
}

/// Insert one table's rows in a single batch. A failure is recorded, not
/// propagated.
fn insert<S: RecordSink, R: InsertRow>(sink: &mut S, rows: &[R], report: &mut TableReport) {
  let table = R::TABLE;
  report.attempted = rows.len();
  match sink.insert_rows(rows) {
    Ok(n) => {
      report.inserted = n;
      tracing::info!(%table, count = n, "inserted");
    }
    Err(e) => {
      tracing::error!(%table, error = %e, "insert failed; table rolled back");
      report.error = Some(e.to_string());
    }
  }
}

/// Names of persisted identities that are unrecognized or unclassified.
/// Diagnostic only; a failed query is logged and yields nothing.
fn unrecognized_identities<S: RecordSink>(sink: &S) -> Vec<String> {
  let set = match sink.query(UNRECOGNIZED_SQL) {
    Ok(set) => set,
    Err(e) => {
      tracing::warn!(error = %e, "could not read back unrecognized identities");
      return Vec::new();
    }
  };
  let Ok(col) = set.column("display_name") else {
    return Vec::new();
  };
  let names: Vec<String> = set
    .rows
    .iter()
    .filter_map(|row| row[col].as_str().map(str::to_owned))
    .collect();
  if !names.is_empty() {
    tracing::info!(count = names.len(), names = ?names, "virtual or unrecognized identities");
  }
  names
}
