//! Linking: turning name references into store-generated surrogate keys.
//!
//! Two short-lived lookup tables are built from what the store hands back
//! after an insert: [`IdentityKeyMap`] (display name → `country_id`) and
//! [`MatchKeyMap`] (`(date, home, away)` → `match_id`). Each is a snapshot for
//! one run and is discarded afterwards.
//!
//! A record whose required key cannot be resolved is excluded and counted,
//! never an error.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::{
  Error, Result, UNKNOWN,
  record::{Country, FormerName, GoalRecord, MatchKey, MatchRecord, ShootoutRecord},
  sink::{InsertRow, ResultSet, Table, Value},
};

// ─── Key maps ────────────────────────────────────────────────────────────────

/// Display name → `country_id`, for persisted identities.
#[derive(Debug, Clone, Default)]
pub struct IdentityKeyMap(HashMap<String, i64>);

impl IdentityKeyMap {
  /// Build from rows with `country_id` and `display_name` columns.
  pub fn from_rows(set: &ResultSet) -> Result<Self> {
    let id_col = set.column("country_id")?;
    let name_col = set.column("display_name")?;

    let mut map = HashMap::with_capacity(set.rows.len());
    for row in &set.rows {
      let id = cell(row, id_col, "country_id", Value::as_i64)?;
      let name = cell(row, name_col, "display_name", |v| v.as_str().map(str::to_owned))?;
      map.insert(name, id);
    }
    Ok(Self(map))
  }

  /// The surrogate key for `name`. The [`UNKNOWN`] sentinel never resolves.
  pub fn resolve(&self, name: &str) -> Option<i64> {
    if name == UNKNOWN {
      return None;
    }
    self.0.get(name).copied()
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// `(date, home team name, away team name)` → `match_id`, for persisted
/// matches.
#[derive(Debug, Clone, Default)]
pub struct MatchKeyMap(HashMap<MatchKey, i64>);

impl MatchKeyMap {
  /// Build from rows with `match_id`, `match_date`, `home_team_name` and
  /// `away_team_name` columns.
  pub fn from_rows(set: &ResultSet) -> Result<Self> {
    let id_col = set.column("match_id")?;
    let date_col = set.column("match_date")?;
    let home_col = set.column("home_team_name")?;
    let away_col = set.column("away_team_name")?;

    let mut map = HashMap::with_capacity(set.rows.len());
    for row in &set.rows {
      let id = cell(row, id_col, "match_id", Value::as_i64)?;
      let date = cell(row, date_col, "match_date", Value::as_date)?;
      let home = cell(row, home_col, "home_team_name", |v| v.as_str().map(str::to_owned))?;
      let away = cell(row, away_col, "away_team_name", |v| v.as_str().map(str::to_owned))?;
      map.insert(MatchKey::new(date, home, away), id);
    }
    Ok(Self(map))
  }

  pub fn resolve(&self, key: &MatchKey) -> Option<i64> { self.0.get(key).copied() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// Read and convert one key cell. A short row or an unconvertible value is
/// malformed.
fn cell<T>(
  row: &[Value],
  idx: usize,
  column: &'static str,
  convert: impl FnOnce(&Value) -> Option<T>,
) -> Result<T> {
  let Some(value) = row.get(idx) else {
    return Err(Error::MalformedKey { column, value: "<missing cell>".to_owned() });
  };
  convert(value).ok_or_else(|| Error::MalformedKey { column, value: value.to_string() })
}

// ─── Link output ─────────────────────────────────────────────────────────────

/// Insertable rows plus what was excluded on the way.
#[derive(Debug, Clone)]
pub struct Linked<R> {
  pub rows:       Vec<R>,
  /// Records missing a required key after mapping.
  pub unmapped:   usize,
  /// Records removed by de-duplication on the linked key.
  pub duplicates: usize,
}

impl<R> Default for Linked<R> {
  fn default() -> Self { Self { rows: Vec::new(), unmapped: 0, duplicates: 0 } }
}

// ─── Insertable rows ─────────────────────────────────────────────────────────

impl InsertRow for Country {
  const TABLE: Table = Table::Countries;
  const COLUMNS: &'static [&'static str] = &[
    "iso",
    "iso3",
    "iso_code",
    "fips",
    "display_name",
    "official_name",
    "capital",
    "continent",
    "currency_code",
    "currency_name",
    "phone",
    "region_code",
    "region_name",
    "sub_region_code",
    "sub_region_name",
    "intermediate_region_code",
    "intermediate_region_name",
    "status",
    "developed_or_developing",
    "sids",
    "lldc",
    "ldc",
    "area_sq_km",
    "population",
    "is_virtual",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      self.iso.clone().into(),
      self.iso3.clone().into(),
      self.iso_code.clone().into(),
      self.fips.clone().into(),
      self.display_name.clone().into(),
      self.official_name.clone().into(),
      self.capital.clone().into(),
      self.continent.clone().into(),
      self.currency_code.clone().into(),
      self.currency_name.clone().into(),
      self.phone.clone().into(),
      self.region_code.clone().into(),
      self.region_name.clone().into(),
      self.sub_region_code.clone().into(),
      self.sub_region_name.clone().into(),
      self.intermediate_region_code.clone().into(),
      self.intermediate_region_name.clone().into(),
      self.status.clone().into(),
      self.developed_or_developing.clone().into(),
      self.sids.into(),
      self.lldc.into(),
      self.ldc.into(),
      self.area_sq_km.into(),
      self.population.into(),
      self.is_virtual.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormerNameRow {
  pub country_id:  i64,
  pub former_name: String,
  pub start_date:  Option<NaiveDate>,
  pub end_date:    Option<NaiveDate>,
}

impl InsertRow for FormerNameRow {
  const TABLE: Table = Table::FormerNames;
  const COLUMNS: &'static [&'static str] = &["country_id", "former_name", "start_date", "end_date"];

  fn values(&self) -> Vec<Value> {
    vec![
      self.country_id.into(),
      self.former_name.clone().into(),
      self.start_date.into(),
      self.end_date.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
  pub match_date:   NaiveDate,
  pub home_team_id: i64,
  pub away_team_id: i64,
  pub home_score:   i64,
  pub away_score:   i64,
  pub tournament:   Option<String>,
  pub city:         Option<String>,
  /// Venue; `None` for an unknown or unresolved country.
  pub country_id:   Option<i64>,
  pub neutral:      bool,
}

impl InsertRow for MatchRow {
  const TABLE: Table = Table::Matches;
  const COLUMNS: &'static [&'static str] = &[
    "match_date",
    "home_team_id",
    "away_team_id",
    "home_score",
    "away_score",
    "tournament",
    "city",
    "country_id",
    "neutral",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      self.match_date.into(),
      self.home_team_id.into(),
      self.away_team_id.into(),
      self.home_score.into(),
      self.away_score.into(),
      self.tournament.clone().into(),
      self.city.clone().into(),
      self.country_id.into(),
      self.neutral.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoalRow {
  pub match_id: i64,
  pub team_id:  i64,
  pub scorer:   String,
  pub minute:   i64,
  pub own_goal: bool,
  pub penalty:  bool,
}

impl InsertRow for GoalRow {
  const TABLE: Table = Table::Goals;
  const COLUMNS: &'static [&'static str] =
    &["match_id", "team_id", "scorer", "minute", "own_goal", "penalty"];

  fn values(&self) -> Vec<Value> {
    vec![
      self.match_id.into(),
      self.team_id.into(),
      self.scorer.clone().into(),
      self.minute.into(),
      self.own_goal.into(),
      self.penalty.into(),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShootoutRow {
  pub match_id:         i64,
  pub winner_id:        i64,
  pub first_shooter_id: Option<i64>,
}

impl InsertRow for ShootoutRow {
  const TABLE: Table = Table::PenaltyShootouts;
  const COLUMNS: &'static [&'static str] = &["match_id", "winner_id", "first_shooter_id"];

  fn values(&self) -> Vec<Value> {
    vec![self.match_id.into(), self.winner_id.into(), self.first_shooter_id.into()]
  }
}

/// A shootout excluded for a missing match or winner, kept for manual review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantinedShootout {
  pub record:           ShootoutRecord,
  pub match_id:         Option<i64>,
  pub winner_id:        Option<i64>,
  pub first_shooter_id: Option<i64>,
}

// ─── Linking ─────────────────────────────────────────────────────────────────

/// Former names need their current country resolved.
pub fn link_former_names(records: &[FormerName], ids: &IdentityKeyMap) -> Linked<FormerNameRow> {
  let mut out = Linked::default();
  for f in records {
    match ids.resolve(&f.current_country_name) {
      Some(country_id) => out.rows.push(FormerNameRow {
        country_id,
        former_name: f.former_name.clone(),
        start_date: f.start_date,
        end_date: f.end_date,
      }),
      None => out.unmapped += 1,
    }
  }
  out
}

/// Matches need both teams resolved; the venue country is optional.
/// Unique by `(date, home_team_id, away_team_id)`, first seen wins.
pub fn link_matches(records: &[MatchRecord], ids: &IdentityKeyMap) -> Linked<MatchRow> {
  let mut out = Linked::default();
  let mut seen = HashSet::new();

  for m in records {
    let (Some(home_team_id), Some(away_team_id)) = (ids.resolve(&m.home_team), ids.resolve(&m.away_team))
    else {
      out.unmapped += 1;
      continue;
    };
    if !seen.insert((m.date, home_team_id, away_team_id)) {
      out.duplicates += 1;
      continue;
    }
    out.rows.push(MatchRow {
      match_date: m.date,
      home_team_id,
      away_team_id,
      home_score: m.home_score,
      away_score: m.away_score,
      tournament: m.tournament.clone(),
      city: m.city.clone(),
      country_id: ids.resolve(&m.country),
      neutral: m.neutral,
    });
  }
  out
}

/// Goals need their match and credited team resolved.
/// Unique by every linked column, first seen wins.
pub fn link_goals(
  records: &[GoalRecord],
  ids: &IdentityKeyMap,
  matches: &MatchKeyMap,
) -> Linked<GoalRow> {
  let mut out = Linked::default();
  let mut seen = HashSet::new();

  for g in records {
    let (Some(match_id), Some(team_id)) = (matches.resolve(&g.key()), ids.resolve(&g.team)) else {
      out.unmapped += 1;
      continue;
    };
    let row = GoalRow {
      match_id,
      team_id,
      scorer: g.scorer.clone(),
      minute: g.minute,
      own_goal: g.own_goal,
      penalty: g.penalty,
    };
    if seen.insert(row.clone()) {
      out.rows.push(row);
    } else {
      out.duplicates += 1;
    }
  }
  out
}

/// Shootouts need their match and winner resolved; the first shooter is
/// optional. Every excluded record is also returned for quarantine. At most
/// one shootout per match, first seen wins.
pub fn link_shootouts(
  records: &[ShootoutRecord],
  ids: &IdentityKeyMap,
  matches: &MatchKeyMap,
) -> (Linked<ShootoutRow>, Vec<QuarantinedShootout>) {
  let mut out = Linked::default();
  let mut quarantined = Vec::new();
  let mut seen = HashSet::new();

  for s in records {
    let match_id = matches.resolve(&s.key());
    let winner_id = ids.resolve(&s.winner);
    let first_shooter_id = s.first_shooter.as_deref().and_then(|n| ids.resolve(n));

    let (Some(match_id), Some(winner_id)) = (match_id, winner_id) else {
      out.unmapped += 1;
      quarantined.push(QuarantinedShootout {
        record: s.clone(),
        match_id,
        winner_id,
        first_shooter_id,
      });
      continue;
    };
    if !seen.insert(match_id) {
      out.duplicates += 1;
      continue;
    }
    out.rows.push(ShootoutRow { match_id, winner_id, first_shooter_id });
  }
  (out, quarantined)
}
