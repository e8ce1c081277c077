//! Per-source cleaning: one routine per input table.
//!
//! Cleaning never fails. A malformed cell falls back to a default (`None`,
//! `0`, `false`); a row is dropped only when a required field is missing
//! after parsing. De-duplication keeps the first occurrence.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  UNKNOWN,
  record::{Country, FormerName, GoalRecord, MatchRecord, ShootoutRecord},
  source::{RawRow, RawTable},
};

/// The output of a cleaning routine.
#[derive(Debug, Clone, Serialize)]
pub struct Cleaned<T> {
  pub records:    Vec<T>,
  /// Rows dropped for a missing required field.
  pub dropped:    usize,
  /// Rows removed as duplicates.
  pub duplicates: usize,
}

impl<T> Cleaned<T> {
  fn new() -> Self { Self { records: Vec::new(), dropped: 0, duplicates: 0 } }
}

// ─── Field parsing ───────────────────────────────────────────────────────────

/// Parse a calendar date. Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and ISO
/// date-times in any precision or offset (the time part is discarded).
pub fn parse_date(s: Option<&str>) -> Option<NaiveDate> {
  let s = s?;
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
    .ok()
    .or_else(|| {
      let (date, time) = s.split_once(['T', ' '])?;
      if !time.trim_start().starts_with(|c: char| c.is_ascii_digit()) {
        return None;
      }
      NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    })
}

/// Only a case-insensitive `"true"` is true.
pub fn parse_bool(s: Option<&str>) -> bool {
  s.is_some_and(|s| s.trim().eq_ignore_ascii_case("true"))
}

/// Integer or decimal text, truncated toward zero. Anything else is `None`.
pub fn parse_int(s: Option<&str>) -> Option<i64> {
  let s = s?.trim();
  if let Ok(n) = s.parse::<i64>() {
    return Some(n);
  }
  s.parse::<f64>()
    .ok()
    .filter(|f| f.is_finite())
    .map(|f| f.trunc() as i64)
}

fn int_or_zero(s: Option<&str>) -> i64 { parse_int(s).unwrap_or(0) }

// ─── Countries ───────────────────────────────────────────────────────────────

pub fn clean_countries(table: &RawTable) -> Cleaned<Country> {
  let mut out = Cleaned::new();
  let mut seen = HashSet::new();

  for row in table.rows() {
    let Some(display_name) = row.text("Display_Name") else {
      out.dropped += 1;
      continue;
    };
    if !seen.insert(display_name.clone()) {
      out.duplicates += 1;
      continue;
    }
    out.records.push(country_from_row(&row, display_name));
  }

  out
}

fn country_from_row(row: &RawRow<'_>, display_name: String) -> Country {
  Country {
    iso: row.text("ISO"),
    iso3: row.text("ISO3"),
    iso_code: row.text("ISO_Code"),
    fips: row.text("FIPS"),
    display_name,
    official_name: row.text("Official_Name"),
    capital: row.text("Capital"),
    continent: row.text("Continent"),
    currency_code: row.text("CurrencyCode"),
    currency_name: row.text("CurrencyName"),
    phone: row.text("Phone"),
    region_code: row.text("Region Code"),
    region_name: row.text("Region Name"),
    sub_region_code: row.text("Sub-region Code"),
    sub_region_name: row.text("Sub-region Name"),
    intermediate_region_code: row.text("Intermediate Region Code"),
    intermediate_region_name: row.text("Intermediate Region Name"),
    status: row.text("Status").unwrap_or_else(|| UNKNOWN.to_owned()),
    developed_or_developing: row
      .text("Developed or Developing")
      .unwrap_or_else(|| UNKNOWN.to_owned()),
    sids: parse_bool(row.field_any(&["SIDS", "sids"])),
    lldc: parse_bool(row.field_any(&["LLDC", "lldc"])),
    ldc: parse_bool(row.field_any(&["LDC", "ldc"])),
    area_sq_km: int_or_zero(row.field("Area_SqKm")),
    population: int_or_zero(row.field("Population")),
    is_virtual: false,
  }
}

// ─── Former names ────────────────────────────────────────────────────────────

pub fn clean_former_names(table: &RawTable) -> Cleaned<FormerName> {
  let mut out = Cleaned::new();

  for row in table.rows() {
    let (Some(current_country_name), Some(former_name)) = (row.text("current"), row.text("former"))
    else {
      out.dropped += 1;
      continue;
    };
    out.records.push(FormerName {
      current_country_name,
      former_name,
      start_date: parse_date(row.field("start_date")),
      end_date: parse_date(row.field("end_date")),
    });
  }

  out
}

// ─── Shootouts ───────────────────────────────────────────────────────────────

pub fn clean_shootouts(table: &RawTable) -> Cleaned<ShootoutRecord> {
  let mut out = Cleaned::new();

  for row in table.rows() {
    let (Some(date), Some(home_team), Some(away_team), Some(winner)) = (
      parse_date(row.field("date")),
      row.text("home_team"),
      row.text("away_team"),
      row.text("winner"),
    ) else {
      out.dropped += 1;
      continue;
    };
    out.records.push(ShootoutRecord {
      date,
      home_team,
      away_team,
      winner,
      first_shooter: row.text("first_shooter"),
    });
  }

  out
}

// ─── Goalscorers ─────────────────────────────────────────────────────────────

pub fn clean_goalscorers(table: &RawTable) -> Cleaned<GoalRecord> {
  let mut out = Cleaned::new();
  let mut seen = HashSet::new();

  for row in table.rows() {
    let (Some(date), Some(scorer), Some(team), Some(home_team), Some(away_team)) = (
      parse_date(row.field("date")),
      row.text("scorer"),
      row.text("team"),
      row.text("home_team"),
      row.text("away_team"),
    ) else {
      out.dropped += 1;
      continue;
    };
    let goal = GoalRecord {
      date,
      home_team,
      away_team,
      team,
      scorer,
      minute: int_or_zero(row.field("minute")),
      own_goal: parse_bool(row.field("own_goal")),
      penalty: parse_bool(row.field("penalty")),
    };
    if seen.insert(goal.clone()) {
      out.records.push(goal);
    } else {
      out.duplicates += 1;
    }
  }

  if out.duplicates > 0 {
    tracing::info!(count = out.duplicates, "removed duplicate goalscorer rows");
  }
  out
}

// ─── Results ─────────────────────────────────────────────────────────────────

pub fn clean_results(table: &RawTable) -> Cleaned<MatchRecord> {
  let mut out = Cleaned::new();

  for row in table.rows() {
    let (Some(date), Some(home_team), Some(away_team)) = (
      parse_date(row.field("date")),
      row.text("home_team"),
      row.text("away_team"),
    ) else {
      out.dropped += 1;
      continue;
    };
    out.records.push(MatchRecord {
      date,
      home_team,
      away_team,
      home_score: int_or_zero(row.field("home_score")),
      away_score: int_or_zero(row.field("away_score")),
      tournament: row.text("tournament"),
      city: row.text("city"),
      country: row.text("country").unwrap_or_else(|| UNKNOWN.to_owned()),
      neutral: parse_bool(row.field("neutral")),
    });
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn parse_helpers() {
    assert_eq!(parse_date(Some("1950-07-16")), Some(date(1950, 7, 16)));
    assert_eq!(parse_date(Some("1950/07/16")), Some(date(1950, 7, 16)));
    assert_eq!(parse_date(Some("1950-07-16 15:00:00")), Some(date(1950, 7, 16)));
    assert_eq!(parse_date(Some("1950-07-16T15:00:00Z")), Some(date(1950, 7, 16)));
    assert_eq!(parse_date(Some("1950-07-16T15:00:00.000")), Some(date(1950, 7, 16)));
    assert_eq!(parse_date(Some("1950-07-16T15:00:00+02:00")), Some(date(1950, 7, 16)));
    assert_eq!(parse_date(Some("16th of July")), None);
    assert_eq!(parse_date(Some("1950-07-16 and change")), None);
    assert_eq!(parse_date(None), None);

    assert!(parse_bool(Some(" TRUE ")));
    assert!(!parse_bool(Some("yes")));
    assert!(!parse_bool(None));

    assert_eq!(parse_int(Some("45")), Some(45));
    assert_eq!(parse_int(Some("512.9")), Some(512));
    assert_eq!(parse_int(Some("45+2")), None);
  }

  #[test]
  fn countries_drop_blank_names_and_keep_first_duplicate() {
    let table = RawTable::from_rows(
      &["Display_Name", "Capital", "Status", "Area_SqKm", "Population", "SIDS"],
      &[
        &["Brazil", "Brasilia", "", "8515767.0", "", "FALSE"],
        &["", "Nowhere", "", "", "", ""],
        &["Brazil", "Rio", "Member State", "1", "2", ""],
        &["Fiji", "Suva", "Member State", "18274", "896445", "TRUE"],
      ],
    );
    let cleaned = clean_countries(&table);

    assert_eq!(cleaned.dropped, 1);
    assert_eq!(cleaned.duplicates, 1);
    assert_eq!(cleaned.records.len(), 2);

    let brazil = &cleaned.records[0];
    assert_eq!(brazil.capital.as_deref(), Some("Brasilia"));
    assert_eq!(brazil.status, "Unknown");
    assert_eq!(brazil.developed_or_developing, "Unknown");
    assert_eq!(brazil.area_sq_km, 8_515_767);
    assert_eq!(brazil.population, 0);
    assert!(!brazil.is_virtual);
    assert!(cleaned.records[1].sids);
  }

  #[test]
  fn former_names_tolerate_bad_dates_but_need_both_names() {
    let table = RawTable::from_rows(
      &["current", "former", "start_date", "end_date"],
      &[
        &["Benin", "Dahomey", "1908-01-01", "not a date"],
        &["Ghana", "", "1950-01-01", ""],
        &["", "Zaire", "", ""],
      ],
    );
    let cleaned = clean_former_names(&table);

    assert_eq!(cleaned.dropped, 2);
    assert_eq!(cleaned.records.len(), 1);
    assert_eq!(cleaned.records[0].start_date, Some(date(1908, 1, 1)));
    assert_eq!(cleaned.records[0].end_date, None);
  }

  #[test]
  fn shootouts_require_winner() {
    let table = RawTable::from_rows(
      &["date", "home_team", "away_team", "winner", "first_shooter"],
      &[
        &["1976-06-20", "Czechoslovakia", "Germany", "Czechoslovakia", ""],
        &["1976-06-21", "Spain", "Italy", "", ""],
        &["garbage", "Spain", "Italy", "Italy", ""],
      ],
    );
    let cleaned = clean_shootouts(&table);

    assert_eq!(cleaned.dropped, 2);
    assert_eq!(cleaned.records[0].first_shooter, None);
  }

  #[test]
  fn unparsable_minute_defaults_to_zero() {
    let table = RawTable::from_rows(
      &["date", "home_team", "away_team", "team", "scorer", "minute", "own_goal", "penalty"],
      &[&["1950-07-16", "Uruguay", "Brazil", "Uruguay", "Alcides Ghiggia", "45+2", "FALSE", "false"]],
    );
    let cleaned = clean_goalscorers(&table);

    assert_eq!(cleaned.dropped, 0);
    assert_eq!(cleaned.records.len(), 1);
    assert_eq!(cleaned.records[0].minute, 0);
  }

  #[test]
  fn goalscorers_remove_exact_duplicates() {
    let row: &[&str] = &["1950-07-16", "Uruguay", "Brazil", "Uruguay", "Schiaffino", "66", "FALSE", "FALSE"];
    let table = RawTable::from_rows(
      &["date", "home_team", "away_team", "team", "scorer", "minute", "own_goal", "penalty"],
      &[
        row,
        row,
        &["1950-07-16", "Uruguay", "Brazil", "Uruguay", "Schiaffino", "66", "TRUE", "FALSE"],
        &["1950-07-16", "Uruguay", "Brazil", "Uruguay", "", "70", "FALSE", "FALSE"],
      ],
    );
    let cleaned = clean_goalscorers(&table);

    assert_eq!(cleaned.duplicates, 1);
    assert_eq!(cleaned.dropped, 1);
    assert_eq!(cleaned.records.len(), 2);
    assert!(cleaned.records[1].own_goal);
  }

  #[test]
  fn results_keep_rows_with_timestamped_dates() {
    let table = RawTable::from_rows(
      &["date", "home_team", "away_team"],
      &[
        &["1950-07-16T15:00:00Z", "Uruguay", "Brazil"],
        &["1950-07-16T15:00:00.000", "Uruguay", "Brazil"],
      ],
    );
    let cleaned = clean_results(&table);

    assert_eq!(cleaned.dropped, 0);
    assert!(cleaned.records.iter().all(|m| m.date == date(1950, 7, 16)));
  }

  #[test]
  fn results_default_scores_and_country() {
    let table = RawTable::from_rows(
      &["date", "home_team", "away_team", "home_score", "away_score", "tournament", "city", "country", "neutral"],
      &[
        &["1950-07-16", "Uruguay", "Brazil", "2", "1", "FIFA World Cup", "Rio de Janeiro", "Brazil", "TRUE"],
        &["1872-11-30", "Scotland", "England", "NA", "", "Friendly", "Glasgow", "", "False"],
        &["1873-03-08", "", "Scotland", "4", "2", "Friendly", "London", "England", "FALSE"],
      ],
    );
    let cleaned = clean_results(&table);

    assert_eq!(cleaned.dropped, 1);
    let [first, second] = cleaned.records.as_slice() else { panic!("expected two matches") };
    assert!(first.neutral);
    assert_eq!((first.home_score, first.away_score), (2, 1));
    assert_eq!((second.home_score, second.away_score), (0, 0));
    assert_eq!(second.country, "Unknown");
    assert!(!second.neutral);
  }
}
