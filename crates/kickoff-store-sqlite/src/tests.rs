//! Tests for `SqliteSink` against an in-memory database.

use kickoff_core::{
  link::{GoalRow, MatchRow},
  record::Country,
  sink::{RecordSink, Table, Value},
};

use crate::{Error, SqliteSink};

fn sink() -> SqliteSink { SqliteSink::open_in_memory().expect("in-memory sink") }

fn countries(names: &[&str]) -> Vec<Country> {
  names.iter().map(|n| Country::virtual_entry(n)).collect()
}

fn match_row(home: i64, away: i64) -> MatchRow {
  MatchRow {
    match_date:   chrono::NaiveDate::from_ymd_opt(1950, 7, 16).unwrap(),
    home_team_id: home,
    away_team_id: away,
    home_score:   2,
    away_score:   1,
    tournament:   Some("FIFA World Cup".into()),
    city:         None,
    country_id:   None,
    neutral:      false,
  }
}

// ─── Bulk insert ─────────────────────────────────────────────────────────────

#[test]
fn insert_and_query_countries() {
  let mut s = sink();
  let n = s.insert_rows(&countries(&["Uruguay", "Brazil"])).unwrap();
  assert_eq!(n, 2);

  let set = s
    .query("SELECT country_id, display_name, is_virtual FROM countries ORDER BY country_id")
    .unwrap();
  assert_eq!(set.columns, ["country_id", "display_name", "is_virtual"]);
  assert_eq!(set.rows, vec![
    vec![Value::Integer(1), Value::Text("Uruguay".into()), Value::Integer(1)],
    vec![Value::Integer(2), Value::Text("Brazil".into()), Value::Integer(1)],
  ]);
}

#[test]
fn failed_insert_rolls_back_whole_batch() {
  let mut s = sink();
  let err = s
    .insert_rows(&countries(&["Uruguay", "Brazil", "Uruguay"]))
    .unwrap_err();

  match &err {
    Error::Insert { table, row, example, .. } => {
      assert_eq!(*table, Table::Countries);
      assert_eq!(*row, 2);
      assert!(example.contains("'Uruguay'"), "{example}");
    }
    other => panic!("unexpected error: {other}"),
  }
  assert_eq!(s.count(Table::Countries).unwrap(), 0);
}

#[test]
fn foreign_keys_are_enforced() {
  let mut s = sink();
  let err = s.insert_rows(&[match_row(1, 2)]).unwrap_err();
  assert!(matches!(err, Error::Insert { table: Table::Matches, .. }));
}

#[test]
fn mismatched_row_width_is_rejected_before_writing() {
  let mut s = sink();
  let err = s
    .bulk_insert(Table::Countries, &["display_name", "status"], &[vec![Value::Null]])
    .unwrap_err();
  assert!(matches!(err, Error::ColumnCount { expected: 2, found: 1, .. }));
}

#[test]
fn nullable_ids_and_dates_round_trip() {
  let mut s = sink();
  s.insert_rows(&countries(&["Uruguay", "Brazil"])).unwrap();
  s.insert_rows(&[match_row(1, 2)]).unwrap();

  let set = s.query("SELECT match_date, country_id, neutral FROM matches").unwrap();
  assert_eq!(set.rows, vec![vec![
    Value::Text("1950-07-16".into()),
    Value::Null,
    Value::Integer(0),
  ]]);
}

// ─── Truncate ────────────────────────────────────────────────────────────────

#[test]
fn truncate_cascades_and_restarts_identity() {
  let mut s = sink();
  s.insert_rows(&countries(&["Uruguay", "Brazil"])).unwrap();
  s.insert_rows(&[match_row(1, 2)]).unwrap();
  s.insert_rows(&[GoalRow {
    match_id: 1,
    team_id:  1,
    scorer:   "Ghiggia".into(),
    minute:   79,
    own_goal: false,
    penalty:  false,
  }])
  .unwrap();

  s.truncate(&[Table::Countries]).unwrap();
  for table in Table::ALL {
    assert_eq!(s.count(table).unwrap(), 0, "{table} not empty");
  }

  s.insert_rows(&countries(&["Brazil"])).unwrap();
  let set = s.query("SELECT country_id FROM countries").unwrap();
  assert_eq!(set.rows, vec![vec![Value::Integer(1)]]);
}

#[test]
fn truncate_on_fresh_store_is_harmless() {
  let mut s = sink();
  s.truncate(&Table::ALL).unwrap();
  s.truncate(&Table::ALL).unwrap();
}
