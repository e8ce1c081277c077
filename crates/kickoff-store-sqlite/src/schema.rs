//! SQL schema for the Kickoff SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps surrogate keys in `sqlite_sequence`, which is what
/// truncation resets.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS countries (
    country_id               INTEGER PRIMARY KEY AUTOINCREMENT,
    iso                      TEXT,
    iso3                     TEXT,
    iso_code                 TEXT,
    fips                     TEXT,
    display_name             TEXT NOT NULL UNIQUE,
    official_name            TEXT,
    capital                  TEXT,
    continent                TEXT,
    currency_code            TEXT,
    currency_name            TEXT,
    phone                    TEXT,
    region_code              TEXT,
    region_name              TEXT,
    sub_region_code          TEXT,
    sub_region_name          TEXT,
    intermediate_region_code TEXT,
    intermediate_region_name TEXT,
    status                   TEXT NOT NULL,
    developed_or_developing  TEXT NOT NULL,
    sids                     INTEGER NOT NULL DEFAULT 0,
    lldc                     INTEGER NOT NULL DEFAULT 0,
    ldc                      INTEGER NOT NULL DEFAULT 0,
    area_sq_km               INTEGER NOT NULL DEFAULT 0,
    population               INTEGER NOT NULL DEFAULT 0,
    is_virtual               INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS former_names (
    former_name_id INTEGER PRIMARY KEY AUTOINCREMENT,
    country_id     INTEGER NOT NULL REFERENCES countries(country_id) ON DELETE CASCADE,
    former_name    TEXT NOT NULL,
    start_date     TEXT,   -- YYYY-MM-DD
    end_date       TEXT    -- YYYY-MM-DD
);

CREATE TABLE IF NOT EXISTS matches (
    match_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    match_date   TEXT NOT NULL,   -- YYYY-MM-DD
    home_team_id INTEGER NOT NULL REFERENCES countries(country_id) ON DELETE CASCADE,
    away_team_id INTEGER NOT NULL REFERENCES countries(country_id) ON DELETE CASCADE,
    home_score   INTEGER NOT NULL,
    away_score   INTEGER NOT NULL,
    tournament   TEXT,
    city         TEXT,
    country_id   INTEGER REFERENCES countries(country_id) ON DELETE SET NULL,
    neutral      INTEGER NOT NULL DEFAULT 0,
    UNIQUE (match_date, home_team_id, away_team_id)
);

CREATE TABLE IF NOT EXISTS goals (
    goal_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches(match_id) ON DELETE CASCADE,
    team_id  INTEGER NOT NULL REFERENCES countries(country_id) ON DELETE CASCADE,
    scorer   TEXT NOT NULL,
    minute   INTEGER NOT NULL DEFAULT 0,
    own_goal INTEGER NOT NULL DEFAULT 0,
    penalty  INTEGER NOT NULL DEFAULT 0
);

-- At most one shootout per match.
CREATE TABLE IF NOT EXISTS penalty_shootouts (
    shootout_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id         INTEGER NOT NULL UNIQUE REFERENCES matches(match_id) ON DELETE CASCADE,
    winner_id        INTEGER NOT NULL REFERENCES countries(country_id) ON DELETE CASCADE,
    first_shooter_id INTEGER REFERENCES countries(country_id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS goals_match_idx     ON goals(match_id);
CREATE INDEX IF NOT EXISTS former_country_idx  ON former_names(country_id);

PRAGMA user_version = 1;
";
