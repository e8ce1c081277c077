//! Cleaned, pre-persistence records, one type per source file.
//!
//! Records refer to each other only by name (and, for match events, by the
//! `(date, home, away)` composite key). Surrogate keys do not exist until the
//! store has persisted the identities; see [`link`](crate::link).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Identities ──────────────────────────────────────────────────────────────

/// A canonical country or team identity.
///
/// `display_name` is the unique key across real and virtual entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub iso:                      Option<String>,
  pub iso3:                     Option<String>,
  pub iso_code:                 Option<String>,
  pub fips:                     Option<String>,
  pub display_name:             String,
  pub official_name:            Option<String>,
  pub capital:                  Option<String>,
  pub continent:                Option<String>,
  pub currency_code:            Option<String>,
  pub currency_name:            Option<String>,
  pub phone:                    Option<String>,
  pub region_code:              Option<String>,
  pub region_name:              Option<String>,
  pub sub_region_code:          Option<String>,
  pub sub_region_name:          Option<String>,
  pub intermediate_region_code: Option<String>,
  pub intermediate_region_name: Option<String>,
  pub status:                   String,
  pub developed_or_developing:  String,
  pub sids:                     bool,
  pub lldc:                     bool,
  pub ldc:                      bool,
  pub area_sq_km:               i64,
  pub population:               i64,
  /// Synthesized for a name no country row covers.
  pub is_virtual:               bool,
}

/// Status given to synthesized identities.
pub const UNRECOGNIZED: &str = "Unrecognized";

impl Country {
  /// A placeholder identity for a team name absent from the country list.
  pub fn virtual_entry(name: &str) -> Self {
    Self {
      iso:                      None,
      iso3:                     None,
      iso_code:                 None,
      fips:                     None,
      display_name:             name.to_owned(),
      official_name:            Some(name.to_owned()),
      capital:                  None,
      continent:                None,
      currency_code:            None,
      currency_name:            None,
      phone:                    None,
      region_code:              None,
      region_name:              None,
      sub_region_code:          None,
      sub_region_name:          None,
      intermediate_region_code: None,
      intermediate_region_name: None,
      status:                   UNRECOGNIZED.to_owned(),
      developed_or_developing:  crate::UNKNOWN.to_owned(),
      sids:                     false,
      lldc:                     false,
      ldc:                      false,
      area_sq_km:               0,
      population:               0,
      is_virtual:               true,
    }
  }
}

/// A historical name of a country, with an optional validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormerName {
  pub current_country_name: String,
  pub former_name:          String,
  pub start_date:           Option<NaiveDate>,
  pub end_date:             Option<NaiveDate>,
}

// ─── Matches and match events ────────────────────────────────────────────────

/// The natural key shared by a match and its goals and shootout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchKey {
  pub date:      NaiveDate,
  pub home_team: String,
  pub away_team: String,
}

impl MatchKey {
  pub fn new(date: NaiveDate, home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
    Self { date, home_team: home_team.into(), away_team: away_team.into() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
  pub date:       NaiveDate,
  pub home_team:  String,
  pub away_team:  String,
  pub home_score: i64,
  pub away_score: i64,
  pub tournament: Option<String>,
  pub city:       Option<String>,
  /// Venue country; [`UNKNOWN`](crate::UNKNOWN) when the source left it blank.
  pub country:    String,
  pub neutral:    bool,
}

impl MatchRecord {
  pub fn key(&self) -> MatchKey { MatchKey::new(self.date, &*self.home_team, &*self.away_team) }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalRecord {
  pub date:      NaiveDate,
  pub home_team: String,
  pub away_team: String,
  /// The team credited with the goal.
  pub team:      String,
  pub scorer:    String,
  pub minute:    i64,
  pub own_goal:  bool,
  pub penalty:   bool,
}

impl GoalRecord {
  pub fn key(&self) -> MatchKey { MatchKey::new(self.date, &*self.home_team, &*self.away_team) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootoutRecord {
  pub date:          NaiveDate,
  pub home_team:     String,
  pub away_team:     String,
  pub winner:        String,
  pub first_shooter: Option<String>,
}

impl ShootoutRecord {
  pub fn key(&self) -> MatchKey { MatchKey::new(self.date, &*self.home_team, &*self.away_team) }
}
