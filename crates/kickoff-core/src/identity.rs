//! Identity resolution: one canonical identity per team or country name.
//!
//! The country list is authoritative, but the match sources name teams the
//! list does not know (historical sides, non-FIFA teams, regional selections).
//! Every such name gets a virtual identity so that later linking by name
//! cannot miss.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::{
  UNKNOWN,
  record::{Country, FormerName, GoalRecord, MatchRecord, ShootoutRecord},
};

// ─── Referenced names ────────────────────────────────────────────────────────

/// Every team or country name referenced outside the country list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencedNames(BTreeSet<String>);

impl ReferencedNames {
  /// Union of all names referenced by the cleaned match-side sources.
  ///
  /// Former-name rows contribute their current country name, so a country
  /// known only through its former names still resolves.
  pub fn collect(
    results: &[MatchRecord],
    goals: &[GoalRecord],
    shootouts: &[ShootoutRecord],
    former_names: &[FormerName],
  ) -> Self {
    let mut names = Self::default();
    for m in results {
      names.extend([&m.home_team, &m.away_team, &m.country]);
    }
    for g in goals {
      names.extend([&g.team, &g.home_team, &g.away_team]);
    }
    for s in shootouts {
      names.extend([&s.home_team, &s.away_team, &s.winner]);
      names.extend(s.first_shooter.as_ref());
    }
    names.extend(former_names.iter().map(|f| &f.current_country_name));
    names
  }

  /// Add names. The [`UNKNOWN`] sentinel is never recorded.
  pub fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a String>) {
    self
      .0
      .extend(names.into_iter().filter(|n| n.as_str() != UNKNOWN).cloned());
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// The canonical identity table after virtual augmentation.
#[derive(Debug, Clone)]
pub struct ResolvedIdentities {
  /// Real countries first, in source order, then virtual entries sorted by
  /// name.
  pub countries: Vec<Country>,
  /// Names that received a virtual identity, sorted.
  pub virtual_names: Vec<String>,
}

/// Append a virtual identity for every referenced name the country list does
/// not contain.
pub fn resolve_identities(countries: &[Country], referenced: &ReferencedNames) -> ResolvedIdentities {
  let known: HashSet<&str> = countries.iter().map(|c| c.display_name.as_str()).collect();

  // BTreeSet iteration is sorted, so synthesis order is deterministic.
  let virtual_names: Vec<String> = referenced
    .iter()
    .filter(|name| !known.contains(name))
    .map(str::to_owned)
    .collect();

  let mut all = countries.to_vec();
  all.extend(virtual_names.iter().map(|name| Country::virtual_entry(name)));

  ResolvedIdentities { countries: all, virtual_names }
}

// ─── Consistency check ───────────────────────────────────────────────────────

/// Names referenced by the sources that still have no canonical identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
  pub unresolved: BTreeSet<String>,
}

impl ConsistencyReport {
  pub fn is_clean(&self) -> bool { self.unresolved.is_empty() }
}

/// Diff every referenced name against the canonical identity set.
///
/// Purely diagnostic: the result is logged and returned, and never blocks
/// loading.
pub fn check_consistency(
  identities: &[Country],
  results: &[MatchRecord],
  goals: &[GoalRecord],
  shootouts: &[ShootoutRecord],
  former_names: &[FormerName],
) -> ConsistencyReport {
  let known: HashSet<&str> = identities.iter().map(|c| c.display_name.as_str()).collect();
  let referenced = ReferencedNames::collect(results, goals, shootouts, former_names);

  let unresolved: BTreeSet<String> = referenced
    .iter()
    .filter(|name| !known.contains(name))
    .map(str::to_owned)
    .collect();

  let report = ConsistencyReport { unresolved };
  if report.is_clean() {
    tracing::info!(
      referenced = referenced.len(),
      "all referenced teams and countries have an identity"
    );
  } else {
    tracing::warn!(
      count = report.unresolved.len(),
      names = ?report.unresolved,
      "referenced teams or countries without an identity; their rows will not link"
    );
  }
  report
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn country(name: &str) -> Country {
    Country { is_virtual: false, status: "Member State".into(), ..Country::virtual_entry(name) }
  }

  fn shootout(home: &str, away: &str, winner: &str) -> ShootoutRecord {
    ShootoutRecord {
      date:          NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
      home_team:     home.into(),
      away_team:     away.into(),
      winner:        winner.into(),
      first_shooter: None,
    }
  }

  #[test]
  fn unrecognized_shootout_team_gets_virtual_identity() {
    let countries = vec![country("Netherlands")];
    let shootouts = vec![shootout("Netherlands Antilles", "Netherlands", "Netherlands")];
    let referenced = ReferencedNames::collect(&[], &[], &shootouts, &[]);

    let resolved = resolve_identities(&countries, &referenced);

    assert_eq!(resolved.virtual_names, vec!["Netherlands Antilles".to_owned()]);
    let antilles = resolved
      .countries
      .iter()
      .find(|c| c.display_name == "Netherlands Antilles")
      .unwrap();
    assert!(antilles.is_virtual);
    assert_eq!(antilles.status, "Unrecognized");
    assert_eq!(antilles.developed_or_developing, "Unknown");
    assert_eq!(antilles.official_name.as_deref(), Some("Netherlands Antilles"));
    assert_eq!((antilles.area_sq_km, antilles.population), (0, 0));
  }

  #[test]
  fn virtual_entries_are_sorted_and_unique() {
    let countries = vec![country("Brazil")];
    let shootouts = vec![
      shootout("Zanzibar", "Brazil", "Zanzibar"),
      shootout("Abkhazia", "Zanzibar", "Abkhazia"),
    ];
    let referenced = ReferencedNames::collect(&[], &[], &shootouts, &[]);

    let resolved = resolve_identities(&countries, &referenced);

    let names: Vec<&str> = resolved.countries.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, ["Brazil", "Abkhazia", "Zanzibar"]);
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());
  }

  #[test]
  fn unknown_sentinel_is_never_synthesized() {
    let results = vec![MatchRecord {
      date:       NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
      home_team:  "Brazil".into(),
      away_team:  "Brazil".into(),
      home_score: 0,
      away_score: 0,
      tournament: None,
      city:       None,
      country:    UNKNOWN.into(),
      neutral:    false,
    }];
    let referenced = ReferencedNames::collect(&results, &[], &[], &[]);
    let resolved = resolve_identities(&[country("Brazil")], &referenced);

    assert!(resolved.virtual_names.is_empty());
    assert!(check_consistency(&resolved.countries, &results, &[], &[], &[]).is_clean());
  }

  #[test]
  fn former_name_country_is_covered() {
    let former = vec![FormerName {
      current_country_name: "Eswatini".into(),
      former_name:          "Swaziland".into(),
      start_date:           None,
      end_date:             None,
    }];
    let referenced = ReferencedNames::collect(&[], &[], &[], &former);
    let resolved = resolve_identities(&[], &referenced);

    assert_eq!(resolved.virtual_names, vec!["Eswatini".to_owned()]);
  }

  #[test]
  fn consistency_reports_names_missing_before_augmentation() {
    let shootouts = vec![shootout("Tibet", "Brazil", "Tibet")];
    let countries = vec![country("Brazil")];

    let before = check_consistency(&countries, &[], &[], &shootouts, &[]);
    assert_eq!(before.unresolved.iter().collect::<Vec<_>>(), ["Tibet"]);

    let referenced = ReferencedNames::collect(&[], &[], &shootouts, &[]);
    let resolved = resolve_identities(&countries, &referenced);
    assert!(check_consistency(&resolved.countries, &[], &[], &shootouts, &[]).is_clean());
  }
}
