//! Reading and cleaning the five source files.

use kickoff_core::{
  normalize::{
    Cleaned, clean_countries, clean_former_names, clean_goalscorers, clean_results,
    clean_shootouts,
  },
  record::{Country, FormerName, GoalRecord, MatchRecord, ShootoutRecord},
  source::RawTable,
};

use crate::{Error, LoadConfig, Result};

/// The cleaned contents of every source, ready for identity resolution.
#[derive(Debug, Clone)]
pub struct Sources {
  pub countries:    Cleaned<Country>,
  pub former_names: Cleaned<FormerName>,
  pub shootouts:    Cleaned<ShootoutRecord>,
  pub goals:        Cleaned<GoalRecord>,
  pub results:      Cleaned<MatchRecord>,
}

impl Sources {
  /// Read every file named in `config` and clean it. A missing or unreadable
  /// file is fatal.
  pub fn read(config: &LoadConfig) -> Result<Self> {
    let read = |name: &'static str, file: &str| {
      kickoff_csv::read_table(config.data_dir.join(file))
        .map_err(|source| Error::Source { name, source })
    };
    let files = &config.files;

    Ok(Self::clean(
      &read("countries", &files.countries)?,
      &read("former_names", &files.former_names)?,
      &read("shootouts", &files.shootouts)?,
      &read("goalscorers", &files.goalscorers)?,
      &read("results", &files.results)?,
    ))
  }

  /// Clean already-read tables.
  pub fn clean(
    countries: &RawTable,
    former_names: &RawTable,
    shootouts: &RawTable,
    goalscorers: &RawTable,
    results: &RawTable,
  ) -> Self {
    let sources = Self {
      countries:    clean_countries(countries),
      former_names: clean_former_names(former_names),
      shootouts:    clean_shootouts(shootouts),
      goals:        clean_goalscorers(goalscorers),
      results:      clean_results(results),
    };
    log_cleaned("countries", &sources.countries);
    log_cleaned("former_names", &sources.former_names);
    log_cleaned("shootouts", &sources.shootouts);
    log_cleaned("goalscorers", &sources.goals);
    log_cleaned("results", &sources.results);
    sources
  }
}

fn log_cleaned<T>(source: &str, cleaned: &Cleaned<T>) {
  tracing::info!(
    source,
    kept = cleaned.records.len(),
    dropped = cleaned.dropped,
    duplicates = cleaned.duplicates,
    "cleaned source"
  );
}
