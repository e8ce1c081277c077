//! kickoff-load binary.
//!
//! Reads `kickoff.toml` (or the path given with `--config`) and `KICKOFF_*`
//! environment variables, cleans the source files in the data directory,
//! and loads them into the SQLite store.
//!
//! Exit status: 0 when every table loaded, 2 when at least one table's insert
//! was rolled back, 1 when the run aborted.

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::Parser;
use kickoff_load::{LoadConfig, Outcome, Sources};
use kickoff_store_sqlite::SqliteSink;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Load international football results into SQLite")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "kickoff.toml")]
  config: PathBuf,

  /// Directory holding the source CSV files.
  #[arg(long, env = "KICKOFF_DATA_DIR")]
  data_dir: Option<PathBuf>,

  /// SQLite database file.
  #[arg(long, env = "KICKOFF_STORE_PATH")]
  store: Option<PathBuf>,

  /// Directory for the quarantine file.
  #[arg(long)]
  quarantine_dir: Option<PathBuf>,

  /// Print the load summary as JSON on stdout.
  #[arg(long)]
  json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("KICKOFF")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let mut load_cfg: LoadConfig = settings
    .try_deserialize()
    .context("failed to deserialise LoadConfig")?;

  // CLI flags override config file and environment.
  if let Some(dir) = cli.data_dir {
    load_cfg.data_dir = dir;
  }
  if let Some(store) = cli.store {
    load_cfg.store_path = store;
  }
  if let Some(dir) = cli.quarantine_dir {
    load_cfg.quarantine_dir = Some(dir);
  }

  tracing::info!(data_dir = %load_cfg.data_dir.display(), "loading and cleaning sources");
  let sources = Sources::read(&load_cfg).context("failed to read sources")?;

  let mut sink = SqliteSink::open(&load_cfg.store_path)
    .with_context(|| format!("failed to open store at {:?}", load_cfg.store_path))?;

  let summary = kickoff_load::run(&mut sink, &sources, &load_cfg.quarantine_path())
    .context("load aborted")?;

  if cli.json {
    println!(
      "{}",
      serde_json::to_string_pretty(&summary).context("serialising summary")?
    );
  }

  Ok(match summary.outcome() {
    Outcome::Completed => ExitCode::SUCCESS,
    Outcome::Degraded => ExitCode::from(2),
  })
}
