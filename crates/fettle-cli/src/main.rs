//! `fettle` — command-line front end for the nutrition and fitness log.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite log store, seeds starter data on the very first run, and
//! dispatches to the requested subcommand. Pass `--json` to get
//! machine-readable output from any command.

mod app;
mod config;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use fettle_store_sqlite::{SqliteStore, seed};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "fettle", version, about = "Nutrition and fitness log")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(
    short,
    long,
    default_value = "config.toml",
    value_name = "FILE",
    global = true
  )]
  config: PathBuf,

  /// Emit results as JSON instead of plain text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: app::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = AppConfig::load(&cli.config)?;
  let db_path = cfg.db_path();
  if let Some(parent) = db_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;

  // First run against an empty database: create the default profile and
  // the sample catalog before handling the command.
  if seed::bootstrap(&store, &cfg.assets_dir, &cfg.data_dir).await? {
    tracing::info!(db = %db_path.display(), "seeded starter data");
  }

  app::run(&store, cli.command, cli.json).await
}
