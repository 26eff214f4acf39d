//! Configuration for the `fettle` binary.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Shape of the optional TOML config file. Every field can also come from a
/// `FETTLE_`-prefixed environment variable, which wins over the file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Directory the database and copied meal photos live in.
  #[serde(default = "default_data_dir")]
  pub data_dir:   PathBuf,
  /// Database file. Defaults to `fettle.db` inside the data directory.
  #[serde(default)]
  pub db_path:    Option<PathBuf>,
  /// Directory holding the bundled starter images copied on first run.
  #[serde(default = "default_assets_dir")]
  pub assets_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
  PathBuf::from("~/.local/share/fettle")
}

fn default_assets_dir() -> PathBuf {
  PathBuf::from("assets")
}

impl AppConfig {
  /// Load the config file at `path` (a missing file is fine, the defaults
  /// stand in), layer `FETTLE_*` environment variables on top, and expand
  /// `~` in every path.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = ::config::Config::builder()
      .add_source(::config::File::from(path.to_path_buf()).required(false))
      .add_source(::config::Environment::with_prefix("FETTLE"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.data_dir = expand_tilde(&cfg.data_dir);
    cfg.db_path = cfg.db_path.as_deref().map(expand_tilde);
    cfg.assets_dir = expand_tilde(&cfg.assets_dir);
    Ok(cfg)
  }

  /// The resolved database path.
  pub fn db_path(&self) -> PathBuf {
    self
      .db_path
      .clone()
      .unwrap_or_else(|| self.data_dir.join("fettle.db"))
  }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
