//! Configuration: where the directory database lives.
//!
//! Resolution order: explicit `--db` flag, then the `ORGDIR_DB` environment
//! variable (a `.env` file is loaded first), then an optional `orgdir.toml`
//! next to the working directory, then `./directory.db`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default database filename in the working directory.
const DEFAULT_DB: &str = "directory.db";

/// Config file consulted when no flag or environment variable is set.
const CONFIG_FILE: &str = "orgdir.toml";

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database: Option<PathBuf>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path to the SQLite database file.
    pub database: PathBuf,
}

impl Settings {
    /// Resolve settings, preferring an explicit override.
    pub fn load(db_override: Option<&Path>) -> Self {
        if let Some(path) = db_override {
            return Self {
                database: path.to_path_buf(),
            };
        }
        if let Ok(path) = std::env::var("ORGDIR_DB") {
            return Self {
                database: PathBuf::from(path),
            };
        }
        let from_file = fs::read_to_string(CONFIG_FILE)
            .ok()
            .and_then(|text| toml::from_str::<FileConfig>(&text).ok())
            .and_then(|cfg| cfg.database);
        Self {
            database: from_file.unwrap_or_else(|| PathBuf::from(DEFAULT_DB)),
        }
    }
}
