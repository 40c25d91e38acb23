//! CLI surface for the directory.

mod commands;
pub mod seed;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "orgdir")]
#[command(about = "Organization directory with geospatial and activity-tree queries")]
#[command(version)]
pub struct Cli {
    /// Database file (overrides ORGDIR_DB and orgdir.toml)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema and seed demo data
    Init {
        /// Reseed even if the database already has data
        #[arg(long)]
        force: bool,
    },

    /// Show entity counts
    Status,

    /// Search organizations by name substring
    Search {
        /// Substring to look for (case-insensitive, min 2 characters)
        query: String,
    },

    /// List organizations within a radius of a point
    Nearby {
        /// Latitude of the center, decimal degrees
        lat: f64,
        /// Longitude of the center, decimal degrees
        lon: f64,
        /// Radius in kilometers
        radius_km: f64,
    },

    /// Render the activity hierarchy
    Tree,
}

/// Parse arguments and dispatch.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.db.as_deref());

    match cli.command {
        Commands::Init { force } => commands::cmd_init(&settings, force),
        Commands::Status => commands::cmd_status(&settings),
        Commands::Search { query } => commands::cmd_search(&settings, &query),
        Commands::Nearby {
            lat,
            lon,
            radius_km,
        } => commands::cmd_nearby(&settings, lat, lon, radius_km),
        Commands::Tree => commands::cmd_tree(&settings),
    }
}
