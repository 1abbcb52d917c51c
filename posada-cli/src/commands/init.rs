//! Init command implementation.
//!
//! Creates the data directory and database explicitly. This is the one
//! command that ignores `--disable-autoinit`.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Parser;
use posada::database::DATABASE_FILE_NAME;
use posada::{Database, DatabaseConfig};
use std::fs;

/// Template written by `init --with-config`.
const DEFAULT_CONFIG: &str = "\
# posada configuration
#
# How many days ahead guests may book on their own.
booking_window_days: 365
# Generate rooms for new hotels unless --no-generate is given.
auto_generate_rooms: true
# Seconds to wait for the database lock.
maximum_lock_wait_seconds: 5
# Default for listings: table, json or csv.
output_format: table
";

/// Initialize the posada data directory and database.
#[derive(Parser)]
pub struct InitCommand {
    /// Also write a default config.yaml
    #[arg(long)]
    pub with_config: bool,

    /// Replace an existing config.yaml
    #[arg(long, requires = "with_config")]
    pub overwrite: bool,

    /// Preview actions without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        let db_path = data_dir.join(DATABASE_FILE_NAME);
        let config_path = data_dir.join("config.yaml");
        let write_config = self.with_config && (self.overwrite || !config_path.exists());

        if self.dry_run {
            println!("Dry run: would initialize posada in {}", data_dir.display());
            if db_path.exists() {
                println!("  - Database already exists: {}", db_path.display());
            } else {
                println!("  - Create database: {}", db_path.display());
            }
            if write_config {
                println!("  - Write configuration: {}", config_path.display());
            }
            return Ok(());
        }

        let existed = db_path.exists();
        fs::create_dir_all(&data_dir)?;
        Database::open(DatabaseConfig::new(&db_path))?;

        if write_config {
            fs::write(&config_path, DEFAULT_CONFIG)?;
            global
                .logger
                .info(&format!("Wrote {}", config_path.display()));
        } else if self.with_config {
            global.logger.warn(&format!(
                "{} exists; use --overwrite to replace it",
                config_path.display()
            ));
        }

        if existed {
            println!("Database already initialized at {}", db_path.display());
        } else {
            println!("Initialized posada in {}", data_dir.display());
        }
        Ok(())
    }
}
