//! Utility functions for CLI operations.
//!
//! Configuration loading, database opening, argument parsing and the
//! table/JSON/CSV output shared by every command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::ValueEnum;
use posada::config::OutputFormat;
use posada::database::{default_data_dir, DATABASE_FILE_NAME};
use posada::{Config, ConfigBuilder, Database, DatabaseConfig, Logger};
use serde::Serialize;

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Progress and warning output.
    pub logger: Logger,
}

/// Output format chosen on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table (human-readable)
    Table,
    /// JSON
    Json,
    /// CSV
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
            FormatArg::Csv => Self::Csv,
        }
    }
}

/// The flag wins; otherwise the configured default.
pub fn resolve_format(arg: Option<FormatArg>, config: &Config) -> OutputFormat {
    arg.map_or_else(|| config.format(), OutputFormat::from)
}

/// Resolve the data directory: `--data-dir`/`POSADA_DATA_DIR`, then `~/.posada`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Files and `POSADA_*` variables are layered by the library; global flags
/// are applied on top.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_data_dir(resolve_data_dir(global)?);
    if global.disable_autoinit {
        builder = builder.with_disable_autoinit(true);
    }
    if let Some(seconds) = global.busy_timeout {
        builder = builder.with_lock_wait_seconds(seconds.into());
    }

    builder.build().map_err(|e| match e {
        posada::Error::Io(io) => CliError::Io(io),
        other => CliError::Config(other.to_string()),
    })
}

/// Open the database in the data directory.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && !config.autoinit() {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = DatabaseConfig::new(&db_path)
        .with_busy_timeout(Duration::from_secs(config.lock_wait_seconds()))
        .with_auto_create(config.autoinit());
    global
        .logger
        .debug(&format!("opening database {}", db_path.display()));

    Database::open(db_config).map_err(CliError::from)
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!("invalid date '{value}' (expected YYYY-MM-DD)"))
    })
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Rows of one listing, printable in any [`OutputFormat`].
///
/// JSON output serializes the domain records instead of the table cells so
/// that scripts see typed fields.
pub struct Listing<'a, T: Serialize> {
    headers: &'a [&'a str],
    rows: Vec<Vec<String>>,
    records: &'a [T],
}

impl<'a, T: Serialize> Listing<'a, T> {
    /// Creates a listing with one row per record.
    pub fn new(headers: &'a [&'a str], records: &'a [T], row: impl Fn(&T) -> Vec<String>) -> Self {
        Self {
            headers,
            rows: records.iter().map(row).collect(),
            records,
        }
    }

    /// Prints the listing to stdout.
    pub fn print(&self, format: OutputFormat) -> Result<(), CliError> {
        match format {
            OutputFormat::Table => self.print_table(),
            OutputFormat::Json => print_json(&self.records),
            OutputFormat::Csv => self.print_csv(),
        }
    }

    fn print_table(&self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        let header_line = self
            .headers
            .iter()
            .map(|s| s.to_uppercase())
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(handle, "{header_line}")?;
        for row in &self.rows {
            writeln!(handle, "{}", row.join("\t"))?;
        }
        Ok(())
    }

    fn print_csv(&self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut writer = csv::Writer::from_writer(stdout.lock());
        writer.write_record(self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Pretty-print any serializable value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

/// `-` for a missing value.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
