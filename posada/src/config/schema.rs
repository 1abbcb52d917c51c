//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered on top of
//! each other; the accessor methods on [`Config`] supply the defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days ahead a self-service booking may be made when nothing is configured.
pub const DEFAULT_BOOKING_WINDOW_DAYS: u32 = 365;

/// Seconds to wait for the database lock when nothing is configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use posada::config::{Config, OutputFormat};
///
/// let config = Config {
///     booking_window_days: Some(90),
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.booking_window(), 90);
/// assert!(config.auto_generates_rooms());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How many days ahead guests may book on their own.
    pub booking_window_days: Option<u32>,

    /// Whether new hotels get their rooms generated unless told otherwise.
    pub auto_generate_rooms: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Booking window in days, falling back to [`DEFAULT_BOOKING_WINDOW_DAYS`].
    #[must_use]
    pub fn booking_window(&self) -> u32 {
        self.booking_window_days
            .unwrap_or(DEFAULT_BOOKING_WINDOW_DAYS)
    }

    /// Default for [`NewHotel::auto_generate_rooms`](crate::NewHotel).
    #[must_use]
    pub fn auto_generates_rooms(&self) -> bool {
        self.auto_generate_rooms.unwrap_or(true)
    }

    /// Lock wait in seconds, falling back to [`DEFAULT_LOCK_WAIT_SECONDS`].
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Whether a missing data directory may be created on first use.
    #[must_use]
    pub fn autoinit(&self) -> bool {
        !self.disable_autoinit.unwrap_or(false)
    }

    /// Output format for listings, `table` unless configured.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for listings.
///
/// # Examples
///
/// ```
/// use posada::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}
