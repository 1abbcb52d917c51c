//! Environment variable handling for configuration overrides.
//!
//! `POSADA_*` variables override every configuration file.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use posada::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `POSADA_*` environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the variable if its value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(days) = env::var("POSADA_BOOKING_WINDOW_DAYS") {
            config.booking_window_days =
                Some(Self::parse_number("POSADA_BOOKING_WINDOW_DAYS", &days)?);
        }

        if let Ok(val) = env::var("POSADA_AUTO_GENERATE_ROOMS") {
            config.auto_generate_rooms =
                Some(Self::parse_bool("POSADA_AUTO_GENERATE_ROOMS", &val)?);
        }

        if let Ok(seconds) = env::var("POSADA_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("POSADA_MAXIMUM_LOCK_WAIT_SECONDS", &seconds)?);
        }

        if let Ok(val) = env::var("POSADA_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("POSADA_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(format) = env::var("POSADA_OUTPUT_FORMAT") {
            config.output_format = Some(
                OutputFormat::from_str(&format)
                    .map_err(|message| Error::validation("POSADA_OUTPUT_FORMAT", message))?,
            );
        }

        Ok(())
    }

    fn parse_number<T: FromStr>(var: &str, value: &str) -> Result<T> {
        value
            .trim()
            .parse()
            .map_err(|_| Error::validation(var, "Must be a non-negative integer"))
    }

    /// Parse a boolean value from an environment variable.
    ///
    /// Accepts: true/false, 1/0, yes/no, on/off (case-insensitive).
    fn parse_bool(var: &str, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::validation(var, format!("Invalid boolean value: {value}"))),
        }
    }
}
