//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest booking window accepted, ten years.
pub const MAX_BOOKING_WINDOW_DAYS: u32 = 3650;

/// Validates merged or per-file configuration.
///
/// # Examples
///
/// ```
/// use posada::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let zero_wait = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&zero_wait).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(days) = config.booking_window_days {
            if days == 0 || days > MAX_BOOKING_WINDOW_DAYS {
                return Err(Error::validation(
                    "booking_window_days",
                    format!("must be between 1 and {MAX_BOOKING_WINDOW_DAYS}"),
                ));
            }
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::validation(
                "maximum_lock_wait_seconds",
                "Timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}
