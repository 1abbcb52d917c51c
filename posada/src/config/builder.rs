//! Builder that layers every configuration source into one [`Config`].

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration.
///
/// Sources are applied from lowest to highest precedence: built-in
/// defaults, the user file, project files, `POSADA_*` variables, then the
/// programmatic overrides given to [`with_config`](Self::with_config) and
/// the `with_*` setters.
///
/// # Examples
///
/// ```
/// use posada::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_booking_window_days(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.booking_window(), 30);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Config,
}

impl ConfigBuilder {
    /// Creates a builder that reads files and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory where the project file search starts; the current
    /// directory by default.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Data directory holding the user `config.yaml`; `~/.posada` by
    /// default.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Ignore every configuration file.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `POSADA_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Layer `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        ConfigMerger::merge_into(&mut self.overrides, &config);
        self
    }

    /// Override the booking window.
    #[must_use]
    pub const fn with_booking_window_days(mut self, days: u32) -> Self {
        self.overrides.booking_window_days = Some(days);
        self
    }

    /// Override the lock wait.
    #[must_use]
    pub const fn with_lock_wait_seconds(mut self, seconds: u64) -> Self {
        self.overrides.maximum_lock_wait_seconds = Some(seconds);
        self
    }

    /// Override automatic data directory creation.
    #[must_use]
    pub const fn with_disable_autoinit(mut self, disable: bool) -> Self {
        self.overrides.disable_autoinit = Some(disable);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config)?;
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        ConfigMerger::merge_into(&mut config, &self.overrides);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
