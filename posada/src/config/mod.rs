//! Configuration system for posada.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config` and setters)
//! 2. Environment variables (`POSADA_*`)
//! 3. Private project config (`posada.local.yaml`)
//! 4. Project config (`posada.yaml`)
//! 5. User config (`~/.posada/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use posada::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/front-desk"))
//!     .build()
//!     .unwrap();
//! println!("Bookings open {} days ahead", config.booking_window());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use posada::config::{Config, ConfigBuilder, OutputFormat};
//!
//! let custom = Config {
//!     output_format: Some(OutputFormat::Csv),
//!     auto_generate_rooms: Some(false),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.format(), OutputFormat::Csv);
//! assert!(!config.auto_generates_rooms());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_BOOKING_WINDOW_DAYS, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
