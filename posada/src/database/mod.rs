//! Database layer for persistent storage of hotels, guests and reservations.
//!
//! This module provides a SQLite-based storage layer including connection
//! management, schema versioning, and CRUD operations. Room-date
//! exclusivity is backed by a partial unique index, so the store itself
//! refuses a second active reservation for a room on a date.
//!
//! # Examples
//!
//! ```no_run
//! use posada::database::{Database, DatabaseConfig};
//! use posada::NewHotel;
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/posada.db")).unwrap();
//!
//! let hotel = NewHotel::new("Posada del Sol", "Calle 1", 0);
//! let id = Database::insert_hotel(db.connection(), &hotel).unwrap();
//!
//! for hotel in Database::list_hotels(db.connection()).unwrap() {
//!     println!("{} {}", hotel.id, hotel.name);
//! }
//! # let _ = id;
//! ```

mod catalog;
mod config;
mod connection;
mod guests;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use catalog::DeletionSummary;
pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_ENV,
};
pub use connection::Database;
pub use operations::ReservationFilter;
pub(crate) use operations::upcoming_window_end;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
