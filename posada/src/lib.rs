#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # posada
//!
//! A library for hotel room availability and reservation management.
//!
//! This library owns the rules that decide whether a room may be booked for
//! a date, what happens when two requests race for the same room and date,
//! and how a pending reservation is promoted, cancelled or moved to another
//! room.
//!
//! ## Core Types
//!
//! - [`Hotel`], [`Room`], [`Capacity`]: the catalog
//! - [`Guest`] and [`GuestInput`]: the guest directory
//! - [`Reservation`] and [`ReservationStatus`]: the reservation log
//! - [`Database`]: `SQLite` persistence with the room-date exclusivity guard
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use posada::{Capacity, PartySize};
//!
//! let capacity = Capacity::try_from(2).unwrap();
//! let party = PartySize::try_from(2).unwrap();
//! assert!(capacity.fits(party));
//!
//! assert!(Capacity::try_from(0).is_err());
//! ```

pub mod availability;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod guest;
mod ids;
pub mod logging;
pub mod operations;
pub mod reservation;

// Re-export key types at crate root for convenience
pub use availability::RoomDescriptor;
pub use catalog::{Capacity, Hotel, HotelId, NewHotel, Room, RoomId, RoomNumber};
pub use config::{Config, ConfigBuilder};
pub use dashboard::DashboardSummary;
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use guest::{Guest, GuestId, GuestInput};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    BulkConfirmResult, CancelOutcome, ConfirmOutcome, ExecutionResult, GuestRef, HotelCreated,
    OperationPlan, PlanAction, PlanExecutor, ReservationOrigin, ReserveOptions, ReservePlan,
};
pub use reservation::{PartySize, Priority, Reservation, ReservationId, ReservationStatus};
