//! Error types for the posada library.
//!
//! This module provides the error hierarchy for every catalog, guest and
//! reservation operation, using `thiserror` for ergonomic error handling.
//! Business-rule failures (conflicts, capacity, missing rooms) are ordinary
//! variants so callers handle them on the normal control path.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::catalog::{Capacity, HotelId, RoomId};
use crate::reservation::{PartySize, ReservationId, ReservationStatus};

/// Result type alias for operations that may fail with a posada error.
///
/// # Examples
///
/// ```
/// use posada::{Error, Result};
///
/// fn example_operation() -> Result<u8> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the posada library.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was rejected before any mutation took place.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// No room in the hotel fits the party on the requested date.
    #[error("no room available in hotel {hotel} on {date} for a party of {party_size}")]
    NoRoomAvailable {
        /// The hotel that was searched.
        hotel: HotelId,
        /// The requested date.
        date: NaiveDate,
        /// The requested party size.
        party_size: PartySize,
    },

    /// The room was taken between booking and confirmation.
    #[error(
        "room {room} is no longer available on {date} for reservation {reservation} ({} alternative(s))",
        alternatives.len()
    )]
    RoomNoLongerAvailable {
        /// The reservation that could not be confirmed.
        reservation: ReservationId,
        /// The room it is assigned to.
        room: RoomId,
        /// The reservation date.
        date: NaiveDate,
        /// Rooms that could take the reservation instead, possibly empty.
        alternatives: Vec<RoomId>,
    },

    /// Another active reservation already holds the room on that date.
    #[error("reservation conflict: room {room} on {date} is held by {}", holder_display(*.holder))]
    ReservationConflict {
        /// The contested room.
        room: RoomId,
        /// The contested date.
        date: NaiveDate,
        /// The reservation currently holding the slot, when known.
        holder: Option<ReservationId>,
    },

    /// A room is too small for the party.
    #[error("room {room} seats {capacity} but the party has {party_size}")]
    InsufficientCapacity {
        /// The room that was considered.
        room: RoomId,
        /// The room's seat capacity.
        capacity: Capacity,
        /// The party size that did not fit.
        party_size: PartySize,
    },

    /// A reassignment target is booked on the date.
    #[error("room {room} is not available on {date}")]
    RoomUnavailable {
        /// The target room.
        room: RoomId,
        /// The reservation date.
        date: NaiveDate,
    },

    /// The requested status change is not allowed from the current status.
    #[error("reservation {reservation} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The reservation that was targeted.
        reservation: ReservationId,
        /// Its current status.
        from: ReservationStatus,
        /// The requested status.
        to: ReservationStatus,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

fn holder_display(holder: Option<ReservationId>) -> String {
    holder.map_or_else(|| "another reservation".to_string(), |id| format!("reservation {id}"))
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Shorthand for a [`Error::Validation`] error.
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`] error.
    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if the error reports a room-date exclusivity conflict.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use posada::{Error, RoomId};
    ///
    /// let err = Error::ReservationConflict {
    ///     room: RoomId::new(1),
    ///     date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ///     holder: None,
    /// };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ReservationConflict { .. }
                | Self::RoomNoLongerAvailable { .. }
                | Self::RoomUnavailable { .. }
        )
    }

    /// Check if the caller can recover by retrying with different input.
    ///
    /// Business-rule failures are recoverable; storage and I/O failures are not.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound { .. }
                | Self::NoRoomAvailable { .. }
                | Self::RoomNoLongerAvailable { .. }
                | Self::ReservationConflict { .. }
                | Self::InsufficientCapacity { .. }
                | Self::RoomUnavailable { .. }
                | Self::InvalidTransition { .. }
        )
    }
}
