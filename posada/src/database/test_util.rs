//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::catalog::{Capacity, HotelId, NewHotel, RoomId, RoomNumber};
use crate::database::{Database, DatabaseConfig};
use crate::guest::{GuestId, GuestInput};
use crate::reservation::{PartySize, Reservation, ReservationId, ReservationStatus};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the lifetime of the test process.
    std::mem::forget(dir);

    db
}

/// Parses a `YYYY-MM-DD` literal.
///
/// # Panics
///
/// Panics on a malformed date.
#[must_use]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Creates a hotel with no generated rooms.
///
/// # Panics
///
/// Panics if the insert fails.
#[must_use]
pub fn create_test_hotel(db: &Database, name: &str) -> HotelId {
    let hotel = NewHotel::new(name, "Calle Principal 1", 0).auto_generate_rooms(false);
    Database::insert_hotel(db.connection(), &hotel).unwrap()
}

/// Adds a room with the given number and capacity.
///
/// # Panics
///
/// Panics if the insert fails.
#[must_use]
pub fn create_test_room(db: &Database, hotel: HotelId, number: &str, capacity: u32) -> RoomId {
    Database::insert_room(
        db.connection(),
        hotel,
        &RoomNumber::new(number).unwrap(),
        Capacity::try_from(capacity).unwrap(),
    )
    .unwrap()
}

/// Creates a guest with a unique email derived from `name`.
///
/// # Panics
///
/// Panics if the insert fails.
#[must_use]
pub fn create_test_guest(db: &Database, name: &str) -> GuestId {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let input = GuestInput::new(name, email, "555-0100").unwrap();
    Database::insert_guest(db.connection(), &input).unwrap()
}

/// Inserts a reservation directly, bypassing the lifecycle operations.
///
/// # Panics
///
/// Panics if the draft is invalid or the insert fails.
#[must_use]
pub fn insert_test_reservation(
    db: &Database,
    guest: GuestId,
    room: Option<RoomId>,
    on: &str,
    party: u32,
    status: ReservationStatus,
) -> ReservationId {
    let draft = Reservation::builder(guest, date(on), PartySize::try_from(party).unwrap())
        .room(room)
        .status(status)
        .build()
        .unwrap();
    Database::insert_reservation(db.connection(), &draft).unwrap()
}
