//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the posada reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the hotels table.
pub const CREATE_HOTELS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS hotels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        target_room_count INTEGER NOT NULL CHECK (target_room_count >= 0),
        auto_generate_rooms INTEGER NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the rooms table.
///
/// Rooms disappear with their hotel. Room numbers are unique per hotel.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        hotel_id INTEGER NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
        number TEXT NOT NULL,
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        UNIQUE (hotel_id, number)
    )";

/// SQL statement to create the guests table.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// Reservations outlive their room: deleting a room clears `room_id`
/// instead of removing the row.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        guest_id INTEGER NOT NULL REFERENCES guests(id),
        room_id INTEGER REFERENCES rooms(id) ON DELETE SET NULL,
        reservation_date TEXT NOT NULL,
        party_size INTEGER NOT NULL CHECK (party_size > 0),
        status TEXT NOT NULL
            CHECK (status IN ('pending', 'confirmed', 'cancelled', 'rejected', 'completed')),
        notes TEXT NOT NULL DEFAULT '',
        created_at INTEGER NOT NULL,
        modified_at INTEGER NOT NULL
    )";

/// Name of the index that enforces room-date exclusivity.
pub const ACTIVE_SLOT_INDEX: &str = "idx_reservations_active_slot";

/// SQL statement to create the room-date exclusivity index.
///
/// At most one pending or confirmed reservation may exist per room and date.
pub const CREATE_ACTIVE_SLOT_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_active_slot
    ON reservations(room_id, reservation_date)
    WHERE status IN ('pending', 'confirmed') AND room_id IS NOT NULL";

/// SQL statement to create an index on the reservation date.
pub const CREATE_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_date ON reservations(reservation_date)";

/// SQL statement to create an index on the reservation status.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// SQL statement to create an index on the reservation guest.
pub const CREATE_GUEST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_guest ON reservations(guest_id)";

/// SQL statement to create an index on the room hotel.
pub const CREATE_ROOM_HOTEL_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_rooms_hotel ON rooms(hotel_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Columns selected for a reservation, in the order `row_to_reservation` reads them.
pub const RESERVATION_COLUMNS: &str = "r.id, r.guest_id, r.room_id, r.reservation_date, \
     r.party_size, r.status, r.notes, r.created_at, r.modified_at";

/// Status filter shared by every availability query.
pub const ACTIVE_STATUS_FILTER: &str = "status IN ('pending', 'confirmed')";
