//! Database operations for hotels and rooms.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension};

use crate::catalog::{Capacity, Hotel, HotelId, NewHotel, Room, RoomId, RoomNumber};
use crate::error::{Error, Result};

use super::connection::Database;
use super::operations::{systemtime_to_unix_secs, unix_secs_to_systemtime};
use super::transaction::is_unique_violation;

const INSERT_HOTEL: &str = r"
    INSERT INTO hotels (name, address, target_room_count, auto_generate_rooms, created_at)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_HOTEL: &str = r"
    SELECT id, name, address, target_room_count, auto_generate_rooms, created_at
    FROM hotels
    WHERE id = ?
";

const LIST_HOTELS: &str = r"
    SELECT id, name, address, target_room_count, auto_generate_rooms, created_at
    FROM hotels
    ORDER BY name COLLATE NOCASE, id
";

const INSERT_ROOM: &str = "INSERT INTO rooms (hotel_id, number, capacity) VALUES (?, ?, ?)";

const SELECT_ROOM: &str = "SELECT id, hotel_id, number, capacity FROM rooms WHERE id = ?";

// Numeric room numbers sort naturally when shorter strings come first.
const LIST_ROOMS: &str = r"
    SELECT id, hotel_id, number, capacity
    FROM rooms
    WHERE hotel_id = ?
    ORDER BY length(number), number
";

const COUNT_ROOMS: &str = "SELECT COUNT(*) FROM rooms WHERE hotel_id = ?";

const COUNT_RESERVATIONS_FOR_ROOM: &str = "SELECT COUNT(*) FROM reservations WHERE room_id = ?";

const COUNT_RESERVATIONS_FOR_HOTEL: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE room_id IN (SELECT id FROM rooms WHERE hotel_id = ?)
";

/// What a delete removed and what it left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct DeletionSummary {
    /// Rooms removed.
    pub rooms_removed: usize,
    /// Reservations whose room reference was cleared.
    pub reservations_orphaned: usize,
}

fn row_to_hotel(row: &rusqlite::Row<'_>) -> rusqlite::Result<Hotel> {
    Ok(Hotel {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        target_room_count: row.get(3)?,
        auto_generate_rooms: row.get(4)?,
        created_at: unix_secs_to_systemtime(row.get(5)?),
    })
}

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let number: String = row.get(2)?;
    Ok(Room {
        id: row.get(0)?,
        hotel_id: row.get(1)?,
        number: RoomNumber::new(number).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?,
        capacity: row.get(3)?,
    })
}

impl Database {
    /// Inserts a hotel and returns its id.
    ///
    /// Rooms are not generated here; see
    /// [`create_hotel`](crate::operations::create_hotel).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid or the insert fails.
    pub fn insert_hotel(conn: &Connection, hotel: &NewHotel) -> Result<HotelId> {
        hotel.validate()?;
        let created_secs = systemtime_to_unix_secs(SystemTime::now())?;
        conn.execute(
            INSERT_HOTEL,
            params![
                hotel.name,
                hotel.address,
                hotel.target_room_count,
                hotel.auto_generate_rooms,
                created_secs,
            ],
        )?;
        Ok(HotelId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a hotel.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hotel(conn: &Connection, id: HotelId) -> Result<Option<Hotel>> {
        Ok(conn.query_row(SELECT_HOTEL, [id], row_to_hotel).optional()?)
    }

    /// Retrieves a hotel, failing with [`Error::NotFound`] if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the hotel does not exist or the query fails.
    pub fn require_hotel(conn: &Connection, id: HotelId) -> Result<Hotel> {
        Self::get_hotel(conn, id)?.ok_or_else(|| Error::not_found(format!("hotel {id}")))
    }

    /// Lists all hotels ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_hotels(conn: &Connection) -> Result<Vec<Hotel>> {
        let mut stmt = conn.prepare(LIST_HOTELS)?;
        let hotels = stmt
            .query_map([], row_to_hotel)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(hotels)
    }

    /// Inserts a room into a hotel.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The hotel does not exist
    /// - The hotel already has a room with this number
    /// - The insert fails
    pub fn insert_room(
        conn: &Connection,
        hotel: HotelId,
        number: &RoomNumber,
        capacity: Capacity,
    ) -> Result<RoomId> {
        Self::require_hotel(conn, hotel)?;
        match conn.execute(INSERT_ROOM, params![hotel, number.as_str(), capacity]) {
            Ok(_) => Ok(RoomId::new(conn.last_insert_rowid())),
            Err(e) if is_unique_violation(&e) => Err(Error::validation(
                "room_number",
                format!("hotel {hotel} already has a room numbered {number}"),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Retrieves a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(conn: &Connection, id: RoomId) -> Result<Option<Room>> {
        Ok(conn.query_row(SELECT_ROOM, [id], row_to_room).optional()?)
    }

    /// Retrieves a room, failing with [`Error::NotFound`] if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist or the query fails.
    pub fn require_room(conn: &Connection, id: RoomId) -> Result<Room> {
        Self::get_room(conn, id)?.ok_or_else(|| Error::not_found(format!("room {id}")))
    }

    /// Lists the rooms of a hotel in natural room-number order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(conn: &Connection, hotel: HotelId) -> Result<Vec<Room>> {
        let mut stmt = conn.prepare(LIST_ROOMS)?;
        let rooms = stmt
            .query_map([hotel], row_to_room)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rooms)
    }

    /// Counts the rooms of a hotel.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn room_count(conn: &Connection, hotel: HotelId) -> Result<usize> {
        let count: i64 = conn.query_row(COUNT_ROOMS, [hotel], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Deletes a room. Its reservations survive with no room assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist or the delete fails.
    pub fn delete_room(&mut self, id: RoomId) -> Result<DeletionSummary> {
        self.with_immediate_transaction(|tx| {
            Self::require_room(tx, id)?;
            let orphaned: i64 = tx.query_row(COUNT_RESERVATIONS_FOR_ROOM, [id], |row| row.get(0))?;
            tx.execute("DELETE FROM rooms WHERE id = ?", [id])?;
            log::debug!("deleted room {id}, orphaning {orphaned} reservation(s)");
            Ok(DeletionSummary {
                rooms_removed: 1,
                reservations_orphaned: usize::try_from(orphaned).unwrap_or_default(),
            })
        })
    }

    /// Deletes a hotel together with its rooms.
    ///
    /// Reservations of those rooms survive with no room assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the hotel does not exist or the delete fails.
    pub fn delete_hotel(&mut self, id: HotelId) -> Result<DeletionSummary> {
        self.with_immediate_transaction(|tx| {
            Self::require_hotel(tx, id)?;
            let rooms = Self::room_count(tx, id)?;
            let orphaned: i64 = tx.query_row(COUNT_RESERVATIONS_FOR_HOTEL, [id], |row| row.get(0))?;
            tx.execute("DELETE FROM hotels WHERE id = ?", [id])?;
            log::debug!("deleted hotel {id} with {rooms} room(s)");
            Ok(DeletionSummary {
                rooms_removed: rooms,
                reservations_orphaned: usize::try_from(orphaned).unwrap_or_default(),
            })
        })
    }
}
