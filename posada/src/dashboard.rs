//! Administrative overview queries.
//!
//! Read-only counts for the front desk: what awaits confirmation, who
//! arrives today, and how many rooms are still free.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::catalog::{HotelId, RoomId};
use crate::database::{upcoming_window_end, Database};
use crate::error::Result;
use crate::reservation::Reservation;

const COUNT_PENDING: &str = "SELECT COUNT(*) FROM reservations WHERE status = 'pending'";

const COUNT_CONFIRMED_BETWEEN: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE status = 'confirmed' AND reservation_date BETWEEN ? AND ?
";

const HOTELS_WITH_PENDING: &str = r"
    SELECT h.id, h.name, COUNT(r.id)
    FROM hotels h
    JOIN rooms ro ON ro.hotel_id = h.id
    JOIN reservations r ON r.room_id = ro.id
    WHERE r.status = 'pending'
    GROUP BY h.id, h.name
    ORDER BY h.name COLLATE NOCASE, h.id
";

const COUNT_FREE_ROOMS: &str = r"
    SELECT COUNT(*) FROM rooms
    WHERE id NOT IN (
        SELECT room_id FROM reservations
        WHERE reservation_date = ?
          AND status IN ('pending', 'confirmed')
          AND room_id IS NOT NULL
    )
";

/// A hotel with reservations waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingHotel {
    /// Hotel id.
    pub id: HotelId,
    /// Hotel name.
    pub name: String,
    /// Pending reservations in its rooms.
    pub pending: usize,
}

/// Front-desk overview as of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// The day the summary describes.
    pub today: NaiveDate,
    /// Reservations awaiting confirmation, any date.
    pub pending: usize,
    /// Confirmed reservations dated today.
    pub confirmed_today: usize,
    /// Confirmed reservations dated within the upcoming week.
    pub confirmed_upcoming: usize,
    /// Hotels with pending reservations, by name.
    pub hotels_with_pending: Vec<PendingHotel>,
    /// Rooms no active reservation holds today.
    pub free_rooms_today: usize,
    /// Number of hotels.
    pub hotels: usize,
    /// Number of rooms.
    pub rooms: usize,
    /// Number of guests.
    pub guests: usize,
}

fn count(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<usize> {
    let n: i64 = conn.query_row(sql, params, |row| row.get(0))?;
    Ok(usize::try_from(n).unwrap_or_default())
}

impl DashboardSummary {
    /// Collects the summary for `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn gather(conn: &Connection, today: NaiveDate) -> Result<Self> {
        let week_end = upcoming_window_end(today);

        let mut stmt = conn.prepare(HOTELS_WITH_PENDING)?;
        let hotels_with_pending = stmt
            .query_map([], |row| {
                let pending: i64 = row.get(2)?;
                Ok(PendingHotel {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    pending: usize::try_from(pending).unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Self {
            today,
            pending: count(conn, COUNT_PENDING, [])?,
            confirmed_today: count(conn, COUNT_CONFIRMED_BETWEEN, params![today, today])?,
            confirmed_upcoming: count(conn, COUNT_CONFIRMED_BETWEEN, params![today, week_end])?,
            hotels_with_pending,
            free_rooms_today: count(conn, COUNT_FREE_ROOMS, params![today])?,
            hotels: count(conn, "SELECT COUNT(*) FROM hotels", [])?,
            rooms: count(conn, "SELECT COUNT(*) FROM rooms", [])?,
            guests: count(conn, "SELECT COUNT(*) FROM guests", [])?,
        })
    }
}

/// Active reservations of a hotel in the week starting `today`.
///
/// # Errors
///
/// Returns an error if the hotel does not exist or the query fails.
pub fn upcoming_for_hotel(
    conn: &Connection,
    hotel: HotelId,
    today: NaiveDate,
) -> Result<Vec<Reservation>> {
    Database::require_hotel(conn, hotel)?;
    Database::upcoming_for_hotel(conn, hotel, today)
}

/// Active reservations of a room in the week starting `today`.
///
/// # Errors
///
/// Returns an error if the room does not exist or the query fails.
pub fn upcoming_for_room(
    conn: &Connection,
    room: RoomId,
    today: NaiveDate,
) -> Result<Vec<Reservation>> {
    Database::require_room(conn, room)?;
    Database::upcoming_for_room(conn, room, today)
}
