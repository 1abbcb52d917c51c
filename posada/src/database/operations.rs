//! Database CRUD operations for reservations.
//!
//! Writes here are single statements meant to run inside a transaction the
//! caller holds. The exclusivity index turns a second active reservation on
//! the same room and date into [`Error::ReservationConflict`].

use std::time::{Duration, SystemTime};

use chrono::{Days, NaiveDate};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::catalog::{HotelId, RoomId};
use crate::error::{Error, Result};
use crate::guest::GuestId;
use crate::reservation::{
    NewReservation, Reservation, ReservationId, ReservationStatus, UPCOMING_WINDOW_DAYS,
};

use super::connection::Database;
use super::schema::{ACTIVE_STATUS_FILTER, RESERVATION_COLUMNS};
use super::transaction::is_active_slot_violation;

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::validation("timestamp", format!("invalid timestamp: {e}")))
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

/// Last day of the upcoming window that starts `today`.
pub(crate) fn upcoming_window_end(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS.unsigned_abs()))
        .unwrap_or(NaiveDate::MAX)
}

/// Deserializes a reservation selected with [`RESERVATION_COLUMNS`].
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        id: row.get(0)?,
        guest_id: row.get(1)?,
        room_id: row.get(2)?,
        date: row.get(3)?,
        party_size: row.get(4)?,
        status: row.get(5)?,
        notes: row.get(6)?,
        created_at: unix_secs_to_systemtime(row.get(7)?),
        modified_at: unix_secs_to_systemtime(row.get(8)?),
    })
}

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (guest_id, room_id, reservation_date, party_size, status, notes, created_at, modified_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_STATUS: &str = r"
    UPDATE reservations
    SET status = ?, modified_at = ?
    WHERE id = ? AND status = ?
";

const UPDATE_ROOM: &str = r"
    UPDATE reservations
    SET room_id = ?, modified_at = ?
    WHERE id = ?
";

const UPDATE_NOTES: &str = r"
    UPDATE reservations
    SET notes = ?, modified_at = ?
    WHERE id = ?
";

/// Filter for [`Database::list_reservations`]. Empty fields match everything.
///
/// # Examples
///
/// ```
/// use posada::database::ReservationFilter;
/// use posada::ReservationStatus;
///
/// let filter = ReservationFilter::default().status(ReservationStatus::Pending);
/// assert_eq!(filter.status, Some(ReservationStatus::Pending));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations with this status.
    pub status: Option<ReservationStatus>,
    /// Only reservations in rooms of this hotel.
    pub hotel: Option<HotelId>,
    /// Only reservations for this date.
    pub date: Option<NaiveDate>,
    /// Only reservations of this guest.
    pub guest: Option<GuestId>,
}

impl ReservationFilter {
    /// Restricts to a status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to a hotel.
    #[must_use]
    pub const fn hotel(mut self, hotel: HotelId) -> Self {
        self.hotel = Some(hotel);
        self
    }

    /// Restricts to a date.
    #[must_use]
    pub const fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Restricts to a guest.
    #[must_use]
    pub const fn guest(mut self, guest: GuestId) -> Self {
        self.guest = Some(guest);
        self
    }
}

impl Database {
    /// Inserts a reservation and returns its id.
    ///
    /// Intended for use within an existing transaction. The room-date
    /// exclusivity index rejects a second active reservation on the same
    /// room and date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationConflict`] if the slot is taken, a
    /// validation error if the guest or room does not exist, or a database
    /// error if the insert fails.
    pub fn insert_reservation(conn: &Connection, draft: &NewReservation) -> Result<ReservationId> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        let result = conn.execute(
            INSERT_RESERVATION,
            params![
                draft.guest_id,
                draft.room_id,
                draft.date,
                draft.party_size,
                draft.status,
                draft.notes,
                now,
                now,
            ],
        );
        match result {
            Ok(_) => Ok(ReservationId::new(conn.last_insert_rowid())),
            Err(e) => Err(Self::map_slot_error(conn, e, draft.room_id, draft.date, None)),
        }
    }

    /// Retrieves a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations r WHERE r.id = ?");
        Ok(conn.query_row(&sql, [id], row_to_reservation).optional()?)
    }

    /// Retrieves a reservation, failing with [`Error::NotFound`] if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist or the query fails.
    pub fn require_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
        Self::get_reservation(conn, id)?
            .ok_or_else(|| Error::not_found(format!("reservation {id}")))
    }

    /// Moves a reservation from `from` to `to`.
    ///
    /// The update only applies while the stored status still equals `from`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the stored status changed,
    /// [`Error::ReservationConflict`] if activating the reservation would
    /// double-book its room, or a database error.
    pub fn update_reservation_status(
        conn: &Connection,
        id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> Result<()> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        let updated = match conn.execute(UPDATE_STATUS, params![to, now, id, from]) {
            Ok(n) => n,
            Err(e) => {
                let current = Self::require_reservation(conn, id)?;
                return Err(Self::map_slot_error(conn, e, current.room_id, current.date, Some(id)));
            }
        };
        if updated == 0 {
            let current = Self::require_reservation(conn, id)?;
            return Err(Error::InvalidTransition {
                reservation: id,
                from: current.status,
                to,
            });
        }
        Ok(())
    }

    /// Points a reservation at another room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationConflict`] if the reservation is active
    /// and the room is taken on its date, or a database error.
    pub fn update_reservation_room(
        conn: &Connection,
        id: ReservationId,
        room: RoomId,
    ) -> Result<()> {
        let current = Self::require_reservation(conn, id)?;
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        conn.execute(UPDATE_ROOM, params![room, now, id])
            .map_err(|e| Self::map_slot_error(conn, e, Some(room), current.date, Some(id)))?;
        Ok(())
    }

    /// Replaces the admin notes of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist or the update fails.
    pub fn update_reservation_notes(
        conn: &Connection,
        id: ReservationId,
        notes: &str,
    ) -> Result<()> {
        let now = systemtime_to_unix_secs(SystemTime::now())?;
        let updated = conn.execute(UPDATE_NOTES, params![notes, now, id])?;
        if updated == 0 {
            return Err(Error::not_found(format!("reservation {id}")));
        }
        Ok(())
    }

    /// Lists reservations matching a filter, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        let mut sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations r");
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(hotel) = filter.hotel {
            sql.push_str(" JOIN rooms ro ON ro.id = r.room_id");
            clauses.push("ro.hotel_id = ?");
            values.push(Value::Integer(hotel.value()));
        }
        if let Some(status) = filter.status {
            clauses.push("r.status = ?");
            values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(date) = filter.date {
            clauses.push("r.reservation_date = ?");
            values.push(Value::Text(date.format("%Y-%m-%d").to_string()));
        }
        if let Some(guest) = filter.guest {
            clauses.push("r.guest_id = ?");
            values.push(Value::Integer(guest.value()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY r.reservation_date DESC, r.created_at DESC, r.id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(params_from_iter(values), row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Returns a guest's reservation history, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_for_guest(conn: &Connection, guest: GuestId) -> Result<Vec<Reservation>> {
        Self::list_reservations(conn, &ReservationFilter::default().guest(guest))
    }

    /// Returns a guest's active reservations dated today or later, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_reservations_for_guest(
        conn: &Connection,
        guest: GuestId,
        today: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations r
             WHERE r.guest_id = ? AND r.reservation_date >= ? AND r.{ACTIVE_STATUS_FILTER}
             ORDER BY r.reservation_date, r.id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(params![guest, today], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Returns the active reservation holding `room` on `date`, if any.
    ///
    /// `excluding` is ignored so that a reservation never conflicts with itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_holder(
        conn: &Connection,
        room: RoomId,
        date: NaiveDate,
        excluding: Option<ReservationId>,
    ) -> Result<Option<ReservationId>> {
        let sql = format!(
            "SELECT id FROM reservations
             WHERE room_id = ? AND reservation_date = ? AND {ACTIVE_STATUS_FILTER}
               AND id IS NOT ?
             LIMIT 1"
        );
        Ok(conn
            .query_row(&sql, params![room, date, excluding], |row| row.get(0))
            .optional()?)
    }

    /// Active reservations in rooms of `hotel` dated within the upcoming
    /// window starting `today`, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn upcoming_for_hotel(
        conn: &Connection,
        hotel: HotelId,
        today: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations r
             JOIN rooms ro ON ro.id = r.room_id
             WHERE ro.hotel_id = ? AND r.reservation_date BETWEEN ? AND ?
               AND r.{ACTIVE_STATUS_FILTER}
             ORDER BY r.reservation_date, r.id"
        );
        Self::query_upcoming(conn, &sql, hotel.value(), today)
    }

    /// Active reservations of `room` dated within the upcoming window
    /// starting `today`, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn upcoming_for_room(
        conn: &Connection,
        room: RoomId,
        today: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations r
             WHERE r.room_id = ? AND r.reservation_date BETWEEN ? AND ?
               AND r.{ACTIVE_STATUS_FILTER}
             ORDER BY r.reservation_date, r.id"
        );
        Self::query_upcoming(conn, &sql, room.value(), today)
    }

    fn query_upcoming(
        conn: &Connection,
        sql: &str,
        owner: i64,
        today: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        let last = upcoming_window_end(today);
        let mut stmt = conn.prepare(sql)?;
        let reservations = stmt
            .query_map(params![owner, today, last], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Returns `true` if the reservation is pending, has a room, and no other
    /// active reservation holds that room on its date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn can_confirm(conn: &Connection, reservation: &Reservation) -> Result<bool> {
        if reservation.status != ReservationStatus::Pending {
            return Ok(false);
        }
        let Some(room) = reservation.room_id else {
            return Ok(false);
        };
        Ok(Self::active_holder(conn, room, reservation.date, Some(reservation.id))?.is_none())
    }

    /// Returns the hotel of the room a reservation is assigned to.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn hotel_of_room(conn: &Connection, room: RoomId) -> Result<Option<HotelId>> {
        Ok(conn
            .query_row("SELECT hotel_id FROM rooms WHERE id = ?", [room], |row| {
                row.get(0)
            })
            .optional()?)
    }

    fn map_slot_error(
        conn: &Connection,
        err: rusqlite::Error,
        room: Option<RoomId>,
        date: NaiveDate,
        excluding: Option<ReservationId>,
    ) -> Error {
        if let (true, Some(room)) = (is_active_slot_violation(&err), room) {
            let holder = Self::active_holder(conn, room, date, excluding).unwrap_or_default();
            return Error::ReservationConflict { room, date, holder };
        }
        if let rusqlite::Error::SqliteFailure(ref e, Some(ref message)) = err {
            if e.code == rusqlite::ErrorCode::ConstraintViolation && message.contains("FOREIGN KEY")
            {
                return Error::validation("reference", "unknown guest or room");
            }
        }
        Error::Database(err)
    }
}
