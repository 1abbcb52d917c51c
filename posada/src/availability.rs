//! The availability index.
//!
//! A room is available on a date when no pending or confirmed reservation
//! holds it on that exact date. The bulk queries here are read-side
//! conveniences; writes rely on [`ensure_slot_free`] inside an immediate
//! transaction, backed by the store's exclusivity index.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::catalog::{Capacity, HotelId, Room, RoomId, RoomNumber};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{PartySize, ReservationId};

// Rooms of a hotel with enough seats and no active reservation on the date,
// smallest first, then natural room-number order.
const AVAILABLE_ROOMS: &str = r"
    SELECT ro.id, ro.number, ro.capacity
    FROM rooms ro
    WHERE ro.hotel_id = ?1
      AND ro.capacity >= ?3
      AND ro.id NOT IN (
          SELECT room_id FROM reservations
          WHERE reservation_date = ?2
            AND status IN ('pending', 'confirmed')
            AND room_id IS NOT NULL
      )
    ORDER BY ro.capacity, length(ro.number), ro.number
";

/// A free room as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDescriptor {
    /// Room id.
    pub id: RoomId,
    /// Room number within its hotel.
    pub number: RoomNumber,
    /// Seat capacity.
    pub capacity: Capacity,
}

impl From<Room> for RoomDescriptor {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            number: room.number,
            capacity: room.capacity,
        }
    }
}

fn row_to_descriptor(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoomDescriptor> {
    let number: String = row.get(1)?;
    Ok(RoomDescriptor {
        id: row.get(0)?,
        number: RoomNumber::new(number).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?,
        capacity: row.get(2)?,
    })
}

/// Lists rooms of `hotel` free on `date` with at least `min_capacity` seats.
///
/// Ordered by ascending capacity, then natural room number.
///
/// # Errors
///
/// Returns an error if the hotel does not exist or the query fails.
pub fn list_available_rooms(
    conn: &Connection,
    hotel: HotelId,
    date: NaiveDate,
    min_capacity: PartySize,
) -> Result<Vec<RoomDescriptor>> {
    Database::require_hotel(conn, hotel)?;
    let mut stmt = conn.prepare(AVAILABLE_ROOMS)?;
    let rooms = stmt
        .query_map(params![hotel, date, min_capacity], row_to_descriptor)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rooms)
}

/// Lists every room of `hotel` free on `date`, whatever its size.
///
/// # Errors
///
/// Returns an error if the hotel does not exist or the query fails.
pub fn rooms_available(
    conn: &Connection,
    hotel: HotelId,
    date: NaiveDate,
) -> Result<Vec<RoomDescriptor>> {
    let any = PartySize::try_from(1)?;
    list_available_rooms(conn, hotel, date, any)
}

/// The first room [`list_available_rooms`] would report, if any.
///
/// # Errors
///
/// Returns an error if the hotel does not exist or the query fails.
pub fn first_available_room(
    conn: &Connection,
    hotel: HotelId,
    date: NaiveDate,
    party_size: PartySize,
) -> Result<Option<RoomDescriptor>> {
    Ok(list_available_rooms(conn, hotel, date, party_size)?
        .into_iter()
        .next())
}

/// Returns `true` if no active reservation holds `room` on `date`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_room_available(conn: &Connection, room: RoomId, date: NaiveDate) -> Result<bool> {
    Ok(Database::active_holder(conn, room, date, None)?.is_none())
}

/// Like [`is_room_available`], ignoring one reservation.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_room_available_excluding(
    conn: &Connection,
    room: RoomId,
    date: NaiveDate,
    reservation: ReservationId,
) -> Result<bool> {
    Ok(Database::active_holder(conn, room, date, Some(reservation))?.is_none())
}

/// Fails with [`Error::ReservationConflict`] if another active reservation
/// holds `room` on `date`.
///
/// Call inside the immediate transaction that performs the write.
///
/// # Errors
///
/// Returns [`Error::ReservationConflict`] naming the holder, or a database
/// error if the query fails.
pub fn ensure_slot_free(
    conn: &Connection,
    room: RoomId,
    date: NaiveDate,
    excluding: Option<ReservationId>,
) -> Result<()> {
    match Database::active_holder(conn, room, date, excluding)? {
        Some(holder) => Err(Error::ReservationConflict {
            room,
            date,
            holder: Some(holder),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, create_test_guest, create_test_hotel, create_test_room, date,
        insert_test_reservation,
    };
    use crate::reservation::ReservationStatus;

    fn party(n: u32) -> PartySize {
        PartySize::try_from(n).unwrap()
    }

    #[test]
    fn test_only_active_reservations_block_rooms() {
        let mut db = create_test_database();
        let hotel = create_test_hotel(&db, "Sol");
        let one = create_test_room(&db, hotel, "1", 2);
        let two = create_test_room(&db, hotel, "2", 2);
        let three = create_test_room(&db, hotel, "3", 2);
        let guest = create_test_guest(&db, "Ana");
        let on = "2025-06-01";

        let _pending =
            insert_test_reservation(&db, guest, Some(one), on, 1, ReservationStatus::Pending);
        let _confirmed =
            insert_test_reservation(&db, guest, Some(two), on, 1, ReservationStatus::Confirmed);
        let cancelled =
            insert_test_reservation(&db, guest, Some(three), on, 1, ReservationStatus::Pending);
        db.with_immediate_transaction(|tx| {
            Database::update_reservation_status(
                tx,
                cancelled,
                ReservationStatus::Pending,
                ReservationStatus::Cancelled,
            )
        })
        .unwrap();

        let free: Vec<RoomId> = rooms_available(db.connection(), hotel, date(on))
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(free, vec![three]);

        assert!(!is_room_available(db.connection(), one, date(on)).unwrap());
        assert!(!is_room_available(db.connection(), two, date(on)).unwrap());
        assert!(is_room_available(db.connection(), three, date(on)).unwrap());
    }

    #[test]
    fn test_availability_is_per_exact_date() {
        let db = create_test_database();
        let hotel = create_test_hotel(&db, "Sol");
        let room = create_test_room(&db, hotel, "1", 2);
        let guest = create_test_guest(&db, "Ana");
        let _ = insert_test_reservation(
            &db,
            guest,
            Some(room),
            "2025-06-01",
            1,
            ReservationStatus::Confirmed,
        );

        assert!(!is_room_available(db.connection(), room, date("2025-06-01")).unwrap());
        assert!(is_room_available(db.connection(), room, date("2025-05-31")).unwrap());
        assert!(is_room_available(db.connection(), room, date("2025-06-02")).unwrap());
    }

    #[test]
    fn test_list_available_orders_by_capacity_then_number() {
        let db = create_test_database();
        let hotel = create_test_hotel(&db, "Sol");
        let r10 = create_test_room(&db, hotel, "10", 2);
        let r4 = create_test_room(&db, hotel, "4", 4);
        let r2 = create_test_room(&db, hotel, "2", 2);
        let r1 = create_test_room(&db, hotel, "1", 1);

        let order: Vec<RoomId> =
            list_available_rooms(db.connection(), hotel, date("2025-06-01"), party(2))
                .unwrap()
                .into_iter()
                .map(|r| r.id)
                .collect();
        assert_eq!(order, vec![r2, r10, r4]);

        let all: Vec<RoomId> = rooms_available(db.connection(), hotel, date("2025-06-01"))
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(all, vec![r1, r2, r10, r4]);
    }

    #[test]
    fn test_first_available_room() {
        let db = create_test_database();
        let hotel = create_test_hotel(&db, "Sol");
        let small = create_test_room(&db, hotel, "1", 2);
        let big = create_test_room(&db, hotel, "2", 4);
        let guest = create_test_guest(&db, "Ana");

        let first = first_available_room(db.connection(), hotel, date("2025-06-01"), party(2))
            .unwrap()
            .unwrap();
        assert_eq!(first.id, small);

        let _ = insert_test_reservation(
            &db,
            guest,
            Some(small),
            "2025-06-01",
            2,
            ReservationStatus::Pending,
        );
        let next = first_available_room(db.connection(), hotel, date("2025-06-01"), party(2))
            .unwrap()
            .unwrap();
        assert_eq!(next.id, big);

        assert!(
            first_available_room(db.connection(), hotel, date("2025-06-01"), party(5))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_unknown_hotel_is_not_found() {
        let db = create_test_database();
        let err =
            rooms_available(db.connection(), HotelId::new(9), date("2025-06-01")).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_ensure_slot_free_excludes_self() {
        let db = create_test_database();
        let hotel = create_test_hotel(&db, "Sol");
        let room = create_test_room(&db, hotel, "1", 2);
        let guest = create_test_guest(&db, "Ana");
        let id = insert_test_reservation(
            &db,
            guest,
            Some(room),
            "2025-06-01",
            1,
            ReservationStatus::Pending,
        );

        ensure_slot_free(db.connection(), room, date("2025-06-01"), Some(id)).unwrap();
        assert!(
            is_room_available_excluding(db.connection(), room, date("2025-06-01"), id).unwrap()
        );

        let err = ensure_slot_free(db.connection(), room, date("2025-06-01"), None).unwrap_err();
        assert!(matches!(
            err,
            Error::ReservationConflict { holder: Some(h), .. } if h == id
        ));
    }
}
