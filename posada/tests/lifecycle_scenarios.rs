//! End-to-end reservation scenarios against a file-backed database.

mod common;

use common::{
    book, book_staff, date, double_bookings, guest, hotel_with_rooms, party, TestStore, NIGHT,
};
use posada::availability::{is_room_available, list_available_rooms};
use posada::operations::{
    cancel, confirm, create_hotel, find_alternatives, generate_rooms, reassign, ConfirmOutcome,
    ReassignOutcome, RoomGeneration,
};
use posada::{CancelOutcome, Database, Error, NewHotel, Reservation, ReservationStatus};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn reservation(db: &Database, id: posada::ReservationId) -> Reservation {
    Database::require_reservation(db.connection(), id).unwrap()
}

#[test]
fn hotel_creation_generates_exactly_the_target_rooms() {
    let store = TestStore::new();
    let mut db = store.open();
    let mut rng = StdRng::seed_from_u64(2025);

    let created = create_hotel(&mut db, &NewHotel::new("Sol", "Calle 1", 5), &mut rng).unwrap();
    assert_eq!(created.rooms, RoomGeneration::Generated(5));

    let rooms = Database::list_rooms(db.connection(), created.hotel.id).unwrap();
    let numbers: Vec<&str> = rooms.iter().map(|r| r.number.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2", "3", "4", "5"]);
    assert!(rooms.iter().all(|r| (1..=4).contains(&r.capacity.value())));

    // A second generation from another connection changes nothing.
    let mut other = store.open();
    let again = generate_rooms(&mut other, created.hotel.id, &mut rng).unwrap();
    assert_eq!(again, RoomGeneration::AlreadyPresent(5));
    assert_eq!(
        Database::room_count(db.connection(), created.hotel.id).unwrap(),
        5
    );
}

#[test]
fn booking_without_room_skips_the_occupied_one() {
    let store = TestStore::new();
    let mut db = store.open();
    let (hotel, rooms) = hotel_with_rooms(&mut db, "Sol", &[2, 1, 4]);
    let ana = guest(&db, "Ana");
    let luis = guest(&db, "Luis");

    let a = book(&mut db, hotel, Some(rooms[0]), 2, ana).unwrap();
    assert_eq!(reservation(&db, a).status, ReservationStatus::Pending);

    let b = book(&mut db, hotel, None, 2, luis).unwrap();
    assert_eq!(reservation(&db, b).room_id, Some(rooms[2]));

    // The only rooms seating two are now taken.
    let err = book(&mut db, hotel, None, 2, luis).unwrap_err();
    assert!(matches!(err, Error::NoRoomAvailable { .. }));

    // A party of one still fits in the single room.
    let c = book(&mut db, hotel, None, 1, luis).unwrap();
    assert_eq!(reservation(&db, c).room_id, Some(rooms[1]));
    assert_eq!(double_bookings(&db), 0);
}

#[test]
fn confirmations_in_different_rooms_do_not_conflict() {
    let store = TestStore::new();
    let mut db = store.open();
    let (hotel, rooms) = hotel_with_rooms(&mut db, "Sol", &[2, 2]);
    let ana = guest(&db, "Ana");

    let a = book(&mut db, hotel, Some(rooms[0]), 2, ana).unwrap();
    let b = book(&mut db, hotel, Some(rooms[1]), 2, ana).unwrap();

    assert_eq!(confirm(&mut db, a).unwrap(), ConfirmOutcome::Confirmed);
    assert_eq!(confirm(&mut db, b).unwrap(), ConfirmOutcome::Confirmed);
    assert_eq!(
        confirm(&mut db, b).unwrap(),
        ConfirmOutcome::AlreadyConfirmed
    );
}

#[test]
fn confirmed_slot_rejects_a_second_confirmed_booking() {
    let store = TestStore::new();
    let mut db = store.open();
    let (hotel, rooms) = hotel_with_rooms(&mut db, "Sol", &[2, 2]);
    let ana = guest(&db, "Ana");
    let luis = guest(&db, "Luis");

    let a = book(&mut db, hotel, Some(rooms[0]), 2, ana).unwrap();
    confirm(&mut db, a).unwrap();

    let err = book_staff(&mut db, hotel, Some(rooms[0]), 1, luis).unwrap_err();
    assert!(err.is_conflict(), "unexpected error: {err}");

    // The storage layer refuses it as well when the planner is bypassed.
    let draft = Reservation::builder(luis, date(NIGHT), party(1))
        .room(Some(rooms[0]))
        .status(ReservationStatus::Confirmed)
        .build()
        .unwrap();
    let err = Database::insert_reservation(db.connection(), &draft).unwrap_err();
    assert!(matches!(err, Error::ReservationConflict { .. }));

    assert!(!is_room_available(db.connection(), rooms[0], date(NIGHT)).unwrap());
    assert_eq!(reservation(&db, a).status, ReservationStatus::Confirmed);
}

#[test]
fn cancel_releases_the_slot_for_a_new_booking() {
    let store = TestStore::new();
    let mut db = store.open();
    let (hotel, rooms) = hotel_with_rooms(&mut db, "Sol", &[2]);
    let ana = guest(&db, "Ana");

    let a = book_staff(&mut db, hotel, Some(rooms[0]), 2, ana).unwrap();
    assert_eq!(
        cancel(&mut db, a).unwrap(),
        CancelOutcome::Cancelled(ReservationStatus::Confirmed)
    );
    assert_eq!(
        cancel(&mut db, a).unwrap(),
        CancelOutcome::AlreadyTerminal(ReservationStatus::Cancelled)
    );

    let b = book_staff(&mut db, hotel, Some(rooms[0]), 2, ana).unwrap();
    assert_eq!(reservation(&db, b).status, ReservationStatus::Confirmed);
}

#[test]
fn undersized_reassignment_never_mutates() {
    let store = TestStore::new();
    let mut db = store.open();
    let (hotel, rooms) = hotel_with_rooms(&mut db, "Sol", &[4, 2, 4]);
    let ana = guest(&db, "Ana");

    let a = book(&mut db, hotel, Some(rooms[0]), 3, ana).unwrap();
    let before = reservation(&db, a);

    let err = reassign(&mut db, a, rooms[1]).unwrap_err();
    assert!(matches!(err, Error::InsufficientCapacity { .. }));
    assert_eq!(reservation(&db, a), before);

    let alternatives: Vec<_> = find_alternatives(db.connection(), &before)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(alternatives, vec![rooms[2]]);

    assert_eq!(
        reassign(&mut db, a, rooms[2]).unwrap(),
        ReassignOutcome::Moved {
            from: Some(rooms[0]),
            to: rooms[2]
        }
    );
    let after = reservation(&db, a);
    assert_eq!(after.room_id, Some(rooms[2]));
    assert_eq!(after.status, ReservationStatus::Pending);

    let free = list_available_rooms(db.connection(), hotel, date(NIGHT), party(3)).unwrap();
    assert_eq!(
        free.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![rooms[0]]
    );
}

#[test]
fn deleting_a_room_orphans_its_reservations() {
    let store = TestStore::new();
    let mut db = store.open();
    let (hotel, rooms) = hotel_with_rooms(&mut db, "Sol", &[2, 2]);
    let ana = guest(&db, "Ana");
    let a = book(&mut db, hotel, Some(rooms[0]), 2, ana).unwrap();

    db.delete_room(rooms[0]).unwrap();
    let orphan = reservation(&db, a);
    assert_eq!(orphan.room_id, None);
    assert!(find_alternatives(db.connection(), &orphan).unwrap().is_empty());

    // An orphan cannot be confirmed until it has a room again.
    assert!(matches!(confirm(&mut db, a).unwrap_err(), Error::Validation { .. }));
    reassign(&mut db, a, rooms[1]).unwrap();
    assert_eq!(confirm(&mut db, a).unwrap(), ConfirmOutcome::Confirmed);
}
