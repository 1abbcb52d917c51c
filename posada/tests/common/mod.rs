//! Common test utilities for integration tests.
//!
//! Fixtures go through the public API only: hotels are created with room
//! generation off and rooms are added one by one so capacities are exact.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use posada::database::DatabaseConfig;
use posada::guest::resolve_guest;
use posada::operations::{create_hotel, GuestRef, ReservationOrigin, ReserveOptions, ReservePlan};
use posada::{
    Capacity, ConfigBuilder, Database, GuestId, GuestInput, HotelId, NewHotel, PartySize,
    ReservationId, Result, RoomId, RoomNumber,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

/// A database file in a temporary directory that lives as long as the value.
pub struct TestStore {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posada.db");
        Self { _dir: dir, path }
    }

    /// Opens another connection to the same file.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path)).unwrap()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn party(n: u32) -> PartySize {
    PartySize::try_from(n).unwrap()
}

/// Creates a hotel with one room per entry of `capacities`, numbered from 1.
pub fn hotel_with_rooms(
    db: &mut Database,
    name: &str,
    capacities: &[u32],
) -> (HotelId, Vec<RoomId>) {
    let hotel = NewHotel::new(name, "Calle Mayor 1", 0).auto_generate_rooms(false);
    let created = create_hotel(db, &hotel, &mut StdRng::seed_from_u64(0)).unwrap();

    let rooms = capacities
        .iter()
        .enumerate()
        .map(|(i, &seats)| {
            let number = RoomNumber::new((i + 1).to_string()).unwrap();
            Database::insert_room(
                db.connection(),
                created.hotel.id,
                &number,
                Capacity::try_from(seats).unwrap(),
            )
            .unwrap()
        })
        .collect();

    (created.hotel.id, rooms)
}

pub fn guest(db: &Database, name: &str) -> GuestId {
    let email = format!("{}@example.com", name.to_lowercase());
    let input = GuestInput::new(name, email, "555-0100").unwrap();
    resolve_guest(db.connection(), &input).unwrap().0
}

/// The night every scenario books.
pub const NIGHT: &str = "2025-06-01";

/// Books [`NIGHT`] as a guest would; the reservation starts pending.
pub fn book(
    db: &mut Database,
    hotel: HotelId,
    room: Option<RoomId>,
    size: u32,
    guest: GuestId,
) -> Result<ReservationId> {
    book_as(db, hotel, room, size, guest, ReservationOrigin::SelfService)
}

/// Books [`NIGHT`] as staff; the reservation starts confirmed.
pub fn book_staff(
    db: &mut Database,
    hotel: HotelId,
    room: Option<RoomId>,
    size: u32,
    guest: GuestId,
) -> Result<ReservationId> {
    book_as(db, hotel, room, size, guest, ReservationOrigin::Staff)
}

/// Books through the same plan/execute path the CLI uses.
fn book_as(
    db: &mut Database,
    hotel: HotelId,
    room: Option<RoomId>,
    size: u32,
    guest: GuestId,
    origin: ReservationOrigin,
) -> Result<ReservationId> {
    let config = ConfigBuilder::new().skip_files().skip_env().build()?;
    let options = ReserveOptions::new(hotel, date(NIGHT), party(size), GuestRef::Existing(guest))
        .with_room(room)
        .with_origin(origin);
    let plan = ReservePlan::new(options, &config).build_plan(db.connection(), date(NIGHT))?;
    let result = posada::PlanExecutor::new(db).execute(&plan)?;
    Ok(result.reservation.unwrap())
}

/// Number of (room, date) slots held by more than one active reservation.
pub fn double_bookings(db: &Database) -> i64 {
    db.connection()
        .query_row(
            "SELECT COUNT(*) FROM (
                 SELECT room_id, reservation_date FROM reservations
                 WHERE status IN ('pending', 'confirmed') AND room_id IS NOT NULL
                 GROUP BY room_id, reservation_date
                 HAVING COUNT(*) > 1
             )",
            [],
            |row| row.get(0),
        )
        .unwrap()
}
