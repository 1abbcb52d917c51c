//! Property-based tests for operations module.
//!
//! Random sequences of booking, confirmation, cancellation and reassignment
//! must never leave two active reservations on one room and date, and must
//! never seat a party in a room that is too small.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    cancel, confirm, create_hotel, generate_rooms, reassign, reject, GuestRef, PlanExecutor,
    ReservationOrigin, ReserveOptions, ReservePlan, RoomGeneration,
};
use crate::config::ConfigBuilder;
use crate::database::test_util::{
    create_test_database, create_test_guest, create_test_hotel, create_test_room,
};
use crate::database::Database;
use crate::{NewHotel, PartySize, ReservationId, RoomId};

#[derive(Debug, Clone)]
enum Op {
    Book {
        room: Option<usize>,
        day: u64,
        party: u32,
        staff: bool,
    },
    Confirm(usize),
    Cancel(usize),
    Reject(usize),
    Reassign { reservation: usize, room: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (prop::option::of(0usize..4), 0u64..3, 1u32..=4, any::<bool>()).prop_map(
            |(room, day, party, staff)| Op::Book { room, day, party, staff }
        ),
        2 => (0usize..16).prop_map(Op::Confirm),
        1 => (0usize..16).prop_map(Op::Cancel),
        1 => (0usize..16).prop_map(Op::Reject),
        1 => (0usize..16, 0usize..4)
            .prop_map(|(reservation, room)| Op::Reassign { reservation, room }),
    ]
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn pick<T: Copy>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()])
    }
}

fn double_bookings(db: &Database) -> i64 {
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

fn overfull_rooms(db: &Database) -> i64 {
    db.connection()
        .query_row(
            "SELECT COUNT(*) FROM reservations r JOIN rooms ro ON ro.id = r.room_id
             WHERE r.status IN ('pending', 'confirmed') AND r.party_size > ro.capacity",
            [],
            |row| row.get(0),
        )
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    #[test]
    fn exclusivity_survives_any_operation_sequence(
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let mut db = create_test_database();
        let hotel = create_test_hotel(&db, "Sol");
        let rooms: Vec<RoomId> = [1, 2, 2, 4]
            .iter()
            .enumerate()
            .map(|(n, &seats)| create_test_room(&db, hotel, &(n + 1).to_string(), seats))
            .collect();
        let guest = create_test_guest(&db, "Ana");
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        let mut reservations: Vec<ReservationId> = Vec::new();

        for op in ops {
            let outcome = match op {
                Op::Book { room, day, party, staff } => {
                    let date = base_date().checked_add_days(Days::new(day)).unwrap();
                    let origin = if staff {
                        ReservationOrigin::Staff
                    } else {
                        ReservationOrigin::SelfService
                    };
                    let options = ReserveOptions::new(
                        hotel,
                        date,
                        PartySize::try_from(party).unwrap(),
                        GuestRef::Existing(guest),
                    )
                    .with_room(room.map(|i| rooms[i]))
                    .with_origin(origin);
                    ReservePlan::new(options, &config)
                        .build_plan(db.connection(), base_date())
                        .and_then(|plan| PlanExecutor::new(&mut db).execute(&plan))
                        .map(|result| {
                            if let Some(id) = result.reservation {
                                reservations.push(id);
                            }
                        })
                }
                Op::Confirm(i) => match pick(&reservations, i) {
                    Some(id) => confirm(&mut db, id).map(|_| ()),
                    None => Ok(()),
                },
                Op::Cancel(i) => match pick(&reservations, i) {
                    Some(id) => cancel(&mut db, id).map(|_| ()),
                    None => Ok(()),
                },
                Op::Reject(i) => match pick(&reservations, i) {
                    Some(id) => reject(&mut db, id).map(|_| ()),
                    None => Ok(()),
                },
                Op::Reassign { reservation, room } => match pick(&reservations, reservation) {
                    Some(id) => reassign(&mut db, id, rooms[room]).map(|_| ()),
                    None => Ok(()),
                },
            };

            if let Err(e) = outcome {
                prop_assert!(e.is_recoverable(), "unexpected error: {}", e);
            }
            prop_assert_eq!(double_bookings(&db), 0);
            prop_assert_eq!(overfull_rooms(&db), 0);
        }
    }

    #[test]
    fn generation_never_exceeds_target(target in 0u32..40, seed in any::<u64>()) {
        let mut db = create_test_database();
        let mut rng = StdRng::seed_from_u64(seed);
        let hotel = NewHotel::new("Sol", "Calle 1", target);
        let created = create_hotel(&mut db, &hotel, &mut rng).unwrap();
        prop_assert_eq!(&created.rooms, &RoomGeneration::Generated(target as usize));

        let again = generate_rooms(&mut db, created.hotel.id, &mut rng).unwrap();
        let expected = if target == 0 {
            RoomGeneration::Generated(0)
        } else {
            RoomGeneration::AlreadyPresent(target as usize)
        };
        prop_assert_eq!(again, expected);

        let rooms = Database::list_rooms(db.connection(), created.hotel.id).unwrap();
        prop_assert_eq!(rooms.len(), target as usize);
        for room in rooms {
            prop_assert!((1..=4).contains(&room.capacity.value()));
        }
    }
}
