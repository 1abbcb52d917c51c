//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to the database. A plan runs inside one immediate
//! transaction, and every action re-reads the rows it depends on before
//! writing, so a plan built from a stale read fails instead of breaking
//! room-date exclusivity.

use rusqlite::Connection;

use crate::availability::ensure_slot_free;
use crate::catalog::RoomId;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::{resolve_guest, GuestId, GuestResolution};
use crate::reservation::{validate_notes, PartySize, Reservation, ReservationId};

use super::plan::{GuestRef, OperationPlan, PlanAction, ReservationRequest};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The reservation created or changed by the last action, if any.
    pub reservation: Option<ReservationId>,

    /// How the guest of a new reservation was resolved.
    pub guest: Option<(GuestId, GuestResolution)>,
}

#[derive(Debug, Default)]
struct Applied {
    reservation: Option<ReservationId>,
    guest: Option<(GuestId, GuestResolution)>,
}

impl ExecutionResult {
    fn success(plan: &OperationPlan, applied: Applied) -> Self {
        Self {
            success: true,
            dry_run: false,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation: applied.reservation,
            guest: applied.guest,
        }
    }

    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            dry_run: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation: None,
            guest: None,
        }
    }
}

/// Executes operation plans against the database.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting the plan without changes).
///
/// # Examples
///
/// ```no_run
/// use posada::operations::{OperationPlan, PlanAction, PlanExecutor};
/// use posada::{Database, DatabaseConfig, ReservationId, ReservationStatus};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/posada.db")).unwrap();
/// let plan = OperationPlan::new("Confirm").add_action(PlanAction::UpdateStatus {
///     reservation: ReservationId::new(1),
///     from: ReservationStatus::Pending,
///     to: ReservationStatus::Confirmed,
/// });
///
/// let result = PlanExecutor::new(&mut db).dry_run().execute(&plan).unwrap();
/// assert!(result.dry_run);
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db, dry_run: false }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan but does not
    /// modify the database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// All actions run in one immediate transaction; the first failing
    /// action rolls back the ones before it.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute, including
    /// [`Error::ReservationConflict`] when a room-date slot was taken after
    /// planning and [`Error::InvalidTransition`] when a status moved.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::dry_run(plan));
        }

        let applied = self.db.with_immediate_transaction(|tx| {
            let mut applied = Applied::default();
            for action in &plan.actions {
                apply_action(tx, action, &mut applied)?;
            }
            Ok(applied)
        })?;

        log::debug!(
            "executed plan '{}' ({} action(s))",
            plan.description,
            plan.len()
        );
        Ok(ExecutionResult::success(plan, applied))
    }
}

fn apply_action(conn: &Connection, action: &PlanAction, applied: &mut Applied) -> Result<()> {
    match action {
        PlanAction::CreateReservation(request) => {
            let id = create_reservation(conn, request, applied)?;
            applied.reservation = Some(id);
        }
        PlanAction::UpdateStatus {
            reservation,
            from,
            to,
        } => {
            let current = Database::require_reservation(conn, *reservation)?;
            if current.status != *from {
                return Err(Error::InvalidTransition {
                    reservation: *reservation,
                    from: current.status,
                    to: *to,
                });
            }
            if to.is_active() {
                let room = current.room_id.ok_or_else(|| {
                    Error::validation(
                        "room_id",
                        format!("reservation {reservation} has no room assigned"),
                    )
                })?;
                ensure_slot_free(conn, room, current.date, Some(*reservation))?;
            }
            Database::update_reservation_status(conn, *reservation, *from, *to)?;
            applied.reservation = Some(*reservation);
        }
        PlanAction::ReassignRoom {
            reservation,
            from,
            to,
        } => {
            let current = Database::require_reservation(conn, *reservation)?;
            if current.room_id != *from {
                return Err(Error::validation(
                    "room_id",
                    format!("reservation {reservation} changed rooms while the move was planned"),
                ));
            }
            check_capacity(conn, *to, current.party_size)?;
            ensure_slot_free(conn, *to, current.date, Some(*reservation))?;
            Database::update_reservation_room(conn, *reservation, *to)?;
            applied.reservation = Some(*reservation);
        }
        PlanAction::UpdateNotes { reservation, notes } => {
            validate_notes(notes)?;
            Database::update_reservation_notes(conn, *reservation, notes)?;
            applied.reservation = Some(*reservation);
        }
    }
    Ok(())
}

fn create_reservation(
    conn: &Connection,
    request: &ReservationRequest,
    applied: &mut Applied,
) -> Result<ReservationId> {
    let guest_id = match &request.guest {
        GuestRef::Existing(id) => Database::require_guest(conn, *id)?.id,
        GuestRef::Details(input) => {
            let resolved = resolve_guest(conn, input)?;
            applied.guest = Some(resolved);
            resolved.0
        }
    };

    check_capacity(conn, request.room, request.party_size)?;
    ensure_slot_free(conn, request.room, request.date, None)?;

    let draft = Reservation::builder(guest_id, request.date, request.party_size)
        .room(Some(request.room))
        .status(request.status)
        .notes(&request.notes)
        .build()?;
    Database::insert_reservation(conn, &draft)
}

/// Fails with [`Error::InsufficientCapacity`] unless `room` seats the party.
pub(super) fn check_capacity(conn: &Connection, room: RoomId, party_size: PartySize) -> Result<()> {
    let room = Database::require_room(conn, room)?;
    if room.capacity.fits(party_size) {
        Ok(())
    } else {
        Err(Error::InsufficientCapacity {
            room: room.id,
            capacity: room.capacity,
            party_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::HotelId;
    use crate::database::test_util::{
        create_test_database, create_test_guest, create_test_hotel, create_test_room, date,
        insert_test_reservation,
    };
    use crate::guest::GuestInput;
    use crate::reservation::ReservationStatus;

    fn request(guest: GuestRef, room: RoomId, party: u32) -> ReservationRequest {
        ReservationRequest {
            guest,
            room,
            date: date("2025-06-01"),
            party_size: PartySize::try_from(party).unwrap(),
            status: ReservationStatus::Pending,
            notes: "window seat".into(),
        }
    }

    fn setup() -> (Database, HotelId, RoomId) {
        let db = create_test_database();
        let hotel = create_test_hotel(&db, "Sol");
        let room = create_test_room(&db, hotel, "1", 2);
        (db, hotel, room)
    }

    #[test]
    fn test_execute_create_reservation_resolves_guest() {
        let (mut db, _, room) = setup();
        let input = GuestInput::new("Ana", "ana@example.com", "555").unwrap();
        let plan = OperationPlan::new("Reserve").add_action(PlanAction::CreateReservation(
            request(GuestRef::Details(input), room, 2),
        ));

        let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
        assert!(result.success);
        assert!(!result.dry_run);
        assert_eq!(result.actions_taken.len(), 1);

        let (guest, how) = result.guest.unwrap();
        assert_eq!(how, GuestResolution::Created);

        let stored = Database::require_reservation(db.connection(), result.reservation.unwrap())
            .unwrap();
        assert_eq!(stored.guest_id, guest);
        assert_eq!(stored.room_id, Some(room));
        assert_eq!(stored.status, ReservationStatus::Pending);
        assert_eq!(stored.notes, "window seat");
    }

    #[test]
    fn test_dry_run_does_not_modify_database() {
        let (mut db, _, room) = setup();
        let guest = create_test_guest(&db, "Ana");
        let plan = OperationPlan::new("Reserve").add_action(PlanAction::CreateReservation(
            request(GuestRef::Existing(guest), room, 1),
        ));

        let result = PlanExecutor::new(&mut db).dry_run().execute(&plan).unwrap();
        assert!(result.dry_run);
        assert!(result.reservation.is_none());
        assert!(Database::reservations_for_guest(db.connection(), guest)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_create_rechecks_slot() {
        let (mut db, _, room) = setup();
        let guest = create_test_guest(&db, "Ana");
        let holder = insert_test_reservation(
            &db,
            guest,
            Some(room),
            "2025-06-01",
            1,
            ReservationStatus::Confirmed,
        );

        let plan = OperationPlan::new("Reserve").add_action(PlanAction::CreateReservation(
            request(GuestRef::Existing(guest), room, 1),
        ));
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();
        assert!(matches!(
            err,
            Error::ReservationConflict { holder: Some(h), .. } if h == holder
        ));
    }

    #[test]
    fn test_create_rechecks_capacity() {
        let (mut db, _, room) = setup();
        let guest = create_test_guest(&db, "Ana");
        let plan = OperationPlan::new("Reserve").add_action(PlanAction::CreateReservation(
            request(GuestRef::Existing(guest), room, 3),
        ));
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();
        assert!(matches!(err, Error::InsufficientCapacity { .. }));
    }

    #[test]
    fn test_failed_action_rolls_back_whole_plan() {
        let (mut db, hotel, room) = setup();
        let other = create_test_room(&db, hotel, "2", 2);
        let guest = create_test_guest(&db, "Ana");
        let _ = insert_test_reservation(
            &db,
            guest,
            Some(room),
            "2025-06-01",
            1,
            ReservationStatus::Pending,
        );

        let plan = OperationPlan::new("Two bookings")
            .add_action(PlanAction::CreateReservation(request(GuestRef::Existing(guest), other, 1)))
            .add_action(PlanAction::CreateReservation(request(GuestRef::Existing(guest), room, 1)));
        assert!(PlanExecutor::new(&mut db).execute(&plan).is_err());

        assert_eq!(
            Database::reservations_for_guest(db.connection(), guest)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_stale_status_is_invalid_transition() {
        let (mut db, _, room) = setup();
        let guest = create_test_guest(&db, "Ana");
        let id = insert_test_reservation(
            &db,
            guest,
            Some(room),
            "2025-06-01",
            1,
            ReservationStatus::Confirmed,
        );

        let plan = OperationPlan::new("Confirm").add_action(PlanAction::UpdateStatus {
            reservation: id,
            from: ReservationStatus::Pending,
            to: ReservationStatus::Confirmed,
        });
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition { from: ReservationStatus::Confirmed, .. }
        ));
    }

    #[test]
    fn test_stale_room_rejects_reassignment() {
        let (mut db, hotel, room) = setup();
        let other = create_test_room(&db, hotel, "2", 2);
        let guest = create_test_guest(&db, "Ana");
        let id = insert_test_reservation(
            &db,
            guest,
            Some(room),
            "2025-06-01",
            1,
            ReservationStatus::Pending,
        );

        let plan = OperationPlan::new("Move").add_action(PlanAction::ReassignRoom {
            reservation: id,
            from: Some(other),
            to: other,
        });
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "room_id"));
    }

    #[test]
    fn test_update_notes() {
        let (mut db, _, room) = setup();
        let guest = create_test_guest(&db, "Ana");
        let id = insert_test_reservation(
            &db,
            guest,
            Some(room),
            "2025-06-01",
            1,
            ReservationStatus::Pending,
        );

        let plan = OperationPlan::new("Notes").add_action(PlanAction::UpdateNotes {
            reservation: id,
            notes: "arrives late".into(),
        });
        PlanExecutor::new(&mut db).execute(&plan).unwrap();
        assert_eq!(
            Database::require_reservation(db.connection(), id).unwrap().notes,
            "arrives late"
        );
    }

    #[test]
    fn test_execution_result_includes_warnings() {
        let mut db = create_test_database();
        let plan = OperationPlan::new("Nothing")
            .add_warning("Warning 1")
            .add_warning("Warning 2");

        let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
        assert_eq!(result.warnings, vec!["Warning 1", "Warning 2"]);
        assert!(result.actions_taken.is_empty());
    }
}
