//! Cancellation and rejection.
//!
//! Both transitions end a reservation. Repeating either one is a no-op.

use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{ReservationId, ReservationStatus};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// What [`cancel`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "status", rename_all = "snake_case")]
pub enum CancelOutcome {
    /// The reservation was cancelled from the given status.
    Cancelled(ReservationStatus),
    /// The reservation had already ended with the given status.
    AlreadyTerminal(ReservationStatus),
}

/// What [`reject`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectOutcome {
    /// The pending reservation was rejected.
    Rejected,
    /// The reservation was rejected already.
    AlreadyRejected,
}

/// Plans a transition that ends a reservation.
pub struct TerminatePlan {
    reservation: ReservationId,
    to: ReservationStatus,
}

impl TerminatePlan {
    /// Plans cancelling `reservation`.
    #[must_use]
    pub const fn cancel(reservation: ReservationId) -> Self {
        Self {
            reservation,
            to: ReservationStatus::Cancelled,
        }
    }

    /// Plans rejecting `reservation`.
    #[must_use]
    pub const fn reject(reservation: ReservationId) -> Self {
        Self {
            reservation,
            to: ReservationStatus::Rejected,
        }
    }

    /// Builds the plan.
    ///
    /// Cancelling accepts any active status; rejecting only pending. A
    /// reservation already in a terminal status yields an empty plan when
    /// the request would be a repeat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or
    /// [`Error::InvalidTransition`] when rejecting a reservation that is not
    /// pending or already rejected.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = Database::require_reservation(conn, self.reservation)?;
        let verb = match self.to {
            ReservationStatus::Rejected => "Reject",
            _ => "Cancel",
        };
        let plan = OperationPlan::new(format!("{verb} reservation {}", reservation.id));
        let from = reservation.status;

        let allowed = match self.to {
            ReservationStatus::Rejected => from == ReservationStatus::Pending,
            _ => from.is_active(),
        };
        if allowed {
            return Ok(plan.add_action(PlanAction::UpdateStatus {
                reservation: reservation.id,
                from,
                to: self.to,
            }));
        }

        let repeat = match self.to {
            ReservationStatus::Rejected => from == ReservationStatus::Rejected,
            _ => from.is_terminal(),
        };
        if repeat {
            return Ok(plan.add_warning(format!(
                "reservation {} is already {from}",
                reservation.id
            )));
        }

        Err(Error::InvalidTransition {
            reservation: reservation.id,
            from,
            to: self.to,
        })
    }
}

/// Cancels a pending or confirmed reservation.
///
/// Cancelling a reservation that already ended changes nothing.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown id, or a lock/database error.
pub fn cancel(db: &mut Database, reservation: ReservationId) -> Result<CancelOutcome> {
    // A concurrent confirm can move pending to confirmed between planning
    // and execution; the second attempt plans from the new status.
    for _ in 0..2 {
        let plan = TerminatePlan::cancel(reservation).build_plan(db.connection())?;
        let Some(PlanAction::UpdateStatus { from, .. }) = plan.actions.first().cloned() else {
            let current = Database::require_reservation(db.connection(), reservation)?;
            return Ok(CancelOutcome::AlreadyTerminal(current.status));
        };

        match PlanExecutor::new(db).execute(&plan) {
            Ok(_) => {
                log::debug!("reservation {reservation} cancelled from {from}");
                return Ok(CancelOutcome::Cancelled(from));
            }
            Err(Error::InvalidTransition { from: now, .. }) if now.is_terminal() => {
                return Ok(CancelOutcome::AlreadyTerminal(now));
            }
            Err(Error::InvalidTransition { .. }) => continue,
            Err(e) => return Err(e),
        }
    }

    let current = Database::require_reservation(db.connection(), reservation)?;
    Err(Error::InvalidTransition {
        reservation,
        from: current.status,
        to: ReservationStatus::Cancelled,
    })
}

/// Rejects a pending reservation.
///
/// # Errors
///
/// Returns [`Error::InvalidTransition`] unless the reservation is pending or
/// already rejected, [`Error::NotFound`] for an unknown id, or a
/// lock/database error.
pub fn reject(db: &mut Database, reservation: ReservationId) -> Result<RejectOutcome> {
    let plan = TerminatePlan::reject(reservation).build_plan(db.connection())?;
    if plan.is_empty() {
        return Ok(RejectOutcome::AlreadyRejected);
    }
    PlanExecutor::new(db).execute(&plan)?;
    log::debug!("reservation {reservation} rejected");
    Ok(RejectOutcome::Rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, create_test_guest, create_test_hotel, create_test_room,
        insert_test_reservation,
    };

    fn booked(status: ReservationStatus) -> (Database, ReservationId) {
        let db = create_test_database();
        let hotel = create_test_hotel(&db, "Sol");
        let room = create_test_room(&db, hotel, "1", 2);
        let guest = create_test_guest(&db, "Ana");
        let id = insert_test_reservation(&db, guest, Some(room), "2025-06-01", 1, status);
        (db, id)
    }

    fn status(db: &Database, id: ReservationId) -> ReservationStatus {
        Database::require_reservation(db.connection(), id)
            .unwrap()
            .status
    }

    #[test]
    fn test_cancel_is_idempotent() {
        for initial in [ReservationStatus::Pending, ReservationStatus::Confirmed] {
            let (mut db, id) = booked(initial);
            assert_eq!(
                cancel(&mut db, id).unwrap(),
                CancelOutcome::Cancelled(initial)
            );
            assert_eq!(status(&db, id), ReservationStatus::Cancelled);

            let modified = Database::require_reservation(db.connection(), id)
                .unwrap()
                .modified_at;
            assert_eq!(
                cancel(&mut db, id).unwrap(),
                CancelOutcome::AlreadyTerminal(ReservationStatus::Cancelled)
            );
            assert_eq!(
                Database::require_reservation(db.connection(), id)
                    .unwrap()
                    .modified_at,
                modified
            );
        }
    }

    #[test]
    fn test_cancel_rejected_is_noop() {
        let (mut db, id) = booked(ReservationStatus::Pending);
        assert_eq!(reject(&mut db, id).unwrap(), RejectOutcome::Rejected);
        assert_eq!(
            cancel(&mut db, id).unwrap(),
            CancelOutcome::AlreadyTerminal(ReservationStatus::Rejected)
        );
        assert_eq!(status(&db, id), ReservationStatus::Rejected);
    }

    #[test]
    fn test_cancel_frees_the_room() {
        let (mut db, id) = booked(ReservationStatus::Confirmed);
        let reservation = Database::require_reservation(db.connection(), id).unwrap();
        let room = reservation.room_id.unwrap();

        cancel(&mut db, id).unwrap();
        assert!(
            Database::active_holder(db.connection(), room, reservation.date, None)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_reject_only_from_pending() {
        let (mut db, id) = booked(ReservationStatus::Confirmed);
        let err = reject(&mut db, id).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                from: ReservationStatus::Confirmed,
                to: ReservationStatus::Rejected,
                ..
            }
        ));

        let (mut db, id) = booked(ReservationStatus::Pending);
        assert_eq!(reject(&mut db, id).unwrap(), RejectOutcome::Rejected);
        assert_eq!(reject(&mut db, id).unwrap(), RejectOutcome::AlreadyRejected);

        let (mut db, id) = booked(ReservationStatus::Pending);
        cancel(&mut db, id).unwrap();
        assert!(matches!(
            reject(&mut db, id).unwrap_err(),
            Error::InvalidTransition { .. }
        ));
    }

    #[test]
    fn test_cancel_unknown() {
        let (mut db, _) = booked(ReservationStatus::Pending);
        assert!(matches!(
            cancel(&mut db, ReservationId::new(77)).unwrap_err(),
            Error::NotFound { .. }
        ));
    }
}
