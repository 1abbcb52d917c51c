//! Confirmation of pending reservations.
//!
//! Availability is re-checked when the reservation is confirmed, not when it
//! was booked. A confirmation that loses its room to another reservation
//! fails with the rooms the caller could move it to.

use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{ReservationId, ReservationStatus};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};
use super::reassign::find_alternatives;

/// What [`confirm`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmOutcome {
    /// The reservation moved from pending to confirmed.
    Confirmed,
    /// The reservation was confirmed already; nothing changed.
    AlreadyConfirmed,
}

/// A confirmation plan generator.
pub struct ConfirmPlan {
    reservation: ReservationId,
}

impl ConfirmPlan {
    /// Plans confirming `reservation`.
    #[must_use]
    pub const fn new(reservation: ReservationId) -> Self {
        Self { reservation }
    }

    /// Builds the plan.
    ///
    /// An already confirmed reservation yields an empty plan with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, a validation error if
    /// no room is assigned, or [`Error::InvalidTransition`] from a terminal
    /// status.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = Database::require_reservation(conn, self.reservation)?;
        let plan = OperationPlan::new(format!("Confirm reservation {}", reservation.id));

        match reservation.status {
            ReservationStatus::Confirmed => Ok(plan.add_warning(format!(
                "reservation {} is already confirmed",
                reservation.id
            ))),
            ReservationStatus::Pending => {
                if reservation.room_id.is_none() {
                    return Err(Error::validation(
                        "room_id",
                        format!("reservation {} has no room assigned", reservation.id),
                    ));
                }
                Ok(plan.add_action(PlanAction::UpdateStatus {
                    reservation: reservation.id,
                    from: ReservationStatus::Pending,
                    to: ReservationStatus::Confirmed,
                }))
            }
            other => Err(Error::InvalidTransition {
                reservation: reservation.id,
                from: other,
                to: ReservationStatus::Confirmed,
            }),
        }
    }
}

/// Confirms a pending reservation.
///
/// # Errors
///
/// Returns [`Error::RoomNoLongerAvailable`] with the alternative rooms
/// (possibly none) when another active reservation holds the room on the
/// date; the reservation is left unchanged. Also fails as
/// [`ConfirmPlan::build_plan`] does.
///
/// # Examples
///
/// ```no_run
/// use posada::operations::{confirm, ConfirmOutcome};
/// use posada::{Database, DatabaseConfig, Error, ReservationId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/posada.db")).unwrap();
/// match confirm(&mut db, ReservationId::new(7)) {
///     Ok(ConfirmOutcome::Confirmed) => println!("confirmed"),
///     Ok(ConfirmOutcome::AlreadyConfirmed) => println!("nothing to do"),
///     Err(Error::RoomNoLongerAvailable { alternatives, .. }) => {
///         println!("try one of {alternatives:?}");
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub fn confirm(db: &mut Database, reservation: ReservationId) -> Result<ConfirmOutcome> {
    let plan = ConfirmPlan::new(reservation).build_plan(db.connection())?;
    if plan.is_empty() {
        return Ok(ConfirmOutcome::AlreadyConfirmed);
    }

    match PlanExecutor::new(db).execute(&plan) {
        Ok(_) => {
            log::debug!("reservation {reservation} confirmed");
            Ok(ConfirmOutcome::Confirmed)
        }
        Err(Error::ReservationConflict { room, date, holder }) => {
            log::debug!(
                "reservation {reservation} lost room {room} on {date} to {}",
                holder.map_or_else(|| "another reservation".to_string(), |h| h.to_string())
            );
            let current = Database::require_reservation(db.connection(), reservation)?;
            let alternatives = find_alternatives(db.connection(), &current)?
                .into_iter()
                .map(|r| r.id)
                .collect();
            Err(Error::RoomNoLongerAvailable {
                reservation,
                room,
                date,
                alternatives,
            })
        }
        Err(Error::InvalidTransition {
            from: ReservationStatus::Confirmed,
            ..
        }) => Ok(ConfirmOutcome::AlreadyConfirmed),
        Err(e) => Err(e),
    }
}
