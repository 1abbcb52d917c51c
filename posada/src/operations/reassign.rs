//! Reassignment of reservations to other rooms.

use rusqlite::Connection;
use serde::Serialize;

use crate::availability::{is_room_available_excluding, list_available_rooms, RoomDescriptor};
use crate::catalog::RoomId;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Rooms that could take `reservation` instead of its current one.
///
/// Same hotel, free on the reservation date, large enough for the party,
/// and not the room currently assigned. A reservation with no room has no
/// hotel context and gets no alternatives.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn find_alternatives(
    conn: &Connection,
    reservation: &Reservation,
) -> Result<Vec<RoomDescriptor>> {
    let Some(current) = reservation.room_id else {
        return Ok(Vec::new());
    };
    let Some(hotel) = Database::hotel_of_room(conn, current)? else {
        return Ok(Vec::new());
    };
    let mut rooms = list_available_rooms(conn, hotel, reservation.date, reservation.party_size)?;
    rooms.retain(|room| room.id != current);
    Ok(rooms)
}

/// What [`reassign`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReassignOutcome {
    /// The reservation now points at `to`.
    Moved {
        /// The previous room, if any.
        from: Option<RoomId>,
        /// The new room.
        to: RoomId,
    },
    /// The reservation was already in the requested room.
    Unchanged,
}

/// A reassignment plan generator.
pub struct ReassignPlan {
    reservation: ReservationId,
    room: RoomId,
}

impl ReassignPlan {
    /// Plans moving `reservation` to `room`.
    #[must_use]
    pub const fn new(reservation: ReservationId, room: RoomId) -> Self {
        Self { reservation, room }
    }

    /// Builds the plan, checking the target room.
    ///
    /// An empty plan means the reservation is already in the room.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reservation or room does not exist
    /// - The room belongs to another hotel than the current one
    /// - The room seats fewer people than the party
    /// - The room is held by another active reservation on the date
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = Database::require_reservation(conn, self.reservation)?;
        let target = Database::require_room(conn, self.room)?;
        let description = format!(
            "Move reservation {} to room {}",
            reservation.id, target.number
        );

        if reservation.room_id == Some(target.id) {
            return Ok(OperationPlan::new(description).add_warning(format!(
                "reservation {} is already in room {}",
                reservation.id, target.number
            )));
        }

        if let Some(current) = reservation.room_id {
            if let Some(hotel) = Database::hotel_of_room(conn, current)? {
                if hotel != target.hotel_id {
                    return Err(Error::validation(
                        "room",
                        format!(
                            "room {} belongs to hotel {}, reservation {} is in hotel {hotel}",
                            target.id, target.hotel_id, reservation.id
                        ),
                    ));
                }
            }
        }

        if !target.capacity.fits(reservation.party_size) {
            return Err(Error::InsufficientCapacity {
                room: target.id,
                capacity: target.capacity,
                party_size: reservation.party_size,
            });
        }

        if !is_room_available_excluding(conn, target.id, reservation.date, reservation.id)? {
            return Err(Error::RoomUnavailable {
                room: target.id,
                date: reservation.date,
            });
        }

        Ok(OperationPlan::new(description).add_action(PlanAction::ReassignRoom {
            reservation: reservation.id,
            from: reservation.room_id,
            to: target.id,
        }))
    }
}

/// Moves a reservation to another room of the same hotel.
///
/// The status never changes.
///
/// # Errors
///
/// Returns [`Error::NotFound`], a validation error for a room of another
/// hotel, [`Error::InsufficientCapacity`], or [`Error::RoomUnavailable`]
/// when the room is taken on the date, including by a booking that landed
/// after planning.
pub fn reassign(
    db: &mut Database,
    reservation: ReservationId,
    room: RoomId,
) -> Result<ReassignOutcome> {
    let plan = ReassignPlan::new(reservation, room).build_plan(db.connection())?;
    let Some(PlanAction::ReassignRoom { from, to, .. }) = plan.actions.first().cloned() else {
        return Ok(ReassignOutcome::Unchanged);
    };

    match PlanExecutor::new(db).execute(&plan) {
        Ok(_) => {
            log::debug!("reservation {reservation} moved to room {to}");
            Ok(ReassignOutcome::Moved { from, to })
        }
        Err(Error::ReservationConflict { room, date, .. }) => {
            Err(Error::RoomUnavailable { room, date })
        }
        Err(e) => Err(e),
    }
}
