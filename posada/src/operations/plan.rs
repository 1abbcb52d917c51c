//! Plan types for reservation operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use chrono::NaiveDate;

use crate::catalog::RoomId;
use crate::guest::{GuestId, GuestInput};
use crate::reservation::{PartySize, ReservationId, ReservationStatus};

/// Who a new reservation is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestRef {
    /// A guest already in the directory.
    Existing(GuestId),
    /// Contact details, resolved by email when the plan executes.
    Details(GuestInput),
}

impl GuestRef {
    fn describe(&self) -> String {
        match self {
            Self::Existing(id) => format!("guest {id}"),
            Self::Details(input) => input.email().to_string(),
        }
    }
}

/// A reservation to be written by [`PlanAction::CreateReservation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// The guest.
    pub guest: GuestRef,
    /// The room chosen during planning.
    pub room: RoomId,
    /// The night being reserved.
    pub date: NaiveDate,
    /// Number of people.
    pub party_size: PartySize,
    /// Initial status, pending or confirmed.
    pub status: ReservationStatus,
    /// Admin notes.
    pub notes: String,
}

/// A single action to be taken during plan execution.
///
/// Each action corresponds to a write the executor performs after
/// re-checking the rules that depend on concurrently mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Insert a reservation, resolving the guest first.
    CreateReservation(ReservationRequest),

    /// Move a reservation between statuses.
    UpdateStatus {
        /// The reservation.
        reservation: ReservationId,
        /// The status observed during planning.
        from: ReservationStatus,
        /// The target status.
        to: ReservationStatus,
    },

    /// Point a reservation at another room.
    ReassignRoom {
        /// The reservation.
        reservation: ReservationId,
        /// The room observed during planning.
        from: Option<RoomId>,
        /// The new room.
        to: RoomId,
    },

    /// Replace the admin notes.
    UpdateNotes {
        /// The reservation.
        reservation: ReservationId,
        /// The new notes.
        notes: String,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(request) => format!(
                "Create {} reservation for {} in room {} on {} (party of {})",
                request.status,
                request.guest.describe(),
                request.room,
                request.date,
                request.party_size
            ),
            Self::UpdateStatus {
                reservation,
                from,
                to,
            } => format!("Move reservation {reservation} from {from} to {to}"),
            Self::ReassignRoom {
                reservation,
                from,
                to,
            } => match from {
                Some(from) => {
                    format!("Move reservation {reservation} from room {from} to room {to}")
                }
                None => format!("Assign room {to} to reservation {reservation}"),
            },
            Self::UpdateNotes { reservation, .. } => {
                format!("Update notes of reservation {reservation}")
            }
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use posada::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Confirm reservation 4");
    /// assert_eq!(plan.description, "Confirm reservation 4");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use posada::operations::{OperationPlan, PlanAction};
    /// use posada::{ReservationId, ReservationStatus};
    ///
    /// let plan = OperationPlan::new("Confirm").add_action(PlanAction::UpdateStatus {
    ///     reservation: ReservationId::new(4),
    ///     from: ReservationStatus::Pending,
    ///     to: ReservationStatus::Confirmed,
    /// });
    ///
    /// assert_eq!(plan.actions.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
