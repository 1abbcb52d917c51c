//! Reservation operations using the plan-execute pattern.
//!
//! Every mutating operation is split into two phases:
//! 1. **Planning**: reads the store, validates the request, builds a plan
//! 2. **Execution**: applies the plan in one immediate transaction,
//!    re-checking status, capacity and room-date exclusivity before each write
//!
//! Plans can be inspected or executed in dry-run mode before anything is
//! written.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use posada::config::ConfigBuilder;
//! use posada::operations::{confirm, GuestRef, PlanExecutor, ReserveOptions, ReservePlan};
//! use posada::{Database, DatabaseConfig, GuestInput, HotelId, PartySize};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/posada.db")).unwrap();
//! let config = ConfigBuilder::new().build().unwrap();
//! let guest = GuestInput::new("Ana Ruiz", "ana@example.com", "555-0101").unwrap();
//! let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
//!
//! let options = ReserveOptions::new(
//!     HotelId::new(1),
//!     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//!     PartySize::try_from(2).unwrap(),
//!     GuestRef::Details(guest),
//! );
//!
//! // Generate plan
//! let plan = ReservePlan::new(options, &config)
//!     .build_plan(db.connection(), today)
//!     .unwrap();
//!
//! // Execute plan
//! let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
//! confirm(&mut db, result.reservation.unwrap()).unwrap();
//! ```

pub mod bulk;
pub mod cancel;
pub mod catalog;
pub mod confirm;
pub mod executor;
pub mod notes;
pub mod plan;
pub mod reassign;
pub mod reserve;

#[cfg(test)]
mod proptests;

pub use bulk::{bulk_cancel, bulk_confirm, BulkCancelResult, BulkConfirmResult, BulkFailure};
pub use cancel::{cancel, reject, CancelOutcome, RejectOutcome, TerminatePlan};
pub use catalog::{create_hotel, generate_rooms, HotelCreated, RoomGeneration};
pub use confirm::{confirm, ConfirmOutcome, ConfirmPlan};
pub use executor::{ExecutionResult, PlanExecutor};
pub use notes::update_notes;
pub use plan::{GuestRef, OperationPlan, PlanAction, ReservationRequest};
pub use reassign::{find_alternatives, reassign, ReassignOutcome, ReassignPlan};
pub use reserve::{ReservationOrigin, ReserveOptions, ReservePlan};
