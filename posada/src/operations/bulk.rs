//! Bulk confirmation and cancellation.

use serde::Serialize;

use crate::database::Database;
use crate::reservation::ReservationId;

use super::cancel::{cancel, CancelOutcome};
use super::confirm::{confirm, ConfirmOutcome};

/// Why one id of a bulk request was not processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkFailure {
    /// The reservation.
    pub id: ReservationId,
    /// Human-readable reason.
    pub reason: String,
}

/// Outcome of [`bulk_confirm`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkConfirmResult {
    /// Number of reservations moved from pending to confirmed.
    pub confirmed: usize,
    /// Ids that were not promoted, in request order.
    pub failures: Vec<BulkFailure>,
}

impl BulkConfirmResult {
    /// Returns `true` if every id was promoted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Confirms each reservation independently.
///
/// Every id runs in its own transaction, so one failure never undoes the
/// others. Reservations that were already confirmed count as failures
/// because they were not promoted by this call.
///
/// # Examples
///
/// ```no_run
/// use posada::operations::bulk_confirm;
/// use posada::{Database, DatabaseConfig, ReservationId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/posada.db")).unwrap();
/// let result = bulk_confirm(&mut db, &[ReservationId::new(1), ReservationId::new(2)]);
/// println!("{} confirmed, {} failed", result.confirmed, result.failures.len());
/// ```
pub fn bulk_confirm(db: &mut Database, ids: &[ReservationId]) -> BulkConfirmResult {
    let mut result = BulkConfirmResult::default();
    for &id in ids {
        match confirm(db, id) {
            Ok(ConfirmOutcome::Confirmed) => result.confirmed += 1,
            Ok(ConfirmOutcome::AlreadyConfirmed) => result.failures.push(BulkFailure {
                id,
                reason: "already confirmed".to_string(),
            }),
            Err(e) => {
                log::debug!("bulk confirm skipped reservation {id}: {e}");
                result.failures.push(BulkFailure {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }
    result
}

/// Outcome of [`bulk_cancel`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkCancelResult {
    /// Number of active reservations that were cancelled.
    pub cancelled: usize,
    /// Ids that were not cancelled, in request order.
    pub failures: Vec<BulkFailure>,
}

impl BulkCancelResult {
    /// Returns `true` if every id was cancelled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Cancels each reservation independently.
///
/// Like [`bulk_confirm`], each id gets its own transaction. Reservations
/// that had already ended are reported as failures with their status.
pub fn bulk_cancel(db: &mut Database, ids: &[ReservationId]) -> BulkCancelResult {
    let mut result = BulkCancelResult::default();
    for &id in ids {
        match cancel(db, id) {
            Ok(CancelOutcome::Cancelled(_)) => result.cancelled += 1,
            Ok(CancelOutcome::AlreadyTerminal(status)) => result.failures.push(BulkFailure {
                id,
                reason: format!("already {status}"),
            }),
            Err(e) => {
                log::debug!("bulk cancel skipped reservation {id}: {e}");
                result.failures.push(BulkFailure {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }
    result
}
