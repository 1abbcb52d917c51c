//! Transaction management utilities.
//!
//! Every write that can change which reservation holds a room on a date runs
//! inside a `BEGIN IMMEDIATE` transaction. `SQLite` grants the write lock when
//! the transaction starts, so the availability check and the write that
//! follows it cannot interleave with another writer.

use std::time::Duration;

use rusqlite::{ErrorCode, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;
use super::schema::ACTIVE_SLOT_INDEX;

/// Returns `true` if `err` reports a locked or busy database.
pub(crate) fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::DatabaseBusy || e.code == ErrorCode::DatabaseLocked
    )
}

/// Returns `true` if `err` is a violation of the room-date exclusivity index.
pub(crate) fn is_active_slot_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, message) if e.code == ErrorCode::ConstraintViolation => {
            message.as_deref().is_some_and(|m| {
                m.contains(ACTIVE_SLOT_INDEX)
                    || m.contains("reservations.room_id, reservations.reservation_date")
            })
        }
        _ => false,
    }
}

/// Returns `true` if `err` is any UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Maps busy errors to [`Error::LockTimeout`] and passes everything else through.
pub(crate) fn classify(err: rusqlite::Error, waited: Duration) -> Error {
    if is_busy(&err) {
        Error::LockTimeout {
            seconds: waited.as_secs().max(1),
        }
    } else {
        Error::Database(err)
    }
}

/// Like [`classify`] for an error that was already converted.
pub(crate) fn classify_error(err: Error, waited: Duration) -> Error {
    match err {
        Error::Database(inner) => classify(inner, waited),
        other => other,
    }
}

impl Database {
    /// Begins a `BEGIN IMMEDIATE` transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer holds the lock for
    /// longer than the busy timeout, or a database error otherwise.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use posada::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/posada.db")).unwrap();
    /// let tx = db.begin_immediate().unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        let waited = self.config().busy_timeout;
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| classify(e, waited))
    }

    /// Runs `f` inside an immediate transaction, committing on success.
    ///
    /// The transaction rolls back when `f` fails.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a lock/database error from starting or
    /// committing the transaction.
    pub fn with_immediate_transaction<T>(
        &mut self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let waited = self.config().busy_timeout;
        let tx = self.begin_immediate()?;
        let value = f(&tx).map_err(|e| classify_error(e, waited))?;
        tx.commit().map_err(|e| classify(e, waited))?;
        Ok(value)
    }
}
