//! Admin notes.

use crate::database::Database;
use crate::error::Result;
use crate::reservation::{validate_notes, ReservationId};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Replaces the admin notes of a reservation, whatever its status.
///
/// Surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns a validation error for overlong notes, [`crate::Error::NotFound`]
/// for an unknown id, or a lock/database error.
pub fn update_notes(db: &mut Database, reservation: ReservationId, notes: &str) -> Result<()> {
    let notes = notes.trim();
    validate_notes(notes)?;
    Database::require_reservation(db.connection(), reservation)?;

    let plan = OperationPlan::new(format!("Update notes of reservation {reservation}")).add_action(
        PlanAction::UpdateNotes {
            reservation,
            notes: notes.to_string(),
        },
    );
    PlanExecutor::new(db).execute(&plan)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, create_test_guest, insert_test_reservation,
    };
    use crate::error::Error;
    use crate::reservation::{ReservationStatus, MAX_NOTES_LEN};

    #[test]
    fn test_notes_editable_after_cancellation() {
        let mut db = create_test_database();
        let guest = create_test_guest(&db, "Ana");
        let id = insert_test_reservation(
            &db,
            guest,
            None,
            "2025-06-01",
            1,
            ReservationStatus::Pending,
        );
        Database::update_reservation_status(
            db.connection(),
            id,
            ReservationStatus::Pending,
            ReservationStatus::Cancelled,
        )
        .unwrap();

        update_notes(&mut db, id, "  refunded by phone  ").unwrap();
        assert_eq!(
            Database::require_reservation(db.connection(), id).unwrap().notes,
            "refunded by phone"
        );
    }

    #[test]
    fn test_overlong_notes_rejected() {
        let mut db = create_test_database();
        let guest = create_test_guest(&db, "Ana");
        let id = insert_test_reservation(
            &db,
            guest,
            None,
            "2025-06-01",
            1,
            ReservationStatus::Pending,
        );

        let long = "x".repeat(MAX_NOTES_LEN + 1);
        let err = update_notes(&mut db, id, &long).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "notes"));
    }
}
