//! Cancel, bulk-cancel and reject commands.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, print_json, resolve_format, FormatArg, GlobalOptions,
};
use clap::Parser;
use posada::config::OutputFormat;
use posada::operations::{bulk_cancel, cancel, reject, RejectOutcome};
use posada::{CancelOutcome, ReservationId};

/// Cancel a pending or confirmed reservation.
#[derive(Parser)]
pub struct CancelCommand {
    /// Reservation id
    pub id: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match cancel(&mut db, ReservationId::new(self.id))? {
            CancelOutcome::Cancelled(from) => {
                println!("Cancelled reservation {} (was {from})", self.id);
            }
            CancelOutcome::AlreadyTerminal(status) => {
                println!("Reservation {} is already {status}; nothing to do", self.id);
            }
        }
        Ok(())
    }
}

/// Cancel several reservations, each on its own.
#[derive(Parser)]
pub struct BulkCancelCommand {
    /// Reservation ids
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<i64>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl BulkCancelCommand {
    /// Execute the bulk-cancel command.
    ///
    /// Fails with a business-rule exit code when any id was not cancelled,
    /// after reporting the ones that were.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let ids: Vec<ReservationId> = self.ids.iter().copied().map(ReservationId::new).collect();
        let result = bulk_cancel(&mut db, &ids);

        if resolve_format(self.format, &config) == OutputFormat::Json {
            print_json(&result)?;
        } else {
            println!(
                "Cancelled {} of {} reservation(s)",
                result.cancelled,
                ids.len()
            );
            for failure in &result.failures {
                println!("  {}: {}", failure.id, failure.reason);
            }
        }

        if result.is_complete() {
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "{} reservation(s) were not cancelled",
                result.failures.len()
            )))
        }
    }
}

/// Reject a pending reservation.
#[derive(Parser)]
pub struct RejectCommand {
    /// Reservation id
    pub id: i64,
}

impl RejectCommand {
    /// Execute the reject command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match reject(&mut db, ReservationId::new(self.id))? {
            RejectOutcome::Rejected => println!("Rejected reservation {}", self.id),
            RejectOutcome::AlreadyRejected => {
                println!("Reservation {} was already rejected", self.id);
            }
        }
        Ok(())
    }
}
