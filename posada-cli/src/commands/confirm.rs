//! Confirm and bulk-confirm commands.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, print_json, resolve_format, FormatArg, GlobalOptions,
};
use clap::Parser;
use posada::config::OutputFormat;
use posada::operations::{bulk_confirm, confirm};
use posada::{ConfirmOutcome, ReservationId};

/// Confirm a pending reservation.
#[derive(Parser)]
pub struct ConfirmCommand {
    /// Reservation id
    pub id: i64,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match confirm(&mut db, ReservationId::new(self.id))? {
            ConfirmOutcome::Confirmed => println!("Confirmed reservation {}", self.id),
            ConfirmOutcome::AlreadyConfirmed => {
                println!("Reservation {} was already confirmed", self.id);
            }
        }
        Ok(())
    }
}

/// Confirm several pending reservations, each on its own.
#[derive(Parser)]
pub struct BulkConfirmCommand {
    /// Reservation ids
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<i64>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl BulkConfirmCommand {
    /// Execute the bulk-confirm command.
    ///
    /// Fails with a business-rule exit code when any id was not promoted,
    /// after reporting the ones that were.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let ids: Vec<ReservationId> = self.ids.iter().copied().map(ReservationId::new).collect();
        let result = bulk_confirm(&mut db, &ids);

        if resolve_format(self.format, &config) == OutputFormat::Json {
            print_json(&result)?;
        } else {
            println!(
                "Confirmed {} of {} reservation(s)",
                result.confirmed,
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
                "{} reservation(s) were not confirmed",
                result.failures.len()
            )))
        }
    }
}
