//! Reassign and alternatives commands.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, or_dash, resolve_format, FormatArg, GlobalOptions, Listing,
};
use clap::Parser;
use posada::operations::{find_alternatives, reassign, ReassignOutcome};
use posada::{Database, ReservationId, RoomId};

const HEADERS: [&str; 3] = ["id", "number", "capacity"];

/// Move an active reservation to another room of its hotel.
#[derive(Parser)]
pub struct ReassignCommand {
    /// Reservation id
    pub id: i64,

    /// Target room id
    #[arg(long, value_name = "ROOM_ID")]
    pub room: i64,
}

impl ReassignCommand {
    /// Execute the reassign command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match reassign(&mut db, ReservationId::new(self.id), RoomId::new(self.room))? {
            ReassignOutcome::Moved { from, to } => {
                println!(
                    "Moved reservation {} from room {} to room {to}",
                    self.id,
                    or_dash(from)
                );
            }
            ReassignOutcome::Unchanged => {
                println!("Reservation {} is already in room {}", self.id, self.room);
            }
        }
        Ok(())
    }
}

/// List rooms a reservation could be moved to.
#[derive(Parser)]
pub struct AlternativesCommand {
    /// Reservation id
    pub id: i64,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl AlternativesCommand {
    /// Execute the alternatives command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservation =
            Database::require_reservation(db.connection(), ReservationId::new(self.id))?;
        let rooms = find_alternatives(db.connection(), &reservation)?;
        if rooms.is_empty() {
            global.logger.warn(&format!(
                "no other room fits reservation {} on {}",
                reservation.id, reservation.date
            ));
        }

        Listing::new(&HEADERS, &rooms, |r| {
            vec![
                r.id.to_string(),
                r.number.to_string(),
                r.capacity.to_string(),
            ]
        })
        .print(resolve_format(self.format, &config))
    }
}
