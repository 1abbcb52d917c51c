//! Show and notes commands.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, or_dash, print_json, resolve_format,
    today, FormatArg, GlobalOptions,
};
use clap::Parser;
use posada::config::OutputFormat;
use posada::operations::update_notes;
use posada::{Database, Guest, Priority, Reservation, ReservationId, Room};
use serde::Serialize;

/// Show one reservation with its guest and room.
#[derive(Parser)]
pub struct ShowCommand {
    /// Reservation id
    pub id: i64,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

#[derive(Serialize)]
struct ReservationDetails {
    #[serde(flatten)]
    reservation: Reservation,
    guest: Guest,
    room: Option<Room>,
    priority: Priority,
    days_until: i64,
    estimated_total: u32,
    can_confirm: bool,
    can_cancel: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let conn = db.connection();
        let today = today();

        let reservation = Database::require_reservation(conn, ReservationId::new(self.id))?;
        let guest = Database::require_guest(conn, reservation.guest_id)?;
        let room = match reservation.room_id {
            Some(id) => Database::get_room(conn, id)?,
            None => None,
        };
        let details = ReservationDetails {
            guest,
            priority: reservation.priority(today),
            days_until: reservation.days_until(today),
            estimated_total: reservation.estimated_total(room.as_ref().map(|r| r.capacity)),
            can_confirm: Database::can_confirm(conn, &reservation)?,
            can_cancel: reservation.can_cancel(),
            room,
            reservation,
        };

        if resolve_format(self.format, &config) == OutputFormat::Json {
            return print_json(&details);
        }

        let r = &details.reservation;
        println!("Reservation {}", r.id);
        println!("  Status:    {}", r.status);
        println!(
            "  Date:      {} ({} day(s) from today)",
            r.date, details.days_until
        );
        println!("  Party:     {}", r.party_size);
        match &details.room {
            Some(room) => println!(
                "  Room:      {} (id {}, hotel {}, {} seat(s))",
                room.number, room.id, room.hotel_id, room.capacity
            ),
            None => println!("  Room:      {}", or_dash(r.room_id)),
        }
        println!(
            "  Guest:     {} <{}> {}",
            details.guest.name, details.guest.email, details.guest.phone
        );
        println!("  Priority:  {}", details.priority);
        println!("  Estimate:  {}", details.estimated_total);
        println!(
            "  Confirmable: {}",
            if details.can_confirm { "yes" } else { "no" }
        );
        println!(
            "  Cancellable: {}",
            if details.can_cancel { "yes" } else { "no" }
        );
        if !r.notes.is_empty() {
            println!("  Notes:     {}", r.notes);
        }
        println!("  Created:   {}", format_timestamp(r.created_at));
        println!("  Modified:  {}", format_timestamp(r.modified_at));
        Ok(())
    }
}

/// Replace the admin notes of a reservation.
#[derive(Parser)]
pub struct NotesCommand {
    /// Reservation id
    pub id: i64,

    /// New notes; an empty string clears them
    pub text: String,
}

impl NotesCommand {
    /// Execute the notes command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        update_notes(&mut db, ReservationId::new(self.id), &self.text)?;
        println!("Updated notes of reservation {}", self.id);
        Ok(())
    }
}
