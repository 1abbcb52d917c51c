//! Book command implementation.
//!
//! Guests booking for themselves go through the booking window and start
//! pending; `--staff` bookings skip the window and start confirmed.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, or_dash, parse_date, today, GlobalOptions};
use clap::Args;
use posada::guest::GuestResolution;
use posada::{
    Database, GuestId, GuestInput, GuestRef, HotelId, PartySize, PlanExecutor, ReservationOrigin,
    ReserveOptions, ReservePlan, RoomId,
};

/// Book a room for one night.
#[derive(Args)]
pub struct BookCommand {
    /// Hotel id
    #[arg(long)]
    pub hotel: i64,

    /// Night to book (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Number of people
    #[arg(long)]
    pub party_size: u32,

    /// Specific room id (default: smallest free room that fits)
    #[arg(long, value_name = "ROOM_ID")]
    pub room: Option<i64>,

    /// Existing guest id
    #[arg(
        long,
        value_name = "GUEST_ID",
        conflicts_with_all = ["name", "email", "phone"],
        required_unless_present = "name"
    )]
    pub guest_id: Option<i64>,

    /// Guest name
    #[arg(long, requires_all = ["email", "phone"])]
    pub name: Option<String>,

    /// Guest email, which identifies returning guests
    #[arg(long, requires = "name")]
    pub email: Option<String>,

    /// Guest phone
    #[arg(long, requires = "name")]
    pub phone: Option<String>,

    /// Book as staff: no booking window, starts confirmed
    #[arg(long)]
    pub staff: bool,

    /// Admin notes
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Preview actions without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    fn guest(&self) -> Result<GuestRef, CliError> {
        if let Some(id) = self.guest_id {
            return Ok(GuestRef::Existing(GuestId::new(id)));
        }
        match (&self.name, &self.email, &self.phone) {
            (Some(name), Some(email), Some(phone)) => GuestInput::new(name, email, phone)
                .map(GuestRef::Details)
                .map_err(|e| CliError::InvalidArguments(e.to_string())),
            _ => Err(CliError::InvalidArguments(
                "either --guest-id or --name, --email and --phone is required".to_string(),
            )),
        }
    }

    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;
        let party_size = PartySize::try_from(self.party_size)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        let origin = if self.staff {
            ReservationOrigin::Staff
        } else {
            ReservationOrigin::SelfService
        };

        let options = ReserveOptions::new(HotelId::new(self.hotel), date, party_size, self.guest()?)
            .with_room(self.room.map(RoomId::new))
            .with_origin(origin)
            .with_notes(self.notes.as_str())
            .with_booking_window(origin == ReservationOrigin::SelfService);

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let plan = ReservePlan::new(options, &config).build_plan(db.connection(), today())?;

        if self.dry_run {
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in plan.actions.iter().enumerate() {
                    eprintln!("  {}. {}", i + 1, action.description());
                }
                for warning in &plan.warnings {
                    eprintln!("Warning: {warning}");
                }
            }
            return Ok(());
        }

        let result = PlanExecutor::new(&mut db).execute(&plan)?;
        if let Some((guest, GuestResolution::Created)) = result.guest {
            global.logger.info(&format!("Registered guest {guest}"));
        }
        if let Some(id) = result.reservation {
            let reservation = Database::require_reservation(db.connection(), id)?;
            println!(
                "{} {} room {}",
                reservation.id,
                reservation.status,
                or_dash(reservation.room_id)
            );
        }
        if !global.quiet {
            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
        }
        Ok(())
    }
}
