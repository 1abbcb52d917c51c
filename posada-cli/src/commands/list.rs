//! List command implementation.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, or_dash, parse_date, resolve_format, today, FormatArg,
    GlobalOptions, Listing,
};
use clap::Parser;
use posada::database::ReservationFilter;
use posada::{Database, GuestId, HotelId, ReservationStatus};

const HEADERS: [&str; 7] = ["id", "date", "status", "room", "guest", "party", "priority"];

/// List reservations, newest date first.
#[derive(Parser)]
pub struct ListCommand {
    /// Only this status (pending, confirmed, cancelled, rejected, completed)
    #[arg(long)]
    pub status: Option<String>,

    /// Only rooms of this hotel
    #[arg(long, value_name = "HOTEL_ID")]
    pub hotel: Option<i64>,

    /// Only this night (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Only this guest
    #[arg(long, value_name = "GUEST_ID")]
    pub guest: Option<i64>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl ListCommand {
    fn filter(&self) -> Result<ReservationFilter, CliError> {
        let mut filter = ReservationFilter::default();
        if let Some(status) = &self.status {
            let status: ReservationStatus = status
                .parse()
                .map_err(|e: posada::reservation::ValidationError| {
                    CliError::InvalidArguments(e.to_string())
                })?;
            filter = filter.status(status);
        }
        if let Some(hotel) = self.hotel {
            filter = filter.hotel(HotelId::new(hotel));
        }
        if let Some(date) = &self.date {
            filter = filter.date(parse_date(date)?);
        }
        if let Some(guest) = self.guest {
            filter = filter.guest(GuestId::new(guest));
        }
        Ok(filter)
    }

    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let filter = self.filter()?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservations = Database::list_reservations(db.connection(), &filter)?;
        let today = today();
        Listing::new(&HEADERS, &reservations, |r| {
            vec![
                r.id.to_string(),
                r.date.to_string(),
                r.status.to_string(),
                or_dash(r.room_id),
                r.guest_id.to_string(),
                r.party_size.to_string(),
                r.priority(today).to_string(),
            ]
        })
        .print(resolve_format(self.format, &config))
    }
}
