//! Available command implementation.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_date, resolve_format, today, FormatArg,
    GlobalOptions, Listing,
};
use clap::Parser;
use posada::availability::list_available_rooms;
use posada::{HotelId, PartySize};

const HEADERS: [&str; 3] = ["id", "number", "capacity"];

/// List rooms of a hotel that are free on a date.
#[derive(Parser)]
pub struct AvailableCommand {
    /// Hotel id
    #[arg(long)]
    pub hotel: i64,

    /// Night to check (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Smallest acceptable room
    #[arg(long, default_value_t = 1)]
    pub min_capacity: u32,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl AvailableCommand {
    /// Execute the available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = self
            .date
            .as_deref()
            .map(parse_date)
            .transpose()?
            .unwrap_or_else(today);
        let min_capacity = PartySize::try_from(self.min_capacity)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let hotel = HotelId::new(self.hotel);
        let rooms = list_available_rooms(db.connection(), hotel, date, min_capacity)?;

        global
            .logger
            .debug(&format!("{} room(s) free on {date}", rooms.len()));
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
