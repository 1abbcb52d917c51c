//! Room commands: add, list and delete.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, resolve_format, FormatArg, GlobalOptions, Listing,
};
use clap::Subcommand;
use posada::{Capacity, Database, HotelId, RoomId, RoomNumber};

const ROOM_HEADERS: [&str; 4] = ["id", "hotel", "number", "capacity"];

/// Manage rooms.
#[derive(Subcommand)]
pub enum RoomCommand {
    /// Add a room to a hotel
    Add {
        /// Hotel id
        #[arg(long)]
        hotel: i64,
        /// Room number, unique within the hotel
        #[arg(long)]
        number: String,
        /// Seats in the room
        #[arg(long)]
        capacity: u32,
    },
    /// List the rooms of a hotel
    List {
        /// Hotel id
        #[arg(long)]
        hotel: i64,
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },
    /// Delete a room; its reservations are kept without a room
    Delete {
        /// Room id
        id: i64,
    },
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self {
            Self::Add {
                hotel,
                number,
                capacity,
            } => {
                let number = RoomNumber::new(&number)
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
                let capacity = Capacity::try_from(capacity)
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
                let hotel = HotelId::new(hotel);
                let id = db.with_immediate_transaction(|tx| {
                    Database::insert_room(tx, hotel, &number, capacity)
                })?;
                println!("Added room {number} (id {id}) to hotel {hotel} with {capacity} seat(s)");
            }
            Self::List { hotel, format } => {
                let rooms = Database::list_rooms(db.connection(), HotelId::new(hotel))?;
                Listing::new(&ROOM_HEADERS, &rooms, |r| {
                    vec![
                        r.id.to_string(),
                        r.hotel_id.to_string(),
                        r.number.to_string(),
                        r.capacity.to_string(),
                    ]
                })
                .print(resolve_format(format, &config))?;
            }
            Self::Delete { id } => {
                let summary = db.delete_room(RoomId::new(id))?;
                println!(
                    "Deleted room {id}; {} reservation(s) left without a room",
                    summary.reservations_orphaned
                );
            }
        }
        Ok(())
    }
}
