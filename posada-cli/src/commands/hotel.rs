//! Hotel commands: add, list, show, delete and generate-rooms.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, or_dash, print_json, resolve_format,
    today, FormatArg, GlobalOptions, Listing,
};
use clap::{Args, Subcommand};
use posada::config::OutputFormat;
use posada::dashboard::upcoming_for_hotel;
use posada::operations::{create_hotel, generate_rooms, RoomGeneration};
use posada::{Database, Hotel, HotelId, NewHotel};
use serde::Serialize;

const HOTEL_HEADERS: [&str; 5] = ["id", "name", "address", "rooms", "created_at"];
const ROOM_HEADERS: [&str; 3] = ["id", "number", "capacity"];

/// Manage hotels.
#[derive(Subcommand)]
pub enum HotelCommand {
    /// Add a hotel and generate its rooms
    Add(AddHotel),
    /// List hotels
    List {
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },
    /// Show a hotel with its rooms and the coming week
    Show {
        /// Hotel id
        id: i64,
        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },
    /// Delete a hotel and its rooms
    Delete {
        /// Hotel id
        id: i64,
    },
    /// Generate rooms for a hotel that has none
    GenerateRooms {
        /// Hotel id
        id: i64,
    },
}

/// Arguments of `hotel add`.
#[derive(Args)]
pub struct AddHotel {
    /// Hotel name
    #[arg(long)]
    pub name: String,

    /// Postal address
    #[arg(long)]
    pub address: String,

    /// Number of rooms to generate
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    pub rooms: u32,

    /// Do not generate rooms now
    #[arg(long)]
    pub no_generate: bool,
}

#[derive(Serialize)]
struct HotelRow {
    #[serde(flatten)]
    hotel: Hotel,
    rooms: usize,
}

fn describe_generation(outcome: &RoomGeneration) -> String {
    match outcome {
        RoomGeneration::Generated(n) => format!("{n} room(s) generated"),
        RoomGeneration::AlreadyPresent(n) => format!("already has {n} room(s)"),
        RoomGeneration::Skipped => "room generation skipped".to_string(),
        RoomGeneration::Failed(reason) => format!("room generation failed: {reason}"),
    }
}

impl HotelCommand {
    /// Execute the hotel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        match self {
            Self::Add(args) => {
                let hotel = NewHotel::new(args.name, args.address, args.rooms)
                    .auto_generate_rooms(!args.no_generate && config.auto_generates_rooms());
                let created = create_hotel(&mut db, &hotel, &mut rand::thread_rng())?;
                if let RoomGeneration::Failed(reason) = &created.rooms {
                    global.logger.warn(&format!(
                        "hotel {} was created but its rooms were not: {reason}",
                        created.hotel.id
                    ));
                }
                println!(
                    "Created hotel {} ({}): {}",
                    created.hotel.id,
                    created.hotel.name,
                    describe_generation(&created.rooms)
                );
            }
            Self::List { format } => {
                let rows = Database::list_hotels(db.connection())?
                    .into_iter()
                    .map(|hotel| {
                        let rooms = Database::room_count(db.connection(), hotel.id)?;
                        Ok(HotelRow { hotel, rooms })
                    })
                    .collect::<posada::Result<Vec<_>>>()?;
                Listing::new(&HOTEL_HEADERS, &rows, |row| {
                    vec![
                        row.hotel.id.to_string(),
                        row.hotel.name.clone(),
                        row.hotel.address.clone(),
                        row.rooms.to_string(),
                        format_timestamp(row.hotel.created_at),
                    ]
                })
                .print(resolve_format(format, &config))?;
            }
            Self::Show { id, format } => {
                let id = HotelId::new(id);
                let hotel = Database::require_hotel(db.connection(), id)?;
                let rooms = Database::list_rooms(db.connection(), id)?;
                let upcoming = upcoming_for_hotel(db.connection(), id, today())?;

                if resolve_format(format, &config) == OutputFormat::Json {
                    return print_json(&serde_json::json!({
                        "hotel": hotel,
                        "rooms": rooms,
                        "upcoming": upcoming,
                    }));
                }

                println!("Hotel {}: {}", hotel.id, hotel.name);
                println!("Address: {}", hotel.address);
                println!(
                    "Rooms: {} (target {})",
                    rooms.len(),
                    hotel.target_room_count
                );
                Listing::new(&ROOM_HEADERS, &rooms, |r| {
                    vec![
                        r.id.to_string(),
                        r.number.to_string(),
                        r.capacity.to_string(),
                    ]
                })
                .print(OutputFormat::Table)?;
                println!("Next 7 days: {} active reservation(s)", upcoming.len());
                for r in &upcoming {
                    println!(
                        "  {} {} room {} party {} {}",
                        r.date,
                        r.id,
                        or_dash(r.room_id),
                        r.party_size,
                        r.status
                    );
                }
            }
            Self::Delete { id } => {
                let summary = db.delete_hotel(HotelId::new(id))?;
                println!(
                    "Deleted hotel {id} with {} room(s); {} reservation(s) left without a room",
                    summary.rooms_removed, summary.reservations_orphaned
                );
            }
            Self::GenerateRooms { id } => {
                let outcome = generate_rooms(&mut db, HotelId::new(id), &mut rand::thread_rng())?;
                println!("Hotel {id}: {}", describe_generation(&outcome));
            }
        }
        Ok(())
    }
}
