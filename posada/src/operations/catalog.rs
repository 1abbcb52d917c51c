//! Hotel creation and room generation.
//!
//! Room generation is an explicit follow-up step after the hotel is
//! persisted. It has its own transaction, so a failed generation leaves the
//! hotel in place.

use rand::Rng;
use serde::Serialize;

use crate::catalog::generator::layout_rooms;
use crate::catalog::{Hotel, HotelId, NewHotel};
use crate::database::Database;
use crate::error::Result;

/// What happened to the rooms of a hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum RoomGeneration {
    /// This many rooms were created.
    Generated(usize),
    /// The hotel already had this many rooms; nothing was created.
    AlreadyPresent(usize),
    /// Generation was not requested.
    Skipped,
    /// Generation failed; the hotel was kept.
    Failed(String),
}

/// Result of [`create_hotel`].
#[derive(Debug, Clone, Serialize)]
pub struct HotelCreated {
    /// The persisted hotel.
    pub hotel: Hotel,
    /// What room generation did.
    pub rooms: RoomGeneration,
}

/// Persists a hotel, then generates its rooms if it asks for them.
///
/// # Errors
///
/// Returns an error only if the hotel itself cannot be persisted. A room
/// generation failure is logged and reported as [`RoomGeneration::Failed`].
///
/// # Examples
///
/// ```no_run
/// use posada::operations::create_hotel;
/// use posada::{Database, DatabaseConfig, NewHotel};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/posada.db")).unwrap();
/// let mut rng = rand::thread_rng();
/// let created = create_hotel(&mut db, &NewHotel::new("Sol", "Calle 1", 5), &mut rng).unwrap();
/// println!("{} -> {:?}", created.hotel.name, created.rooms);
/// ```
pub fn create_hotel<R: Rng + ?Sized>(
    db: &mut Database,
    hotel: &NewHotel,
    rng: &mut R,
) -> Result<HotelCreated> {
    let id = db.with_immediate_transaction(|tx| Database::insert_hotel(tx, hotel))?;
    let stored = Database::require_hotel(db.connection(), id)?;
    log::debug!("created hotel {id} ({})", stored.name);

    let rooms = if stored.auto_generate_rooms {
        match generate_rooms(db, id, rng) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("room generation for hotel {id} failed: {e}");
                RoomGeneration::Failed(e.to_string())
            }
        }
    } else {
        RoomGeneration::Skipped
    };

    Ok(HotelCreated {
        hotel: stored,
        rooms,
    })
}

/// Creates the hotel's target number of rooms unless it already has rooms.
///
/// Runs in an immediate transaction so concurrent calls cannot both find the
/// hotel empty.
///
/// # Errors
///
/// Returns an error if the hotel does not exist or an insert fails; no
/// rooms are kept in that case.
pub fn generate_rooms<R: Rng + ?Sized>(
    db: &mut Database,
    hotel: HotelId,
    rng: &mut R,
) -> Result<RoomGeneration> {
    db.with_immediate_transaction(|tx| {
        let hotel = Database::require_hotel(tx, hotel)?;
        let existing = Database::room_count(tx, hotel.id)?;
        if existing > 0 {
            log::debug!("hotel {} already has {existing} room(s)", hotel.id);
            return Ok(RoomGeneration::AlreadyPresent(existing));
        }

        let layout = layout_rooms(hotel.target_room_count, rng)?;
        for room in &layout {
            Database::insert_room(tx, hotel.id, &room.number, room.capacity)?;
        }
        log::debug!("generated {} room(s) for hotel {}", layout.len(), hotel.id);
        Ok(RoomGeneration::Generated(layout.len()))
    })
}
