//! Room generation for newly created hotels.
//!
//! Generated rooms are numbered `"1"..="N"` and draw their capacity from a
//! distribution skewed toward two-seat rooms. The random source is supplied
//! by the caller so that tests can seed it.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::{Capacity, RoomNumber};
use crate::error::{Error, Result};

/// Capacities a generated room may receive.
pub const CAPACITY_CHOICES: [u8; 4] = [1, 2, 3, 4];

/// Relative weight of each entry in [`CAPACITY_CHOICES`].
pub const CAPACITY_WEIGHTS: [u32; 4] = [1, 2, 1, 1];

/// Draws room capacities from the weighted distribution.
#[derive(Debug, Clone)]
pub struct CapacitySampler {
    index: WeightedIndex<u32>,
}

impl CapacitySampler {
    /// Creates a sampler over [`CAPACITY_CHOICES`].
    ///
    /// # Errors
    ///
    /// Returns an error if the weight table is unusable.
    pub fn new() -> Result<Self> {
        let index = WeightedIndex::new(CAPACITY_WEIGHTS)
            .map_err(|e| Error::validation("capacity_weights", e.to_string()))?;
        Ok(Self { index })
    }

    /// Draws one capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the drawn value is not a valid capacity, which
    /// cannot happen with the built-in table.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Capacity> {
        let seats = CAPACITY_CHOICES[self.index.sample(rng)];
        Capacity::try_from(u32::from(seats)).map_err(Error::from)
    }
}

/// A room that generation will insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRoom {
    /// Sequential room number.
    pub number: RoomNumber,
    /// Drawn capacity.
    pub capacity: Capacity,
}

/// Lays out `count` rooms numbered from one.
///
/// # Errors
///
/// Returns an error if a capacity cannot be drawn.
///
/// # Examples
///
/// ```
/// use posada::catalog::generator::layout_rooms;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let rooms = layout_rooms(3, &mut rng).unwrap();
/// let numbers: Vec<_> = rooms.iter().map(|r| r.number.as_str().to_string()).collect();
/// assert_eq!(numbers, ["1", "2", "3"]);
/// ```
pub fn layout_rooms<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Result<Vec<GeneratedRoom>> {
    let sampler = CapacitySampler::new()?;
    (1..=count)
        .map(|n| -> Result<GeneratedRoom> {
            Ok(GeneratedRoom {
                number: RoomNumber::new(n.to_string())?,
                capacity: sampler.sample(rng)?,
            })
        })
        .collect()
}
