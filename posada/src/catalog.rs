//! Hotels and their rooms.
//!
//! This module provides the catalog value types: validated seat capacities,
//! room numbers, and the hotel and room records read back from the store.
//! Bulk room generation lives in [`generator`].

pub mod generator;

use std::fmt;
use std::time::SystemTime;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::ids::row_id;
use crate::reservation::{PartySize, ValidationError};

row_id!(
    /// Identifier of a hotel.
    HotelId
);

row_id!(
    /// Identifier of a room.
    RoomId
);

/// Maximum length of a hotel name.
pub const MAX_HOTEL_NAME_LEN: usize = 100;

/// Maximum length of a hotel address.
pub const MAX_ADDRESS_LEN: usize = 200;

/// Maximum length of a room number.
pub const MAX_ROOM_NUMBER_LEN: usize = 10;

/// Upper bound on the number of rooms a hotel may ask to generate.
pub const MAX_TARGET_ROOM_COUNT: u32 = 10_000;

/// The number of seats in a room.
///
/// A capacity is always at least one.
///
/// # Examples
///
/// ```
/// use posada::Capacity;
///
/// let capacity = Capacity::try_from(3).unwrap();
/// assert_eq!(capacity.value(), 3);
///
/// assert!(Capacity::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Capacity(u8);

impl Capacity {
    /// The smallest valid capacity.
    pub const MIN: u8 = 1;

    /// Returns the number of seats.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` if a party of the given size fits in this room.
    ///
    /// # Examples
    ///
    /// ```
    /// use posada::{Capacity, PartySize};
    ///
    /// let double = Capacity::try_from(2).unwrap();
    /// assert!(double.fits(PartySize::try_from(2).unwrap()));
    /// assert!(!double.fits(PartySize::try_from(3).unwrap()));
    /// ```
    #[must_use]
    pub const fn fits(self, party: PartySize) -> bool {
        party.value() <= self.0
    }
}

impl TryFrom<u32> for Capacity {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(0) => Err(ValidationError {
                field: "capacity".into(),
                message: "capacity must be at least 1".into(),
            }),
            Ok(seats) => Ok(Self(seats)),
            Err(_) => Err(ValidationError {
                field: "capacity".into(),
                message: format!("capacity {value} exceeds the maximum of {}", u8::MAX),
            }),
        }
    }
}

impl From<Capacity> for u32 {
    fn from(capacity: Capacity) -> Self {
        Self::from(capacity.0)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for Capacity {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.0)))
    }
}

impl FromSql for Capacity {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_i64()?;
        u32::try_from(raw)
            .ok()
            .and_then(|v| Self::try_from(v).ok())
            .ok_or(FromSqlError::OutOfRange(raw))
    }
}

/// A room number, unique within its hotel.
///
/// Room numbers are free-form labels ("12", "2B"), trimmed and limited to
/// [`MAX_ROOM_NUMBER_LEN`] characters.
///
/// # Examples
///
/// ```
/// use posada::RoomNumber;
///
/// let number = RoomNumber::new(" 12 ").unwrap();
/// assert_eq!(number.as_str(), "12");
///
/// assert!(RoomNumber::new("").is_err());
/// assert!(RoomNumber::new("12345678901").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Creates a validated room number.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is empty after trimming or longer than
    /// [`MAX_ROOM_NUMBER_LEN`] characters.
    pub fn new(number: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = number.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "room_number".into(),
                message: "room number must be non-empty".into(),
            });
        }
        if trimmed.chars().count() > MAX_ROOM_NUMBER_LEN {
            return Err(ValidationError {
                field: "room_number".into(),
                message: format!("room number must be at most {MAX_ROOM_NUMBER_LEN} characters"),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the room number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomNumber> for String {
    fn from(number: RoomNumber) -> Self {
        number.0
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hotel {
    /// Row id.
    pub id: HotelId,
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Number of rooms generated when the hotel is created.
    pub target_room_count: u32,
    /// Whether rooms are generated right after the hotel is created.
    pub auto_generate_rooms: bool,
    /// Creation timestamp.
    #[serde(serialize_with = "unix_seconds::serialize")]
    pub created_at: SystemTime,
}

/// A persisted room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Row id.
    pub id: RoomId,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Room number within the hotel.
    pub number: RoomNumber,
    /// Seat capacity.
    pub capacity: Capacity,
}

/// Input for creating a hotel.
///
/// # Examples
///
/// ```
/// use posada::NewHotel;
///
/// let hotel = NewHotel::new("Posada del Sol", "Calle 1, Oaxaca", 5)
///     .auto_generate_rooms(false);
/// assert!(hotel.validate().is_ok());
///
/// let unnamed = NewHotel::new("  ", "Calle 1", 5);
/// assert!(unnamed.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHotel {
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Number of rooms to generate.
    pub target_room_count: u32,
    /// Whether to generate rooms right after creation.
    pub auto_generate_rooms: bool,
}

impl NewHotel {
    /// Creates hotel input with room generation enabled.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        target_room_count: u32,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            address: address.into().trim().to_string(),
            target_room_count,
            auto_generate_rooms: true,
        }
    }

    /// Sets whether rooms are generated after creation.
    #[must_use]
    pub const fn auto_generate_rooms(mut self, enabled: bool) -> Self {
        self.auto_generate_rooms = enabled;
        self
    }

    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or address is empty or too long, or if
    /// the target room count exceeds [`MAX_TARGET_ROOM_COUNT`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", &self.name, MAX_HOTEL_NAME_LEN)?;
        check_text("address", &self.address, MAX_ADDRESS_LEN)?;
        if self.target_room_count > MAX_TARGET_ROOM_COUNT {
            return Err(ValidationError {
                field: "target_room_count".into(),
                message: format!("target room count must be at most {MAX_TARGET_ROOM_COUNT}"),
            });
        }
        Ok(())
    }
}

pub(crate) fn check_text(field: &str, value: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must be non-empty"),
        });
    }
    if value.chars().count() > max_len {
        return Err(ValidationError {
            field: field.into(),
            message: format!("{field} must be at most {max_len} characters"),
        });
    }
    Ok(())
}

/// Serializes a `SystemTime` as Unix seconds.
pub(crate) mod unix_seconds {
    use std::time::SystemTime;

    use serde::Serializer;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        let secs = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        serializer.serialize_u64(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_bounds() {
        assert!(Capacity::try_from(0).is_err());
        assert_eq!(Capacity::try_from(1).unwrap().value(), 1);
        assert_eq!(Capacity::try_from(255).unwrap().value(), 255);
        let err = Capacity::try_from(256).unwrap_err();
        assert_eq!(err.field, "capacity");
        assert!(err.message.contains("maximum"));
    }

    #[test]
    fn test_capacity_fits() {
        let capacity = Capacity::try_from(2).unwrap();
        assert!(capacity.fits(PartySize::try_from(1).unwrap()));
        assert!(capacity.fits(PartySize::try_from(2).unwrap()));
        assert!(!capacity.fits(PartySize::try_from(3).unwrap()));
    }

    #[test]
    fn test_capacity_serde_rejects_zero() {
        let ok: Capacity = serde_json::from_str("4").unwrap();
        assert_eq!(ok.value(), 4);
        assert!(serde_json::from_str::<Capacity>("0").is_err());
    }

    #[test]
    fn test_room_number_trimming() {
        let number = RoomNumber::new("  7 ").unwrap();
        assert_eq!(number.as_str(), "7");
        assert_eq!(format!("{number}"), "7");
    }

    #[test]
    fn test_room_number_rejects_blank_and_long() {
        assert_eq!(RoomNumber::new("   ").unwrap_err().field, "room_number");
        assert!(RoomNumber::new("0123456789").is_ok());
        assert!(RoomNumber::new("01234567890").is_err());
    }

    #[test]
    fn test_new_hotel_validation() {
        assert!(NewHotel::new("Hotel", "Street", 0).validate().is_ok());

        let err = NewHotel::new("", "Street", 1).validate().unwrap_err();
        assert_eq!(err.field, "name");

        let err = NewHotel::new("Hotel", "", 1).validate().unwrap_err();
        assert_eq!(err.field, "address");

        let long_name = "x".repeat(MAX_HOTEL_NAME_LEN + 1);
        assert!(NewHotel::new(long_name, "Street", 1).validate().is_err());

        let err = NewHotel::new("Hotel", "Street", MAX_TARGET_ROOM_COUNT + 1)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "target_room_count");
    }

    #[test]
    fn test_new_hotel_defaults_to_generation() {
        let hotel = NewHotel::new("Hotel", "Street", 3);
        assert!(hotel.auto_generate_rooms);
        assert!(!hotel.auto_generate_rooms(false).auto_generate_rooms);
    }
}
