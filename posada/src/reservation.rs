//! Reservation types.
//!
//! This module provides the reservation record, its status machine, party
//! sizes, and the builder used to draft a reservation before it is written.
//! Derived views (days remaining, priority, estimated cost) are ordinary
//! methods that take the caller's notion of "today".

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::catalog::{unix_seconds, Capacity, RoomId};
use crate::guest::GuestId;
use crate::ids::row_id;

row_id!(
    /// Identifier of a reservation.
    ReservationId
);

/// Fixed nightly rate charged per room seat, in whole currency units.
pub const NIGHTLY_RATE_PER_SEAT: u32 = 50;

/// Maximum length of admin notes.
pub const MAX_NOTES_LEN: usize = 2000;

/// Days ahead within which a reservation counts as upcoming.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// The number of people a reservation is for.
///
/// # Examples
///
/// ```
/// use posada::PartySize;
///
/// let party = PartySize::try_from(3).unwrap();
/// assert_eq!(party.value(), 3);
/// assert!(PartySize::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PartySize(u8);

impl PartySize {
    /// Returns the number of people.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for PartySize {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(0) => Err(ValidationError {
                field: "party_size".into(),
                message: "party size must be at least 1".into(),
            }),
            Ok(people) => Ok(Self(people)),
            Err(_) => Err(ValidationError {
                field: "party_size".into(),
                message: format!("party size {value} exceeds the maximum of {}", u8::MAX),
            }),
        }
    }
}

impl From<PartySize> for u32 {
    fn from(party: PartySize) -> Self {
        Self::from(party.0)
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for PartySize {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.0)))
    }
}

impl FromSql for PartySize {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_i64()?;
        u32::try_from(raw)
            .ok()
            .and_then(|v| Self::try_from(v).ok())
            .ok_or(FromSqlError::OutOfRange(raw))
    }
}

/// Lifecycle status of a reservation.
///
/// ```text
/// pending   --confirm--> confirmed
/// pending   --cancel---> cancelled
/// pending   --reject---> rejected
/// confirmed --cancel---> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting staff confirmation. Holds the room.
    Pending,
    /// Confirmed by staff. Holds the room.
    Confirmed,
    /// Cancelled by the guest or staff.
    Cancelled,
    /// Turned down by staff.
    Rejected,
    /// The stay took place.
    Completed,
}

impl ReservationStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Rejected,
        Self::Completed,
    ];

    /// Returns the storage and display form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` for statuses that hold their room on their date.
    ///
    /// # Examples
    ///
    /// ```
    /// use posada::ReservationStatus;
    ///
    /// assert!(ReservationStatus::Pending.is_active());
    /// assert!(ReservationStatus::Confirmed.is_active());
    /// assert!(!ReservationStatus::Cancelled.is_active());
    /// ```
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Returns `true` for statuses no transition leaves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError {
                field: "status".into(),
                message: format!(
                    "unknown status '{s}', expected one of pending, confirmed, cancelled, rejected, completed"
                ),
            })
    }
}

impl ToSql for ReservationStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ReservationStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: ValidationError| FromSqlError::Other(Box::new(e)))
    }
}

/// How urgently staff should look at a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Past, or more than a week away.
    None,
    /// Within a week.
    Low,
    /// Within two days.
    Medium,
    /// Today.
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

/// A persisted reservation.
///
/// The room reference is `None` when the room was deleted after booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    /// Row id.
    pub id: ReservationId,
    /// The guest the reservation is for.
    pub guest_id: GuestId,
    /// The assigned room, if it still exists.
    pub room_id: Option<RoomId>,
    /// The night being reserved.
    pub date: NaiveDate,
    /// Number of people.
    pub party_size: PartySize,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Free-form admin notes.
    pub notes: String,
    /// Creation timestamp.
    #[serde(serialize_with = "unix_seconds::serialize")]
    pub created_at: SystemTime,
    /// Last modification timestamp.
    #[serde(serialize_with = "unix_seconds::serialize")]
    pub modified_at: SystemTime,
}

impl Reservation {
    /// Starts drafting a new reservation.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use posada::{GuestId, PartySize, Reservation, ReservationStatus, RoomId};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let draft = Reservation::builder(GuestId::new(1), date, PartySize::try_from(2).unwrap())
    ///     .room(Some(RoomId::new(4)))
    ///     .status(ReservationStatus::Confirmed)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(draft.status, ReservationStatus::Confirmed);
    /// ```
    #[must_use]
    pub fn builder(
        guest_id: GuestId,
        date: NaiveDate,
        party_size: PartySize,
    ) -> ReservationBuilder {
        ReservationBuilder {
            guest_id,
            room_id: None,
            date,
            party_size,
            status: ReservationStatus::Pending,
            notes: String::new(),
        }
    }

    /// Days from `today` until the reservation date. Negative once past.
    #[must_use]
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }

    /// Returns `true` if the date is today or within the next week.
    #[must_use]
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        (0..=UPCOMING_WINDOW_DAYS).contains(&self.days_until(today))
    }

    /// Returns `true` if the date is before `today`.
    #[must_use]
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.days_until(today) < 0
    }

    /// Estimated price of the stay for a room of the given capacity.
    ///
    /// Orphaned reservations (no room) cost nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use posada::reservation::estimated_total;
    /// use posada::Capacity;
    ///
    /// assert_eq!(estimated_total(Some(Capacity::try_from(3).unwrap())), 150);
    /// assert_eq!(estimated_total(None), 0);
    /// ```
    #[must_use]
    pub fn estimated_total(&self, room_capacity: Option<Capacity>) -> u32 {
        if self.room_id.is_none() {
            return 0;
        }
        estimated_total(room_capacity)
    }

    /// Returns `true` if the reservation may still be cancelled.
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        self.status.is_active()
    }

    /// Returns how urgently the reservation needs attention.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Days, NaiveDate};
    /// use posada::reservation::priority_for;
    /// use posada::Priority;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
    /// assert_eq!(priority_for(today, today), Priority::High);
    /// assert_eq!(priority_for(tomorrow, today), Priority::Medium);
    /// ```
    #[must_use]
    pub fn priority(&self, today: NaiveDate) -> Priority {
        priority_for(self.date, today)
    }
}

/// Price of one night in a room with the given capacity.
#[must_use]
pub fn estimated_total(room_capacity: Option<Capacity>) -> u32 {
    room_capacity.map_or(0, |c| u32::from(c.value()) * NIGHTLY_RATE_PER_SEAT)
}

/// Priority of a reservation dated `date` as seen on `today`.
#[must_use]
pub fn priority_for(date: NaiveDate, today: NaiveDate) -> Priority {
    match (date - today).num_days() {
        0 => Priority::High,
        1..=2 => Priority::Medium,
        3..=UPCOMING_WINDOW_DAYS => Priority::Low,
        _ => Priority::None,
    }
}

/// A validated reservation that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// The guest the reservation is for.
    pub guest_id: GuestId,
    /// The assigned room.
    pub room_id: Option<RoomId>,
    /// The night being reserved.
    pub date: NaiveDate,
    /// Number of people.
    pub party_size: PartySize,
    /// Initial status, always active.
    pub status: ReservationStatus,
    /// Admin notes.
    pub notes: String,
}

/// Builder for [`NewReservation`].
#[derive(Debug)]
pub struct ReservationBuilder {
    guest_id: GuestId,
    room_id: Option<RoomId>,
    date: NaiveDate,
    party_size: PartySize,
    status: ReservationStatus,
    notes: String,
}

impl ReservationBuilder {
    /// Sets the assigned room.
    #[must_use]
    pub const fn room(mut self, room_id: Option<RoomId>) -> Self {
        self.room_id = room_id;
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the admin notes. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn notes(mut self, notes: impl AsRef<str>) -> Self {
        self.notes = notes.as_ref().trim().to_string();
        self
    }

    /// Builds the draft.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The initial status is not active
    /// - The notes exceed [`MAX_NOTES_LEN`] characters
    pub fn build(self) -> Result<NewReservation, ValidationError> {
        if !self.status.is_active() {
            return Err(ValidationError {
                field: "status".into(),
                message: format!(
                    "a new reservation must start pending or confirmed, not {}",
                    self.status
                ),
            });
        }
        validate_notes(&self.notes)?;

        Ok(NewReservation {
            guest_id: self.guest_id,
            room_id: self.room_id,
            date: self.date,
            party_size: self.party_size,
            status: self.status,
            notes: self.notes,
        })
    }
}

pub(crate) fn validate_notes(notes: &str) -> Result<(), ValidationError> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError {
            field: "notes".into(),
            message: format!("notes must be at most {MAX_NOTES_LEN} characters"),
        });
    }
    Ok(())
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stored(on: NaiveDate, status: ReservationStatus, room: Option<RoomId>) -> Reservation {
        let now = SystemTime::now();
        Reservation {
            id: ReservationId::new(1),
            guest_id: GuestId::new(1),
            room_id: room,
            date: on,
            party_size: PartySize::try_from(2).unwrap(),
            status,
            notes: String::new(),
            created_at: now,
            modified_at: now,
        }
    }

    #[test]
    fn test_party_size_bounds() {
        assert!(PartySize::try_from(0).is_err());
        assert_eq!(PartySize::try_from(255).unwrap().value(), 255);
        assert_eq!(PartySize::try_from(300).unwrap_err().field, "party_size");
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in ReservationStatus::ALL {
            assert_eq!(
                status.as_str().parse::<ReservationStatus>().unwrap(),
                status
            );
        }
        assert_eq!(
            "Confirmed".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Confirmed
        );
        assert!("booked".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_active_and_terminal_partition() {
        let active: Vec<_> = ReservationStatus::ALL
            .into_iter()
            .filter(|s| s.is_active())
            .collect();
        assert_eq!(
            active,
            vec![ReservationStatus::Pending, ReservationStatus::Confirmed]
        );
        assert!(ReservationStatus::ALL
            .into_iter()
            .all(|s| s.is_active() != s.is_terminal()));
    }

    #[test]
    fn test_days_until_and_upcoming() {
        let today = date(2025, 6, 1);
        let r = stored(date(2025, 6, 8), ReservationStatus::Pending, None);
        assert_eq!(r.days_until(today), 7);
        assert!(r.is_upcoming(today));
        assert!(!r.is_past(today));

        let r = stored(date(2025, 6, 9), ReservationStatus::Pending, None);
        assert!(!r.is_upcoming(today));

        let r = stored(date(2025, 5, 31), ReservationStatus::Pending, None);
        assert_eq!(r.days_until(today), -1);
        assert!(r.is_past(today));
        assert!(!r.is_upcoming(today));
    }

    #[test]
    fn test_estimated_total() {
        let three = Capacity::try_from(3).unwrap();
        let r = stored(
            date(2025, 6, 1),
            ReservationStatus::Pending,
            Some(RoomId::new(1)),
        );
        assert_eq!(r.estimated_total(Some(three)), 150);

        let orphan = stored(date(2025, 6, 1), ReservationStatus::Pending, None);
        assert_eq!(orphan.estimated_total(Some(three)), 0);
    }

    #[test]
    fn test_can_cancel() {
        let on = date(2025, 6, 1);
        assert!(stored(on, ReservationStatus::Pending, None).can_cancel());
        assert!(stored(on, ReservationStatus::Confirmed, None).can_cancel());
        assert!(!stored(on, ReservationStatus::Cancelled, None).can_cancel());
        assert!(!stored(on, ReservationStatus::Rejected, None).can_cancel());
        assert!(!stored(on, ReservationStatus::Completed, None).can_cancel());
    }

    #[test]
    fn test_priority_bands() {
        let today = date(2025, 6, 1);
        let at = |days: u64| today.checked_add_days(Days::new(days)).unwrap();
        assert_eq!(priority_for(today, today), Priority::High);
        assert_eq!(priority_for(at(1), today), Priority::Medium);
        assert_eq!(priority_for(at(2), today), Priority::Medium);
        assert_eq!(priority_for(at(3), today), Priority::Low);
        assert_eq!(priority_for(at(7), today), Priority::Low);
        assert_eq!(priority_for(at(8), today), Priority::None);
        assert_eq!(priority_for(date(2025, 5, 30), today), Priority::None);
        assert!(Priority::High > Priority::Medium);
    }

    #[test]
    fn test_builder_defaults_to_pending() {
        let draft = Reservation::builder(
            GuestId::new(3),
            date(2025, 6, 1),
            PartySize::try_from(2).unwrap(),
        )
        .notes("  late arrival ")
        .build()
        .unwrap();
        assert_eq!(draft.status, ReservationStatus::Pending);
        assert_eq!(draft.room_id, None);
        assert_eq!(draft.notes, "late arrival");
    }

    #[test]
    fn test_builder_rejects_terminal_status() {
        let err = Reservation::builder(
            GuestId::new(3),
            date(2025, 6, 1),
            PartySize::try_from(2).unwrap(),
        )
        .status(ReservationStatus::Cancelled)
        .build()
        .unwrap_err();
        assert_eq!(err.field, "status");
    }

    #[test]
    fn test_builder_rejects_long_notes() {
        let err = Reservation::builder(
            GuestId::new(3),
            date(2025, 6, 1),
            PartySize::try_from(2).unwrap(),
        )
        .notes("n".repeat(MAX_NOTES_LEN + 1))
        .build()
        .unwrap_err();
        assert_eq!(err.field, "notes");
    }
}
