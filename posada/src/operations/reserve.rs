//! Reserve operation planning.
//!
//! This module implements the booking planner: it validates the request,
//! picks a room when the caller did not choose one, and describes the
//! guest resolution that will happen when the plan executes.

use chrono::{Days, NaiveDate};
use rusqlite::Connection;

use crate::availability::first_available_room;
use crate::catalog::{HotelId, RoomId, RoomNumber};
use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{validate_notes, PartySize, ReservationStatus};

use super::plan::{GuestRef, OperationPlan, PlanAction, ReservationRequest};

/// Which path a booking comes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationOrigin {
    /// Guest-facing booking, starts pending.
    #[default]
    SelfService,
    /// Staff booking, starts confirmed.
    Staff,
}

impl ReservationOrigin {
    /// The status a new reservation from this origin starts in.
    #[must_use]
    pub const fn initial_status(self) -> ReservationStatus {
        match self {
            Self::SelfService => ReservationStatus::Pending,
            Self::Staff => ReservationStatus::Confirmed,
        }
    }
}

/// Options for a reserve operation.
#[derive(Debug, Clone)]
pub struct ReserveOptions {
    /// The hotel to book in.
    pub hotel: HotelId,

    /// The night being reserved.
    pub date: NaiveDate,

    /// Number of people.
    pub party_size: PartySize,

    /// The room, when the caller already chose one.
    pub room: Option<RoomId>,

    /// The guest the booking is for.
    pub guest: GuestRef,

    /// Where the booking comes from.
    pub origin: ReservationOrigin,

    /// Admin notes.
    pub notes: String,

    /// Whether the date must fall inside the booking window.
    pub enforce_booking_window: bool,
}

impl ReserveOptions {
    /// Creates options for a self-service booking with no room chosen.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use posada::operations::{GuestRef, ReservationOrigin, ReserveOptions};
    /// use posada::{GuestId, HotelId, PartySize};
    ///
    /// let options = ReserveOptions::new(
    ///     HotelId::new(1),
    ///     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ///     PartySize::try_from(2).unwrap(),
    ///     GuestRef::Existing(GuestId::new(3)),
    /// )
    /// .with_origin(ReservationOrigin::Staff);
    /// assert!(options.room.is_none());
    /// ```
    #[must_use]
    pub fn new(hotel: HotelId, date: NaiveDate, party_size: PartySize, guest: GuestRef) -> Self {
        Self {
            hotel,
            date,
            party_size,
            room: None,
            guest,
            origin: ReservationOrigin::default(),
            notes: String::new(),
            enforce_booking_window: false,
        }
    }

    /// Sets the room.
    #[must_use]
    pub const fn with_room(mut self, room: Option<RoomId>) -> Self {
        self.room = room;
        self
    }

    /// Sets the origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: ReservationOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the admin notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Sets whether the booking window applies.
    #[must_use]
    pub const fn with_booking_window(mut self, enforce: bool) -> Self {
        self.enforce_booking_window = enforce;
        self
    }
}

/// A reservation plan generator.
///
/// This struct is responsible for analyzing a reserve request and
/// generating a plan that describes what actions to take.
pub struct ReservePlan<'a> {
    options: ReserveOptions,
    config: &'a Config,
}

impl<'a> ReservePlan<'a> {
    /// Creates a new reserve plan with the given options and config.
    #[must_use]
    pub const fn new(options: ReserveOptions, config: &'a Config) -> Self {
        Self { options, config }
    }

    /// Builds a plan for the reservation.
    ///
    /// `today` anchors the booking window.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The hotel, guest or chosen room does not exist
    /// - The chosen room belongs to another hotel or is too small
    /// - The date is outside the booking window (when enforced)
    /// - No room was chosen and none is free for the party
    pub fn build_plan(&self, conn: &Connection, today: NaiveDate) -> Result<OperationPlan> {
        let opts = &self.options;
        validate_notes(opts.notes.trim())?;
        let hotel = Database::require_hotel(conn, opts.hotel)?;

        if opts.enforce_booking_window {
            self.check_booking_window(today)?;
        }

        let mut warnings = Vec::new();
        match &opts.guest {
            GuestRef::Existing(id) => {
                Database::require_guest(conn, *id)?;
            }
            GuestRef::Details(input) => {
                match Database::find_guest_by_email(conn, input.email())? {
                    None => {}
                    Some(existing)
                        if existing.name != input.name() || existing.phone != input.phone() =>
                    {
                        warnings.push(format!(
                            "Contact details of guest {} ({}) will be updated",
                            existing.id, existing.email
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        let (room, number) = self.choose_room(conn)?;

        let request = ReservationRequest {
            guest: opts.guest.clone(),
            room,
            date: opts.date,
            party_size: opts.party_size,
            status: opts.origin.initial_status(),
            notes: opts.notes.trim().to_string(),
        };

        let mut plan =
            OperationPlan::new(format!("Reserve room {number} at {} on {}", hotel.name, opts.date))
                .add_action(PlanAction::CreateReservation(request));
        for warning in warnings {
            plan = plan.add_warning(warning);
        }
        Ok(plan)
    }

    fn check_booking_window(&self, today: NaiveDate) -> Result<()> {
        let date = self.options.date;
        if date < today {
            return Err(Error::validation("date", format!("{date} is in the past")));
        }
        let window = self.config.booking_window();
        if let Some(last) = today.checked_add_days(Days::new(u64::from(window))) {
            if date > last {
                return Err(Error::validation(
                    "date",
                    format!("bookings open at most {window} days ahead (last date {last})"),
                ));
            }
        }
        Ok(())
    }

    fn choose_room(&self, conn: &Connection) -> Result<(RoomId, RoomNumber)> {
        let opts = &self.options;
        if let Some(id) = opts.room {
            let room = Database::require_room(conn, id)?;
            if room.hotel_id != opts.hotel {
                return Err(Error::validation(
                    "room",
                    format!("room {id} does not belong to hotel {}", opts.hotel),
                ));
            }
            if !room.capacity.fits(opts.party_size) {
                return Err(Error::InsufficientCapacity {
                    room: id,
                    capacity: room.capacity,
                    party_size: opts.party_size,
                });
            }
            return Ok((room.id, room.number));
        }

        let room = first_available_room(conn, opts.hotel, opts.date, opts.party_size)?
            .ok_or(Error::NoRoomAvailable {
                hotel: opts.hotel,
                date: opts.date,
                party_size: opts.party_size,
            })?;
        log::debug!(
            "picked room {} ({} seats) for a party of {}",
            room.number,
            room.capacity,
            opts.party_size
        );
        Ok((room.id, room.number))
    }
}
