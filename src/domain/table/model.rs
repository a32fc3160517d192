//! Table domain entity

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::reservation::{ReservationSlot, ReservationStatus};

/// Smallest table the floor plan allows
pub const MIN_SEATS: u32 = 1;
/// Largest table the floor plan allows
pub const MAX_SEATS: u32 = 8;

/// Seating zone with fixed per-zone policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableLocation {
    Window,
    Indoor,
    Terrace,
    PrivateRoom,
}

impl TableLocation {
    pub fn is_outdoor(&self) -> bool {
        matches!(self, Self::Terrace)
    }

    pub fn is_weather_dependent(&self) -> bool {
        matches!(self, Self::Terrace)
    }

    /// Minimum party size the zone demands, if any
    pub fn minimum_party_size(&self) -> Option<u32> {
        match self {
            Self::PrivateRoom => Some(4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Window => "Window",
            Self::Indoor => "Indoor",
            Self::Terrace => "Terrace",
            Self::PrivateRoom => "PrivateRoom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Window" => Some(Self::Window),
            "Indoor" => Some(Self::Indoor),
            "Terrace" => Some(Self::Terrace),
            "PrivateRoom" => Some(Self::PrivateRoom),
            _ => None,
        }
    }
}

impl std::fmt::Display for TableLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A seating resource owning its reservation slots
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Unique identifier, assigned on first save
    pub id: Option<i32>,
    /// Table number within the restaurant; 0 until assigned by the
    /// owning restaurant's counter
    pub number: u32,
    /// Seat capacity
    pub seats: u32,
    /// Seating zone
    pub location: TableLocation,
    /// Whether the table is open for booking
    pub available: bool,
    /// Owning restaurant id, set when the table is added
    pub restaurant_id: Option<i32>,
    slots: Vec<ReservationSlot>,
}

impl Table {
    pub fn new(seats: u32, location: TableLocation) -> DomainResult<Self> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(DomainError::validation(format!(
                "table seats must be between {} and {}",
                MIN_SEATS, MAX_SEATS
            )));
        }
        Ok(Self {
            id: None,
            number: 0,
            seats,
            location,
            available: true,
            restaurant_id: None,
            slots: Vec::new(),
        })
    }

    /// Read-only view of the owned slots. Callers must not rely on being
    /// able to mutate through this slice.
    pub fn slots(&self) -> &[ReservationSlot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut Vec<ReservationSlot> {
        &mut self.slots
    }

    /// Whether the table can take a booking for the given range.
    ///
    /// An unavailable table never can. Otherwise only active slots
    /// (Available, Confirmed) block; Cancelled and Completed do not.
    pub fn is_available_at(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        if !self.available {
            return false;
        }
        !self
            .slots
            .iter()
            .any(|slot| slot.status.is_active() && slot.overlaps_range(date, start, end))
    }

    /// Attach a slot to this table.
    ///
    /// Re-adding an already-present slot (same identity and status) is a
    /// no-op. The write-side overlap guard excludes only Cancelled slots, so
    /// a Completed slot still blocks its range; the read side
    /// (`is_available_at`) does not count Completed slots. Both rules match
    /// the behavior the booking flow was built on.
    pub fn add_time_slot(&mut self, mut slot: ReservationSlot) -> DomainResult<()> {
        if self
            .slots
            .iter()
            .any(|existing| existing == &slot && existing.status == slot.status)
        {
            return Ok(());
        }
        if slot.party_size > self.seats {
            return Err(DomainError::capacity(
                "reserved seats cannot exceed table capacity",
            ));
        }
        let conflict = self
            .slots
            .iter()
            .any(|existing| existing.status != ReservationStatus::Cancelled && existing.overlaps(&slot));
        if conflict {
            return Err(DomainError::overlap(
                "time slot overlaps with existing reservation",
            ));
        }
        slot.table_id = self.id;
        self.slots.push(slot);
        Ok(())
    }

    /// Detach a slot. Returns the detached slot with its back-reference
    /// cleared, or None when the slot was not present.
    pub fn remove_time_slot(&mut self, slot: &ReservationSlot) -> Option<ReservationSlot> {
        let idx = self.slots.iter().position(|s| s == slot)?;
        let mut removed = self.slots.remove(idx);
        removed.table_id = None;
        Some(removed)
    }

    pub fn make_available(&mut self) {
        self.available = true;
    }

    pub fn make_unavailable(&mut self) {
        self.available = false;
    }

    /// Seats occupied by active slots covering the instant
    pub fn occupied_seats_at(&self, date: NaiveDate, time: NaiveTime) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.occupies_at(date, time))
            .map(|slot| slot.party_size)
            .sum()
    }
}

// ── Tests ──────────────────────────────────────────────────────
