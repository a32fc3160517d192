//! Reservation slot domain entity

use chrono::{NaiveDate, NaiveTime};

use crate::domain::clock::Clock;
use crate::domain::error::{DomainError, DomainResult};

/// Shortest bookable slot, in minutes
pub const MIN_DURATION_MINUTES: i64 = 30;
/// Longest bookable slot, in minutes
pub const MAX_DURATION_MINUTES: i64 = 240;

/// Reservation slot status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Requested but not yet confirmed
    Available,
    /// Confirmed by the restaurant
    Confirmed,
    /// Cancelled after confirmation (terminal)
    Cancelled,
    /// Party seated and finished (terminal)
    Completed,
}

impl ReservationStatus {
    /// Active statuses count toward the live-booking set used in
    /// overlap and utilization math.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Available | Self::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    pub fn allows_confirmation(&self) -> bool {
        matches!(self, Self::Available)
    }

    pub fn allows_cancellation(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "Confirmed" => Some(Self::Confirmed),
            "Cancelled" => Some(Self::Cancelled),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A date + time-range + party-size booking record, owned by one table
#[derive(Debug, Clone)]
pub struct ReservationSlot {
    /// Unique identifier, assigned on first save
    pub id: Option<i32>,
    /// Reservation date
    pub date: NaiveDate,
    /// Start of the occupied range (inclusive)
    pub start_time: NaiveTime,
    /// End of the occupied range (exclusive)
    pub end_time: NaiveTime,
    /// Seats reserved for the party
    pub party_size: u32,
    /// Lifecycle status
    pub status: ReservationStatus,
    /// Customer name
    pub customer_name: Option<String>,
    /// Customer phone
    pub customer_phone: Option<String>,
    /// Customer email
    pub customer_email: Option<String>,
    /// Owning table id, set when the slot is attached
    pub table_id: Option<i32>,
}

impl ReservationSlot {
    /// Create a slot, enforcing the construction-time invariants.
    ///
    /// The date must not precede the clock's today; the range must be
    /// forward and between 30 minutes and 4 hours long.
    pub fn new(
        clock: &dyn Clock,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        party_size: u32,
    ) -> DomainResult<Self> {
        if party_size == 0 {
            return Err(DomainError::validation("party size must be positive"));
        }
        if end_time <= start_time {
            return Err(DomainError::validation("end time must be after start time"));
        }
        let duration = (end_time - start_time).num_minutes();
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
            return Err(DomainError::validation(format!(
                "reservation duration must be between {} and {} minutes",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
            )));
        }
        if date < clock.today() {
            return Err(DomainError::validation(
                "reservation date cannot be in the past",
            ));
        }

        Ok(Self {
            id: None,
            date,
            start_time,
            end_time,
            party_size,
            status: ReservationStatus::Available,
            customer_name: None,
            customer_phone: None,
            customer_email: None,
            table_id: None,
        })
    }

    /// Attach customer contact details
    pub fn with_customer(
        mut self,
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        self.customer_name = name;
        self.customer_phone = phone;
        self.customer_email = email;
        self
    }

    /// Confirm the reservation. Legal only while Available.
    pub fn confirm(&mut self) -> DomainResult<()> {
        if !self.status.allows_confirmation() {
            return Err(DomainError::invalid_transition(
                "cannot confirm a slot that is not available",
            ));
        }
        self.status = ReservationStatus::Confirmed;
        Ok(())
    }

    /// Cancel the reservation. Legal only while Confirmed.
    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            ReservationStatus::Confirmed => {
                self.status = ReservationStatus::Cancelled;
                Ok(())
            }
            ReservationStatus::Available => Err(DomainError::invalid_transition(
                "cannot cancel a slot that is not confirmed",
            )),
            ReservationStatus::Completed => Err(DomainError::invalid_transition(
                "cannot cancel a completed slot",
            )),
            ReservationStatus::Cancelled => Err(DomainError::invalid_transition(
                "cannot cancel a cancelled slot",
            )),
        }
    }

    /// Mark the reservation completed. Refused from Cancelled and Available.
    pub fn complete(&mut self) -> DomainResult<()> {
        match self.status {
            ReservationStatus::Cancelled => Err(DomainError::invalid_transition(
                "cannot complete a cancelled slot",
            )),
            ReservationStatus::Available => Err(DomainError::invalid_transition(
                "cannot complete an unconfirmed slot",
            )),
            _ => {
                self.status = ReservationStatus::Completed;
                Ok(())
            }
        }
    }

    /// Slot duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Half-open interval intersection against another slot.
    /// Ranges touching at an endpoint do not overlap.
    pub fn overlaps(&self, other: &ReservationSlot) -> bool {
        self.overlaps_range(other.date, other.start_time, other.end_time)
    }

    /// Half-open interval intersection against a raw date + range
    pub fn overlaps_range(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.date == date && self.start_time < end && start < self.end_time
    }

    /// Whether an active slot occupies the given instant on the given date.
    /// The start is inclusive, the end exclusive.
    pub fn occupies_at(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.status.is_active() && self.date == date && self.start_time <= time && time < self.end_time
    }
}

/// Identity equality when both sides are persisted, business-key
/// (date, start, end) equality otherwise.
impl PartialEq for ReservationSlot {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                self.date == other.date
                    && self.start_time == other.start_time
                    && self.end_time == other.end_time
            }
        }
    }
}

impl Eq for ReservationSlot {}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap())
    }

    fn tomorrow() -> NaiveDate {
        clock().today() + Duration::days(1)
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_slot() -> ReservationSlot {
        ReservationSlot::new(&clock(), tomorrow(), t(19, 0), t(21, 0), 4).unwrap()
    }

    #[test]
    fn new_slot_is_available() {
        let slot = sample_slot();
        assert_eq!(slot.status, ReservationStatus::Available);
        assert!(slot.status.is_active());
        assert_eq!(slot.duration_minutes(), 120);
        assert!(slot.id.is_none());
        assert!(slot.table_id.is_none());
    }

    #[test]
    fn rejects_zero_party() {
        let err = ReservationSlot::new(&clock(), tomorrow(), t(19, 0), t(21, 0), 0).unwrap_err();
        assert_eq!(err, DomainError::validation("party size must be positive"));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = ReservationSlot::new(&clock(), tomorrow(), t(21, 0), t(19, 0), 2).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("end time must be after start time")
        );
    }

    #[test]
    fn rejects_too_short_duration() {
        let err = ReservationSlot::new(&clock(), tomorrow(), t(19, 0), t(19, 15), 2).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_too_long_duration() {
        let err = ReservationSlot::new(&clock(), tomorrow(), t(12, 0), t(16, 30), 2).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn accepts_duration_bounds() {
        assert!(ReservationSlot::new(&clock(), tomorrow(), t(19, 0), t(19, 30), 2).is_ok());
        assert!(ReservationSlot::new(&clock(), tomorrow(), t(12, 0), t(16, 0), 2).is_ok());
    }

    #[test]
    fn rejects_past_date() {
        let yesterday = clock().today() - Duration::days(1);
        let err = ReservationSlot::new(&clock(), yesterday, t(19, 0), t(21, 0), 2).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("reservation date cannot be in the past")
        );
    }

    #[test]
    fn accepts_today() {
        assert!(ReservationSlot::new(&clock(), clock().today(), t(19, 0), t(21, 0), 2).is_ok());
    }

    #[test]
    fn confirm_from_available() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        assert_eq!(slot.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn confirm_refused_after_confirmation() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        let err = slot.confirm().unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_transition("cannot confirm a slot that is not available")
        );
    }

    #[test]
    fn cancel_from_confirmed() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        slot.cancel().unwrap();
        assert_eq!(slot.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn cancel_refused_while_available() {
        let mut slot = sample_slot();
        let err = slot.cancel().unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_transition("cannot cancel a slot that is not confirmed")
        );
    }

    #[test]
    fn cancel_refused_when_completed() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        slot.complete().unwrap();
        let err = slot.cancel().unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_transition("cannot cancel a completed slot")
        );
    }

    #[test]
    fn cancel_refused_when_cancelled() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        slot.cancel().unwrap();
        let err = slot.cancel().unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_transition("cannot cancel a cancelled slot")
        );
    }

    #[test]
    fn complete_from_confirmed() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        slot.complete().unwrap();
        assert_eq!(slot.status, ReservationStatus::Completed);
    }

    #[test]
    fn complete_refused_while_available() {
        let mut slot = sample_slot();
        let err = slot.complete().unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_transition("cannot complete an unconfirmed slot")
        );
    }

    #[test]
    fn complete_refused_when_cancelled() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        slot.cancel().unwrap();
        let err = slot.complete().unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_transition("cannot complete a cancelled slot")
        );
    }

    #[test]
    fn terminal_states_admit_no_transitions() {
        for terminal in [ReservationStatus::Cancelled, ReservationStatus::Completed] {
            let mut slot = sample_slot();
            slot.status = terminal;
            assert!(slot.confirm().is_err());
            assert!(slot.cancel().is_err());
            if terminal == ReservationStatus::Cancelled {
                assert!(slot.complete().is_err());
            }
            assert!(terminal.is_terminal());
            assert!(!terminal.is_active());
        }
    }

    #[test]
    fn complete_again_keeps_completed() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        slot.complete().unwrap();
        slot.complete().unwrap();
        assert_eq!(slot.status, ReservationStatus::Completed);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = sample_slot();
        let mut b = sample_slot();
        b.start_time = t(20, 0);
        b.end_time = t(22, 0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let a = sample_slot();
        let mut b = sample_slot();
        b.start_time = t(21, 0);
        b.end_time = t(23, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn different_dates_never_overlap() {
        let a = sample_slot();
        let mut b = sample_slot();
        b.date = tomorrow() + Duration::days(1);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn contained_range_overlaps() {
        let a = sample_slot();
        assert!(a.overlaps_range(tomorrow(), t(19, 30), t(20, 30)));
    }

    #[test]
    fn occupies_at_is_start_inclusive_end_exclusive() {
        let slot = sample_slot();
        assert!(slot.occupies_at(tomorrow(), t(19, 0)));
        assert!(slot.occupies_at(tomorrow(), t(20, 59)));
        assert!(!slot.occupies_at(tomorrow(), t(21, 0)));
        assert!(!slot.occupies_at(tomorrow(), t(18, 59)));
    }

    #[test]
    fn cancelled_slot_occupies_nothing() {
        let mut slot = sample_slot();
        slot.confirm().unwrap();
        slot.cancel().unwrap();
        assert!(!slot.occupies_at(tomorrow(), t(20, 0)));
    }

    #[test]
    fn equality_by_business_key_when_transient() {
        let a = sample_slot();
        let mut b = sample_slot();
        b.party_size = 2;
        assert_eq!(a, b);

        b.start_time = t(18, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn equality_by_id_when_persisted() {
        let mut a = sample_slot();
        let mut b = sample_slot();
        a.id = Some(1);
        b.id = Some(2);
        assert_ne!(a, b);

        b.id = Some(1);
        b.start_time = t(12, 0);
        b.end_time = t(14, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            ReservationStatus::Available,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
        ] {
            assert_eq!(ReservationStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ReservationStatus::from_str("Unknown"), None);
    }

    #[test]
    fn with_customer_sets_contact_fields() {
        let slot = sample_slot().with_customer(
            Some("Ada".into()),
            Some("+4912345".into()),
            Some("ada@example.com".into()),
        );
        assert_eq!(slot.customer_name.as_deref(), Some("Ada"));
        assert_eq!(slot.customer_email.as_deref(), Some("ada@example.com"));
    }
}
