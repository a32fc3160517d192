//! Restaurant aggregate root

use chrono::NaiveTime;
use validator::ValidateEmail;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::reservation::ReservationSlot;
use crate::domain::table::Table;

/// Restaurant entity owning its tables
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// Unique identifier, assigned on first save
    pub id: Option<i32>,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Informational seat cap across the floor
    pub capacity: u32,
    /// Whether the restaurant takes bookings
    pub active: bool,
    /// Start of service
    pub opening_time: NaiveTime,
    /// End of service
    pub closing_time: NaiveTime,
    tables: Vec<Table>,
    next_table_number: u32,
}

impl Restaurant {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: Option<String>,
        email: Option<String>,
        capacity: u32,
        opening_time: NaiveTime,
        closing_time: NaiveTime,
    ) -> DomainResult<Self> {
        let name = name.into();
        let address = address.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("restaurant name cannot be blank"));
        }
        if address.trim().is_empty() {
            return Err(DomainError::validation("restaurant address cannot be blank"));
        }
        if let Some(ref email) = email {
            if !email.is_empty() && !email.validate_email() {
                return Err(DomainError::validation("invalid email format"));
            }
        }
        if closing_time <= opening_time {
            return Err(DomainError::validation(
                "closing time must be after opening time",
            ));
        }

        Ok(Self {
            id: None,
            name,
            address,
            phone,
            email,
            capacity,
            active: true,
            opening_time,
            closing_time,
            tables: Vec::new(),
            next_table_number: 1,
        })
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Read-only view of the owned tables, in insertion order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub(crate) fn tables_mut(&mut self) -> &mut Vec<Table> {
        &mut self.tables
    }

    pub fn table(&self, number: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.number == number)
    }

    pub fn table_mut(&mut self, number: u32) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.number == number)
    }

    /// Add a table to the floor. A table without a number is assigned the
    /// next one from the restaurant-scoped counter; explicit numbers must
    /// be unique.
    pub fn add_table(&mut self, mut table: Table) -> DomainResult<u32> {
        if table.number == 0 {
            table.number = self.next_table_number;
        } else if self.table(table.number).is_some() {
            return Err(DomainError::validation(format!(
                "table number {} is already in use",
                table.number
            )));
        }
        self.next_table_number = self.next_table_number.max(table.number + 1);
        table.restaurant_id = self.id;
        let number = table.number;
        self.tables.push(table);
        Ok(number)
    }

    /// Detach a table. Returns it with the back-reference cleared, or None
    /// when no table carries the number.
    pub fn remove_table(&mut self, number: u32) -> Option<Table> {
        let idx = self.tables.iter().position(|t| t.number == number)?;
        let mut removed = self.tables.remove(idx);
        removed.restaurant_id = None;
        Some(removed)
    }

    /// Whether the range sits inside the operating hours
    pub fn is_open_during(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.opening_time && end <= self.closing_time
    }

    /// Aggregate-root write path for bookings: enforces the operating-hours
    /// window, then delegates capacity and overlap checks to the table.
    pub fn add_time_slot(&mut self, table_number: u32, slot: ReservationSlot) -> DomainResult<()> {
        if !self.is_open_during(slot.start_time, slot.end_time) {
            return Err(DomainError::overlap(format!(
                "time slot must be within operating hours {} - {}",
                self.opening_time.format("%H:%M"),
                self.closing_time.format("%H:%M")
            )));
        }
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.number == table_number)
            .ok_or_else(|| DomainError::not_found("Table", "number", table_number.to_string()))?;
        table.add_time_slot(slot)
    }

    /// Total seats across all tables, regardless of availability
    pub fn total_seats(&self) -> u32 {
        self.tables.iter().map(|t| t.seats).sum()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::{Clock, FixedClock};
    use crate::domain::table::TableLocation;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap())
    }

    fn tomorrow() -> NaiveDate {
        clock().today() + Duration::days(1)
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_restaurant() -> Restaurant {
        Restaurant::new(
            "Trattoria Vento",
            "12 Harbor Street",
            Some("+49 30 1234".into()),
            Some("book@vento.example".into()),
            40,
            t(11, 0),
            t(23, 0),
        )
        .unwrap()
    }

    fn slot(start: NaiveTime, end: NaiveTime) -> ReservationSlot {
        ReservationSlot::new(&clock(), tomorrow(), start, end, 2).unwrap()
    }

    #[test]
    fn new_restaurant_is_active() {
        let r = sample_restaurant();
        assert!(r.active);
        assert!(r.tables().is_empty());
        assert!(r.id.is_none());
    }

    #[test]
    fn rejects_blank_name_and_address() {
        assert!(Restaurant::new("  ", "addr", None, None, 10, t(9, 0), t(22, 0)).is_err());
        assert!(Restaurant::new("name", "", None, None, 10, t(9, 0), t(22, 0)).is_err());
    }

    #[test]
    fn rejects_invalid_email() {
        let err = Restaurant::new(
            "name",
            "addr",
            None,
            Some("not-an-email".into()),
            10,
            t(9, 0),
            t(22, 0),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::validation("invalid email format"));
    }

    #[test]
    fn accepts_absent_or_empty_email() {
        assert!(Restaurant::new("name", "addr", None, None, 10, t(9, 0), t(22, 0)).is_ok());
        assert!(
            Restaurant::new("name", "addr", None, Some(String::new()), 10, t(9, 0), t(22, 0))
                .is_ok()
        );
    }

    #[test]
    fn rejects_inverted_hours() {
        let err =
            Restaurant::new("name", "addr", None, None, 10, t(22, 0), t(9, 0)).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("closing time must be after opening time")
        );
    }

    #[test]
    fn activate_and_deactivate_flip_flag() {
        let mut r = sample_restaurant();
        r.deactivate();
        assert!(!r.active);
        r.activate();
        assert!(r.active);
    }

    #[test]
    fn add_table_assigns_sequential_numbers() {
        let mut r = sample_restaurant();
        let first = r.add_table(Table::new(2, TableLocation::Window).unwrap()).unwrap();
        let second = r.add_table(Table::new(4, TableLocation::Indoor).unwrap()).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn add_table_rejects_duplicate_number() {
        let mut r = sample_restaurant();
        let mut table = Table::new(2, TableLocation::Window).unwrap();
        table.number = 5;
        r.add_table(table).unwrap();

        let mut dup = Table::new(4, TableLocation::Indoor).unwrap();
        dup.number = 5;
        assert!(r.add_table(dup).is_err());

        // counter continues past explicit numbers
        let next = r.add_table(Table::new(4, TableLocation::Indoor).unwrap()).unwrap();
        assert_eq!(next, 6);
    }

    #[test]
    fn add_table_sets_back_reference() {
        let mut r = sample_restaurant();
        r.id = Some(3);
        r.add_table(Table::new(2, TableLocation::Window).unwrap()).unwrap();
        assert_eq!(r.tables()[0].restaurant_id, Some(3));
    }

    #[test]
    fn remove_table_detaches() {
        let mut r = sample_restaurant();
        r.id = Some(3);
        let number = r.add_table(Table::new(2, TableLocation::Window).unwrap()).unwrap();
        let removed = r.remove_table(number).unwrap();
        assert!(removed.restaurant_id.is_none());
        assert!(r.tables().is_empty());
        assert!(r.remove_table(number).is_none());
    }

    #[test]
    fn slot_within_hours_is_accepted() {
        let mut r = sample_restaurant();
        let number = r.add_table(Table::new(4, TableLocation::Window).unwrap()).unwrap();
        r.add_time_slot(number, slot(t(19, 0), t(21, 0))).unwrap();
        assert_eq!(r.table(number).unwrap().slots().len(), 1);
    }

    #[test]
    fn slot_outside_hours_is_rejected() {
        let mut r = sample_restaurant();
        let number = r.add_table(Table::new(4, TableLocation::Window).unwrap()).unwrap();
        let err = r.add_time_slot(number, slot(t(22, 0), t(23, 30))).unwrap_err();
        assert_eq!(
            err,
            DomainError::overlap("time slot must be within operating hours 11:00 - 23:00")
        );
    }

    #[test]
    fn slot_touching_hours_bounds_is_accepted() {
        let mut r = sample_restaurant();
        let number = r.add_table(Table::new(4, TableLocation::Window).unwrap()).unwrap();
        r.add_time_slot(number, slot(t(11, 0), t(13, 0))).unwrap();
        r.add_time_slot(number, slot(t(21, 0), t(23, 0))).unwrap();
    }

    #[test]
    fn slot_for_unknown_table_is_not_found() {
        let mut r = sample_restaurant();
        let err = r.add_time_slot(99, slot(t(19, 0), t(21, 0))).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn total_seats_sums_tables() {
        let mut r = sample_restaurant();
        r.add_table(Table::new(2, TableLocation::Window).unwrap()).unwrap();
        r.add_table(Table::new(6, TableLocation::Terrace).unwrap()).unwrap();
        assert_eq!(r.total_seats(), 8);
    }
}
