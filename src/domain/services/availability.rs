//! Availability engine
//!
//! Stateless queries and validations over a restaurant's table/slot graph.
//! Every function reads the aggregate it is handed and computes a derived
//! result; mutation stays on the entities.

use chrono::{NaiveDate, NaiveTime};
use log::info;

use crate::domain::clock::Clock;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::restaurant::Restaurant;
use crate::domain::table::Table;

fn validate_query(
    clock: &dyn Clock,
    party_size: u32,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> DomainResult<()> {
    if party_size == 0 {
        return Err(DomainError::validation("party size must be positive"));
    }
    if date < clock.today() {
        return Err(DomainError::validation("date cannot be in the past"));
    }
    if end <= start {
        return Err(DomainError::validation("end time must be after start time"));
    }
    Ok(())
}

/// Every available table that seats the party and is free for the range,
/// in the restaurant's table insertion order.
pub fn find_available_tables<'a>(
    restaurant: &'a Restaurant,
    party_size: u32,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    clock: &dyn Clock,
) -> DomainResult<Vec<&'a Table>> {
    validate_query(clock, party_size, date, start, end)?;
    Ok(restaurant
        .tables()
        .iter()
        .filter(|table| {
            table.available && table.seats >= party_size && table.is_available_at(date, start, end)
        })
        .collect())
}

/// The smallest table that still fits the party, leaving larger tables free
/// for larger parties. Ties go to the first candidate encountered.
pub fn find_best_table<'a>(
    restaurant: &'a Restaurant,
    party_size: u32,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    clock: &dyn Clock,
) -> DomainResult<Option<&'a Table>> {
    let candidates = find_available_tables(restaurant, party_size, date, start, end, clock)?;
    let mut best: Option<&Table> = None;
    for table in candidates {
        match best {
            Some(current) if table.seats >= current.seats => {}
            _ => best = Some(table),
        }
    }
    Ok(best)
}

/// Fraction of tables currently flagged available.
///
/// The date argument is accepted for call-site symmetry with the other
/// queries but does not enter the calculation; the rate reflects the
/// availability flags alone.
pub fn calculate_availability_rate(restaurant: &Restaurant, _date: NaiveDate) -> f64 {
    let total = restaurant.tables().len();
    if total == 0 {
        return 0.0;
    }
    let available = restaurant.tables().iter().filter(|t| t.available).count();
    available as f64 / total as f64
}

/// Fraction of seat capacity occupied by active bookings at the instant.
///
/// Both the occupied seats and the seat total range over available tables;
/// a slot occupies when its status is active, its date matches, and
/// `start <= time < end`.
pub fn calculate_utilization_rate(restaurant: &Restaurant, date: NaiveDate, time: NaiveTime) -> f64 {
    let available_tables: Vec<&Table> = restaurant.tables().iter().filter(|t| t.available).collect();
    let total_seats: u32 = available_tables.iter().map(|t| t.seats).sum();
    if total_seats == 0 {
        return 0.0;
    }
    let occupied: u32 = available_tables
        .iter()
        .map(|t| t.occupied_seats_at(date, time))
        .sum();
    occupied as f64 / total_seats as f64
}

/// Capacity-only existence check: can any available table seat the party
/// on the date at all, ignoring time-range conflicts.
pub fn can_accommodate_on_date(restaurant: &Restaurant, party_size: u32, _date: NaiveDate) -> bool {
    restaurant
        .tables()
        .iter()
        .any(|t| t.available && t.seats >= party_size)
}

/// Composite guard run before a booking is written.
///
/// Fails on the first violated constraint with an error naming it.
/// Weather-dependent zones produce an advisory log line only.
pub fn validate_reservation_constraints(
    restaurant: &Restaurant,
    table: &Table,
    party_size: u32,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    clock: &dyn Clock,
) -> DomainResult<()> {
    validate_query(clock, party_size, date, start, end)?;
    if !restaurant.active {
        return Err(DomainError::validation("restaurant is not active"));
    }
    if !table.available {
        return Err(DomainError::validation("table is not available"));
    }
    if table.seats < party_size {
        return Err(DomainError::capacity("table cannot accommodate the party size"));
    }
    if !table.is_available_at(date, start, end) {
        return Err(DomainError::overlap(
            "table is not available for the requested time",
        ));
    }
    if let Some(minimum) = table.location.minimum_party_size() {
        if party_size < minimum {
            return Err(DomainError::validation(format!(
                "{} tables require a minimum party size of {}",
                table.location, minimum
            )));
        }
    }
    if table.location.is_weather_dependent() {
        info!(
            "Table {} is in a weather-dependent zone ({})",
            table.number, table.location
        );
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────
