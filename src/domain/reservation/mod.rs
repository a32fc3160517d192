//! Reservation slot entity and lifecycle

pub mod model;

pub use model::{ReservationSlot, ReservationStatus, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
