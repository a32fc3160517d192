//! # Dinehall Reservations
//!
//! Availability and reservation engine for restaurant floor plans: tables,
//! time slots, and the booking lifecycle around them.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the availability engine and ports
//! - **application**: Use-case services and validated request payloads
//! - **infrastructure**: Storage adapters (in-memory reference implementation)
//! - **notifications**: Event types and the in-process event bus
//!
//! The engine itself is synchronous and side-effect-free: queries read a
//! loaded aggregate and return plain data, while mutations go through the
//! entities' own guards. Callers own the transaction boundary around
//! load → validate/mutate → persist.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;

pub use config::Config;

// Re-export the domain vocabulary for easy access
pub use domain::{
    Clock, DomainError, DomainResult, FixedClock, ReservationSlot, ReservationStatus, Restaurant,
    RestaurantRepository, SystemClock, Table, TableLocation,
};

// Re-export the application services
pub use application::{BookingConfirmation, BookingRequest, BookingService, CreateRestaurantRequest, RestaurantService};

// Re-export storage and notifications
pub use infrastructure::InMemoryStorage;
pub use notifications::{create_event_bus, Event, EventBus, EventSubscriber, SharedEventBus};
