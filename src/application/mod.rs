//! Use-case layer
//!
//! Services orchestrating the ports around the domain core.

pub mod dto;
pub mod services;

pub use dto::{BookingConfirmation, BookingRequest, CreateRestaurantRequest};
pub use services::{BookingService, RestaurantService};
