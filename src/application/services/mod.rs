//! Application services

pub mod booking;
pub mod restaurant;

pub use booking::BookingService;
pub use restaurant::RestaurantService;
