//! Restaurant aggregate
//!
//! Contains the Restaurant entity and its repository interface.

pub mod model;
pub mod repository;

pub use model::Restaurant;
pub use repository::RestaurantRepository;
