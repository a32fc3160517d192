//! Restaurant management service

use std::sync::Arc;

use log::info;

use crate::application::dto::{check, CreateRestaurantRequest};
use crate::domain::{DomainError, DomainResult, Restaurant, RestaurantRepository, Table, TableLocation};
use crate::notifications::{
    Event, RestaurantCreatedEvent, RestaurantStatusChangedEvent, SharedEventBus,
    TableAddedEvent, TableAvailabilityChangedEvent,
};

/// Service for restaurant and floor-plan operations
pub struct RestaurantService {
    storage: Arc<dyn RestaurantRepository>,
    event_bus: SharedEventBus,
}

impl RestaurantService {
    pub fn new(storage: Arc<dyn RestaurantRepository>, event_bus: SharedEventBus) -> Self {
        Self { storage, event_bus }
    }

    async fn load(&self, id: i32) -> DomainResult<Restaurant> {
        self.storage
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", "id", id.to_string()))
    }

    /// Register a new restaurant
    pub async fn create_restaurant(
        &self,
        request: CreateRestaurantRequest,
    ) -> DomainResult<Restaurant> {
        check(&request)?;
        let restaurant = Restaurant::new(
            request.name,
            request.address,
            request.phone,
            request.email,
            request.capacity,
            request.opening_time,
            request.closing_time,
        )?;
        let saved = self.storage.save(restaurant).await?;

        let restaurant_id = saved.id.expect("id assigned by save");
        info!("Restaurant registered: {} ({})", saved.name, restaurant_id);
        self.event_bus
            .publish(Event::RestaurantCreated(RestaurantCreatedEvent {
                restaurant_id,
                name: saved.name.clone(),
                timestamp: chrono::Utc::now(),
            }));
        Ok(saved)
    }

    /// Activate or deactivate a restaurant
    pub async fn set_active(&self, id: i32, active: bool) -> DomainResult<Restaurant> {
        let mut restaurant = self.load(id).await?;
        let was_active = restaurant.active;
        if active {
            restaurant.activate();
        } else {
            restaurant.deactivate();
        }
        let saved = self.storage.save(restaurant).await?;

        if was_active != active {
            self.event_bus
                .publish(Event::RestaurantStatusChanged(RestaurantStatusChangedEvent {
                    restaurant_id: id,
                    was_active,
                    active,
                    timestamp: chrono::Utc::now(),
                }));
        }
        Ok(saved)
    }

    /// Add a table to the floor, returning its assigned number
    pub async fn add_table(
        &self,
        restaurant_id: i32,
        seats: u32,
        location: TableLocation,
    ) -> DomainResult<u32> {
        let mut restaurant = self.load(restaurant_id).await?;
        let table = Table::new(seats, location)?;
        let number = restaurant.add_table(table)?;
        self.storage.save(restaurant).await?;

        info!(
            "Table {} added to restaurant {} ({} seats, {})",
            number, restaurant_id, seats, location
        );
        self.event_bus.publish(Event::TableAdded(TableAddedEvent {
            restaurant_id,
            table_number: number,
            seats,
            location: location.as_str().to_string(),
            timestamp: chrono::Utc::now(),
        }));
        Ok(number)
    }

    /// Open or close a table for booking
    pub async fn set_table_availability(
        &self,
        restaurant_id: i32,
        table_number: u32,
        available: bool,
    ) -> DomainResult<()> {
        let mut restaurant = self.load(restaurant_id).await?;
        let table = restaurant.table_mut(table_number).ok_or_else(|| {
            DomainError::not_found("Table", "number", table_number.to_string())
        })?;
        let changed = table.available != available;
        if available {
            table.make_available();
        } else {
            table.make_unavailable();
        }
        self.storage.save(restaurant).await?;

        if changed {
            self.event_bus
                .publish(Event::TableAvailabilityChanged(TableAvailabilityChangedEvent {
                    restaurant_id,
                    table_number,
                    available,
                    timestamp: chrono::Utc::now(),
                }));
        }
        Ok(())
    }

    /// Remove a table from the floor
    pub async fn remove_table(&self, restaurant_id: i32, table_number: u32) -> DomainResult<()> {
        let mut restaurant = self.load(restaurant_id).await?;
        restaurant.remove_table(table_number).ok_or_else(|| {
            DomainError::not_found("Table", "number", table_number.to_string())
        })?;
        self.storage.save(restaurant).await?;
        info!("Table {} removed from restaurant {}", table_number, restaurant_id);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
