//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{DomainError, DomainResult, Restaurant, RestaurantRepository};

/// In-memory repository for development and testing.
///
/// Writes replace the whole aggregate under its id, which serializes the
/// load-mutate-save window per restaurant at map-entry granularity.
pub struct InMemoryStorage {
    restaurants: DashMap<i32, Restaurant>,
    restaurant_counter: AtomicI32,
    table_counter: AtomicI32,
    slot_counter: AtomicI32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            restaurants: DashMap::new(),
            restaurant_counter: AtomicI32::new(1),
            table_counter: AtomicI32::new(1),
            slot_counter: AtomicI32::new(1),
        }
    }

    fn assign_ids(&self, restaurant: &mut Restaurant) {
        let restaurant_id = *restaurant
            .id
            .get_or_insert_with(|| self.restaurant_counter.fetch_add(1, Ordering::SeqCst));
        for table in restaurant.tables_mut() {
            let table_id = *table
                .id
                .get_or_insert_with(|| self.table_counter.fetch_add(1, Ordering::SeqCst));
            table.restaurant_id = Some(restaurant_id);
            for slot in table.slots_mut() {
                slot.id
                    .get_or_insert_with(|| self.slot_counter.fetch_add(1, Ordering::SeqCst));
                slot.table_id = Some(table_id);
            }
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryStorage {
    async fn save(&self, mut restaurant: Restaurant) -> DomainResult<Restaurant> {
        self.assign_ids(&mut restaurant);
        let id = restaurant.id.expect("id assigned above");
        self.restaurants.insert(id, restaurant.clone());
        Ok(restaurant)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>> {
        Ok(self.restaurants.get(&id).map(|entry| entry.clone()))
    }

    async fn find_active(&self) -> DomainResult<Vec<Restaurant>> {
        Ok(self
            .restaurants
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.clone())
            .collect())
    }

    async fn list_all(&self) -> DomainResult<Vec<Restaurant>> {
        Ok(self.restaurants.iter().map(|entry| entry.clone()).collect())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.restaurants
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Restaurant", "id", id.to_string()))
    }
}

// ── Tests ──────────────────────────────────────────────────────
