//! Restaurant repository interface

use async_trait::async_trait;

use super::model::Restaurant;
use crate::domain::error::DomainResult;

/// Persistence port for the restaurant aggregate.
///
/// Implementations must serialize or optimistically version the
/// load → validate/mutate → save window per aggregate; two concurrent
/// writers that both pass the overlap check before either commits would
/// otherwise double-book a table.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Create-or-update by identity presence. Assigns restaurant, table and
    /// slot ids on first save and fixes the child back-references.
    async fn save(&self, restaurant: Restaurant) -> DomainResult<Restaurant>;

    /// Load a fully-hydrated aggregate by id
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>>;

    /// All restaurants currently taking bookings
    async fn find_active(&self) -> DomainResult<Vec<Restaurant>>;

    /// Every restaurant, any status
    async fn list_all(&self) -> DomainResult<Vec<Restaurant>>;

    /// Remove an aggregate
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
