//! Notification events
//!
//! Defines all event types that can be broadcasted to subscribers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// Restaurant registered
    RestaurantCreated(RestaurantCreatedEvent),
    /// Restaurant activated or deactivated
    RestaurantStatusChanged(RestaurantStatusChangedEvent),
    /// Table added to the floor
    TableAdded(TableAddedEvent),
    /// Table opened or closed for booking
    TableAvailabilityChanged(TableAvailabilityChangedEvent),
    /// Reservation slot written to a table
    ReservationCreated(ReservationCreatedEvent),
    /// Reservation slot changed lifecycle status
    ReservationStatusChanged(ReservationStatusChangedEvent),
    /// Utilization crossed the configured alert threshold
    CapacityThresholdReached(CapacityThresholdReachedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::RestaurantCreated(_) => "restaurant_created",
            Event::RestaurantStatusChanged(_) => "restaurant_status_changed",
            Event::TableAdded(_) => "table_added",
            Event::TableAvailabilityChanged(_) => "table_availability_changed",
            Event::ReservationCreated(_) => "reservation_created",
            Event::ReservationStatusChanged(_) => "reservation_status_changed",
            Event::CapacityThresholdReached(_) => "capacity_threshold_reached",
        }
    }

    /// Get the restaurant the event belongs to
    pub fn restaurant_id(&self) -> i32 {
        match self {
            Event::RestaurantCreated(e) => e.restaurant_id,
            Event::RestaurantStatusChanged(e) => e.restaurant_id,
            Event::TableAdded(e) => e.restaurant_id,
            Event::TableAvailabilityChanged(e) => e.restaurant_id,
            Event::ReservationCreated(e) => e.restaurant_id,
            Event::ReservationStatusChanged(e) => e.restaurant_id,
            Event::CapacityThresholdReached(e) => e.restaurant_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreatedEvent {
    pub restaurant_id: i32,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantStatusChangedEvent {
    pub restaurant_id: i32,
    pub was_active: bool,
    pub active: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableAddedEvent {
    pub restaurant_id: i32,
    pub table_number: u32,
    pub seats: u32,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableAvailabilityChangedEvent {
    pub restaurant_id: i32,
    pub table_number: u32,
    pub available: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreatedEvent {
    pub restaurant_id: i32,
    pub table_number: u32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub party_size: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusChangedEvent {
    pub restaurant_id: i32,
    pub table_number: u32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub old_status: String,
    pub new_status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityThresholdReachedEvent {
    pub restaurant_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub utilization: f64,
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_and_restaurant_id_accessors() {
        let event = Event::RestaurantCreated(RestaurantCreatedEvent {
            restaurant_id: 7,
            name: "Trattoria Vento".into(),
            timestamp: Utc::now(),
        });
        assert_eq!(event.event_type(), "restaurant_created");
        assert_eq!(event.restaurant_id(), 7);
    }

    #[test]
    fn event_message_serializes_with_tag() {
        let message = EventMessage::new(Event::TableAdded(TableAddedEvent {
            restaurant_id: 1,
            table_number: 3,
            seats: 4,
            location: "Window".into(),
            timestamp: Utc::now(),
        }));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "TableAdded");
        assert_eq!(json["data"]["table_number"], 3);
        assert!(json["id"].is_string());
    }
}
