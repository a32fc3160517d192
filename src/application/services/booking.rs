//! Booking service
//!
//! Orchestrates the load → validate/mutate → persist → publish flow for
//! reservation slots. All domain rules live on the entities and the
//! availability engine; this service wires them to the ports.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use log::info;

use crate::application::dto::{check, BookingConfirmation, BookingRequest};
use crate::config::Config;
use crate::domain::services::availability;
use crate::domain::{
    Clock, DomainError, DomainResult, ReservationSlot, Restaurant, RestaurantRepository, Table,
};
use crate::notifications::{
    CapacityThresholdReachedEvent, Event, ReservationCreatedEvent, ReservationStatusChangedEvent,
    SharedEventBus,
};

/// Service for reservation booking and lifecycle operations
pub struct BookingService {
    storage: Arc<dyn RestaurantRepository>,
    event_bus: SharedEventBus,
    clock: Arc<dyn Clock>,
    config: Config,
}

impl BookingService {
    pub fn new(
        storage: Arc<dyn RestaurantRepository>,
        event_bus: SharedEventBus,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        Self {
            storage,
            event_bus,
            clock,
            config,
        }
    }

    async fn load(&self, id: i32) -> DomainResult<Restaurant> {
        self.storage
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", "id", id.to_string()))
    }

    /// Book the best-fitting table for the request.
    ///
    /// Picks the smallest free table that seats the party, validates the
    /// composite reservation constraints, writes the slot through the
    /// aggregate root and persists before publishing.
    pub async fn book(
        &self,
        restaurant_id: i32,
        request: BookingRequest,
    ) -> DomainResult<BookingConfirmation> {
        check(&request)?;
        let mut restaurant = self.load(restaurant_id).await?;

        let table_number = {
            let best = availability::find_best_table(
                &restaurant,
                request.party_size,
                request.date,
                request.start_time,
                request.end_time,
                self.clock.as_ref(),
            )?
            .ok_or_else(|| {
                DomainError::capacity("no table can accommodate the requested party")
            })?;
            availability::validate_reservation_constraints(
                &restaurant,
                best,
                request.party_size,
                request.date,
                request.start_time,
                request.end_time,
                self.clock.as_ref(),
            )?;
            best.number
        };

        let slot = ReservationSlot::new(
            self.clock.as_ref(),
            request.date,
            request.start_time,
            request.end_time,
            request.party_size,
        )?
        .with_customer(
            request.customer_name.clone(),
            request.customer_phone.clone(),
            request.customer_email.clone(),
        );
        restaurant.add_time_slot(table_number, slot)?;

        let saved = self.storage.save(restaurant).await?;
        let reservation_id = saved
            .table(table_number)
            .and_then(|table| {
                table
                    .slots()
                    .iter()
                    .find(|s| {
                        s.date == request.date
                            && s.start_time == request.start_time
                            && s.end_time == request.end_time
                    })
                    .and_then(|s| s.id)
            })
            .expect("booked slot persisted");

        info!(
            "Reservation {} booked: restaurant={}, table={}, {} {}-{}, party of {}",
            reservation_id,
            restaurant_id,
            table_number,
            request.date,
            request.start_time,
            request.end_time,
            request.party_size
        );
        self.event_bus
            .publish(Event::ReservationCreated(ReservationCreatedEvent {
                restaurant_id,
                table_number,
                date: request.date,
                start_time: request.start_time,
                end_time: request.end_time,
                party_size: request.party_size,
                timestamp: chrono::Utc::now(),
            }));
        self.check_capacity_threshold(&saved, request.date, request.start_time);

        Ok(BookingConfirmation {
            restaurant_id,
            table_number,
            reservation_id,
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            party_size: request.party_size,
        })
    }

    fn check_capacity_threshold(&self, restaurant: &Restaurant, date: NaiveDate, time: NaiveTime) {
        let utilization = availability::calculate_utilization_rate(restaurant, date, time);
        if utilization >= self.config.capacity_alert_threshold {
            if let Some(restaurant_id) = restaurant.id {
                info!(
                    "Capacity threshold reached: restaurant={}, utilization={:.2}",
                    restaurant_id, utilization
                );
                self.event_bus
                    .publish(Event::CapacityThresholdReached(CapacityThresholdReachedEvent {
                        restaurant_id,
                        date,
                        time,
                        utilization,
                        threshold: self.config.capacity_alert_threshold,
                        timestamp: chrono::Utc::now(),
                    }));
            }
        }
    }

    async fn transition(
        &self,
        restaurant_id: i32,
        reservation_id: i32,
        apply: fn(&mut ReservationSlot) -> DomainResult<()>,
    ) -> DomainResult<()> {
        let mut restaurant = self.load(restaurant_id).await?;

        let (table_id, old_status, new_status, date, start_time, end_time) = {
            let slot = restaurant
                .tables_mut()
                .iter_mut()
                .flat_map(|table| table.slots_mut().iter_mut())
                .find(|slot| slot.id == Some(reservation_id))
                .ok_or_else(|| {
                    DomainError::not_found("ReservationSlot", "id", reservation_id.to_string())
                })?;
            let old_status = slot.status;
            apply(slot)?;
            (
                slot.table_id,
                old_status,
                slot.status,
                slot.date,
                slot.start_time,
                slot.end_time,
            )
        };

        let table_number = table_id
            .and_then(|table_id| {
                restaurant
                    .tables()
                    .iter()
                    .find(|t| t.id == Some(table_id))
                    .map(|t| t.number)
            })
            .unwrap_or_default();

        self.storage.save(restaurant).await?;

        info!(
            "Reservation {} transitioned: {} -> {}",
            reservation_id, old_status, new_status
        );
        self.event_bus
            .publish(Event::ReservationStatusChanged(ReservationStatusChangedEvent {
                restaurant_id,
                table_number,
                date,
                start_time,
                end_time,
                old_status: old_status.to_string(),
                new_status: new_status.to_string(),
                timestamp: chrono::Utc::now(),
            }));
        Ok(())
    }

    /// Confirm a booked reservation
    pub async fn confirm_reservation(
        &self,
        restaurant_id: i32,
        reservation_id: i32,
    ) -> DomainResult<()> {
        self.transition(restaurant_id, reservation_id, ReservationSlot::confirm)
            .await
    }

    /// Cancel a confirmed reservation
    pub async fn cancel_reservation(
        &self,
        restaurant_id: i32,
        reservation_id: i32,
    ) -> DomainResult<()> {
        self.transition(restaurant_id, reservation_id, ReservationSlot::cancel)
            .await
    }

    /// Complete a seated reservation
    pub async fn complete_reservation(
        &self,
        restaurant_id: i32,
        reservation_id: i32,
    ) -> DomainResult<()> {
        self.transition(restaurant_id, reservation_id, ReservationSlot::complete)
            .await
    }

    /// Tables free for the range, cloned out of the loaded aggregate
    pub async fn find_available_tables(
        &self,
        restaurant_id: i32,
        party_size: u32,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> DomainResult<Vec<Table>> {
        let restaurant = self.load(restaurant_id).await?;
        let tables = availability::find_available_tables(
            &restaurant,
            party_size,
            date,
            start,
            end,
            self.clock.as_ref(),
        )?;
        Ok(tables.into_iter().cloned().collect())
    }

    /// Fraction of tables flagged available
    pub async fn availability_rate(&self, restaurant_id: i32, date: NaiveDate) -> DomainResult<f64> {
        let restaurant = self.load(restaurant_id).await?;
        Ok(availability::calculate_availability_rate(&restaurant, date))
    }

    /// Fraction of seat capacity occupied at the instant
    pub async fn utilization_rate(
        &self,
        restaurant_id: i32,
        date: NaiveDate,
        time: NaiveTime,
    ) -> DomainResult<f64> {
        let restaurant = self.load(restaurant_id).await?;
        Ok(availability::calculate_utilization_rate(&restaurant, date, time))
    }

    /// Capacity-only check that some table could seat the party
    pub async fn can_accommodate(
        &self,
        restaurant_id: i32,
        party_size: u32,
        date: NaiveDate,
    ) -> DomainResult<bool> {
        let restaurant = self.load(restaurant_id).await?;
        Ok(availability::can_accommodate_on_date(
            &restaurant,
            party_size,
            date,
        ))
    }
}

// ── Tests ──────────────────────────────────────────────────────
