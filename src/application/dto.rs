//! Application-layer request payloads

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRestaurantRequest {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "address is required"))]
    pub address: String,
    pub phone: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub capacity: u32,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(range(min = 1, message = "party size must be positive"))]
    pub party_size: u32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(length(min = 1, max = 120, message = "customer name cannot be empty"))]
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub customer_email: Option<String>,
}

/// Result of a successful booking
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub restaurant_id: i32,
    pub table_number: u32,
    pub reservation_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub party_size: u32,
}

/// Map validator failures onto the domain error type
pub fn check<T: Validate>(request: &T) -> DomainResult<()> {
    request.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: invalid value", field),
                })
            })
            .collect();
        messages.sort();
        DomainError::validation(messages.join("; "))
    })
}
