//! Booking DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::booking::{Booking, BookingState};

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingDto {
    pub id: Uuid,
    pub booking_number: String,
    pub vehicle_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Uuid>,
    pub booked_at: DateTime<Utc>,
    pub booked_odometer: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_odometer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Decimal>,
    /// `Open`, `Returned` or `Priced`
    pub state: String,
}

impl BookingDto {
    pub fn from_domain(b: Booking) -> Self {
        let state = match b.state() {
            BookingState::Open => "Open",
            BookingState::Returned => "Returned",
            BookingState::Priced => "Priced",
        }
        .to_string();
        Self {
            id: b.id,
            booking_number: b.booking_number,
            vehicle_id: b.vehicle_id,
            customer_id: b.customer_id,
            booked_at: b.booked_at,
            booked_odometer: b.booked_odometer,
            returned_at: b.returned_at,
            returned_odometer: b.returned_odometer,
            total_cost: b.total_cost,
            state,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 6, max = 6, message = "license plate must be 6 characters"))]
    pub license_plate: String,
    #[validate(length(min = 1, message = "personal number must not be empty"))]
    pub customer_personal_number: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FinalizeBookingRequest {
    pub returned_odometer: u32,
}
