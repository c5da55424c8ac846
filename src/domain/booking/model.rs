//! Booking domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Booking lifecycle state, derived from which facts are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    /// Vehicle is out; return fields are null
    Open,
    /// Vehicle returned; cost not yet computed
    Returned,
    /// Total cost applied; terminal
    Priced,
}

/// Rental booking
///
/// Return timestamp and return odometer are set together, never
/// independently; the total cost is set only after both are present.
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: Uuid,
    /// Human-readable number: `{PLATE}-{NNNNN}-{AAAAA}`
    pub booking_number: String,
    /// Immutable after creation
    pub vehicle_id: Uuid,
    /// Nullable so customer data can be erased without touching history
    pub customer_id: Option<Uuid>,
    pub booked_at: DateTime<Utc>,
    /// Odometer reading at pickup
    pub booked_odometer: u32,
    pub returned_at: Option<DateTime<Utc>>,
    pub returned_odometer: Option<u32>,
    pub total_cost: Option<Decimal>,
    /// Optimistic concurrency token, bumped by the store on every write
    pub version: i32,
}

impl Booking {
    pub fn open(
        booking_number: impl Into<String>,
        vehicle_id: Uuid,
        customer_id: Uuid,
        booked_at: DateTime<Utc>,
        booked_odometer: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_number: booking_number.into(),
            vehicle_id,
            customer_id: Some(customer_id),
            booked_at,
            booked_odometer,
            returned_at: None,
            returned_odometer: None,
            total_cost: None,
            version: 0,
        }
    }

    pub fn state(&self) -> BookingState {
        match (self.returned_at, self.total_cost) {
            (None, _) => BookingState::Open,
            (Some(_), None) => BookingState::Returned,
            (Some(_), Some(_)) => BookingState::Priced,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == BookingState::Open
    }

    /// Record the vehicle return. Only valid while Open, and the
    /// returned reading may not be below the pickup reading.
    pub fn return_vehicle(&mut self, odometer: u32, at: DateTime<Utc>) -> DomainResult<()> {
        if self.state() != BookingState::Open {
            return Err(DomainError::InvalidStateTransition(format!(
                "booking {} is already returned",
                self.booking_number
            )));
        }
        if odometer < self.booked_odometer {
            return Err(DomainError::InvalidOdometerUpdate {
                stored: self.booked_odometer,
                new: odometer,
            });
        }
        self.returned_odometer = Some(odometer);
        self.returned_at = Some(at);
        Ok(())
    }

    /// Apply the computed rental cost. Only valid in Returned state.
    pub fn apply_cost(&mut self, amount: Decimal) -> DomainResult<()> {
        match self.state() {
            BookingState::Returned => {
                self.total_cost = Some(amount);
                Ok(())
            }
            BookingState::Open => Err(DomainError::InvalidStateTransition(format!(
                "booking {} has not been returned yet",
                self.booking_number
            ))),
            BookingState::Priced => Err(DomainError::InvalidStateTransition(format!(
                "booking {} is already priced",
                self.booking_number
            ))),
        }
    }

    /// Odometer delta of the rental; None while the booking is open.
    pub fn distance_traveled(&self) -> Option<u32> {
        self.returned_odometer
            .map(|r| r.saturating_sub(self.booked_odometer))
    }
}

// ── Tests ──────────────────────────────────────────────────────
