//! Booking service — the reservation transaction coordinator
//!
//! Orchestrates the three cross-aggregate protocols (create, finalize,
//! cancel) over the repository provider. State-machine and pricing
//! violations are detected before any store write is attempted; store
//! conflicts re-run the whole unit of work (reload, validate, commit)
//! under a bounded backoff budget before `Conflict` is surfaced.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingNumberGenerator};
use crate::domain::pricing::{compute_cost, PricingPolicy};
use crate::domain::vehicle::normalize_license_plate;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    pricing: PricingPolicy,
    numbers: BookingNumberGenerator,
    retry: RetryConfig,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, pricing: PricingPolicy) -> Self {
        Self {
            repos,
            pricing,
            numbers: BookingNumberGenerator::from_entropy(),
            retry: RetryConfig::default(),
        }
    }

    /// Swap in a seeded generator (tests).
    pub fn with_number_generator(mut self, numbers: BookingNumberGenerator) -> Self {
        self.numbers = numbers;
        self
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    // ── Reads ──────────────────────────────────────────────────

    pub async fn get_booking(&self, id: Uuid) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn get_by_booking_number(&self, number: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_booking_number(number)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "booking_number",
                value: number.to_string(),
            })
    }

    pub async fn list_bookings(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }

    // ── CreateBooking ──────────────────────────────────────────

    /// Reserve a vehicle for a customer.
    ///
    /// Exactly one of two racing calls for the same plate succeeds;
    /// the loser observes `PreconditionFailed` (vehicle already
    /// flipped) or `Conflict` (retry budget exhausted).
    pub async fn create_booking(
        &self,
        license_plate: &str,
        customer_personal_number: &str,
    ) -> DomainResult<Booking> {
        let plate = normalize_license_plate(license_plate)?;
        retry_with_backoff(
            self.retry.clone(),
            || self.try_create(&plate, customer_personal_number),
            |e| e.is_transient(),
            "create_booking",
        )
        .await
    }

    async fn try_create(&self, plate: &str, personal_number: &str) -> DomainResult<Booking> {
        let customer = self
            .repos
            .customers()
            .find_by_personal_number(personal_number)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Customer",
                field: "personal_number",
                value: personal_number.to_string(),
            })?;
        let mut vehicle = self
            .repos
            .vehicles()
            .find_by_license_plate(plate)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Vehicle",
                field: "license_plate",
                value: plate.to_string(),
            })?;

        vehicle.mark_reserved()?;

        // A fresh number per attempt: a one-in-a-billion collision on
        // the unique index comes back as Conflict and regenerates here
        let booking_number = self.numbers.generate(&vehicle.license_plate)?;
        let booking = Booking::open(
            booking_number,
            vehicle.id,
            customer.id,
            Utc::now(),
            vehicle.odometer,
        );

        self.repos.bookings().create(&booking, &vehicle).await?;

        info!(
            booking_number = %booking.booking_number,
            license_plate = %vehicle.license_plate,
            "Booking created"
        );
        Ok(booking)
    }

    // ── FinalizeBooking ────────────────────────────────────────

    /// Close a booking: record the return, release the vehicle and
    /// apply the computed rental cost.
    pub async fn finalize_booking(
        &self,
        booking_id: Uuid,
        returned_odometer: u32,
    ) -> DomainResult<Booking> {
        retry_with_backoff(
            self.retry.clone(),
            || self.try_finalize(booking_id, returned_odometer),
            |e| e.is_transient(),
            "finalize_booking",
        )
        .await
    }

    async fn try_finalize(&self, booking_id: Uuid, returned_odometer: u32) -> DomainResult<Booking> {
        let mut booking = self.get_booking(booking_id).await?;
        // An open booking referencing a missing vehicle is a data
        // integrity violation, not a client error
        let mut vehicle = self
            .repos
            .vehicles()
            .find_by_id(booking.vehicle_id)
            .await?
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "vehicle {} referenced by booking {} does not exist",
                    booking.vehicle_id, booking.booking_number
                ))
            })?;

        booking.return_vehicle(returned_odometer, Utc::now())?;
        vehicle.update_odometer(returned_odometer)?;
        vehicle.mark_available();

        let total_cost = compute_cost(&booking, vehicle.vehicle_type, &self.pricing)?;
        booking.apply_cost(total_cost)?;

        self.repos.bookings().finalize(&booking, &vehicle).await?;

        info!(
            booking_number = %booking.booking_number,
            total_cost = %total_cost,
            "Booking finalized"
        );
        Ok(booking)
    }

    // ── CancelBooking ──────────────────────────────────────────

    /// Cancel an open booking and reclaim its vehicle. Idempotent:
    /// cancelling an absent booking is a no-op, not an error.
    pub async fn cancel_booking(&self, booking_id: Uuid) -> DomainResult<()> {
        retry_with_backoff(
            self.retry.clone(),
            || self.try_cancel(booking_id),
            |e| e.is_transient(),
            "cancel_booking",
        )
        .await
    }

    async fn try_cancel(&self, booking_id: Uuid) -> DomainResult<()> {
        let Some(booking) = self.repos.bookings().find_by_id(booking_id).await? else {
            // Already cancelled
            return Ok(());
        };
        if !booking.is_open() {
            return Err(DomainError::PreconditionFailed(format!(
                "booking {} is already returned and cannot be cancelled",
                booking.booking_number
            )));
        }

        // The vehicle may have been removed out-of-band; the booking
        // must still be cancellable
        let vehicle = match self.repos.vehicles().find_by_id(booking.vehicle_id).await? {
            Some(mut v) => {
                v.mark_available();
                Some(v)
            }
            None => {
                warn!(
                    booking_number = %booking.booking_number,
                    "Cancelling booking whose vehicle no longer exists"
                );
                None
            }
        };

        self.repos
            .bookings()
            .delete(&booking, vehicle.as_ref())
            .await?;

        info!(booking_number = %booking.booking_number, "Booking cancelled");
        Ok(())
    }
}
