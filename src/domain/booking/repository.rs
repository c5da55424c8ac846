//! Booking repository interface
//!
//! The three mutations are cross-aggregate: each one commits the
//! booking row and the vehicle row in a single store transaction, so
//! the isolation choice lives behind this trait.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Booking;
use crate::domain::vehicle::Vehicle;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>>;
    async fn find_by_booking_number(&self, number: &str) -> DomainResult<Option<Booking>>;
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;
    /// The open (non-returned) booking holding this vehicle, if any.
    async fn find_open_for_vehicle(&self, vehicle_id: Uuid) -> DomainResult<Option<Booking>>;

    /// Insert the booking and flip the vehicle to Unavailable in one
    /// serializable transaction. Two racing creates for the same
    /// vehicle must never both succeed.
    async fn create(&self, booking: &Booking, vehicle: &Vehicle) -> DomainResult<()>;

    /// Persist return and pricing facts together with the vehicle
    /// update, atomically at read-committed isolation (the vehicle is
    /// already exclusively held by this booking).
    async fn finalize(&self, booking: &Booking, vehicle: &Vehicle) -> DomainResult<()>;

    /// Remove the booking row and, when the vehicle still exists,
    /// reclaim it — atomically at repeatable-read isolation.
    async fn delete(&self, booking: &Booking, vehicle: Option<&Vehicle>) -> DomainResult<()>;
}
