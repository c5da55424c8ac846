//! Vehicle master-data service

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::vehicle::{normalize_license_plate, Vehicle, VehicleType};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn register_vehicle(
        &self,
        license_plate: &str,
        vehicle_type: VehicleType,
        odometer: u32,
    ) -> DomainResult<Vehicle> {
        let vehicle = Vehicle::register(license_plate, vehicle_type, odometer)?;
        // The unique plate index backs this up; racing registrations
        // fall through to a store-level Conflict
        if self
            .repos
            .vehicles()
            .find_by_license_plate(&vehicle.license_plate)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "vehicle with license plate {} already exists",
                vehicle.license_plate
            )));
        }
        self.repos.vehicles().save(&vehicle).await?;
        info!(license_plate = %vehicle.license_plate, "Vehicle registered");
        Ok(vehicle)
    }

    pub async fn get_vehicle(&self, id: Uuid) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn get_by_license_plate(&self, plate: &str) -> DomainResult<Vehicle> {
        let plate = normalize_license_plate(plate)?;
        self.repos
            .vehicles()
            .find_by_license_plate(&plate)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Vehicle",
                field: "license_plate",
                value: plate,
            })
    }

    pub async fn list_vehicles(&self, include_deleted: bool) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_all(include_deleted).await
    }

    pub async fn list_available(
        &self,
        vehicle_type: Option<VehicleType>,
    ) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_available(vehicle_type).await
    }

    /// Record a new odometer reading outside a booking (e.g. service
    /// drives). The reading never decreases.
    pub async fn update_odometer(&self, id: Uuid, reading: u32) -> DomainResult<Vehicle> {
        let mut vehicle = self.get_vehicle(id).await?;
        vehicle.update_odometer(reading)?;
        self.repos.vehicles().update(&vehicle).await?;
        vehicle.version += 1;
        Ok(vehicle)
    }

    /// Soft-delete: the row is kept for booking history and excluded
    /// from availability queries. Refused while an open booking holds
    /// the vehicle.
    pub async fn soft_delete_vehicle(&self, id: Uuid) -> DomainResult<()> {
        let mut vehicle = self.get_vehicle(id).await?;
        if vehicle.is_deleted() {
            // Deleting twice is a no-op
            return Ok(());
        }
        if let Some(open) = self.repos.bookings().find_open_for_vehicle(id).await? {
            return Err(DomainError::PreconditionFailed(format!(
                "vehicle {} is held by open booking {}",
                vehicle.license_plate, open.booking_number
            )));
        }
        vehicle.soft_delete();
        self.repos.vehicles().update(&vehicle).await?;
        info!(license_plate = %vehicle.license_plate, "Vehicle soft-deleted");
        Ok(())
    }

    pub async fn restore_vehicle(&self, id: Uuid) -> DomainResult<Vehicle> {
        let mut vehicle = self.get_vehicle(id).await?;
        if !vehicle.is_deleted() {
            return Ok(vehicle);
        }
        vehicle.restore();
        self.repos.vehicles().update(&vehicle).await?;
        vehicle.version += 1;
        info!(license_plate = %vehicle.license_plate, "Vehicle restored");
        Ok(vehicle)
    }
}
