//! Vehicle DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::vehicle::Vehicle;

#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleDto {
    pub id: Uuid,
    pub license_plate: String,
    /// `SmallCar`, `CombiCar` or `Truck`
    pub vehicle_type: String,
    /// `Available` or `Unavailable`
    pub status: String,
    pub odometer: u32,
    pub deleted: bool,
}

impl VehicleDto {
    pub fn from_domain(v: Vehicle) -> Self {
        Self {
            id: v.id,
            license_plate: v.license_plate.clone(),
            vehicle_type: v.vehicle_type.as_str().to_string(),
            status: v.status.as_str().to_string(),
            odometer: v.odometer,
            deleted: v.is_deleted(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterVehicleRequest {
    #[validate(length(min = 6, max = 6, message = "license plate must be 6 characters"))]
    pub license_plate: String,
    /// `SmallCar`, `CombiCar` or `Truck`
    pub vehicle_type: String,
    #[serde(default)]
    pub odometer: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOdometerRequest {
    pub odometer: u32,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListVehiclesQuery {
    /// Include soft-deleted vehicles
    #[serde(default)]
    pub include_deleted: bool,
    /// Only available vehicles, optionally narrowed by type
    #[serde(default)]
    pub available: bool,
    pub vehicle_type: Option<String>,
}
