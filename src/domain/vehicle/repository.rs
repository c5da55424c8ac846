//! Vehicle repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Vehicle, VehicleType};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn save(&self, vehicle: &Vehicle) -> DomainResult<()>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Vehicle>>;
    /// Lookup by normalized plate; soft-deleted vehicles are excluded.
    async fn find_by_license_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>>;
    async fn find_all(&self, include_deleted: bool) -> DomainResult<Vec<Vehicle>>;
    /// Available, non-deleted vehicles, optionally narrowed by type.
    async fn find_available(&self, vehicle_type: Option<VehicleType>) -> DomainResult<Vec<Vehicle>>;
    /// Version-guarded update. A stale version token surfaces as `Conflict`.
    async fn update(&self, vehicle: &Vehicle) -> DomainResult<()>;
}
