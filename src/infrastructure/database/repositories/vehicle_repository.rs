//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::vehicle::{
    Vehicle, VehicleLifecycle, VehicleRepository, VehicleStatus, VehicleType,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::vehicle;

use super::map_db_err;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: vehicle::Model) -> DomainResult<Vehicle> {
    let vehicle_type = VehicleType::from_str(&m.vehicle_type).ok_or_else(|| {
        DomainError::Internal(format!(
            "vehicle {} has unknown type '{}'",
            m.id, m.vehicle_type
        ))
    })?;
    let status = VehicleStatus::from_str(&m.status).ok_or_else(|| {
        DomainError::Internal(format!("vehicle {} has unknown status '{}'", m.id, m.status))
    })?;
    Ok(Vehicle {
        id: m.id,
        license_plate: m.license_plate,
        vehicle_type,
        status,
        odometer: m.odometer.max(0) as u32,
        lifecycle: if m.deleted {
            VehicleLifecycle::Deleted
        } else {
            VehicleLifecycle::Active
        },
        version: m.version,
    })
}

fn domain_to_active(v: &Vehicle, version: i32) -> vehicle::ActiveModel {
    vehicle::ActiveModel {
        id: Set(v.id),
        license_plate: Set(v.license_plate.clone()),
        vehicle_type: Set(v.vehicle_type.as_str().to_string()),
        status: Set(v.status.as_str().to_string()),
        odometer: Set(v.odometer as i32),
        deleted: Set(v.is_deleted()),
        version: Set(version),
    }
}

/// Version-guarded vehicle update, usable inside an open transaction.
///
/// Bumps the version token; zero affected rows means the row changed
/// (or vanished) since it was read, which surfaces as `Conflict` so
/// the coordinator re-runs the whole unit of work.
pub(crate) async fn update_guarded<C: ConnectionTrait>(conn: &C, v: &Vehicle) -> DomainResult<()> {
    let mut active = domain_to_active(v, v.version + 1);
    active.id = NotSet;
    let res = vehicle::Entity::update_many()
        .set(active)
        .filter(vehicle::Column::Id.eq(v.id))
        .filter(vehicle::Column::Version.eq(v.version))
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    if res.rows_affected == 0 {
        return Err(DomainError::Conflict(format!(
            "vehicle {} was modified concurrently",
            v.license_plate
        )));
    }
    Ok(())
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn save(&self, v: &Vehicle) -> DomainResult<()> {
        debug!("Saving vehicle: {}", v.license_plate);
        domain_to_active(v, v.version)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_license_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find()
            .filter(vehicle::Column::LicensePlate.eq(plate))
            .filter(vehicle::Column::Deleted.eq(false))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self, include_deleted: bool) -> DomainResult<Vec<Vehicle>> {
        let mut query = vehicle::Entity::find().order_by_asc(vehicle::Column::LicensePlate);
        if !include_deleted {
            query = query.filter(vehicle::Column::Deleted.eq(false));
        }
        let models = query.all(&self.db).await.map_err(map_db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_available(
        &self,
        vehicle_type: Option<VehicleType>,
    ) -> DomainResult<Vec<Vehicle>> {
        let mut query = vehicle::Entity::find()
            .filter(vehicle::Column::Status.eq(VehicleStatus::Available.as_str()))
            .filter(vehicle::Column::Deleted.eq(false))
            .order_by_asc(vehicle::Column::LicensePlate);
        if let Some(vt) = vehicle_type {
            query = query.filter(vehicle::Column::VehicleType.eq(vt.as_str()));
        }
        let models = query.all(&self.db).await.map_err(map_db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, v: &Vehicle) -> DomainResult<()> {
        debug!("Updating vehicle: {}", v.license_plate);
        update_guarded(&self.db, v).await
    }
}
