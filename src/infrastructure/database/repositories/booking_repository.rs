//! SeaORM implementation of BookingRepository
//!
//! Owns the three cross-aggregate transactions of the reservation
//! protocol. Isolation follows the protocol design: serializable on
//! create, read-committed on finalize, repeatable-read on cancel.
//! Every vehicle/booking write inside a transaction is additionally
//! version-guarded, so a stale read is rejected rather than silently
//! overwritten.

use async_trait::async_trait;
use log::debug;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingRepository};
use crate::domain::vehicle::Vehicle;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

use super::vehicle_repository::update_guarded;
use super::{isolation_for, map_db_err};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin(&self, level: IsolationLevel) -> DomainResult<DatabaseTransaction> {
        self.db
            .begin_with_config(isolation_for(&self.db, level), None)
            .await
            .map_err(map_db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        booking_number: m.booking_number,
        vehicle_id: m.vehicle_id,
        customer_id: m.customer_id,
        booked_at: m.booked_at,
        booked_odometer: m.booked_odometer.max(0) as u32,
        returned_at: m.returned_at,
        returned_odometer: m.returned_odometer.map(|r| r.max(0) as u32),
        total_cost: m.total_cost,
        version: m.version,
    }
}

fn domain_to_active(b: &Booking, version: i32) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id),
        booking_number: Set(b.booking_number.clone()),
        vehicle_id: Set(b.vehicle_id),
        customer_id: Set(b.customer_id),
        booked_at: Set(b.booked_at),
        booked_odometer: Set(b.booked_odometer as i32),
        returned_at: Set(b.returned_at),
        returned_odometer: Set(b.returned_odometer.map(|r| r as i32)),
        total_cost: Set(b.total_cost),
        version: Set(version),
    }
}

async fn update_booking_guarded(txn: &DatabaseTransaction, b: &Booking) -> DomainResult<()> {
    let mut active = domain_to_active(b, b.version + 1);
    active.id = NotSet;
    let res = booking::Entity::update_many()
        .set(active)
        .filter(booking::Column::Id.eq(b.id))
        .filter(booking::Column::Version.eq(b.version))
        .exec(txn)
        .await
        .map_err(map_db_err)?;
    if res.rows_affected == 0 {
        return Err(DomainError::Conflict(format!(
            "booking {} was modified concurrently",
            b.booking_number
        )));
    }
    Ok(())
}

/// Commit on success, roll back on any error. No partial state —
/// a vehicle flip without its booking row, or vice versa — may ever
/// become visible.
async fn commit_or_rollback(txn: DatabaseTransaction, result: DomainResult<()>) -> DomainResult<()> {
    match result {
        Ok(()) => txn.commit().await.map_err(map_db_err),
        Err(e) => {
            // Rollback failure is secondary; the original error wins
            let _ = txn.rollback().await;
            Err(e)
        }
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_booking_number(&self, number: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::BookingNumber.eq(number))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_asc(booking::Column::BookedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_open_for_vehicle(&self, vehicle_id: Uuid) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::VehicleId.eq(vehicle_id))
            .filter(booking::Column::ReturnedAt.is_null())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn create(&self, b: &Booking, v: &Vehicle) -> DomainResult<()> {
        debug!("Creating booking {} for vehicle {}", b.booking_number, v.license_plate);
        let txn = self.begin(IsolationLevel::Serializable).await?;
        let result = async {
            update_guarded(&txn, v).await?;
            domain_to_active(b, 0).insert(&txn).await.map_err(map_db_err)?;
            Ok(())
        }
        .await;
        commit_or_rollback(txn, result).await
    }

    async fn finalize(&self, b: &Booking, v: &Vehicle) -> DomainResult<()> {
        debug!("Finalizing booking {}", b.booking_number);
        let txn = self.begin(IsolationLevel::ReadCommitted).await?;
        let result = async {
            update_guarded(&txn, v).await?;
            update_booking_guarded(&txn, b).await?;
            Ok(())
        }
        .await;
        commit_or_rollback(txn, result).await
    }

    async fn delete(&self, b: &Booking, v: Option<&Vehicle>) -> DomainResult<()> {
        debug!("Deleting booking {}", b.booking_number);
        let txn = self.begin(IsolationLevel::RepeatableRead).await?;
        let result = async {
            if let Some(v) = v {
                update_guarded(&txn, v).await?;
            }
            let res = booking::Entity::delete_many()
                .filter(booking::Column::Id.eq(b.id))
                .filter(booking::Column::Version.eq(b.version))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
            if res.rows_affected == 0 {
                return Err(DomainError::Conflict(format!(
                    "booking {} was modified concurrently",
                    b.booking_number
                )));
            }
            Ok(())
        }
        .await;
        commit_or_rollback(txn, result).await
    }
}
