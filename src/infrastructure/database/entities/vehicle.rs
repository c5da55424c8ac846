//! Vehicle entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Normalized: 3 uppercase letters + 3 digits
    #[sea_orm(unique)]
    pub license_plate: String,

    /// SmallCar, CombiCar, Truck
    pub vehicle_type: String,

    /// Available, Unavailable
    pub status: String,

    pub odometer: i32,

    /// Soft-delete flag; deleted vehicles are kept for booking history
    pub deleted: bool,

    /// Optimistic concurrency token
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
