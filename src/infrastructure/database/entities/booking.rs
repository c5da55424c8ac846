//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Human-readable number: `{PLATE}-{NNNNN}-{AAAAA}`
    #[sea_orm(unique)]
    pub booking_number: String,

    pub vehicle_id: Uuid,

    /// Nullable: cleared when the customer is erased
    #[sea_orm(nullable)]
    pub customer_id: Option<Uuid>,

    pub booked_at: DateTimeUtc,

    /// Odometer reading at pickup
    pub booked_odometer: i32,

    #[sea_orm(nullable)]
    pub returned_at: Option<DateTimeUtc>,

    #[sea_orm(nullable)]
    pub returned_odometer: Option<i32>,

    /// Set only at finalization
    #[sea_orm(nullable)]
    pub total_cost: Option<Decimal>,

    /// Optimistic concurrency token
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,

    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
