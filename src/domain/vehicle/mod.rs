//! Vehicle aggregate
//!
//! Contains the Vehicle entity, availability transition rules, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{
    is_valid_license_plate, normalize_license_plate, Vehicle, VehicleLifecycle, VehicleStatus,
    VehicleType,
};
pub use repository::VehicleRepository;
