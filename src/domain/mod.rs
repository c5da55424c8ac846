pub mod booking;
pub mod customer;
pub mod pricing;
pub mod repositories;
pub mod vehicle;

// Re-export commonly used types
pub use booking::{Booking, BookingNumberGenerator, BookingRepository, BookingState};
pub use customer::{Customer, CustomerRepository};
pub use pricing::{compute_cost, PricingPolicy, TypeMultiplier, TypeMultipliers};
pub use repositories::{DomainResult, RepositoryProvider};
pub use vehicle::{Vehicle, VehicleLifecycle, VehicleRepository, VehicleStatus, VehicleType};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
