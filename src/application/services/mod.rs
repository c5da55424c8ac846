//! Application services

pub mod booking;
pub mod customer;
pub mod vehicle;

pub use booking::BookingService;
pub use customer::{CustomerService, CustomerUpdate};
pub use vehicle::VehicleService;
