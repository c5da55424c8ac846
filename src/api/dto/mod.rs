//! API DTOs

pub mod booking;
pub mod common;
pub mod customer;
pub mod vehicle;

pub use booking::{BookingDto, CreateBookingRequest, FinalizeBookingRequest};
pub use common::{ApiResponse, EmptyData};
pub use customer::{CreateCustomerRequest, CustomerDto, UpdateCustomerRequest};
pub use vehicle::{ListVehiclesQuery, RegisterVehicleRequest, UpdateOdometerRequest, VehicleDto};
