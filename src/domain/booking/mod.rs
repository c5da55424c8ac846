//! Booking aggregate
//!
//! Contains the Booking entity with its lifecycle rules, the booking
//! number generator, and the repository interface.

pub mod model;
pub mod number;
pub mod repository;

pub use model::{Booking, BookingState};
pub use number::BookingNumberGenerator;
pub use repository::BookingRepository;
