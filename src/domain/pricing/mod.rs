//! Pricing engine
//!
//! Pure cost computation over a returned booking and a data-driven
//! pricing policy. No I/O, fully deterministic.

pub mod model;

pub use model::{compute_cost, PricingPolicy, TypeMultiplier, TypeMultipliers};
