//! REST API adapter
//!
//! Thin axum layer over the application services; carries no business
//! logic.

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{create_api_router, ApiState};
