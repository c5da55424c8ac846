//! # Car Rental Service
//!
//! Reservation backend for a rental vehicle fleet: booking lifecycle,
//! pricing and fleet/customer management over a REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic and transaction coordination
//! - **infrastructure**: Database access (SeaORM) and migrations
//! - **api**: REST API (axum)
//! - **shared**: Cross-cutting error types and retry helpers

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use api::{create_api_router, ApiState};
