pub mod database;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
