//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod customer_repository;
pub mod repository_provider;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, IsolationLevel, SqlErr};

use crate::shared::errors::DomainError;

/// Map a SeaORM error onto the domain taxonomy.
///
/// Serialization failures, deadlocks, lock timeouts and unique-index
/// races are transient `Conflict`s the coordinator may retry;
/// anything else is an `Internal` store failure.
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        return DomainError::Conflict(format!("unique constraint violated: {msg}"));
    }
    let msg = e.to_string();
    let lower = msg.to_ascii_lowercase();
    if lower.contains("serialization")
        || lower.contains("could not serialize")
        || lower.contains("deadlock")
        || lower.contains("database is locked")
        || lower.contains("lock timeout")
    {
        DomainError::Conflict(msg)
    } else {
        DomainError::Internal(format!("database error: {msg}"))
    }
}

/// Pick the isolation level to request from the backend.
///
/// SQLite serializes writers natively and has no SET TRANSACTION
/// syntax, so an explicit level is only passed to backends that
/// honor it.
pub(crate) fn isolation_for(
    db: &DatabaseConnection,
    level: IsolationLevel,
) -> Option<IsolationLevel> {
    match db.get_database_backend() {
        DbBackend::Sqlite => None,
        _ => Some(level),
    }
}
