use thiserror::Error;

/// Error taxonomy for reservation operations.
///
/// `Conflict` marks transient store-level failures (serialization
/// conflicts, stale version tokens) that the coordinator retries with
/// backoff before surfacing. Everything else is returned as-is.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Odometer cannot decrease: stored {stored}, new reading {new}")]
    InvalidOdometerUpdate { stored: u32, new: u32 },

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Whether the failed operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Conflict(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_conflict_is_transient() {
        assert!(DomainError::Conflict("stale version".into()).is_transient());
        assert!(!DomainError::PreconditionFailed("taken".into()).is_transient());
        assert!(!DomainError::Internal("boom".into()).is_transient());
        assert!(!DomainError::NotFound {
            entity: "Vehicle",
            field: "id",
            value: "x".into()
        }
        .is_transient());
    }
}
