//! API handlers

pub mod bookings;
pub mod customers;
pub mod health;
pub mod vehicles;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::shared::errors::DomainError;

/// Map a domain error onto an HTTP response.
///
/// `Conflict` (409) signals "retry the request"; 4xx failures are
/// client-correctable; 500 is operator-facing with no safe automatic
/// retry.
pub(crate) fn error_response(e: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidArgument(_) | DomainError::InvalidOdometerUpdate { .. } => {
            StatusCode::BAD_REQUEST
        }
        DomainError::PreconditionFailed(_)
        | DomainError::InvalidStateTransition(_)
        | DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

/// 400 for request DTOs that fail shape validation.
pub(crate) fn validation_response(
    e: validator::ValidationErrors,
) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string())))
}
