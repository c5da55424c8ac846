//! Booking API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{
    ApiResponse, BookingDto, CreateBookingRequest, EmptyData, FinalizeBookingRequest,
};
use crate::application::services::BookingService;

use super::{error_response, validation_response};

#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<BookingService>,
}

pub async fn create_booking(
    State(state): State<BookingAppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    request.validate().map_err(validation_response)?;
    let booking = state
        .bookings
        .create_booking(&request.license_plate, &request.customer_personal_number)
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from_domain(booking))),
    ))
}

pub async fn list_bookings(
    State(state): State<BookingAppState>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let bookings = state.bookings.list_bookings().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from_domain).collect(),
    )))
}

pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let booking = state.bookings.get_booking(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(BookingDto::from_domain(booking))))
}

pub async fn finalize_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FinalizeBookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let booking = state
        .bookings
        .finalize_booking(id, request.returned_odometer)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(BookingDto::from_domain(booking))))
}

pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.bookings.cancel_booking(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
