//! Vehicle API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{
    ApiResponse, EmptyData, ListVehiclesQuery, RegisterVehicleRequest, UpdateOdometerRequest,
    VehicleDto,
};
use crate::application::services::VehicleService;
use crate::domain::vehicle::VehicleType;
use crate::shared::errors::DomainError;

use super::{error_response, validation_response};

#[derive(Clone)]
pub struct VehicleAppState {
    pub vehicles: Arc<VehicleService>,
}

fn parse_vehicle_type(s: &str) -> Result<VehicleType, (StatusCode, Json<ApiResponse<()>>)> {
    VehicleType::from_str(s).ok_or_else(|| {
        error_response(DomainError::InvalidArgument(format!(
            "unknown vehicle type '{s}'"
        )))
    })
}

pub async fn register_vehicle(
    State(state): State<VehicleAppState>,
    Json(request): Json<RegisterVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    request.validate().map_err(validation_response)?;
    let vehicle_type = parse_vehicle_type(&request.vehicle_type)?;
    let vehicle = state
        .vehicles
        .register_vehicle(&request.license_plate, vehicle_type, request.odometer)
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleDto::from_domain(vehicle))),
    ))
}

pub async fn list_vehicles(
    State(state): State<VehicleAppState>,
    Query(query): Query<ListVehiclesQuery>,
) -> Result<Json<ApiResponse<Vec<VehicleDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let vehicles = if query.available {
        let vehicle_type = query
            .vehicle_type
            .as_deref()
            .map(parse_vehicle_type)
            .transpose()?;
        state.vehicles.list_available(vehicle_type).await
    } else {
        state.vehicles.list_vehicles(query.include_deleted).await
    }
    .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from_domain).collect(),
    )))
}

pub async fn get_vehicle(
    State(state): State<VehicleAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let vehicle = state.vehicles.get_vehicle(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(VehicleDto::from_domain(vehicle))))
}

pub async fn update_odometer(
    State(state): State<VehicleAppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOdometerRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let vehicle = state
        .vehicles
        .update_odometer(id, request.odometer)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(VehicleDto::from_domain(vehicle))))
}

pub async fn delete_vehicle(
    State(state): State<VehicleAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .vehicles
        .soft_delete_vehicle(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

pub async fn restore_vehicle(
    State(state): State<VehicleAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let vehicle = state
        .vehicles
        .restore_vehicle(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(VehicleDto::from_domain(vehicle))))
}
