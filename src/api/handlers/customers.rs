//! Customer API handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{ApiResponse, CreateCustomerRequest, CustomerDto, EmptyData, UpdateCustomerRequest};
use crate::application::services::{CustomerService, CustomerUpdate};

use super::{error_response, validation_response};

#[derive(Clone)]
pub struct CustomerAppState {
    pub customers: Arc<CustomerService>,
}

pub async fn create_customer(
    State(state): State<CustomerAppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    request.validate().map_err(validation_response)?;
    let customer = state
        .customers
        .create_customer(
            &request.personal_number,
            &request.first_name,
            &request.last_name,
            request.email,
            request.phone_number,
        )
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CustomerDto::from_domain(customer))),
    ))
}

pub async fn list_customers(
    State(state): State<CustomerAppState>,
) -> Result<Json<ApiResponse<Vec<CustomerDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let customers = state
        .customers
        .list_customers()
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        customers.into_iter().map(CustomerDto::from_domain).collect(),
    )))
}

pub async fn get_customer(
    State(state): State<CustomerAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CustomerDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let customer = state
        .customers
        .get_customer(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(CustomerDto::from_domain(customer))))
}

pub async fn update_customer(
    State(state): State<CustomerAppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let update = CustomerUpdate {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone_number: request.phone_number,
    };
    let customer = state
        .customers
        .update_customer(id, update)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(CustomerDto::from_domain(customer))))
}

pub async fn erase_customer(
    State(state): State<CustomerAppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .customers
        .erase_customer(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
