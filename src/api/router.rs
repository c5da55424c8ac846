//! API router

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{bookings, customers, health, vehicles};
use crate::application::services::{BookingService, CustomerService, VehicleService};

/// Unified state for the whole REST surface. Axum hands each handler
/// its own narrower state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub bookings: Arc<BookingService>,
    pub vehicles: Arc<VehicleService>,
    pub customers: Arc<CustomerService>,
}

impl FromRef<ApiState> for bookings::BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        bookings::BookingAppState {
            bookings: Arc::clone(&s.bookings),
        }
    }
}

impl FromRef<ApiState> for vehicles::VehicleAppState {
    fn from_ref(s: &ApiState) -> Self {
        vehicles::VehicleAppState {
            vehicles: Arc::clone(&s.vehicles),
        }
    }
}

impl FromRef<ApiState> for customers::CustomerAppState {
    fn from_ref(s: &ApiState) -> Self {
        customers::CustomerAppState {
            customers: Arc::clone(&s.customers),
        }
    }
}

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let booking_routes = Router::new()
        .route("/", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/{id}", get(bookings::get_booking).delete(bookings::cancel_booking))
        .route("/{id}/finalize", post(bookings::finalize_booking));

    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles).post(vehicles::register_vehicle))
        .route("/{id}", get(vehicles::get_vehicle).delete(vehicles::delete_vehicle))
        .route("/{id}/odometer", post(vehicles::update_odometer))
        .route("/{id}/restore", post(vehicles::restore_vehicle));

    let customer_routes = Router::new()
        .route("/", get(customers::list_customers).post(customers::create_customer))
        .route(
            "/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::erase_customer),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/vehicles", vehicle_routes)
        .nest("/api/v1/customers", customer_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
