//! API router
//!
//! Every resource router shares one [`ApiState`]; handlers keep their own
//! `State<T>` extractor through `FromRef`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::ParkingServices;

use super::modules::checkins::{self, CheckinAppState};
use super::modules::directory::{self, DirectoryAppState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::reservations::{self, ReservationAppState};
use super::modules::slots::{self, SlotAppState};

#[derive(Clone)]
pub struct ApiState {
    pub services: ParkingServices,
    pub prometheus: PrometheusHandle,
    pub started_at: Arc<Instant>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            service: Arc::clone(&s.services.reservations),
        }
    }
}

impl FromRef<ApiState> for CheckinAppState {
    fn from_ref(s: &ApiState) -> Self {
        CheckinAppState {
            service: Arc::clone(&s.services.checkins),
        }
    }
}

impl FromRef<ApiState> for SlotAppState {
    fn from_ref(s: &ApiState) -> Self {
        SlotAppState {
            service: Arc::clone(&s.services.slots),
        }
    }
}

impl FromRef<ApiState> for DirectoryAppState {
    fn from_ref(s: &ApiState) -> Self {
        DirectoryAppState {
            service: Arc::clone(&s.services.directory),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        MetricsState {
            handle: s.prometheus.clone(),
        }
    }
}

/// Create the API router with all routes
pub fn create_api_router(services: ParkingServices, prometheus: PrometheusHandle) -> Router {
    let state = ApiState {
        services,
        prometheus,
        started_at: Arc::new(Instant::now()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // --- Reservations ---
        .route("/api/reservations", post(reservations::create_reservation))
        .route(
            "/api/reservations/{id}/cancel",
            post(reservations::cancel_reservation),
        )
        .route(
            "/api/reservations/user/{user_id}",
            get(reservations::list_user_reservations),
        )
        // --- Check-ins ---
        .route("/api/checkins", post(checkins::check_in))
        .route("/api/checkins/{id}/checkout", post(checkins::check_out))
        .route(
            "/api/checkins/vehicle/{vehicle_id}",
            get(checkins::list_vehicle_checkins),
        )
        // --- Slots ---
        .route("/api/parkings-slots", post(slots::add_slot))
        .route(
            "/api/parkings-slots/{id}",
            put(slots::update_slot).delete(slots::delete_slot),
        )
        .route(
            "/api/parkings-slots/parking/{parking_id}",
            get(slots::list_parking_slots),
        )
        // --- Directory ---
        .route(
            "/api/users",
            get(directory::list_users).post(directory::create_user),
        )
        .route(
            "/api/users/{id}",
            get(directory::get_user)
                .put(directory::update_user)
                .delete(directory::delete_user),
        )
        .route("/api/vehicles", post(directory::create_vehicle))
        .route(
            "/api/vehicles/{id}",
            get(directory::get_vehicle)
                .put(directory::update_vehicle)
                .delete(directory::delete_vehicle),
        )
        .route(
            "/api/vehicles/user/{user_id}",
            get(directory::list_user_vehicles),
        )
        .route("/api/parkings", post(directory::create_parking))
        .route(
            "/api/parkings/{id}",
            get(directory::get_parking)
                .put(directory::update_parking)
                .delete(directory::delete_parking),
        )
        // --- Operations ---
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}
