//! Check-in HTTP handlers

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};

use crate::application::CheckinService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    created, domain_error, invalid_path, ok, ApiResult, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct CheckinAppState {
    pub service: Arc<CheckinService>,
}

/// `POST /api/checkins`
pub async fn check_in(
    State(state): State<CheckinAppState>,
    ValidatedJson(request): ValidatedJson<CheckinRequest>,
) -> ApiResult<CheckinDto> {
    match state
        .service
        .check_in(request.vehicle_id, request.slot_id, request.entry_time)
        .await
    {
        Ok(checkin) => created(checkin.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `POST /api/checkins/{id}/checkout`
///
/// The body is optional; without it the exit time is "now".
pub async fn check_out(
    State(state): State<CheckinAppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Bytes,
) -> ApiResult<CheckoutResponse> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("checkinId"));
    };
    let request = match parse_checkout(&body) {
        Ok(request) => request,
        Err(e) => return Err(domain_error(e)),
    };

    match state.service.check_out(id, request.exit_time).await {
        Ok(closed) => ok(CheckoutResponse {
            message: "Check-out recorded".to_string(),
            over_stay_fine: closed.over_stay_fine,
        }),
        Err(e) => Err(domain_error(e)),
    }
}

fn parse_checkout(body: &[u8]) -> Result<CheckoutRequest, DomainError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CheckoutRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| DomainError::validation("exitTime", format!("Invalid JSON: {}", e)))
}

/// `GET /api/checkins/vehicle/{vehicle_id}`
pub async fn list_vehicle_checkins(
    State(state): State<CheckinAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<CheckinDto>> {
    let Ok(Path(vehicle_id)) = path else {
        return Err(invalid_path("vehicleId"));
    };
    match state.service.list_by_vehicle(vehicle_id).await {
        Ok(list) => ok(list.into_iter().map(CheckinDto::from).collect()),
        Err(e) => Err(domain_error(e)),
    }
}
