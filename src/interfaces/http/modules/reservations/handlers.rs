//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};

use crate::application::ReservationService;
use crate::interfaces::http::common::{
    created, domain_error, invalid_path, ok, ApiResult, MessageResponse, ValidatedJson,
};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub service: Arc<ReservationService>,
}

/// `POST /api/reservations`
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<ReservationDto> {
    match state.service.create(request.into()).await {
        Ok(reservation) => created(reservation.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `POST /api/reservations/{id}/cancel`
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.cancel(id).await {
        Ok(_) => ok(MessageResponse::new("Reservation cancelled successfully")),
        Err(e) => Err(domain_error(e)),
    }
}

/// `GET /api/reservations/user/{user_id}`
pub async fn list_user_reservations(
    State(state): State<ReservationAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<ReservationDto>> {
    let Ok(Path(user_id)) = path else {
        return Err(invalid_path("userId"));
    };
    match state.service.list_by_user(user_id).await {
        Ok(list) => ok(list.into_iter().map(ReservationDto::from).collect()),
        Err(e) => Err(domain_error(e)),
    }
}
