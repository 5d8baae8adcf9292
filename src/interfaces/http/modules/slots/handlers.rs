//! Slot management HTTP handlers

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};

use crate::application::SlotService;
use crate::interfaces::http::common::{
    created, domain_error, invalid_path, ok, ApiResult, MessageResponse, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct SlotAppState {
    pub service: Arc<SlotService>,
}

/// `POST /api/parkings-slots`
pub async fn add_slot(
    State(state): State<SlotAppState>,
    ValidatedJson(request): ValidatedJson<AddSlotRequest>,
) -> ApiResult<SlotDto> {
    match state.service.add(request.into()).await {
        Ok(slot) => created(slot.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `PUT /api/parkings-slots/{id}`
pub async fn update_slot(
    State(state): State<SlotAppState>,
    path: Result<Path<i32>, PathRejection>,
    ValidatedJson(request): ValidatedJson<UpdateSlotRequest>,
) -> ApiResult<SlotDto> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.update(id, request.into()).await {
        Ok(slot) => ok(slot.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `DELETE /api/parkings-slots/{id}`
pub async fn delete_slot(
    State(state): State<SlotAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.delete(id).await {
        Ok(()) => ok(MessageResponse::new("Slot deleted successfully")),
        Err(e) => Err(domain_error(e)),
    }
}

/// `GET /api/parkings-slots/parking/{parking_id}`
pub async fn list_parking_slots(
    State(state): State<SlotAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<SlotDto>> {
    let Ok(Path(parking_id)) = path else {
        return Err(invalid_path("parkingId"));
    };
    match state.service.list_by_parking(parking_id).await {
        Ok(slots) => ok(slots.into_iter().map(SlotDto::from).collect()),
        Err(e) => Err(domain_error(e)),
    }
}
