//! Directory HTTP handlers

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};

use crate::application::DirectoryService;
use crate::interfaces::http::common::{
    created, domain_error, invalid_path, ok, ApiResult, MessageResponse, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct DirectoryAppState {
    pub service: Arc<DirectoryService>,
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<DirectoryAppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserDto> {
    match state.service.register_user(request.into()).await {
        Ok(user) => created(user.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<UserDto> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.get_user(id).await {
        Ok(user) => ok(user.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `GET /api/users`
pub async fn list_users(State(state): State<DirectoryAppState>) -> ApiResult<Vec<UserDto>> {
    match state.service.list_users().await {
        Ok(users) => ok(users.into_iter().map(UserDto::from).collect()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `PUT /api/users/{id}`
pub async fn update_user(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.update_user(id, request.into()).await {
        Ok(user) => ok(user.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `DELETE /api/users/{id}`
pub async fn delete_user(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.delete_user(id).await {
        Ok(()) => ok(MessageResponse::new("User deleted successfully")),
        Err(e) => Err(domain_error(e)),
    }
}

/// `POST /api/vehicles`
pub async fn create_vehicle(
    State(state): State<DirectoryAppState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> ApiResult<VehicleDto> {
    match state.service.register_vehicle(request.into()).await {
        Ok(vehicle) => created(vehicle.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `GET /api/vehicles/{id}`
pub async fn get_vehicle(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<VehicleDto> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.get_vehicle(id).await {
        Ok(vehicle) => ok(vehicle.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `GET /api/vehicles/user/{user_id}`
pub async fn list_user_vehicles(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<VehicleDto>> {
    let Ok(Path(user_id)) = path else {
        return Err(invalid_path("userId"));
    };
    match state.service.list_vehicles_by_user(user_id).await {
        Ok(vehicles) => ok(vehicles.into_iter().map(VehicleDto::from).collect()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `PUT /api/vehicles/{id}`
pub async fn update_vehicle(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> ApiResult<VehicleDto> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.update_vehicle(id, request.into()).await {
        Ok(vehicle) => ok(vehicle.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `DELETE /api/vehicles/{id}`
pub async fn delete_vehicle(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.delete_vehicle(id).await {
        Ok(()) => ok(MessageResponse::new("Vehicle deleted successfully")),
        Err(e) => Err(domain_error(e)),
    }
}

/// `POST /api/parkings`
pub async fn create_parking(
    State(state): State<DirectoryAppState>,
    ValidatedJson(request): ValidatedJson<CreateParkingRequest>,
) -> ApiResult<ParkingDto> {
    match state.service.register_parking(request.into()).await {
        Ok(parking) => created(parking.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `GET /api/parkings/{id}`
pub async fn get_parking(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<ParkingDto> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.get_parking(id).await {
        Ok(parking) => ok(parking.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `PUT /api/parkings/{id}`
pub async fn update_parking(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
    ValidatedJson(request): ValidatedJson<UpdateParkingRequest>,
) -> ApiResult<ParkingDto> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.update_parking(id, request.into()).await {
        Ok(parking) => ok(parking.into()),
        Err(e) => Err(domain_error(e)),
    }
}

/// `DELETE /api/parkings/{id}`
pub async fn delete_parking(
    State(state): State<DirectoryAppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Ok(Path(id)) = path else {
        return Err(invalid_path("id"));
    };
    match state.service.delete_parking(id).await {
        Ok(()) => ok(MessageResponse::new("Parking deleted successfully")),
        Err(e) => Err(domain_error(e)),
    }
}
