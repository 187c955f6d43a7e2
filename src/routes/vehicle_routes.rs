use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::schedule_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateMileageRequest, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/owner/:owner_id", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/mileage", put(update_mileage))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_by_owner(owner_id).await?;
    Ok(Json(response))
}

async fn update_mileage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMileageRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update_mileage(id, request).await?;
    Ok(Json(response))
}
