use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use crate::controllers::schedule_controller::ScheduleController;
use crate::dto::completion_dto::{CompletionOutcomeResponse, CompletionResponse, RecordCompletionRequest};
use crate::dto::schedule_dto::{
    ApiResponse, CreateScheduleRequest, ScheduleListQuery, ScheduleResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_schedule_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_schedule))
        .route("/vehicle/:vehicle_id", get(list_schedules))
        .route("/:id", get(get_schedule))
        .route("/:id", delete(delete_schedule))
        .route("/:id/completion", post(record_completion))
        .route("/:id/completion", get(completion_history))
}

async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<Json<ApiResponse<ScheduleResponse>>, AppError> {
    let controller = ScheduleController::new(state.pool.clone(), state.scheduling.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_schedules(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(query): Query<ScheduleListQuery>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let controller = ScheduleController::new(state.pool.clone(), state.scheduling.clone());
    let response = controller.list_by_vehicle(vehicle_id, query.status).await?;
    Ok(Json(response))
}

async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let controller = ScheduleController::new(state.pool.clone(), state.scheduling.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ScheduleController::new(state.pool.clone(), state.scheduling.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Schedule eliminado exitosamente"
    })))
}

async fn record_completion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordCompletionRequest>,
) -> Result<Json<ApiResponse<CompletionOutcomeResponse>>, AppError> {
    let controller = ScheduleController::new(state.pool.clone(), state.scheduling.clone());
    let response = controller.record_completion(id, request).await?;
    Ok(Json(response))
}

async fn completion_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CompletionResponse>>, AppError> {
    let controller = ScheduleController::new(state.pool.clone(), state.scheduling.clone());
    let response = controller.completion_history(id).await?;
    Ok(Json(response))
}
