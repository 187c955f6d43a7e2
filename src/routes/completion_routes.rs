use axum::{
    extract::{Path, State},
    routing::{delete, put},
    Json, Router,
};
use crate::controllers::schedule_controller::ScheduleController;
use crate::dto::completion_dto::{CompletionResponse, UpdateAttachmentsRequest};
use crate::dto::schedule_dto::{ApiResponse, ScheduleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_completion_router() -> Router<AppState> {
    Router::new()
        .route("/:id/attachments", put(update_attachments))
        .route("/:id", delete(delete_completion))
}

async fn update_attachments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAttachmentsRequest>,
) -> Result<Json<CompletionResponse>, AppError> {
    let controller = ScheduleController::new(state.pool.clone(), state.scheduling.clone());
    let response = controller.update_attachments(id, request).await?;
    Ok(Json(response))
}

async fn delete_completion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ScheduleResponse>>, AppError> {
    let controller = ScheduleController::new(state.pool.clone(), state.scheduling.clone());
    let response = controller.delete_completion(id).await?;
    Ok(Json(response))
}
