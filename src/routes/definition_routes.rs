use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use crate::controllers::definition_controller::DefinitionController;
use crate::dto::definition_dto::{CreateDefinitionRequest, DefinitionResponse};
use crate::dto::schedule_dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_definition_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_definition))
        .route("/", get(list_definitions))
        .route("/:id", get(get_definition))
}

async fn create_definition(
    State(state): State<AppState>,
    Json(request): Json<CreateDefinitionRequest>,
) -> Result<Json<ApiResponse<DefinitionResponse>>, AppError> {
    let controller = DefinitionController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_definitions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DefinitionResponse>>, AppError> {
    let controller = DefinitionController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_definition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DefinitionResponse>, AppError> {
    let controller = DefinitionController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}
