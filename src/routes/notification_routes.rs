use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use crate::controllers::notification_controller::NotificationController;
use crate::dto::notification_dto::{
    NotificationRunResponse, NotificationSettingsResponse, RunDateQuery,
    UpdateNotificationSettingsRequest,
};
use crate::dto::schedule_dto::ApiResponse;
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;
use uuid::Uuid;

pub fn create_notification_router(rate_limit_state: RateLimitState) -> Router<AppState> {
    // Los pases recorren todos los schedules: van detrás del rate limit
    let trigger_routes = Router::new()
        .route("/daily-run", post(run_daily))
        .route("/overdue-run", post(run_overdue))
        .route_layer(middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ));

    Router::new()
        .merge(trigger_routes)
        .route("/settings/:user_id", get(get_settings))
        .route("/settings/:user_id", put(update_settings))
}

async fn run_daily(
    State(state): State<AppState>,
    Query(query): Query<RunDateQuery>,
) -> Result<Json<ApiResponse<NotificationRunResponse>>, AppError> {
    let date = parse_run_date(query.date)?;
    let controller = NotificationController::new(
        state.pool.clone(),
        state.scheduling.clone(),
        state.sender.clone(),
    );
    let response = controller.run_daily(date).await?;
    Ok(Json(response))
}

async fn run_overdue(
    State(state): State<AppState>,
    Query(query): Query<RunDateQuery>,
) -> Result<Json<ApiResponse<NotificationRunResponse>>, AppError> {
    let date = parse_run_date(query.date)?;
    let controller = NotificationController::new(
        state.pool.clone(),
        state.scheduling.clone(),
        state.sender.clone(),
    );
    let response = controller.run_overdue(date).await?;
    Ok(Json(response))
}

async fn get_settings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<NotificationSettingsResponse>, AppError> {
    let controller = NotificationController::new(
        state.pool.clone(),
        state.scheduling.clone(),
        state.sender.clone(),
    );
    let response = controller.get_settings(user_id).await?;
    Ok(Json(response))
}

async fn update_settings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateNotificationSettingsRequest>,
) -> Result<Json<ApiResponse<NotificationSettingsResponse>>, AppError> {
    let controller = NotificationController::new(
        state.pool.clone(),
        state.scheduling.clone(),
        state.sender.clone(),
    );
    let response = controller.update_settings(user_id, request).await?;
    Ok(Json(response))
}

/// Parsear la fecha opcional ?date=YYYY-MM-DD de un pase
fn parse_run_date(raw: Option<String>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        Some(raw) => {
            let date = validate_date(&raw).map_err(|_| {
                AppError::ValidationError(format!(
                    "Fecha inválida: {} (se espera YYYY-MM-DD)",
                    raw
                ))
            })?;
            Ok(Some(date))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_date_accepts_iso_date() {
        let parsed = parse_run_date(Some("2026-03-15".to_string())).unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2026, 3, 15));
    }

    #[test]
    fn test_parse_run_date_defaults_to_none() {
        assert_eq!(parse_run_date(None).unwrap(), None);
    }

    #[test]
    fn test_parse_run_date_rejects_garbage() {
        let result = parse_run_date(Some("15/03/2026".to_string()));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
