use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::SchedulingConfig;
use crate::dto::notification_dto::{
    NotificationRunResponse, NotificationSettingsResponse, UpdateNotificationSettingsRequest,
};
use crate::dto::schedule_dto::ApiResponse;
use crate::models::notification::NotificationKind;
use crate::repositories::SettingsRepository;
use crate::services::notification_engine::{NotificationEngine, RunSummary};
use crate::services::notification_sender::NotificationSender;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_range;

pub struct NotificationController {
    engine: NotificationEngine,
    settings: SettingsRepository,
    config: SchedulingConfig,
}

impl NotificationController {
    pub fn new(
        pool: PgPool,
        config: SchedulingConfig,
        sender: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            engine: NotificationEngine::new(pool.clone(), config.clone(), sender),
            settings: SettingsRepository::new(pool),
            config,
        }
    }

    /// Disparar el pase de recordatorios; sin fecha explícita corre para hoy
    pub async fn run_daily(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<ApiResponse<NotificationRunResponse>, AppError> {
        let run_date = date.unwrap_or_else(|| Utc::now().date_naive());
        let summary = self.engine.run_daily_pass(run_date).await?;
        Ok(ApiResponse::success(run_response(
            run_date,
            NotificationKind::Reminder,
            summary,
        )))
    }

    /// Disparar el pase de escalamiento de vencidos
    pub async fn run_overdue(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<ApiResponse<NotificationRunResponse>, AppError> {
        let run_date = date.unwrap_or_else(|| Utc::now().date_naive());
        let summary = self.engine.run_overdue_pass(run_date).await?;
        Ok(ApiResponse::success(run_response(
            run_date,
            NotificationKind::Overdue,
            summary,
        )))
    }

    /// Preferencias del usuario; sin fila guardada devuelve los defaults
    pub async fn get_settings(
        &self,
        user_id: Uuid,
    ) -> Result<NotificationSettingsResponse, AppError> {
        let settings = self.settings.find_by_user(user_id).await?;
        Ok(match settings {
            Some(settings) => NotificationSettingsResponse::from_settings(&settings),
            None => NotificationSettingsResponse {
                user_id,
                reminder_days_before: self.config.default_reminder_days.clone(),
                updated_at: Utc::now(),
            },
        })
    }

    pub async fn update_settings(
        &self,
        user_id: Uuid,
        request: UpdateNotificationSettingsRequest,
    ) -> Result<ApiResponse<NotificationSettingsResponse>, AppError> {
        if request.reminder_days_before.is_empty() {
            return Err(AppError::ValidationError(
                "Se necesita al menos un umbral de días".to_string(),
            ));
        }
        for days in &request.reminder_days_before {
            if validate_range(*days, 0, 365).is_err() {
                return Err(AppError::ValidationError(format!(
                    "Umbral de días inválido: {} (se espera entre 0 y 365)",
                    days
                )));
            }
        }

        let settings = self
            .settings
            .upsert(user_id, &request.reminder_days_before)
            .await?;

        Ok(ApiResponse::success_with_message(
            NotificationSettingsResponse::from_settings(&settings),
            "Preferencias de notificación actualizadas".to_string(),
        ))
    }
}

fn run_response(
    run_date: NaiveDate,
    kind: NotificationKind,
    summary: RunSummary,
) -> NotificationRunResponse {
    NotificationRunResponse {
        run_date,
        kind: kind.as_str().to_string(),
        candidates: summary.candidates,
        sent: summary.sent,
        failed: summary.failed,
        skipped_duplicate: summary.skipped_duplicate,
    }
}
