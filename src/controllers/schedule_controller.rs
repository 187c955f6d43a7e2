use crate::config::SchedulingConfig;
use crate::dto::completion_dto::{
    CompletionOutcomeResponse, CompletionResponse, RecordCompletionRequest,
    UpdateAttachmentsRequest,
};
use crate::dto::schedule_dto::{ApiResponse, CreateScheduleRequest, ScheduleResponse};
use crate::models::schedule::ScheduleStatus;
use crate::services::schedule_lifecycle::{AttachSource, ScheduleLifecycle};
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_datetime, validate_non_negative, validate_not_empty};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ScheduleController {
    lifecycle: ScheduleLifecycle,
}

impl ScheduleController {
    pub fn new(pool: PgPool, config: SchedulingConfig) -> Self {
        Self {
            lifecycle: ScheduleLifecycle::new(pool, config),
        }
    }

    pub async fn create(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<ApiResponse<ScheduleResponse>, AppError> {
        // Resolver el origen: definición de librería o custom embebido
        let source = match request.definition_id {
            Some(definition_id) => AttachSource::Library {
                definition_id,
                description_override: request.description,
            },
            None => {
                let title = request.title.unwrap_or_default();
                if validate_not_empty(&title).is_err() {
                    return Err(AppError::ValidationError(
                        "El título es requerido para un mantenimiento custom".to_string(),
                    ));
                }
                let rule_dto = request.rule.ok_or_else(|| {
                    AppError::ValidationError(
                        "La regla de recurrencia es requerida para un mantenimiento custom"
                            .to_string(),
                    )
                })?;
                let rule = rule_dto.to_rule().map_err(AppError::ValidationError)?;
                AttachSource::Custom {
                    title,
                    description: request.description,
                    rule,
                }
            }
        };

        let schedule = self
            .lifecycle
            .attach_maintenance(request.vehicle_id, request.equipment_instance_id, source)
            .await?;

        Ok(ApiResponse::success_with_message(
            ScheduleResponse::from_schedule(&schedule, None),
            "Mantenimiento adjuntado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ScheduleResponse, AppError> {
        let (schedule, urgency) = self.lifecycle.recalculate_status(id, Utc::now()).await?;
        Ok(ScheduleResponse::from_schedule(&schedule, Some(&urgency)))
    }

    pub async fn list_by_vehicle(
        &self,
        vehicle_id: Uuid,
        status: Option<String>,
    ) -> Result<Vec<ScheduleResponse>, AppError> {
        let status_filter = match &status {
            Some(raw) => Some(ScheduleStatus::parse(raw).ok_or_else(|| {
                AppError::ValidationError(format!("Estado inválido: {}", raw))
            })?),
            None => None,
        };

        let schedules = self
            .lifecycle
            .list_for_vehicle(vehicle_id, status_filter.map(|s| s.as_str()), Utc::now())
            .await?;

        Ok(schedules
            .iter()
            .map(|(schedule, urgency)| ScheduleResponse::from_schedule(schedule, Some(urgency)))
            .collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.lifecycle.delete_schedule(id).await
    }

    pub async fn record_completion(
        &self,
        schedule_id: Uuid,
        request: RecordCompletionRequest,
    ) -> Result<ApiResponse<CompletionOutcomeResponse>, AppError> {
        // La fecha es obligatoria y se valida antes de tocar la base
        let raw_date = request.completed_at.ok_or_else(|| {
            AppError::ValidationError("La fecha de completado es requerida".to_string())
        })?;
        let completed_at = validate_datetime(&raw_date).map_err(|_| {
            AppError::ValidationError(format!(
                "Fecha de completado inválida: {} (se espera RFC3339 o YYYY-MM-DD)",
                raw_date
            ))
        })?;

        if let Some(mileage) = request.mileage_at_completion {
            if validate_non_negative(mileage).is_err() {
                return Err(AppError::ValidationError(
                    "El kilometraje no puede ser negativo".to_string(),
                ));
            }
        }
        if let Some(cost) = request.cost {
            if validate_non_negative(cost).is_err() {
                return Err(AppError::ValidationError(
                    "El costo no puede ser negativo".to_string(),
                ));
            }
        }

        let (record, schedule) = self
            .lifecycle
            .record_completion(
                schedule_id,
                completed_at,
                request.mileage_at_completion,
                request.cost,
                request.notes,
                request.attachments.unwrap_or_default(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            CompletionOutcomeResponse {
                record: CompletionResponse::from_record(&record),
                schedule: ScheduleResponse::from_schedule(&schedule, None),
            },
            "Completación registrada exitosamente".to_string(),
        ))
    }

    pub async fn completion_history(
        &self,
        schedule_id: Uuid,
    ) -> Result<Vec<CompletionResponse>, AppError> {
        let records = self.lifecycle.completion_history(schedule_id).await?;
        Ok(records.iter().map(CompletionResponse::from_record).collect())
    }

    pub async fn update_attachments(
        &self,
        completion_id: Uuid,
        request: UpdateAttachmentsRequest,
    ) -> Result<CompletionResponse, AppError> {
        let record = self
            .lifecycle
            .update_attachments(completion_id, request.attachments)
            .await?;
        Ok(CompletionResponse::from_record(&record))
    }

    pub async fn delete_completion(
        &self,
        completion_id: Uuid,
    ) -> Result<ApiResponse<ScheduleResponse>, AppError> {
        let schedule = self.lifecycle.delete_completion(completion_id).await?;
        Ok(ApiResponse::success_with_message(
            ScheduleResponse::from_schedule(&schedule, None),
            "Registro eliminado y schedule re-anclado".to_string(),
        ))
    }
}
