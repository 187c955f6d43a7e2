use crate::dto::definition_dto::{CreateDefinitionRequest, DefinitionResponse};
use crate::dto::schedule_dto::ApiResponse;
use crate::models::definition::MaintenanceDefinition;
use crate::repositories::DefinitionRepository;
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct DefinitionController {
    repository: DefinitionRepository,
}

impl DefinitionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DefinitionRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDefinitionRequest,
    ) -> Result<ApiResponse<DefinitionResponse>, AppError> {
        // Validar datos de entrada
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        let rule = request.rule.to_rule().map_err(AppError::ValidationError)?;

        let definition = MaintenanceDefinition {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            time_interval_value: rule.time_interval.map(|i| i.value as i32),
            time_interval_unit: rule.time_interval.map(|i| i.unit.as_str().to_string()),
            distance_interval_km: rule
                .distance_interval_km
                .map(|km| {
                    Decimal::from_f64_retain(km).ok_or_else(|| {
                        AppError::ValidationError("Invalid mileage value".to_string())
                    })
                })
                .transpose()?,
            created_at: Utc::now(),
        };
        let created = self.repository.create(&definition).await?;

        Ok(ApiResponse::success_with_message(
            DefinitionResponse::from_definition(&created),
            "Definición creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DefinitionResponse, AppError> {
        let definition = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Definición de mantenimiento no encontrada".to_string())
            })?;

        Ok(DefinitionResponse::from_definition(&definition))
    }

    pub async fn list(&self) -> Result<Vec<DefinitionResponse>, AppError> {
        let definitions = self.repository.find_all().await?;
        Ok(definitions
            .iter()
            .map(DefinitionResponse::from_definition)
            .collect())
    }
}
