use crate::models::definition::MaintenanceDefinition;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DefinitionRepository {
    pool: PgPool,
}

impl DefinitionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        definition: &MaintenanceDefinition,
    ) -> Result<MaintenanceDefinition, AppError> {
        let result = sqlx::query_as::<_, MaintenanceDefinition>(
            r#"
            INSERT INTO maintenance_definitions (
                id, title, description, time_interval_value,
                time_interval_unit, distance_interval_km, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(definition.id)
        .bind(&definition.title)
        .bind(&definition.description)
        .bind(definition.time_interval_value)
        .bind(&definition.time_interval_unit)
        .bind(definition.distance_interval_km)
        .bind(definition.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating definition: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceDefinition>, AppError> {
        let result = sqlx::query_as::<_, MaintenanceDefinition>(
            "SELECT * FROM maintenance_definitions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding definition: {}", e)))?;

        Ok(result)
    }

    pub async fn find_all(&self) -> Result<Vec<MaintenanceDefinition>, AppError> {
        let result = sqlx::query_as::<_, MaintenanceDefinition>(
            "SELECT * FROM maintenance_definitions ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing definitions: {}", e)))?;

        Ok(result)
    }
}
