use crate::models::completion::CompletionRecord;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CompletionRepository {
    pool: PgPool,
}

impl CompletionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: &CompletionRecord) -> Result<CompletionRecord, AppError> {
        let result = sqlx::query_as::<_, CompletionRecord>(
            r#"
            INSERT INTO completion_records (
                id, schedule_id, completed_at, mileage_at_completion,
                cost, notes, attachments, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.schedule_id)
        .bind(record.completed_at)
        .bind(record.mileage_at_completion)
        .bind(record.cost)
        .bind(&record.notes)
        .bind(&record.attachments)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating completion record: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CompletionRecord>, AppError> {
        let result = sqlx::query_as::<_, CompletionRecord>(
            "SELECT * FROM completion_records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding completion record: {}", e)))?;

        Ok(result)
    }

    /// Historial completo del schedule, más reciente primero
    pub async fn find_by_schedule(
        &self,
        schedule_id: Uuid,
    ) -> Result<Vec<CompletionRecord>, AppError> {
        let result = sqlx::query_as::<_, CompletionRecord>(
            r#"
            SELECT * FROM completion_records
            WHERE schedule_id = $1
            ORDER BY completed_at DESC, created_at DESC
            "#,
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing completion records: {}", e)))?;

        Ok(result)
    }

    /// Completación más reciente (define el ancla temporal)
    pub async fn latest(&self, schedule_id: Uuid) -> Result<Option<CompletionRecord>, AppError> {
        let result = sqlx::query_as::<_, CompletionRecord>(
            r#"
            SELECT * FROM completion_records
            WHERE schedule_id = $1
            ORDER BY completed_at DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding latest completion: {}", e)))?;

        Ok(result)
    }

    /// Completación más reciente que registró kilometraje (define el ancla
    /// de distancia; una completación sin km no resetea este eje)
    pub async fn latest_with_mileage(
        &self,
        schedule_id: Uuid,
    ) -> Result<Option<CompletionRecord>, AppError> {
        let result = sqlx::query_as::<_, CompletionRecord>(
            r#"
            SELECT * FROM completion_records
            WHERE schedule_id = $1 AND mileage_at_completion IS NOT NULL
            ORDER BY completed_at DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Error finding latest mileage completion: {}", e))
        })?;

        Ok(result)
    }

    /// Única edición permitida sobre un registro: su lista de adjuntos
    pub async fn update_attachments(
        &self,
        id: Uuid,
        attachments: &[String],
    ) -> Result<CompletionRecord, AppError> {
        let result = sqlx::query_as::<_, CompletionRecord>(
            r#"
            UPDATE completion_records
            SET attachments = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(attachments)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating attachments: {}", e)))?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM completion_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting completion record: {}", e)))?;

        Ok(())
    }
}
