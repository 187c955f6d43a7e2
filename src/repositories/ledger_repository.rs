use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::notification::{LedgerKey, SendStatus};
use crate::services::notification_engine::LedgerStore;
use crate::utils::errors::AppError;

pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    /// Reclamar una clave de dedupe insertando la fila en estado
    /// 'attempting'. ON CONFLICT DO NOTHING hace que el perdedor de una
    /// carrera reciba None, que se interpreta como "ya atendida hoy", no
    /// como error. La restricción única de la tabla es el único árbitro.
    async fn claim(&self, key: &LedgerKey) -> Result<Option<Uuid>, AppError> {
        let id = Uuid::new_v4();

        let result = sqlx::query_as::<_, (Uuid,)>(
            r#"
            INSERT INTO notification_ledger (
                id, user_id, schedule_id, notify_date, kind,
                trigger_value, send_status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, schedule_id, notify_date, kind, trigger_value)
            DO NOTHING
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(key.user_id)
        .bind(key.schedule_id)
        .bind(key.notify_date)
        .bind(key.kind.as_str())
        .bind(&key.trigger_value)
        .bind(SendStatus::Attempting.as_str())
        .bind(chrono::Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error claiming ledger entry: {}", e)))?;

        Ok(result.map(|row| row.0))
    }

    async fn mark_sent(&self, entry_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE notification_ledger SET send_status = $2 WHERE id = $1")
            .bind(entry_id)
            .bind(SendStatus::Sent.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error marking ledger entry sent: {}", e)))?;

        Ok(())
    }

    /// El fallo queda registrado con su mensaje; no hay reintento automático
    /// para la misma clave en el mismo día
    async fn mark_failed(&self, entry_id: Uuid, error_message: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE notification_ledger SET send_status = $2, error_message = $3 WHERE id = $1",
        )
        .bind(entry_id)
        .bind(SendStatus::Failed.as_str())
        .bind(error_message)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error marking ledger entry failed: {}", e)))?;

        Ok(())
    }
}
