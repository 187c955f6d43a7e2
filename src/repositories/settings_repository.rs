use crate::models::notification::UserNotificationSettings;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserNotificationSettings>, AppError> {
        let result = sqlx::query_as::<_, UserNotificationSettings>(
            "SELECT * FROM user_notification_settings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding notification settings: {}", e)))?;

        Ok(result)
    }

    pub async fn upsert(
        &self,
        user_id: Uuid,
        reminder_days_before: &[i32],
    ) -> Result<UserNotificationSettings, AppError> {
        let result = sqlx::query_as::<_, UserNotificationSettings>(
            r#"
            INSERT INTO user_notification_settings (user_id, reminder_days_before, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET reminder_days_before = EXCLUDED.reminder_days_before,
                          updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(reminder_days_before)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error saving notification settings: {}", e)))?;

        Ok(result)
    }
}
