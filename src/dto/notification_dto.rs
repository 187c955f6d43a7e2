use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::notification::UserNotificationSettings;

// Resumen de una corrida del pase de notificaciones
#[derive(Debug, Serialize)]
pub struct NotificationRunResponse {
    pub run_date: NaiveDate,
    pub kind: String,
    pub candidates: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped_duplicate: usize,
}

// Preferencias de notificación de un usuario
#[derive(Debug, Serialize)]
pub struct NotificationSettingsResponse {
    pub user_id: Uuid,
    pub reminder_days_before: Vec<i32>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationSettingsResponse {
    pub fn from_settings(settings: &UserNotificationSettings) -> Self {
        Self {
            user_id: settings.user_id,
            reminder_days_before: settings.reminder_days_before.clone(),
            updated_at: settings.updated_at,
        }
    }
}

// Request para actualizar los umbrales de días-antes
#[derive(Debug, Deserialize)]
pub struct UpdateNotificationSettingsRequest {
    pub reminder_days_before: Vec<i32>,
}

// Payload que viaja al webhook externo de envío
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub vehicle_name: String,
    pub title: String,
    pub kind: String,
    pub trigger_value: String,
    pub due_date: Option<NaiveDate>,
    pub message: String,
}

// Query params para disparar un pase con fecha explícita
#[derive(Debug, Deserialize)]
pub struct RunDateQuery {
    pub date: Option<String>,
}
