use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::completion::CompletionRecord;

// Request para registrar una completación
//
// completed_at acepta RFC3339 o fecha simple YYYY-MM-DD; es obligatorio y
// el controller lo valida antes de tocar la base.
#[derive(Debug, Deserialize)]
pub struct RecordCompletionRequest {
    pub completed_at: Option<String>,
    pub mileage_at_completion: Option<f64>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub attachments: Option<Vec<String>>,
}

// Request para editar los adjuntos de un registro existente
#[derive(Debug, Deserialize)]
pub struct UpdateAttachmentsRequest {
    pub attachments: Vec<String>,
}

// Response de un registro de completación
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub mileage_at_completion: Option<f64>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl CompletionResponse {
    pub fn from_record(record: &CompletionRecord) -> Self {
        Self {
            id: record.id,
            schedule_id: record.schedule_id,
            completed_at: record.completed_at,
            mileage_at_completion: record
                .mileage_at_completion
                .map(|d| d.to_string().parse().unwrap_or(0.0)),
            cost: record.cost.map(|d| d.to_string().parse().unwrap_or(0.0)),
            notes: record.notes.clone(),
            attachments: record.attachments.clone(),
            created_at: record.created_at,
        }
    }
}

// Response combinada de recordCompletion: el registro nuevo más el schedule
// ya recalculado para el ciclo siguiente
#[derive(Debug, Serialize)]
pub struct CompletionOutcomeResponse {
    pub record: CompletionResponse,
    pub schedule: super::schedule_dto::ScheduleResponse,
}
