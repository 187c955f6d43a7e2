//! Modelo de CompletionRecord
//!
//! Registro histórico de un mantenimiento efectuado. El historial es
//! append-only salvo dos operaciones puntuales: editar adjuntos y borrar
//! un registro (con re-anclaje del schedule).

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registro de completación tal como vive en la base de datos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompletionRecord {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub mileage_at_completion: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl CompletionRecord {
    pub fn mileage_km(&self) -> Option<f64> {
        self.mileage_at_completion.as_ref().and_then(|d| d.to_f64())
    }
}
