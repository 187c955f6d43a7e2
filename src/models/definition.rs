//! Modelo de MaintenanceDefinition
//!
//! Entrada de la librería de mantenimientos. Al adjuntarse a un equipo la
//! regla y el título se copian al schedule; cambios posteriores de la
//! definición no afectan schedules ya creados.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::recurrence::RecurrenceRule;

/// Definición de librería tal como vive en la base de datos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceDefinition {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub time_interval_value: Option<i32>,
    pub time_interval_unit: Option<String>,
    pub distance_interval_km: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceDefinition {
    pub fn recurrence_rule(&self) -> RecurrenceRule {
        RecurrenceRule::from_columns(
            self.time_interval_value,
            self.time_interval_unit.as_deref(),
            self.distance_interval_km,
        )
    }
}
