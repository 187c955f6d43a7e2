//! Modelo de MaintenanceSchedule
//!
//! Instancia viva de mantenimiento sobre un equipo de un vehículo. La regla
//! queda resuelta en columnas propias al momento de crear el schedule, ya sea
//! copiada de una definición de librería o declarada como custom.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::recurrence::RecurrenceRule;

/// Estado derivado del schedule - se persiste como TEXT
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Pending,
    DueSoon,
    Overdue,
    Completed,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::DueSoon => "due_soon",
            ScheduleStatus::Overdue => "overdue",
            ScheduleStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<ScheduleStatus> {
        match value {
            "pending" => Some(ScheduleStatus::Pending),
            "due_soon" => Some(ScheduleStatus::DueSoon),
            "overdue" => Some(ScheduleStatus::Overdue),
            "completed" => Some(ScheduleStatus::Completed),
            _ => None,
        }
    }
}

/// Severidad de un vencimiento - ordenada de menor a mayor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum OverdueSeverity {
    Warning,
    Urgent,
    Critical,
}

impl OverdueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverdueSeverity::Warning => "warning",
            OverdueSeverity::Urgent => "urgent",
            OverdueSeverity::Critical => "critical",
        }
    }
}

/// Schedule de mantenimiento tal como vive en la base de datos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceSchedule {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub equipment_instance_id: Uuid,
    pub definition_id: Option<Uuid>,
    pub is_custom: bool,
    pub title: String,
    pub description: Option<String>,
    pub time_interval_value: Option<i32>,
    pub time_interval_unit: Option<String>,
    pub distance_interval_km: Option<Decimal>,
    pub last_completed_at: Option<DateTime<Utc>>,
    pub last_completed_mileage: Option<Decimal>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub next_due_mileage: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceSchedule {
    /// Regla de recurrencia armada desde las columnas resueltas
    pub fn recurrence_rule(&self) -> RecurrenceRule {
        RecurrenceRule::from_columns(
            self.time_interval_value,
            self.time_interval_unit.as_deref(),
            self.distance_interval_km,
        )
    }

    /// Kilometraje de la última completación registrada (si lo hubo)
    pub fn anchor_mileage_km(&self) -> Option<f64> {
        self.last_completed_mileage.as_ref().and_then(|d| d.to_f64())
    }

    pub fn next_due_mileage_km(&self) -> Option<f64> {
        self.next_due_mileage.as_ref().and_then(|d| d.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(ScheduleStatus::parse("due_soon"), Some(ScheduleStatus::DueSoon));
        assert_eq!(ScheduleStatus::parse("archived"), None);
        assert_eq!(ScheduleStatus::Overdue.as_str(), "overdue");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(OverdueSeverity::Warning < OverdueSeverity::Urgent);
        assert!(OverdueSeverity::Urgent < OverdueSeverity::Critical);
        assert_eq!(
            OverdueSeverity::Warning.max(OverdueSeverity::Critical),
            OverdueSeverity::Critical
        );
    }
}
