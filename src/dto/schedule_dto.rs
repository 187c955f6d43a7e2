use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::recurrence::{IntervalUnit, RecurrenceRule, TimeInterval};
use crate::models::schedule::MaintenanceSchedule;
use crate::services::urgency_service::ScheduleUrgency;

// Regla de recurrencia en el wire (campos planos)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrenceRuleDto {
    pub time_interval_value: Option<u32>,
    pub time_interval_unit: Option<String>,
    pub distance_interval_km: Option<f64>,
}

impl RecurrenceRuleDto {
    /// Convertir a la regla de dominio, validando la unidad
    pub fn to_rule(&self) -> Result<RecurrenceRule, String> {
        let time_interval = match (self.time_interval_value, self.time_interval_unit.as_deref()) {
            (Some(value), Some(unit_str)) => {
                let unit = IntervalUnit::parse(unit_str)
                    .ok_or_else(|| format!("Unidad de intervalo inválida: {}", unit_str))?;
                Some(TimeInterval { value, unit })
            }
            (Some(_), None) => {
                return Err("El intervalo de tiempo necesita una unidad".to_string());
            }
            (None, Some(_)) => {
                return Err("La unidad de intervalo necesita un valor".to_string());
            }
            (None, None) => None,
        };

        let rule = RecurrenceRule {
            time_interval,
            distance_interval_km: self.distance_interval_km,
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn from_rule(rule: &RecurrenceRule) -> Self {
        Self {
            time_interval_value: rule.time_interval.map(|i| i.value),
            time_interval_unit: rule.time_interval.map(|i| i.unit.as_str().to_string()),
            distance_interval_km: rule.distance_interval_km,
        }
    }
}

// Request para adjuntar un mantenimiento a un equipo
//
// Con definition_id se copia la regla de la librería; sin definition_id el
// schedule es custom y title + rule son obligatorios.
#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub vehicle_id: Uuid,
    pub equipment_instance_id: Uuid,
    pub definition_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rule: Option<RecurrenceRuleDto>,
}

// Response de schedule con urgencia calculada al momento de leer
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub equipment_instance_id: Uuid,
    pub definition_id: Option<Uuid>,
    pub is_custom: bool,
    pub title: String,
    pub description: Option<String>,
    pub rule: RecurrenceRuleDto,
    pub last_completed_at: Option<DateTime<Utc>>,
    pub last_completed_mileage: Option<f64>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub next_due_mileage: Option<f64>,
    pub status: String,
    pub days_until_due: Option<i64>,
    pub km_until_due: Option<f64>,
    pub severity: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ScheduleResponse {
    pub fn from_schedule(schedule: &MaintenanceSchedule, urgency: Option<&ScheduleUrgency>) -> Self {
        Self {
            id: schedule.id,
            vehicle_id: schedule.vehicle_id,
            equipment_instance_id: schedule.equipment_instance_id,
            definition_id: schedule.definition_id,
            is_custom: schedule.is_custom,
            title: schedule.title.clone(),
            description: schedule.description.clone(),
            rule: RecurrenceRuleDto::from_rule(&schedule.recurrence_rule()),
            last_completed_at: schedule.last_completed_at,
            last_completed_mileage: schedule
                .last_completed_mileage
                .map(|d| d.to_string().parse().unwrap_or(0.0)),
            next_due_date: schedule.next_due_date,
            next_due_mileage: schedule
                .next_due_mileage
                .map(|d| d.to_string().parse().unwrap_or(0.0)),
            status: schedule.status.clone(),
            days_until_due: urgency.and_then(|u| u.days_until_due),
            km_until_due: urgency.and_then(|u| u.km_until_due),
            severity: urgency.and_then(|u| u.severity.map(|s| s.as_str().to_string())),
            created_at: schedule.created_at,
        }
    }
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

// Query params para listar schedules de un vehículo
#[derive(Debug, Deserialize)]
pub struct ScheduleListQuery {
    pub status: Option<String>,
}
