use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::definition::MaintenanceDefinition;

use super::schedule_dto::RecurrenceRuleDto;

// Request para crear una definición de librería
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDefinitionRequest {
    #[validate(length(min = 1, max = 200, message = "El título de la definición es requerido"))]
    pub title: String,
    pub description: Option<String>,
    pub rule: RecurrenceRuleDto,
}

// Response de definición
#[derive(Debug, Serialize)]
pub struct DefinitionResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub rule: RecurrenceRuleDto,
    pub created_at: DateTime<Utc>,
}

impl DefinitionResponse {
    pub fn from_definition(definition: &MaintenanceDefinition) -> Self {
        Self {
            id: definition.id,
            title: definition.title.clone(),
            description: definition.description.clone(),
            rule: RecurrenceRuleDto::from_rule(&definition.recurrence_rule()),
            created_at: definition.created_at,
        }
    }
}
