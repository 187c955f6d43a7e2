//! Modelo de Vehicle
//!
//! Vehículo del usuario con su odómetro vigente. `mileage_updated_at`
//! alimenta la ventana de enfriamiento de la propagación de kilometraje
//! hacia las completaciones.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehículo tal como vive en la base de datos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub current_mileage: Option<Decimal>,
    pub mileage_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn current_mileage_km(&self) -> Option<f64> {
        self.current_mileage.as_ref().and_then(|d| d.to_f64())
    }
}
