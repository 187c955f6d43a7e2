use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub owner_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "El nombre del vehículo es requerido"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "El kilometraje no puede ser negativo"))]
    pub current_mileage: Option<f64>,
}

// Request para actualizar el odómetro
#[derive(Debug, Deserialize)]
pub struct UpdateMileageRequest {
    pub mileage: f64,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub current_mileage: Option<f64>,
    pub mileage_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl VehicleResponse {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            owner_id: vehicle.owner_id,
            name: vehicle.name.clone(),
            current_mileage: vehicle
                .current_mileage
                .map(|d| d.to_string().parse().unwrap_or(0.0)),
            mileage_updated_at: vehicle.mileage_updated_at,
            created_at: vehicle.created_at,
        }
    }
}
