use crate::dto::schedule_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateMileageRequest, VehicleResponse};
use crate::models::vehicle::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_non_negative;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        // Validar datos de entrada
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let now = Utc::now();
        let current_mileage = request
            .current_mileage
            .map(|m| {
                Decimal::from_f64_retain(m)
                    .ok_or_else(|| AppError::ValidationError("Invalid mileage value".to_string()))
            })
            .transpose()?;

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            owner_id: request.owner_id,
            name: request.name,
            current_mileage,
            mileage_updated_at: current_mileage.map(|_| now),
            created_at: now,
        };
        let created = self.repository.create(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from_vehicle(&created),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(VehicleResponse::from_vehicle(&vehicle))
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_owner(owner_id).await?;
        Ok(vehicles.iter().map(VehicleResponse::from_vehicle).collect())
    }

    /// Actualizar el odómetro. La regresión se rechaza de manera uniforme:
    /// una lectura menor a la vigente nunca se acepta por esta vía.
    pub async fn update_mileage(
        &self,
        id: Uuid,
        request: UpdateMileageRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        if validate_non_negative(request.mileage).is_err() {
            return Err(AppError::ValidationError(
                "El kilometraje no puede ser negativo".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if let Some(current) = vehicle.current_mileage_km() {
            if request.mileage < current {
                return Err(AppError::ValidationError(format!(
                    "El kilometraje no puede retroceder: {} km es menor que el actual ({} km)",
                    request.mileage, current
                )));
            }
        }

        let mileage = Decimal::from_f64_retain(request.mileage)
            .ok_or_else(|| AppError::ValidationError("Invalid mileage value".to_string()))?;
        let updated = self
            .repository
            .update_mileage(id, mileage, Utc::now())
            .await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from_vehicle(&updated),
            "Kilometraje actualizado exitosamente".to_string(),
        ))
    }
}
