use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, owner_id, name, current_mileage, mileage_updated_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.owner_id)
        .bind(&vehicle.name)
        .bind(vehicle.current_mileage)
        .bind(vehicle.mileage_updated_at)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating vehicle: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding vehicle: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing vehicles: {}", e)))?;

        Ok(result)
    }

    /// Escribir el odómetro y sellar el momento de la lectura. El sello
    /// alimenta el cooldown de propagación desde completaciones.
    pub async fn update_mileage(
        &self,
        id: Uuid,
        mileage: Decimal,
        read_at: DateTime<Utc>,
    ) -> Result<Vehicle, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET current_mileage = $2, mileage_updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(mileage)
        .bind(read_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating vehicle mileage: {}", e)))?;

        Ok(result)
    }
}
