use crate::models::schedule::MaintenanceSchedule;
use crate::utils::errors::{is_unique_violation, AppError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

// Fila del join schedules + vehicles que consume el pase de notificaciones
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DueScheduleRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub owner_id: Uuid,
    pub vehicle_name: String,
    pub title: String,
    pub next_due_date: Option<DateTime<Utc>>,
    pub next_due_mileage: Option<Decimal>,
    pub vehicle_mileage: Option<Decimal>,
}

pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar un schedule nuevo. El índice único de la tripleta
    /// (vehicle, equipment, definition) convierte el duplicado en un 409.
    pub async fn create(&self, schedule: &MaintenanceSchedule) -> Result<MaintenanceSchedule, AppError> {
        let result = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            INSERT INTO maintenance_schedules (
                id, vehicle_id, equipment_instance_id, definition_id, is_custom,
                title, description, time_interval_value, time_interval_unit,
                distance_interval_km, last_completed_at, last_completed_mileage,
                next_due_date, next_due_mileage, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(schedule.id)
        .bind(schedule.vehicle_id)
        .bind(schedule.equipment_instance_id)
        .bind(schedule.definition_id)
        .bind(schedule.is_custom)
        .bind(&schedule.title)
        .bind(&schedule.description)
        .bind(schedule.time_interval_value)
        .bind(&schedule.time_interval_unit)
        .bind(schedule.distance_interval_km)
        .bind(schedule.last_completed_at)
        .bind(schedule.last_completed_mileage)
        .bind(schedule.next_due_date)
        .bind(schedule.next_due_mileage)
        .bind(&schedule.status)
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateSchedule(
                    "Ya existe un schedule para este equipo con esa definición".to_string(),
                )
            } else {
                AppError::DatabaseError(format!("Error creating schedule: {}", e))
            }
        })?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceSchedule>, AppError> {
        let result = sqlx::query_as::<_, MaintenanceSchedule>(
            "SELECT * FROM maintenance_schedules WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error finding schedule: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceSchedule>, AppError> {
        let result = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            SELECT * FROM maintenance_schedules
            WHERE vehicle_id = $1
            ORDER BY next_due_date ASC NULLS LAST, created_at DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing schedules: {}", e)))?;

        Ok(result)
    }

    /// Anclar el schedule a una completación nueva.
    ///
    /// `last_completed_at` siempre se pisa con la fecha del registro nuevo;
    /// `last_completed_mileage` solo cuando el registro trae kilometraje
    /// (COALESCE conserva el ancla de distancia anterior si no).
    pub async fn apply_completion_anchor(
        &self,
        id: Uuid,
        last_completed_at: DateTime<Utc>,
        last_completed_mileage: Option<Decimal>,
        next_due_date: Option<DateTime<Utc>>,
        next_due_mileage: Option<Decimal>,
        status: &str,
    ) -> Result<MaintenanceSchedule, AppError> {
        let result = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            UPDATE maintenance_schedules
            SET last_completed_at = $2,
                last_completed_mileage = COALESCE($3, last_completed_mileage),
                next_due_date = $4,
                next_due_mileage = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(last_completed_at)
        .bind(last_completed_mileage)
        .bind(next_due_date)
        .bind(next_due_mileage)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error anchoring schedule: {}", e)))?;

        Ok(result)
    }

    /// Reescribir anclas y derivados completos (usado al borrar una
    /// completación, donde las anclas pueden volver a quedar vacías)
    pub async fn reanchor(
        &self,
        id: Uuid,
        last_completed_at: Option<DateTime<Utc>>,
        last_completed_mileage: Option<Decimal>,
        next_due_date: Option<DateTime<Utc>>,
        next_due_mileage: Option<Decimal>,
        status: &str,
    ) -> Result<MaintenanceSchedule, AppError> {
        let result = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            UPDATE maintenance_schedules
            SET last_completed_at = $2,
                last_completed_mileage = $3,
                next_due_date = $4,
                next_due_mileage = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(last_completed_at)
        .bind(last_completed_mileage)
        .bind(next_due_date)
        .bind(next_due_mileage)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error re-anchoring schedule: {}", e)))?;

        Ok(result)
    }

    /// Persistir el estado cacheado tras una reclasificación
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE maintenance_schedules SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating schedule status: {}", e)))?;

        Ok(())
    }

    /// Borrado explícito; los completion_records caen por el CASCADE del schema
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM maintenance_schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting schedule: {}", e)))?;

        Ok(())
    }

    /// Schedules con fecha de vencimiento, con su dueño resuelto, para el
    /// pase de recordatorios
    pub async fn find_for_reminder_pass(&self) -> Result<Vec<DueScheduleRow>, AppError> {
        let result = sqlx::query_as::<_, DueScheduleRow>(
            r#"
            SELECT s.id, s.vehicle_id, v.owner_id, v.name AS vehicle_name,
                   s.title, s.next_due_date, s.next_due_mileage,
                   v.current_mileage AS vehicle_mileage
            FROM maintenance_schedules s
            JOIN vehicles v ON v.id = s.vehicle_id
            WHERE s.next_due_date IS NOT NULL
            ORDER BY s.next_due_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error loading reminder candidates: {}", e)))?;

        Ok(result)
    }

    /// Schedules con al menos un eje de vencimiento definido, para el pase
    /// de escalamiento de vencidos
    pub async fn find_for_overdue_pass(&self) -> Result<Vec<DueScheduleRow>, AppError> {
        let result = sqlx::query_as::<_, DueScheduleRow>(
            r#"
            SELECT s.id, s.vehicle_id, v.owner_id, v.name AS vehicle_name,
                   s.title, s.next_due_date, s.next_due_mileage,
                   v.current_mileage AS vehicle_mileage
            FROM maintenance_schedules s
            JOIN vehicles v ON v.id = s.vehicle_id
            WHERE s.next_due_date IS NOT NULL OR s.next_due_mileage IS NOT NULL
            ORDER BY s.next_due_date ASC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error loading overdue candidates: {}", e)))?;

        Ok(result)
    }
}
