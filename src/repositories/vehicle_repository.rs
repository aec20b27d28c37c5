//! Repository de la flota (motos + conductores) en PostgreSQL
//!
//! Las operaciones que tocan el vínculo moto/conductor corren en una sola
//! transacción con `SELECT ... FOR UPDATE` sobre la moto.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::{DriverProfile, DriverUpdate};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::FleetRepository;
use crate::services::fleet_service;
use crate::utils::errors::{conflict_error, is_unique_violation, not_found_error, AppError, AppResult};

const DRIVER_PROFILE_SELECT: &str = r#"
    SELECT d.id, d.user_id, u.username, u.first_name, u.last_name, u.email,
           d.address, d.phone, d.vehicle_id,
           v.name AS vehicle_name, v.plate AS vehicle_plate
    FROM drivers d
    JOIN users u ON u.id = d.user_id
    LEFT JOIN vehicles v ON v.id = d.vehicle_id
"#;

pub struct FleetRepositoryPg {
    pool: PgPool,
}

impl FleetRepositoryPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FleetRepository for FleetRepositoryPg {
    async fn create_vehicle(&self, name: &str, plate: &str) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, name, plate, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(plate)
        .bind(VehicleStatus::Available)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict_error("Vehicle", "plate", plate)
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(vehicle)
    }

    async fn plate_exists(&self, plate: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1)")
                .bind(plate)
                .fetch_one(&self.pool)
                .await?;
        Ok(result.0)
    }

    async fn count_vehicles(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY name, plate")
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    async fn vehicle_holder(&self, vehicle_id: Uuid) -> AppResult<Option<Uuid>> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM drivers WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id,)| id))
    }

    async fn set_vehicle_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>("UPDATE vehicles SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    async fn remove_vehicle(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        sqlx::query("UPDATE drivers SET vehicle_id = NULL WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(VehicleStatus::Available)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn assign_vehicle(&self, vehicle_id: Uuid, driver_id: Uuid) -> AppResult<Vehicle> {
        let mut tx = self.pool.begin().await?;

        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(vehicle_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))?;

        let (_, previous): (Uuid, Option<Uuid>) =
            sqlx::query_as("SELECT id, vehicle_id FROM drivers WHERE id = $1 FOR UPDATE")
                .bind(driver_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| not_found_error("Driver", &driver_id.to_string()))?;

        let holder: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM drivers WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_optional(&mut *tx)
            .await?;
        fleet_service::ensure_assignable(&vehicle, holder.map(|(id,)| id), driver_id)?;

        if let Some(previous) = previous.filter(|id| *id != vehicle_id) {
            sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
                .bind(previous)
                .bind(VehicleStatus::Available)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE drivers SET vehicle_id = $1 WHERE id = $2")
            .bind(vehicle_id)
            .bind(driver_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(format!("La moto {} est déjà attribuée", vehicle.plate))
                } else {
                    AppError::Database(e)
                }
            })?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(vehicle_id)
        .bind(VehicleStatus::Assigned)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(vehicle)
    }

    async fn count_drivers(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drivers")
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }

    async fn list_drivers(&self) -> AppResult<Vec<DriverProfile>> {
        let query = format!("{} ORDER BY u.last_name, u.first_name, u.username", DRIVER_PROFILE_SELECT);
        let drivers = sqlx::query_as::<_, DriverProfile>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(drivers)
    }

    async fn find_driver(&self, id: Uuid) -> AppResult<Option<DriverProfile>> {
        let query = format!("{} WHERE d.id = $1", DRIVER_PROFILE_SELECT);
        let driver = sqlx::query_as::<_, DriverProfile>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(driver)
    }

    async fn update_driver(&self, id: Uuid, update: DriverUpdate) -> AppResult<DriverProfile> {
        let mut tx = self.pool.begin().await?;

        let (user_id,): (Uuid,) = sqlx::query_as("SELECT user_id FROM drivers WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))?;

        sqlx::query(
            "UPDATE users SET username = COALESCE($2, username), email = COALESCE($3, email) WHERE id = $1",
        )
        .bind(user_id)
        .bind(&update.username)
        .bind(&update.email)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict_error("User", "username", update.username.as_deref().unwrap_or_default())
            } else {
                AppError::Database(e)
            }
        })?;

        sqlx::query(
            "UPDATE drivers SET phone = COALESCE($2, phone), address = COALESCE($3, address) WHERE id = $1",
        )
        .bind(id)
        .bind(&update.phone)
        .bind(&update.address)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.find_driver(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    async fn delete_driver(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Mismo orden de locks que assign_vehicle: primero la moto, luego el driver
        sqlx::query(
            "SELECT id FROM vehicles WHERE id = (SELECT vehicle_id FROM drivers WHERE id = $1) FOR UPDATE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let (user_id, vehicle_id): (Uuid, Option<Uuid>) =
            sqlx::query_as("SELECT user_id, vehicle_id FROM drivers WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| not_found_error("Driver", &id.to_string()))?;

        if let Some(vehicle_id) = vehicle_id {
            sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
                .bind(vehicle_id)
                .bind(VehicleStatus::Available)
                .execute(&mut *tx)
                .await?;
        }

        // ON DELETE CASCADE borra el driver, sus recettes y absences
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
