//! Modelo de Driver (conducteur)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Driver - mapea a la tabla drivers. `vehicle_id` es único (1:1 con vehicles)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address: String,
    pub phone: String,
    pub vehicle_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Vista del driver con datos de usuario y vehículo (JOIN)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub address: String,
    pub phone: String,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_name: Option<String>,
    pub vehicle_plate: Option<String>,
}

/// Campos editables por el admin
#[derive(Debug, Clone, Default)]
pub struct DriverUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
