//! Modelo de Vehicle (moto)
//!
//! Este módulo contiene el struct Vehicle y el ENUM de estado.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[serde(alias = "disponible")]
    Available,
    #[serde(alias = "attribuee")]
    Assigned,
    #[serde(alias = "reparation")]
    InRepair,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::Assigned,
        VehicleStatus::InRepair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Assigned => "assigned",
            VehicleStatus::InRepair => "in_repair",
        }
    }

    /// Acepta también los nombres en francés del formulario
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "available" | "disponible" => Some(VehicleStatus::Available),
            "assigned" | "attribuee" => Some(VehicleStatus::Assigned),
            "in_repair" | "reparation" => Some(VehicleStatus::InRepair),
            _ => None,
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub plate: String,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}
