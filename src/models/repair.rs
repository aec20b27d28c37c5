//! Modelo de RepairEvent (panne)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Reparación registrada por un admin sobre una moto
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RepairEvent {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub repair_date: NaiveDate,
    pub description: String,
    pub cost: Decimal,
    pub invoice_ref: Option<String>,
    pub admin_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRepair {
    pub vehicle_id: Uuid,
    pub repair_date: NaiveDate,
    pub description: String,
    pub cost: Decimal,
    pub invoice_ref: Option<String>,
    pub admin_id: Uuid,
}
