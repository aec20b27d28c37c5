//! Modelos de reporting (solo lectura)

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::driver::DriverProfile;
use super::ledger::{Absence, LedgerEntry};

/// Totales crudos leídos del almacenamiento
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    pub revenue: Decimal,
    pub expense: Decimal,
}

/// Bilan général
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalBalance {
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub total_repair_cost: Decimal,
    pub net_profit: Decimal,
}

/// Conteo de motos por estado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetCounts {
    pub available: i64,
    pub assigned: i64,
    pub in_repair: i64,
}

/// Respuesta completa del bilan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReport {
    pub balance: GlobalBalance,
    pub fleet: FleetCounts,
    pub drivers: i64,
}

/// Resumen de un conductor (détail conducteur)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverSummary {
    pub driver: DriverProfile,
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
}

/// Fila del dashboard admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboardRow {
    pub driver: DriverProfile,
    pub today_entry: Option<LedgerEntry>,
    pub total_revenue: Decimal,
}

/// Dashboard del conductor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverDashboard {
    pub driver_id: Uuid,
    pub date: NaiveDate,
    pub today_entry: Option<LedgerEntry>,
    pub absences: Vec<Absence>,
}
