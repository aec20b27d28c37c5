use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ledger::LedgerEntry;
use crate::utils::validation::validate_amount;

/// Recette del día. `driver_id` solo lo indica el admin; `date` por defecto hoy
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertEntryRequest {
    pub driver_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    #[validate(custom = "validate_amount")]
    pub revenue: Decimal,
    #[validate(custom = "validate_amount")]
    pub expense: Decimal,
}

// Corrección de una recette existente (admin)
#[derive(Debug, Deserialize, Validate)]
pub struct EditEntryRequest {
    #[validate(custom = "validate_amount")]
    pub revenue: Decimal,
    #[validate(custom = "validate_amount")]
    pub expense: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AbsenceRequest {
    pub date: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Recette con el neto derivado
#[derive(Debug, Serialize)]
pub struct LedgerEntryView {
    #[serde(flatten)]
    pub entry: LedgerEntry,
    pub net: Decimal,
}

impl From<LedgerEntry> for LedgerEntryView {
    fn from(entry: LedgerEntry) -> Self {
        let net = entry.net();
        Self { entry, net }
    }
}
