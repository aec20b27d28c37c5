use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_amount, validate_not_blank};

// Request para registrar una panne
#[derive(Debug, Deserialize, Validate)]
pub struct RecordRepairRequest {
    pub vehicle_id: Uuid,
    pub date: Option<NaiveDate>,
    #[validate(custom = "validate_not_blank", length(max = 2000))]
    pub description: String,
    #[validate(custom = "validate_amount")]
    pub cost: Decimal,
    /// Referencia opaca de la factura
    #[validate(length(max = 255))]
    pub invoice_ref: Option<String>,
}
