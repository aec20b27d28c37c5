use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::ledger_dto::LedgerEntryView;
use crate::models::driver::DriverUpdate;
use crate::models::report::DriverSummary;
use crate::utils::validation::{validate_not_blank, validate_phone};

/// Edición de un conductor por el admin; los campos ausentes no cambian
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 3, max = 150, message = "Nom d'utilisateur invalide"))]
    pub username: Option<String>,
    #[validate(email(message = "Email invalide"))]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub address: Option<String>,
}

impl From<UpdateDriverRequest> for DriverUpdate {
    fn from(request: UpdateDriverRequest) -> Self {
        Self {
            username: request.username.map(|s| s.trim().to_string()),
            email: request.email.map(|s| s.trim().to_lowercase()),
            phone: request.phone.map(|s| s.trim().to_string()),
            address: request.address.map(|s| s.trim().to_string()),
        }
    }
}

// Response de détail conducteur
#[derive(Debug, Serialize)]
pub struct DriverDetailResponse {
    #[serde(flatten)]
    pub summary: DriverSummary,
    pub entries: Vec<LedgerEntryView>,
}
