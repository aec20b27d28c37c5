//! Controller de pannes

use chrono::NaiveDate;
use tracing::info;
use validator::Validate;

use crate::dto::repair_dto::RecordRepairRequest;
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::repair::{NewRepair, RepairEvent};
use crate::repositories::Repositories;
use crate::services::authorization_service::{authorize, Action};
use crate::services::fleet_service;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct RepairController {
    repos: Repositories,
}

impl RepairController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    pub async fn record(
        &self,
        actor: &Actor,
        request: RecordRepairRequest,
        today: NaiveDate,
    ) -> AppResult<ApiResponse<RepairEvent>> {
        authorize(Some(actor), Action::ManageRepairs)?;
        request.validate()?;

        let vehicle = self
            .repos
            .fleet
            .find_vehicle(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id.to_string()))?;
        fleet_service::ensure_repairable(&vehicle)?;

        let repair = self
            .repos
            .repairs
            .record_repair(NewRepair {
                vehicle_id: vehicle.id,
                repair_date: request.date.unwrap_or(today),
                description: request.description.trim().to_string(),
                cost: request.cost.round_dp(2),
                invoice_ref: request
                    .invoice_ref
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty()),
                admin_id: actor.user_id(),
            })
            .await?;
        info!("🔧 Panne enregistrée sur {}: {} FCFA", vehicle.plate, repair.cost);

        Ok(ApiResponse::success_with_message(repair, "Panne enregistrée"))
    }

    pub async fn list(&self, actor: &Actor) -> AppResult<ApiResponse<Vec<RepairEvent>>> {
        authorize(Some(actor), Action::ManageRepairs)?;
        Ok(ApiResponse::success(self.repos.repairs.list_repairs().await?))
    }
}
