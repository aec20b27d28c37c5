//! Controller de conductores (admin)

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::auth_controller::driver_account;
use crate::dto::auth_dto::RegisterDriverRequest;
use crate::dto::driver_dto::{DriverDetailResponse, UpdateDriverRequest};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::driver::DriverProfile;
use crate::models::report::DriverSummary;
use crate::repositories::Repositories;
use crate::services::authorization_service::{authorize, Action};
use crate::services::{fleet_service, ledger_service};
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

pub struct DriverController {
    repos: Repositories,
    bcrypt_cost: u32,
    max_drivers: i64,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
            max_drivers: state.config.max_drivers,
        }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        request: RegisterDriverRequest,
    ) -> AppResult<ApiResponse<DriverProfile>> {
        authorize(Some(actor), Action::ManageDrivers)?;

        let count = self.repos.fleet.count_drivers().await?;
        fleet_service::ensure_capacity(count, self.max_drivers, "conducteurs")?;

        let account = driver_account(request, self.bcrypt_cost)?;
        if self.repos.users.username_exists(&account.username).await? {
            return Err(conflict_error("User", "username", &account.username));
        }
        let account = self.repos.users.create_account(account).await?;
        let driver_id = account
            .profile_id
            .ok_or_else(|| AppError::Internal("driver account without profile".to_string()))?;

        let profile = self.profile(driver_id).await?;
        info!("🏍️ Conductor creado por admin: {}", profile.username);

        Ok(ApiResponse::success_with_message(profile, "Conducteur ajouté"))
    }

    pub async fn list(&self, actor: &Actor) -> AppResult<ApiResponse<Vec<DriverProfile>>> {
        authorize(Some(actor), Action::ManageDrivers)?;
        Ok(ApiResponse::success(self.repos.fleet.list_drivers().await?))
    }

    /// Détail conducteur: perfil, totales y recettes
    pub async fn detail(&self, actor: &Actor, id: Uuid) -> AppResult<ApiResponse<DriverDetailResponse>> {
        authorize(Some(actor), Action::ManageDrivers)?;

        let driver = self.profile(id).await?;
        let entries = self.repos.ledger.entries_for_driver(id).await?;
        let totals = ledger_service::totals(&entries);

        Ok(ApiResponse::success(DriverDetailResponse {
            summary: DriverSummary {
                driver,
                total_revenue: totals.revenue,
                total_expense: totals.expense,
                net: ledger_service::net(&totals),
            },
            entries: entries.into_iter().map(Into::into).collect(),
        }))
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> AppResult<ApiResponse<DriverProfile>> {
        authorize(Some(actor), Action::ManageDrivers)?;
        request.validate()?;

        let profile = self.repos.fleet.update_driver(id, request.into()).await?;
        info!("✏️ Conductor {} actualizado", profile.username);

        Ok(ApiResponse::success_with_message(profile, "Conducteur modifié"))
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> AppResult<ApiResponse<()>> {
        authorize(Some(actor), Action::ManageDrivers)?;

        self.repos.fleet.delete_driver(id).await?;
        info!("🗑️ Conductor {} eliminado", id);

        Ok(ApiResponse::done("Conducteur supprimé"))
    }

    async fn profile(&self, id: Uuid) -> AppResult<DriverProfile> {
        self.repos
            .fleet
            .find_driver(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }
}
