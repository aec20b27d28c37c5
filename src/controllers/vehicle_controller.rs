//! Controller de la flota de motos

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    AssignVehicleRequest, CreateVehicleRequest, SetVehicleStatusRequest, VehicleDetailResponse,
};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::vehicle::Vehicle;
use crate::repositories::Repositories;
use crate::services::authorization_service::{authorize, Action};
use crate::services::fleet_service;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};
use crate::utils::validation::normalize_plate;

pub struct VehicleController {
    repos: Repositories,
    max_vehicles: i64,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            max_vehicles: state.config.max_vehicles,
        }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        authorize(Some(actor), Action::ManageFleet)?;
        request.validate()?;

        let count = self.repos.fleet.count_vehicles().await?;
        fleet_service::ensure_capacity(count, self.max_vehicles, "motos")?;

        let plate = normalize_plate(&request.plate);
        if self.repos.fleet.plate_exists(&plate).await? {
            return Err(conflict_error("Vehicle", "plate", &plate));
        }

        let vehicle = self
            .repos
            .fleet
            .create_vehicle(request.name.trim(), &plate)
            .await?;
        info!("🏍️ Moto creada: {} ({})", vehicle.name, vehicle.plate);

        Ok(ApiResponse::success_with_message(vehicle, "Moto ajoutée"))
    }

    pub async fn list(&self, actor: &Actor) -> AppResult<ApiResponse<Vec<Vehicle>>> {
        authorize(Some(actor), Action::ManageFleet)?;
        Ok(ApiResponse::success(self.repos.fleet.list_vehicles().await?))
    }

    pub async fn get(&self, actor: &Actor, id: Uuid) -> AppResult<ApiResponse<VehicleDetailResponse>> {
        authorize(Some(actor), Action::ManageFleet)?;

        let vehicle = self
            .repos
            .fleet
            .find_vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        let driver = match self.repos.fleet.vehicle_holder(id).await? {
            Some(driver_id) => self.repos.fleet.find_driver(driver_id).await?,
            None => None,
        };

        Ok(ApiResponse::success(VehicleDetailResponse { vehicle, driver }))
    }

    /// Cambio libre de estado; no toca el vínculo con el conductor
    pub async fn set_status(
        &self,
        actor: &Actor,
        id: Uuid,
        request: SetVehicleStatusRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        authorize(Some(actor), Action::ChangeVehicleStatus)?;

        let status = fleet_service::parse_status(&request.status)?;
        let vehicle = self.repos.fleet.set_vehicle_status(id, status).await?;
        info!("🔧 Moto {} → {}", vehicle.plate, status.as_str());

        Ok(ApiResponse::success_with_message(vehicle, "Statut mis à jour"))
    }

    pub async fn remove(&self, actor: &Actor, id: Uuid) -> AppResult<ApiResponse<()>> {
        authorize(Some(actor), Action::ManageFleet)?;

        self.repos.fleet.remove_vehicle(id).await?;
        info!("🗑️ Moto {} supprimée", id);

        Ok(ApiResponse::done("Moto supprimée"))
    }

    pub async fn assign(
        &self,
        actor: &Actor,
        request: AssignVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        authorize(Some(actor), Action::ManageFleet)?;

        let vehicle = self
            .repos
            .fleet
            .assign_vehicle(request.vehicle_id, request.driver_id)
            .await?;
        info!("🔗 Moto {} attribuée au conducteur {}", vehicle.plate, request.driver_id);

        Ok(ApiResponse::success_with_message(vehicle, "Moto attribuée"))
    }
}
