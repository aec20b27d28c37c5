use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver::DriverProfile;
use crate::models::vehicle::Vehicle;
use crate::utils::validation::{validate_not_blank, validate_plate};

// Request para crear una moto
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: String,
    #[validate(custom = "validate_plate")]
    pub plate: String,
}

/// Cambio de estado; el valor se parsea en el controller
#[derive(Debug, Deserialize)]
pub struct SetVehicleStatusRequest {
    pub status: String,
}

// Request de asignación moto → conductor
#[derive(Debug, Deserialize)]
pub struct AssignVehicleRequest {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
}

// Response de moto con su conductor actual
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub driver: Option<DriverProfile>,
}
