//! Máquina de estados de la flota
//!
//! Reglas puras: los repositorios las invocan dentro de su transacción
//! (o de su lock en memoria) para que el check-and-set sea atómico.

use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Verificar que la moto pueda asignarse a `driver_id`.
///
/// Re-asignar al mismo conductor es válido.
pub fn ensure_assignable(
    vehicle: &Vehicle,
    current_holder: Option<Uuid>,
    driver_id: Uuid,
) -> AppResult<()> {
    match current_holder {
        Some(holder) if holder != driver_id => Err(AppError::Conflict(format!(
            "La moto {} ({}) est déjà attribuée à un autre conducteur",
            vehicle.name, vehicle.plate
        ))),
        _ => Ok(()),
    }
}

/// Parsear el nuevo estado pedido; el estado anterior no se toca si falla
pub fn parse_status(raw: &str) -> AppResult<VehicleStatus> {
    VehicleStatus::parse(raw).ok_or_else(|| validation_error("status", "Statut invalide"))
}

/// Una reparación solo se registra sobre una moto en reparación
pub fn ensure_repairable(vehicle: &Vehicle) -> AppResult<()> {
    if vehicle.status != VehicleStatus::InRepair {
        return Err(validation_error(
            "vehicle_id",
            "La moto doit être en réparation pour enregistrer une panne",
        ));
    }
    Ok(())
}

/// Límite de capacidad (motos o conductores)
pub fn ensure_capacity(current: i64, max: i64, field: &'static str) -> AppResult<()> {
    if current >= max {
        return Err(AppError::BadRequest(format!(
            "Nombre maximal atteint pour {} ({})",
            field, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vehicle(status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            name: "Haojue".to_string(),
            plate: "TG-1234-AB".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_assign_free_vehicle() {
        let v = vehicle(VehicleStatus::Available);
        assert!(ensure_assignable(&v, None, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_reassign_same_driver_is_idempotent() {
        let v = vehicle(VehicleStatus::Assigned);
        let driver = Uuid::new_v4();
        assert!(ensure_assignable(&v, Some(driver), driver).is_ok());
    }

    #[test]
    fn test_assign_taken_vehicle_conflicts() {
        let v = vehicle(VehicleStatus::Assigned);
        let result = ensure_assignable(&v, Some(Uuid::new_v4()), Uuid::new_v4());
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("in_repair").unwrap(), VehicleStatus::InRepair);
        assert_eq!(parse_status("disponible").unwrap(), VehicleStatus::Available);
        assert!(matches!(parse_status("vendue"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_repair_requires_in_repair() {
        assert!(ensure_repairable(&vehicle(VehicleStatus::InRepair)).is_ok());
        assert!(ensure_repairable(&vehicle(VehicleStatus::Assigned)).is_err());
    }

    #[test]
    fn test_capacity() {
        assert!(ensure_capacity(99, 100, "motos").is_ok());
        assert!(ensure_capacity(100, 100, "motos").is_err());
    }
}
