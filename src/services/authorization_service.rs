//! Política de autorización centralizada
//!
//! Todas las operaciones de los controllers llaman a [`authorize`] antes de
//! tocar el almacenamiento. Las reglas viven aquí y en ningún otro sitio.

use uuid::Uuid;

use crate::models::auth::Actor;
use crate::utils::errors::{AppError, AppResult};

/// Acciones protegidas del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Crear, listar, borrar y asignar motos
    ManageFleet,
    /// Cambiar el estado de una moto (cualquier usuario autenticado)
    ChangeVehicleStatus,
    /// Alta, edición y baja de conductores
    ManageDrivers,
    /// Registrar la recette del día (conductor o admin)
    WriteLedger,
    /// Corregir una recette existente o consultar el libro de un conductor
    AuditLedger,
    RecordAbsence,
    ManageRepairs,
    CreateBooking,
    ViewOwnBookings,
    /// Validar, rechazar, marcar como vista y listar todas las reservas
    ReviewBookings,
    CreateQuickRequest,
    MarkQuickRequestSeen { owner: Option<Uuid> },
    ManageQuickRequests,
    AskQuestion,
    ViewPublicFeed,
    ManageQuestions,
    ViewReports,
    ViewDriverDashboard,
    ViewOwnProfile,
}

impl Action {
    /// Acciones abiertas a visitantes anónimos
    fn is_public(&self) -> bool {
        matches!(
            self,
            Action::CreateQuickRequest | Action::AskQuestion | Action::ViewPublicFeed
        )
    }
}

/// Evaluar la política para (actor, acción)
pub fn authorize(actor: Option<&Actor>, action: Action) -> AppResult<()> {
    if action.is_public() {
        return Ok(());
    }

    let actor = actor.ok_or_else(|| {
        AppError::Unauthorized(format!("anonymous access to {:?}", action))
    })?;

    if is_allowed(actor, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{} cannot perform {:?}",
            actor.role().as_str(),
            action
        )))
    }
}

fn is_allowed(actor: &Actor, action: Action) -> bool {
    match action {
        Action::ChangeVehicleStatus | Action::ViewOwnProfile => true,

        Action::WriteLedger => matches!(actor, Actor::Admin { .. } | Actor::Driver { .. }),

        Action::ViewDriverDashboard => matches!(actor, Actor::Driver { .. }),

        Action::CreateBooking | Action::ViewOwnBookings => matches!(actor, Actor::Client { .. }),

        Action::MarkQuickRequestSeen { owner } => match actor {
            Actor::Admin { .. } => true,
            Actor::Driver { user_id, .. } | Actor::Client { user_id, .. } => {
                owner == Some(*user_id)
            }
        },

        Action::ManageFleet
        | Action::ManageDrivers
        | Action::AuditLedger
        | Action::RecordAbsence
        | Action::ManageRepairs
        | Action::ReviewBookings
        | Action::ManageQuickRequests
        | Action::ManageQuestions
        | Action::ViewReports => matches!(actor, Actor::Admin { .. }),

        Action::CreateQuickRequest | Action::AskQuestion | Action::ViewPublicFeed => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Actor {
        Actor::Admin { user_id: Uuid::new_v4() }
    }

    fn driver() -> Actor {
        Actor::Driver { user_id: Uuid::new_v4(), driver_id: Uuid::new_v4() }
    }

    fn client() -> Actor {
        Actor::Client { user_id: Uuid::new_v4(), client_id: Uuid::new_v4() }
    }

    #[test]
    fn test_anonymous_only_reaches_public_actions() {
        assert!(authorize(None, Action::AskQuestion).is_ok());
        assert!(authorize(None, Action::CreateQuickRequest).is_ok());
        assert!(matches!(
            authorize(None, Action::ChangeVehicleStatus),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            authorize(None, Action::ViewReports),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_admin_only_actions() {
        let admin = admin();
        for action in [
            Action::ManageFleet,
            Action::ReviewBookings,
            Action::ManageQuestions,
            Action::ManageRepairs,
            Action::ViewReports,
        ] {
            assert!(authorize(Some(&admin), action).is_ok());
            assert!(matches!(
                authorize(Some(&driver()), action),
                Err(AppError::Forbidden(_))
            ));
            assert!(matches!(
                authorize(Some(&client()), action),
                Err(AppError::Forbidden(_))
            ));
        }
    }

    #[test]
    fn test_ledger_write_is_driver_or_admin() {
        assert!(authorize(Some(&driver()), Action::WriteLedger).is_ok());
        assert!(authorize(Some(&admin()), Action::WriteLedger).is_ok());
        assert!(authorize(Some(&client()), Action::WriteLedger).is_err());
    }

    #[test]
    fn test_quick_request_seen_by_owner() {
        let client = client();
        let owner = Some(client.user_id());
        assert!(authorize(Some(&client), Action::MarkQuickRequestSeen { owner }).is_ok());
        assert!(authorize(
            Some(&client),
            Action::MarkQuickRequestSeen { owner: Some(Uuid::new_v4()) }
        )
        .is_err());
        assert!(authorize(Some(&client), Action::MarkQuickRequestSeen { owner: None }).is_err());
        assert!(authorize(Some(&admin()), Action::MarkQuickRequestSeen { owner: None }).is_ok());
    }

    #[test]
    fn test_bookings_are_created_by_clients() {
        assert!(authorize(Some(&client()), Action::CreateBooking).is_ok());
        assert!(authorize(Some(&driver()), Action::CreateBooking).is_err());
        assert!(authorize(Some(&admin()), Action::CreateBooking).is_err());
    }
}
