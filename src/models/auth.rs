//! Sujeto autenticado
//!
//! `Actor` reemplaza las comparaciones de strings de rol: cada operación
//! hace `match` exhaustivo sobre la variante.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    Admin { user_id: Uuid },
    Driver { user_id: Uuid, driver_id: Uuid },
    Client { user_id: Uuid, client_id: Uuid },
}

impl Actor {
    pub fn user_id(&self) -> Uuid {
        match self {
            Actor::Admin { user_id }
            | Actor::Driver { user_id, .. }
            | Actor::Client { user_id, .. } => *user_id,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Actor::Admin { .. } => UserRole::Admin,
            Actor::Driver { .. } => UserRole::Driver,
            Actor::Client { .. } => UserRole::Client,
        }
    }

    /// Reconstruir el actor a partir del rol y del id de perfil
    pub fn from_parts(user_id: Uuid, role: UserRole, profile_id: Option<Uuid>) -> Option<Self> {
        match (role, profile_id) {
            (UserRole::Admin, _) => Some(Actor::Admin { user_id }),
            (UserRole::Driver, Some(driver_id)) => Some(Actor::Driver { user_id, driver_id }),
            (UserRole::Client, Some(client_id)) => Some(Actor::Client { user_id, client_id }),
            _ => None,
        }
    }

    pub fn profile_id(&self) -> Option<Uuid> {
        match self {
            Actor::Admin { .. } => None,
            Actor::Driver { driver_id, .. } => Some(*driver_id),
            Actor::Client { client_id, .. } => Some(*client_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_without_profile_is_rejected() {
        let user_id = Uuid::new_v4();
        assert!(Actor::from_parts(user_id, UserRole::Driver, None).is_none());
        assert_eq!(
            Actor::from_parts(user_id, UserRole::Admin, None),
            Some(Actor::Admin { user_id })
        );
    }
}
