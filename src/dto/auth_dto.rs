use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::Actor;
use crate::models::user::{User, UserRole};
use crate::utils::validation::{validate_not_blank, validate_phone};

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Nom d'utilisateur requis"))]
    pub username: String,
    #[validate(length(min = 1, message = "Mot de passe requis"))]
    pub password: String,
}

/// Inscription de un conductor (pública o por el admin)
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDriverRequest {
    #[validate(length(min = 3, max = 150, message = "Nom d'utilisateur invalide"))]
    pub username: String,
    #[validate(length(min = 8, message = "Le mot de passe doit contenir au moins 8 caractères"))]
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(email(message = "Email invalide"))]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub address: String,
}

/// Inscription de un client
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterClientRequest {
    #[validate(length(min = 3, max = 150, message = "Nom d'utilisateur invalide"))]
    pub username: String,
    #[validate(length(min = 8, message = "Le mot de passe doit contenir au moins 8 caractères"))]
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(email(message = "Email invalide"))]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
}

// Login / register response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub role: UserRole,
    pub profile_id: Option<Uuid>,
}

/// Perfil de la sesión actual
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    pub actor: Actor,
}
