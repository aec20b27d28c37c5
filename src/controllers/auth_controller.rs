//! Controller de autenticación: login, inscripciones y sesión actual

use bcrypt::{hash, verify};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{
    AuthResponse, LoginRequest, MeResponse, RegisterClientRequest, RegisterDriverRequest,
};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::user::{Account, NewAccount, UserRole};
use crate::repositories::Repositories;
use crate::services::authorization_service::{authorize, Action};
use crate::services::fleet_service;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, validation_error, AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repos: Repositories,
    jwt: JwtConfig,
    bcrypt_cost: u32,
    max_drivers: i64,
}

/// Hash de la contraseña con el coste configurado
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    hash(password, cost).map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))
}

fn ensure_passwords_match(password: &str, confirm: &str) -> AppResult<()> {
    if password != confirm {
        return Err(validation_error(
            "password_confirm",
            "Les mots de passe ne correspondent pas",
        ));
    }
    Ok(())
}

fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

/// Construir la cuenta de un conductor a partir del formulario
pub fn driver_account(request: RegisterDriverRequest, bcrypt_cost: u32) -> AppResult<NewAccount> {
    request.validate()?;
    ensure_passwords_match(&request.password, &request.password_confirm)?;

    Ok(NewAccount {
        username: request.username.trim().to_string(),
        email: normalize_email(request.email),
        password_hash: hash_password(&request.password, bcrypt_cost)?,
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        phone: request.phone.trim().to_string(),
        address: Some(request.address.trim().to_string()),
        role: UserRole::Driver,
    })
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            jwt: state.jwt.clone(),
            bcrypt_cost: state.config.bcrypt_cost,
            max_drivers: state.config.max_drivers,
        }
    }

    /// Crear la cuenta admin configurada si todavía no existe; `true` si se creó
    pub async fn ensure_admin(&self, username: &str, password: &str) -> AppResult<bool> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(validation_error("admin", "Identifiants admin incomplets"));
        }
        if self.repos.users.username_exists(username).await? {
            return Ok(false);
        }

        let account = NewAccount {
            username: username.to_string(),
            email: None,
            password_hash: hash_password(password, self.bcrypt_cost)?,
            first_name: "Admin".to_string(),
            last_name: String::new(),
            phone: String::new(),
            address: None,
            role: UserRole::Admin,
        };
        match self.repos.users.create_account(account).await {
            Ok(account) => {
                info!("👑 Cuenta admin creada: {}", account.user.username);
                Ok(true)
            }
            // Otro arranque la creó entre la comprobación y el insert
            Err(AppError::Conflict(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<AuthResponse>> {
        request.validate()?;

        let user = self
            .repos
            .users
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;
        if !valid {
            warn!("🔐 Intento de login fallido para {}", user.username);
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let profile_id = self.repos.users.profile_id(&user).await?;
        let account = Account { user, profile_id };
        info!("✅ Login exitoso: {} ({})", account.user.username, account.user.role.as_str());

        Ok(ApiResponse::success_with_message(
            self.session_for(account)?,
            "Connexion réussie",
        ))
    }

    /// Inscripción pública de un conductor
    pub async fn register_driver(
        &self,
        request: RegisterDriverRequest,
    ) -> AppResult<ApiResponse<AuthResponse>> {
        let count = self.repos.fleet.count_drivers().await?;
        fleet_service::ensure_capacity(count, self.max_drivers, "conducteurs")?;

        let account = driver_account(request, self.bcrypt_cost)?;
        let account = self.create_account(account).await?;
        info!("🏍️ Nuevo conductor inscrito: {}", account.user.username);

        Ok(ApiResponse::success_with_message(
            self.session_for(account)?,
            "Inscription réussie",
        ))
    }

    /// Inscripción pública de un client
    pub async fn register_client(
        &self,
        request: RegisterClientRequest,
    ) -> AppResult<ApiResponse<AuthResponse>> {
        request.validate()?;
        ensure_passwords_match(&request.password, &request.password_confirm)?;

        let account = NewAccount {
            username: request.username.trim().to_string(),
            email: normalize_email(request.email),
            password_hash: hash_password(&request.password, self.bcrypt_cost)?,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            phone: request.phone.trim().to_string(),
            address: request
                .address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            role: UserRole::Client,
        };
        let account = self.create_account(account).await?;
        info!("👤 Nuevo client inscrito: {}", account.user.username);

        Ok(ApiResponse::success_with_message(
            self.session_for(account)?,
            "Inscription réussie",
        ))
    }

    pub async fn me(&self, actor: &Actor) -> AppResult<ApiResponse<MeResponse>> {
        authorize(Some(actor), Action::ViewOwnProfile)?;

        let user = self
            .repos
            .users
            .find_by_id(actor.user_id())
            .await?
            .ok_or_else(|| not_found_error("User", &actor.user_id().to_string()))?;

        Ok(ApiResponse::success(MeResponse { user, actor: *actor }))
    }

    async fn create_account(&self, account: NewAccount) -> AppResult<Account> {
        if self.repos.users.username_exists(&account.username).await? {
            return Err(conflict_error("User", "username", &account.username));
        }
        self.repos.users.create_account(account).await
    }

    fn session_for(&self, account: Account) -> AppResult<AuthResponse> {
        let role = account.user.role;
        let token = generate_token(account.user.id, role, account.profile_id, &self.jwt)?;
        Ok(AuthResponse {
            token,
            user: account.user,
            role,
            profile_id: account.profile_id,
        })
    }
}
