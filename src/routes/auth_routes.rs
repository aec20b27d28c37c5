use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AuthResponse, LoginRequest, MeResponse, RegisterClientRequest, RegisterDriverRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::SessionToken;
use crate::models::auth::Actor;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Login e inscripciones (públicas, con rate limit estricto)
pub fn create_public_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register_driver))
        .route("/register/client", post(register_client))
}

/// Sesión actual
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn register_driver(
    State(state): State<AppState>,
    Json(request): Json<RegisterDriverRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.register_driver(request).await?;
    Ok(Json(response))
}

async fn register_client(
    State(state): State<AppState>,
    Json(request): Json<RegisterClientRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.register_client(request).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<SessionToken>,
) -> Json<ApiResponse<()>> {
    state.revoke_token(&session.token, session.expires_at).await;
    Json(ApiResponse::done("Déconnexion réussie"))
}

async fn me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<MeResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.me(&actor).await?;
    Ok(Json(response))
}
