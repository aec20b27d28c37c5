//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y la resolución del [`Actor`] que se inyecta en las requests.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    models::auth::Actor,
    state::AppState,
    utils::{
        errors::{AppError, AppResult},
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Token crudo de la sesión y su expiración, necesarios para el logout
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Validar token, comprobar revocación y reconstruir el actor desde el store
async fn resolve_actor(state: &AppState, token: &str) -> AppResult<(Actor, DateTime<Utc>)> {
    if state.is_token_revoked(token).await {
        return Err(AppError::Unauthorized("Token revocado".to_string()));
    }

    let claims = verify_token(token, &state.jwt)?;
    let user = state
        .repos
        .users
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if claims.role()? != user.role {
        return Err(AppError::Unauthorized("Rol del token desactualizado".to_string()));
    }

    let profile_id = state.repos.users.profile_id(&user).await?;
    let actor = Actor::from_parts(user.id, user.role, profile_id)
        .ok_or_else(|| AppError::Unauthorized("Perfil de usuario inexistente".to_string()))?;
    Ok((actor, claims.expires_at()?))
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;
    let token = extract_token_from_header(auth_header)?.to_string();

    let (actor, expires_at) = resolve_actor(&state, &token).await?;
    debug!("🔑 Request autenticada como {}", actor.role().as_str());

    request.extensions_mut().insert(actor);
    request.extensions_mut().insert(SessionToken { token, expires_at });

    Ok(next.run(request).await)
}

/// Middleware opcional de autenticación (para rutas que pueden ser públicas o privadas)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(&request)
        .and_then(|header| extract_token_from_header(header).ok())
        .map(str::to_string);

    if let Some(token) = token {
        match resolve_actor(&state, &token).await {
            Ok((actor, _)) => {
                request.extensions_mut().insert(actor);
            }
            Err(e) => debug!("🔓 Token opcional ignorado: {}", e),
        }
    }

    next.run(request).await
}
