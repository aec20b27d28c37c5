//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::repositories::Repositories;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitState,
    /// Tokens invalidados por logout, con su `exp`; se purgan al expirar
    pub revoked_tokens: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(repos: Repositories, config: EnvironmentConfig) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            rate_limit: RateLimitState::new(&config),
            revoked_tokens: Arc::new(RwLock::new(HashMap::new())),
            repos,
            config,
        }
    }

    /// Estado sobre el almacenamiento en memoria
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(Repositories::in_memory(), config)
    }

    /// Revocar un token hasta su expiración natural
    pub async fn revoke_token(&self, token: &str, expires_at: DateTime<Utc>) {
        let mut revoked = self.revoked_tokens.write().await;
        let now = Utc::now();
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(token.to_string(), expires_at);
        tracing::info!("🔒 Token revocado. Tokens revocados: {}", revoked.len());
    }

    pub async fn is_token_revoked(&self, token: &str) -> bool {
        self.revoked_tokens.read().await.contains_key(token)
    }

    /// Limpiar tokens revocados ya expirados
    pub async fn cleanup_expired_tokens(&self) {
        let now = Utc::now();
        self.revoked_tokens.write().await.retain(|_, exp| *exp > now);
    }
}
