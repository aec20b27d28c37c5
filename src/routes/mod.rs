//! Rutas HTTP
//!
//! Tres grupos: público, formularios públicos (rate limit + sesión opcional)
//! y privado (sesión obligatoria). Los permisos por rol los decide
//! `authorize` dentro de cada controller.

use axum::{middleware::from_fn_with_state, routing::get, Router};
use chrono::{NaiveDate, Utc};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_layer, optional_auth_middleware, rate_limit_middleware};
use crate::state::AppState;

pub mod auth_routes;
pub mod booking_routes;
pub mod driver_routes;
pub mod ledger_routes;
pub mod question_routes;
pub mod repair_routes;
pub mod report_routes;
pub mod vehicle_routes;

/// Fecha del servidor para las operaciones "del día"
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Router completo de la aplicación
pub fn create_app_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(auth_routes::health))
        .merge(question_routes::create_faq_router())
        .merge(report_routes::create_sitemap_router());

    let public_forms = Router::new()
        .merge(booking_routes::create_public_booking_router())
        .merge(question_routes::create_public_question_form_router())
        .route_layer(from_fn_with_state(state.clone(), optional_auth_middleware))
        .route_layer(from_fn_with_state(state.rate_limit.clone(), rate_limit_middleware));

    let public_auth = auth_routes::create_public_auth_router()
        .route_layer(from_fn_with_state(state.rate_limit.strict(), rate_limit_middleware));

    let private = Router::new()
        .merge(auth_routes::create_auth_router())
        .merge(vehicle_routes::create_vehicle_router())
        .merge(driver_routes::create_driver_router())
        .merge(ledger_routes::create_ledger_router())
        .merge(repair_routes::create_repair_router())
        .merge(booking_routes::create_booking_router())
        .merge(question_routes::create_question_router())
        .merge(report_routes::create_report_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public)
        .merge(public_forms)
        .merge(public_auth)
        .merge(private)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}
