//! Backend de la flota de taxi-moto
//!
//! API JSON para administradores, conductores y clientes: vehículos,
//! conductores, libro diario de ingresos, averías, reservas y FAQ pública.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
