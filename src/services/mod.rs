//! Services module
//!
//! Reglas de negocio puras: sin acceso a base de datos, invocadas por los
//! controllers y por los repositorios dentro de sus transacciones.

pub mod authorization_service;
pub mod booking_service;
pub mod fleet_service;
pub mod ledger_service;
pub mod question_service;
pub mod reporting_service;
pub mod sitemap_service;
