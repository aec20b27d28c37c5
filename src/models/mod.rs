//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL (ver `migrations/`).

pub mod auth;
pub mod booking;
pub mod client;
pub mod driver;
pub mod ledger;
pub mod question;
pub mod repair;
pub mod report;
pub mod user;
pub mod vehicle;
