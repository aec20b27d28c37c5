//! Controllers
//!
//! Cada operación llama a `authorize` antes de tocar los repositorios.

pub mod auth_controller;
pub mod booking_controller;
pub mod driver_controller;
pub mod ledger_controller;
pub mod question_controller;
pub mod repair_controller;
pub mod report_controller;
pub mod vehicle_controller;
