//! DTOs de la API JSON
//!
//! Requests con `validator::Validate` y la envoltura común de respuestas.

use serde::Serialize;

pub mod auth_dto;
pub mod booking_dto;
pub mod driver_dto;
pub mod ledger_dto;
pub mod question_dto;
pub mod repair_dto;
pub mod vehicle_dto;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Respuesta sin datos para operaciones de borrado o logout
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}
