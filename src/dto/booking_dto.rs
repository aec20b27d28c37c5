use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_phone};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub ride_date: NaiveDate,
    pub ride_time: NaiveTime,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub pickup: String,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub dropoff: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Abonnement semanal; `weekdays` en francés (`lundi` … `dimanche`)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubscriptionRequest {
    #[validate(length(min = 1, message = "Au moins un jour est requis"))]
    pub weekdays: Vec<String>,
    pub pickup_time: NaiveTime,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub pickup: String,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub dropoff: String,
}

// Réservation rapide, abierta a visitantes
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuickRequestRequest {
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub full_name: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(email(message = "Email invalide"))]
    pub email: Option<String>,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub pickup: String,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub dropoff: String,
    pub ride_date: Option<NaiveDate>,
    pub ride_time: Option<NaiveTime>,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}
