//! Modelos del flujo de reservas: reservations, abonnements y réservations rapides

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use super::ledger::WeekdayLabel;

/// Estado de reservation / abonnement - mapea al ENUM booking_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Seen,
}

/// Decisión del admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingDecision {
    Approved,
    Rejected,
}

impl From<BookingDecision> for BookingStatus {
    fn from(decision: BookingDecision) -> Self {
        match decision {
            BookingDecision::Approved => BookingStatus::Approved,
            BookingDecision::Rejected => BookingStatus::Rejected,
        }
    }
}

/// Tipo de registro reservable, para mensajes y políticas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Reservation,
    Subscription,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Reservation => "Reservation",
            BookingKind::Subscription => "Subscription",
        }
    }
}

/// Reservation puntual de un client
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub client_id: Uuid,
    pub ride_date: NaiveDate,
    pub ride_time: NaiveTime,
    pub pickup: String,
    pub dropoff: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Abonnement semanal de un client
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub client_id: Uuid,
    pub weekdays: Vec<WeekdayLabel>,
    pub pickup_time: NaiveTime,
    pub pickup: String,
    pub dropoff: String,
    pub status: BookingStatus,
    pub seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub client_id: Uuid,
    pub ride_date: NaiveDate,
    pub ride_time: NaiveTime,
    pub pickup: String,
    pub dropoff: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub client_id: Uuid,
    pub weekdays: Vec<WeekdayLabel>,
    pub pickup_time: NaiveTime,
    pub pickup: String,
    pub dropoff: String,
}

/// Estado de la réservation rapide - mapea al ENUM quick_request_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "quick_request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuickRequestStatus {
    Pending,
    Seen,
}

/// Réservation rapide, anónima o de un usuario autenticado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuickRequest {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub pickup: String,
    pub dropoff: String,
    pub ride_date: Option<NaiveDate>,
    pub ride_time: Option<NaiveTime>,
    pub message: Option<String>,
    pub status: QuickRequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuickRequest {
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub pickup: String,
    pub dropoff: String,
    pub ride_date: Option<NaiveDate>,
    pub ride_time: Option<NaiveTime>,
    pub message: Option<String>,
}
