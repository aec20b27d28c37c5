//! Controller de reservations, abonnements y réservations rapides

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{
    CreateQuickRequestRequest, CreateReservationRequest, CreateSubscriptionRequest,
};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::booking::{
    BookingDecision, BookingKind, NewQuickRequest, NewReservation, NewSubscription, QuickRequest,
    QuickRequestStatus, Reservation, Subscription,
};
use crate::repositories::Repositories;
use crate::services::authorization_service::{authorize, Action};
use crate::services::booking_service;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Client dueño de la sesión; solo los clients reservan
fn client_id(actor: &Actor) -> AppResult<Uuid> {
    match actor {
        Actor::Client { client_id, .. } => Ok(*client_id),
        _ => Err(AppError::Forbidden("only clients own bookings".to_string())),
    }
}

/// Filtro de listado: el admin ve todo, el client solo lo suyo
fn listing_scope(actor: &Actor) -> AppResult<Option<Uuid>> {
    match actor {
        Actor::Admin { .. } => {
            authorize(Some(actor), Action::ReviewBookings)?;
            Ok(None)
        }
        _ => {
            authorize(Some(actor), Action::ViewOwnBookings)?;
            client_id(actor).map(Some)
        }
    }
}

pub struct BookingController {
    repos: Repositories,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    pub async fn create_reservation(
        &self,
        actor: &Actor,
        request: CreateReservationRequest,
    ) -> AppResult<ApiResponse<Reservation>> {
        authorize(Some(actor), Action::CreateBooking)?;
        request.validate()?;

        let reservation = self
            .repos
            .bookings
            .create_reservation(NewReservation {
                client_id: client_id(actor)?,
                ride_date: request.ride_date,
                ride_time: request.ride_time,
                pickup: request.pickup.trim().to_string(),
                dropoff: request.dropoff.trim().to_string(),
                notes: trimmed(request.notes),
            })
            .await?;
        info!("📝 Reservation {} creada", reservation.id);

        Ok(ApiResponse::success_with_message(reservation, "Réservation envoyée"))
    }

    pub async fn list_reservations(&self, actor: &Actor) -> AppResult<ApiResponse<Vec<Reservation>>> {
        let scope = listing_scope(actor)?;
        Ok(ApiResponse::success(
            self.repos.bookings.list_reservations(scope).await?,
        ))
    }

    /// Validar o rechazar; la última decisión gana
    pub async fn decide_reservation(
        &self,
        actor: &Actor,
        id: Uuid,
        decision: BookingDecision,
    ) -> AppResult<ApiResponse<Reservation>> {
        authorize(Some(actor), Action::ReviewBookings)?;

        let saved = self.repos.bookings.decide_reservation(id, decision).await?;
        info!("📋 {} {} → {:?}", BookingKind::Reservation.as_str(), id, saved.status);

        Ok(ApiResponse::success(saved))
    }

    pub async fn mark_reservation_seen(&self, actor: &Actor, id: Uuid) -> AppResult<ApiResponse<Reservation>> {
        authorize(Some(actor), Action::ReviewBookings)?;

        let saved = self
            .repos
            .bookings
            .mark_reservation_seen(id, Utc::now())
            .await?;

        Ok(ApiResponse::success(saved))
    }

    pub async fn create_subscription(
        &self,
        actor: &Actor,
        request: CreateSubscriptionRequest,
    ) -> AppResult<ApiResponse<Subscription>> {
        authorize(Some(actor), Action::CreateBooking)?;
        request.validate()?;

        let subscription = self
            .repos
            .bookings
            .create_subscription(NewSubscription {
                client_id: client_id(actor)?,
                weekdays: booking_service::normalize_weekdays(&request.weekdays)?,
                pickup_time: request.pickup_time,
                pickup: request.pickup.trim().to_string(),
                dropoff: request.dropoff.trim().to_string(),
            })
            .await?;
        info!("📝 Abonnement {} creado", subscription.id);

        Ok(ApiResponse::success_with_message(subscription, "Abonnement envoyé"))
    }

    pub async fn list_subscriptions(&self, actor: &Actor) -> AppResult<ApiResponse<Vec<Subscription>>> {
        let scope = listing_scope(actor)?;
        Ok(ApiResponse::success(
            self.repos.bookings.list_subscriptions(scope).await?,
        ))
    }

    pub async fn decide_subscription(
        &self,
        actor: &Actor,
        id: Uuid,
        decision: BookingDecision,
    ) -> AppResult<ApiResponse<Subscription>> {
        authorize(Some(actor), Action::ReviewBookings)?;

        let saved = self.repos.bookings.decide_subscription(id, decision).await?;
        info!("📋 {} {} → {:?}", BookingKind::Subscription.as_str(), id, saved.status);

        Ok(ApiResponse::success(saved))
    }

    pub async fn mark_subscription_seen(&self, actor: &Actor, id: Uuid) -> AppResult<ApiResponse<Subscription>> {
        authorize(Some(actor), Action::ReviewBookings)?;

        let saved = self
            .repos
            .bookings
            .mark_subscription_seen(id, Utc::now())
            .await?;

        Ok(ApiResponse::success(saved))
    }

    /// Réservation rapide: anónima o ligada al usuario de la sesión
    pub async fn create_quick_request(
        &self,
        actor: Option<&Actor>,
        request: CreateQuickRequestRequest,
    ) -> AppResult<ApiResponse<QuickRequest>> {
        authorize(actor, Action::CreateQuickRequest)?;
        request.validate()?;

        let created = self
            .repos
            .bookings
            .create_quick_request(NewQuickRequest {
                user_id: actor.map(Actor::user_id),
                full_name: request.full_name.trim().to_string(),
                phone: request.phone.trim().to_string(),
                email: trimmed(request.email).map(|e| e.to_lowercase()),
                pickup: request.pickup.trim().to_string(),
                dropoff: request.dropoff.trim().to_string(),
                ride_date: request.ride_date,
                ride_time: request.ride_time,
                message: trimmed(request.message),
            })
            .await?;
        info!("⚡ Réservation rapide {} reçue", created.id);

        Ok(ApiResponse::success_with_message(
            created,
            "Votre demande a bien été envoyée",
        ))
    }

    pub async fn list_quick_requests(&self, actor: &Actor) -> AppResult<ApiResponse<Vec<QuickRequest>>> {
        authorize(Some(actor), Action::ManageQuickRequests)?;
        Ok(ApiResponse::success(self.repos.bookings.list_quick_requests().await?))
    }

    pub async fn mark_quick_request_seen(
        &self,
        actor: &Actor,
        id: Uuid,
    ) -> AppResult<ApiResponse<QuickRequest>> {
        // Sin permiso responde igual que si no existiera
        self.repos
            .bookings
            .find_quick_request(id)
            .await?
            .filter(|request| {
                authorize(
                    Some(actor),
                    Action::MarkQuickRequestSeen {
                        owner: request.user_id,
                    },
                )
                .is_ok()
            })
            .ok_or_else(|| not_found_error("QuickRequest", &id.to_string()))?;

        let saved = self
            .repos
            .bookings
            .set_quick_request_status(id, QuickRequestStatus::Seen)
            .await?;
        Ok(ApiResponse::success(saved))
    }

    pub async fn delete_quick_request(&self, actor: &Actor, id: Uuid) -> AppResult<ApiResponse<()>> {
        authorize(Some(actor), Action::ManageQuickRequests)?;

        self.repos.bookings.delete_quick_request(id).await?;
        info!("🗑️ Réservation rapide {} supprimée", id);

        Ok(ApiResponse::done("Demande supprimée"))
    }
}
