use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    CreateQuickRequestRequest, CreateReservationRequest, CreateSubscriptionRequest,
};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::booking::{BookingDecision, QuickRequest, Reservation, Subscription};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Formulario público de réservation rapide
pub fn create_public_booking_router() -> Router<AppState> {
    Router::new().route("/reservation-rapide/", post(create_quick_request))
}

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/reservations/", get(list_reservations).post(create_reservation))
        .route("/reservation/:id/valider/", post(approve_reservation))
        .route("/reservation/:id/rejeter/", post(reject_reservation))
        .route("/reservation/:id/lu/", post(mark_reservation_seen))
        .route("/abonnements/", get(list_subscriptions).post(create_subscription))
        .route("/abonnement/:id/valider/", post(approve_subscription))
        .route("/abonnement/:id/rejeter/", post(reject_subscription))
        .route("/abonnement/:id/lu/", post(mark_subscription_seen))
        .route("/reservations-rapides/", get(list_quick_requests))
        .route("/reservation-rapide/:id/lu/", post(mark_quick_request_seen))
        .route("/reservation-rapide/:id/supprimer/", post(delete_quick_request))
}

async fn create_reservation(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.create_reservation(&actor, request).await?;
    Ok(Json(response))
}

async fn list_reservations(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<Vec<Reservation>>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list_reservations(&actor).await?;
    Ok(Json(response))
}

async fn approve_reservation(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller
        .decide_reservation(&actor, id, BookingDecision::Approved)
        .await?;
    Ok(Json(response))
}

async fn reject_reservation(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller
        .decide_reservation(&actor, id, BookingDecision::Rejected)
        .await?;
    Ok(Json(response))
}

async fn mark_reservation_seen(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.mark_reservation_seen(&actor, id).await?;
    Ok(Json(response))
}

async fn create_subscription(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<Json<ApiResponse<Subscription>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.create_subscription(&actor, request).await?;
    Ok(Json(response))
}

async fn list_subscriptions(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<Vec<Subscription>>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list_subscriptions(&actor).await?;
    Ok(Json(response))
}

async fn approve_subscription(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Subscription>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller
        .decide_subscription(&actor, id, BookingDecision::Approved)
        .await?;
    Ok(Json(response))
}

async fn reject_subscription(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Subscription>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller
        .decide_subscription(&actor, id, BookingDecision::Rejected)
        .await?;
    Ok(Json(response))
}

async fn mark_subscription_seen(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Subscription>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.mark_subscription_seen(&actor, id).await?;
    Ok(Json(response))
}

async fn create_quick_request(
    State(state): State<AppState>,
    actor: Option<Extension<Actor>>,
    Json(request): Json<CreateQuickRequestRequest>,
) -> Result<Json<ApiResponse<QuickRequest>>, AppError> {
    let controller = BookingController::new(&state);
    let actor = actor.map(|Extension(actor)| actor);
    let response = controller.create_quick_request(actor.as_ref(), request).await?;
    Ok(Json(response))
}

async fn list_quick_requests(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<Vec<QuickRequest>>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list_quick_requests(&actor).await?;
    Ok(Json(response))
}

async fn mark_quick_request_seen(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<QuickRequest>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.mark_quick_request_seen(&actor, id).await?;
    Ok(Json(response))
}

async fn delete_quick_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.delete_quick_request(&actor, id).await?;
    Ok(Json(response))
}
