use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::ledger_controller::LedgerController;
use crate::dto::ledger_dto::{AbsenceRequest, EditEntryRequest, LedgerEntryView, UpsertEntryRequest};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::ledger::Absence;
use crate::routes::today;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ledger_router() -> Router<AppState> {
    Router::new()
        .route("/recettes/ajouter/", post(upsert_entry))
        .route("/recette/:id/modifier/", post(edit_entry))
        .route("/conducteur/:id/recettes/", get(driver_entries))
        .route("/absence/:driver_id/", post(record_absence))
        .route("/conducteur/:id/absences/", get(driver_absences))
}

async fn upsert_entry(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<UpsertEntryRequest>,
) -> Result<Json<ApiResponse<LedgerEntryView>>, AppError> {
    let controller = LedgerController::new(&state);
    let response = controller.upsert(&actor, request, today()).await?;
    Ok(Json(response))
}

async fn edit_entry(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<EditEntryRequest>,
) -> Result<Json<ApiResponse<LedgerEntryView>>, AppError> {
    let controller = LedgerController::new(&state);
    let response = controller.edit(&actor, id, request).await?;
    Ok(Json(response))
}

async fn driver_entries(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<LedgerEntryView>>>, AppError> {
    let controller = LedgerController::new(&state);
    let response = controller.entries(&actor, id).await?;
    Ok(Json(response))
}

/// El cuerpo es opcional: sin fecha se registra hoy
async fn record_absence(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(driver_id): Path<Uuid>,
    body: Option<Json<AbsenceRequest>>,
) -> Result<Json<ApiResponse<Absence>>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let controller = LedgerController::new(&state);
    let response = controller
        .record_absence(&actor, driver_id, request, today())
        .await?;
    Ok(Json(response))
}

async fn driver_absences(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Absence>>>, AppError> {
    let controller = LedgerController::new(&state);
    let response = controller.absences(&actor, id).await?;
    Ok(Json(response))
}
