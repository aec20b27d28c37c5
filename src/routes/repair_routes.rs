use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::repair_controller::RepairController;
use crate::dto::repair_dto::RecordRepairRequest;
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::repair::RepairEvent;
use crate::routes::today;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_repair_router() -> Router<AppState> {
    Router::new()
        .route("/pannes/", get(list_repairs))
        .route("/pannes/ajouter/", post(record_repair))
}

async fn record_repair(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<RecordRepairRequest>,
) -> Result<Json<ApiResponse<RepairEvent>>, AppError> {
    let controller = RepairController::new(&state);
    let response = controller.record(&actor, request, today()).await?;
    Ok(Json(response))
}

async fn list_repairs(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<Vec<RepairEvent>>>, AppError> {
    let controller = RepairController::new(&state);
    let response = controller.list(&actor).await?;
    Ok(Json(response))
}
