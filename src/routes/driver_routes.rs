use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::auth_dto::RegisterDriverRequest;
use crate::dto::driver_dto::{DriverDetailResponse, UpdateDriverRequest};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::driver::DriverProfile;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/conducteurs/", get(list_drivers).post(create_driver))
        .route("/conducteur/:id/", get(get_driver))
        .route("/conducteur/:id/modifier/", post(update_driver))
        .route("/conducteurs/supprimer/:id/", post(delete_driver))
}

async fn create_driver(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<RegisterDriverRequest>,
) -> Result<Json<ApiResponse<DriverProfile>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.create(&actor, request).await?;
    Ok(Json(response))
}

async fn list_drivers(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<Vec<DriverProfile>>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.list(&actor).await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DriverDetailResponse>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.detail(&actor, id).await?;
    Ok(Json(response))
}

async fn update_driver(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<DriverProfile>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.update(&actor, id, request).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.delete(&actor, id).await?;
    Ok(Json(response))
}
