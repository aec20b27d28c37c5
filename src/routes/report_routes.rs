use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::question_controller::QuestionController;
use crate::controllers::report_controller::ReportController;
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::report::{AdminDashboardRow, BalanceReport, DriverDashboard};
use crate::routes::today;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/bilan-general/", get(global_balance))
        .route("/dashboard/admin/", get(admin_dashboard))
        .route("/dashboard/conducteur/", get(driver_dashboard))
}

pub fn create_sitemap_router() -> Router<AppState> {
    Router::new().route("/sitemap.xml", get(sitemap))
}

async fn global_balance(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<BalanceReport>>, AppError> {
    let controller = ReportController::new(&state);
    let response = controller.balance(&actor).await?;
    Ok(Json(response))
}

async fn admin_dashboard(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<Vec<AdminDashboardRow>>>, AppError> {
    let controller = ReportController::new(&state);
    let response = controller.admin_dashboard(&actor, today()).await?;
    Ok(Json(response))
}

async fn driver_dashboard(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<DriverDashboard>>, AppError> {
    let controller = ReportController::new(&state);
    let response = controller.driver_dashboard(&actor, today()).await?;
    Ok(Json(response))
}

async fn sitemap(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let controller = QuestionController::new(&state);
    let xml = controller.sitemap().await?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml))
}
