// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::view_response,
    middleware::{
        i18n::Locale,
        rbac::{AdminRole, RequireRole},
    },
    models::views::{DashboardView, ViewResponse},
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards, produtos e contas", body = ViewResponse<DashboardView>),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Apenas admin"),
        (status = 502, description = "Record store indisponível e sem snapshot anterior")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
) -> Result<impl IntoResponse, ApiError> {
    let loaded = app_state
        .dashboard_service
        .load()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(view_response(loaded, &locale, DashboardView::clone)))
}
