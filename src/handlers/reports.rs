// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::view_response,
    middleware::{
        i18n::Locale,
        rbac::{AdminRole, RequireRole},
    },
    models::views::{ReportView, ViewResponse},
    services::revenue::RevenueWindow,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Janela do gráfico: 1, 3 ou 6 meses (padrão 6)
    pub months: Option<u8>,
}

impl ReportQuery {
    fn window(&self) -> Result<RevenueWindow, AppError> {
        let Some(months) = self.months else {
            return Ok(RevenueWindow::default());
        };

        RevenueWindow::try_from(months).map_err(|message| {
            let mut err = ValidationError::new("months");
            err.message = Some(message.into());
            let mut errors = ValidationErrors::new();
            errors.add("months", err);
            AppError::ValidationError(errors)
        })
    }
}

// GET /api/reports?months=
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Cards, receita mensal e estoque baixo", body = ViewResponse<ReportView>),
        (status = 400, description = "Janela inválida"),
        (status = 403, description = "Apenas admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_reports(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = query.window().map_err(|e| e.to_api_error(&locale))?;

    let loaded = app_state
        .report_service
        .load()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(view_response(loaded, &locale, |data| data.view(window))))
}
