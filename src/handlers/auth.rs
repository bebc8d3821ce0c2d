// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{AuthResponse, LoginPayload, Role, Session},
};

async fn login_as(
    app_state: &AppState,
    locale: &Locale,
    payload: LoginPayload,
    expected: Role,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale))?;

    let response = app_state
        .auth_service
        .login(payload.username.trim(), &payload.password, expected)
        .await
        .map_err(|e| e.to_api_error(locale))?;

    Ok(Json(response))
}

// POST /api/auth/admin/login
#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão de admin criada", body = AuthResponse),
        (status = 401, description = "Credenciais recusadas"),
        (status = 403, description = "A conta não é de admin")
    )
)]
pub async fn admin_login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    login_as(&app_state, &locale, payload, Role::Admin).await
}

// POST /api/auth/cashier/login
#[utoipa::path(
    post,
    path = "/api/auth/cashier/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão de caixa criada", body = AuthResponse),
        (status = 401, description = "Credenciais recusadas"),
        (status = 403, description = "A conta não é de caixa")
    )
)]
pub async fn cashier_login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    login_as(&app_state, &locale, payload, Role::Cashier).await
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Sessão encerrada")),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> impl IntoResponse {
    app_state.auth_service.logout(&session).await;
    StatusCode::NO_CONTENT
}

// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses((status = 200, description = "Sessão atual", body = Session)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(session): AuthenticatedUser) -> Json<Session> {
    Json(session)
}
