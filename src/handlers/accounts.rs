// src/handlers/accounts.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{AdminRole, RequireRole},
    },
    models::{
        account::{AccountPayload, AccountRecord},
        views::AccountRow,
    },
};

// Na criação a senha é obrigatória; na edição pode ficar de fora
fn require_password(payload: &AccountPayload) -> Result<(), AppError> {
    if payload.password.as_deref().is_none_or(|p| p.trim().is_empty()) {
        let mut err = ValidationError::new("required");
        err.message = Some("Password wajib diisi.".into());
        let mut errors = ValidationErrors::new();
        errors.add("password", err);
        return Err(AppError::ValidationError(errors));
    }
    Ok(())
}

// GET /api/accounts
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "Accounts",
    responses((status = 200, description = "Tabela de contas", body = [AccountRow])),
    security(("api_jwt" = []))
)]
pub async fn list_accounts(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .catalog_service
        .list_accounts()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}

// GET /api/accounts/{id}
#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    tag = "Accounts",
    params(("id" = i64, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta", body = AccountRow),
        (status = 404, description = "Conta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = app_state
        .catalog_service
        .get_account(user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(row))
}

// POST /api/accounts
#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = "Accounts",
    request_body = AccountPayload,
    responses(
        (status = 201, description = "Conta criada; tabela atualizada", body = [AccountRow]),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Json(payload): Json<AccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;
    require_password(&payload).map_err(|e| e.to_api_error(&locale))?;

    let rows = app_state
        .catalog_service
        .create_account(&AccountRecord::from(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(rows)))
}

// PUT /api/accounts/{id}
#[utoipa::path(
    put,
    path = "/api/accounts/{id}",
    tag = "Accounts",
    params(("id" = i64, Path, description = "ID da conta")),
    request_body = AccountPayload,
    responses(
        (status = 200, description = "Conta atualizada; tabela atualizada", body = [AccountRow]),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Conta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Path(user_id): Path<i64>,
    Json(payload): Json<AccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let rows = app_state
        .catalog_service
        .update_account(user_id, &AccountRecord::from(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}

// DELETE /api/accounts/{id}
#[utoipa::path(
    delete,
    path = "/api/accounts/{id}",
    tag = "Accounts",
    params(("id" = i64, Path, description = "ID da conta")),
    responses((status = 200, description = "Conta removida; tabela atualizada", body = [AccountRow])),
    security(("api_jwt" = []))
)]
pub async fn delete_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .catalog_service
        .delete_account(user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_accounts_need_a_password() {
        let payload: AccountPayload = serde_json::from_value(json!({
            "email": "kasir2@eatway.id",
            "username": "kasir2",
            "role": "kasir"
        }))
        .unwrap();

        match require_password(&payload) {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.field_errors().contains_key("password"))
            }
            other => panic!("esperava erro de validação, veio {:?}", other),
        }
    }
}
