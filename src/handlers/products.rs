// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{AdminRole, RequireRole},
    },
    models::{
        product::{ProductPayload, ProductRecord},
        views::ProductRow,
    },
};

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, description = "Tabela de produtos", body = [ProductRow])),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .catalog_service
        .list_products()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = ProductRow),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Path(product_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = app_state
        .catalog_service
        .get_product(product_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(row))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado; tabela atualizada", body = [ProductRow]),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let rows = app_state
        .catalog_service
        .create_product(&ProductRecord::from(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(rows)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado; tabela atualizada", body = [ProductRow]),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Path(product_id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let rows = app_state
        .catalog_service
        .update_product(product_id, &ProductRecord::from(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses((status = 200, description = "Produto removido; tabela atualizada", body = [ProductRow])),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminRole>,
    Path(product_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .catalog_service
        .delete_product(product_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(rows))
}
