// src/handlers/cashier.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::view_response,
    middleware::{
        i18n::Locale,
        rbac::{CashierRole, RequireRole},
    },
    models::{
        order::OrderLifecycle,
        views::{CashierQueueView, OrderDetailView, ViewResponse},
    },
    services::cashier_service::OrderAction,
};

async fn queue(
    app_state: &AppState,
    locale: &Locale,
    lifecycle: OrderLifecycle,
) -> Result<Json<ViewResponse<CashierQueueView>>, ApiError> {
    let loaded = app_state
        .cashier_service
        .queue(lifecycle)
        .await
        .map_err(|e| e.to_api_error(locale))?;

    Ok(Json(view_response(loaded, locale, CashierQueueView::clone)))
}

async fn act(
    app_state: &AppState,
    locale: &Locale,
    order_id: i64,
    action: OrderAction,
) -> Result<Json<ViewResponse<CashierQueueView>>, ApiError> {
    let loaded = app_state
        .cashier_service
        .apply(order_id, action)
        .await
        .map_err(|e| e.to_api_error(locale))?;

    Ok(Json(view_response(loaded, locale, CashierQueueView::clone)))
}

// GET /api/cashier/orders
#[utoipa::path(
    get,
    path = "/api/cashier/orders",
    tag = "Cashier",
    responses(
        (status = 200, description = "Pedidos aguardando", body = ViewResponse<CashierQueueView>),
        (status = 403, description = "Apenas caixa")
    ),
    security(("api_jwt" = []))
)]
pub async fn waiting_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CashierRole>,
) -> Result<impl IntoResponse, ApiError> {
    queue(&app_state, &locale, OrderLifecycle::Waiting).await
}

// GET /api/cashier/processing
#[utoipa::path(
    get,
    path = "/api/cashier/processing",
    tag = "Cashier",
    responses(
        (status = 200, description = "Pedidos em preparo", body = ViewResponse<CashierQueueView>),
        (status = 403, description = "Apenas caixa")
    ),
    security(("api_jwt" = []))
)]
pub async fn processing_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CashierRole>,
) -> Result<impl IntoResponse, ApiError> {
    queue(&app_state, &locale, OrderLifecycle::Processing).await
}

// GET /api/cashier/orders/{id}
#[utoipa::path(
    get,
    path = "/api/cashier/orders/{id}",
    tag = "Cashier",
    params(("id" = i64, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Detalhe do pedido", body = OrderDetailView),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn order_detail(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CashierRole>,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .cashier_service
        .order_detail(order_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(view))
}

// POST /api/cashier/orders/{id}/approve
#[utoipa::path(
    post,
    path = "/api/cashier/orders/{id}/approve",
    tag = "Cashier",
    params(("id" = i64, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido em preparo; fila de espera recarregada", body = ViewResponse<CashierQueueView>),
        (status = 409, description = "O pedido não está aguardando")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_order(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CashierRole>,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    act(&app_state, &locale, order_id, OrderAction::Approve).await
}

// POST /api/cashier/orders/{id}/reject
#[utoipa::path(
    post,
    path = "/api/cashier/orders/{id}/reject",
    tag = "Cashier",
    params(("id" = i64, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido cancelado; fila de espera recarregada", body = ViewResponse<CashierQueueView>),
        (status = 409, description = "O pedido não está aguardando")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_order(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CashierRole>,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    act(&app_state, &locale, order_id, OrderAction::Reject).await
}

// POST /api/cashier/orders/{id}/complete
#[utoipa::path(
    post,
    path = "/api/cashier/orders/{id}/complete",
    tag = "Cashier",
    params(("id" = i64, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Estoque abatido e pedido concluído; fila em preparo recarregada", body = ViewResponse<CashierQueueView>),
        (status = 409, description = "O pedido não está em preparo")
    ),
    security(("api_jwt" = []))
)]
pub async fn complete_order(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<CashierRole>,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    act(&app_state, &locale, order_id, OrderAction::Complete).await
}
