//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

mod common;
mod config;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;
#[cfg(test)]
mod test_utils;

use crate::config::{AppConfig, AppState};
use crate::middleware::auth::auth_guard;

fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/admin/login", post(handlers::auth::admin_login))
        .route("/cashier/login", post(handlers::auth::cashier_login));

    // Sessão (qualquer papel)
    let session_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::get_me));

    // Admin: o papel é conferido por RequireRole em cada handler
    let admin_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/reports", get(handlers::reports::get_reports))
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/accounts",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route(
            "/accounts/{id}",
            get(handlers::accounts::get_account)
                .put(handlers::accounts::update_account)
                .delete(handlers::accounts::delete_account),
        );

    let cashier_routes = Router::new()
        .route("/orders", get(handlers::cashier::waiting_orders))
        .route("/processing", get(handlers::cashier::processing_orders))
        .route("/orders/{id}", get(handlers::cashier::order_detail))
        .route("/orders/{id}/approve", post(handlers::cashier::approve_order))
        .route("/orders/{id}/reject", post(handlers::cashier::reject_order))
        .route("/orders/{id}/complete", post(handlers::cashier::complete_order));

    // Tudo que exige token passa pelo auth_guard
    let protected = Router::new()
        .nest("/auth", session_routes)
        .nest("/cashier", cashier_routes)
        .merge(admin_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(docs::ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Sem configuração válida a aplicação não sobe
    let app_state = AppState::new(AppConfig::from_env()?)?;
    let bind_addr = app_state.config.bind_addr.clone();

    let app = build_router(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
