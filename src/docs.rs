// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,

        // --- Auth ---
        handlers::auth::admin_login,
        handlers::auth::cashier_login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Dashboard / Relatórios ---
        handlers::dashboard::get_dashboard,
        handlers::reports::get_reports,

        // --- Produtos ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Contas ---
        handlers::accounts::list_accounts,
        handlers::accounts::get_account,
        handlers::accounts::create_account,
        handlers::accounts::update_account,
        handlers::accounts::delete_account,

        // --- Caixa ---
        handlers::cashier::waiting_orders,
        handlers::cashier::processing_orders,
        handlers::cashier::order_detail,
        handlers::cashier::approve_order,
        handlers::cashier::reject_order,
        handlers::cashier::complete_order,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::Session,

            // --- Payloads ---
            models::product::ProductPayload,
            models::account::AccountPayload,

            // --- Views ---
            models::order::OrderLifecycle,
            models::views::StatCard,
            models::views::ProductRow,
            models::views::AccountRow,
            models::views::RevenuePoint,
            models::views::LowStockItem,
            models::views::OrderSummary,
            models::views::OrderCard,
            models::views::OrderItemView,
            models::views::DashboardView,
            models::views::ReportView,
            models::views::CashierQueueView,
            models::views::OrderDetailView,
        )
    ),
    tags(
        (name = "Health", description = "Disponibilidade do serviço"),
        (name = "Auth", description = "Login de admin e caixa, sessão"),
        (name = "Dashboard", description = "Visão geral do admin"),
        (name = "Reports", description = "Receita mensal e estoque baixo"),
        (name = "Products", description = "Cadastro de produtos"),
        (name = "Accounts", description = "Cadastro de contas"),
        (name = "Cashier", description = "Filas e ações do caixa")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/dashboard",
            "/api/reports",
            "/api/cashier/orders/{id}/complete",
            "/api/accounts/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltou {}", path);
        }
    }
}
