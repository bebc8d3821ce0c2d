// src/services/dashboard_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::views::DashboardView,
    services::{
        aggregation::{dedup_orders, DedupPolicy},
        view_assembler::{account_rows, dashboard_cards, product_rows},
        view_state::{Loaded, ViewSlot},
    },
    store::{OrderRepository, ProductRepository, UserRepository},
};

#[derive(Clone)]
pub struct DashboardService {
    products: ProductRepository,
    users: UserRepository,
    orders: OrderRepository,
    dedup: DedupPolicy,
    slot: Arc<ViewSlot<DashboardView>>,
}

impl DashboardService {
    pub fn new(
        products: ProductRepository,
        users: UserRepository,
        orders: OrderRepository,
        dedup: DedupPolicy,
    ) -> Self {
        Self {
            products,
            users,
            orders,
            dedup,
            slot: Arc::new(ViewSlot::new()),
        }
    }

    pub async fn load(&self) -> Result<Loaded<DashboardView>, AppError> {
        self.slot.load(self.fetch()).await
    }

    async fn fetch(&self) -> Result<DashboardView, AppError> {
        // As três buscas saem juntas; qualquer falha derruba a carga inteira
        let (products, accounts, orders) = tokio::try_join!(
            self.products.list(),
            self.users.list(),
            self.orders.list_orders(),
        )?;
        let orders = dedup_orders(orders, self.dedup);

        tracing::debug!(
            "Dashboard: {} produtos, {} contas, {} pedidos",
            products.len(),
            accounts.len(),
            orders.len()
        );

        Ok(DashboardView {
            cards: dashboard_cards(&products, &accounts, &orders),
            products: product_rows(&products),
            accounts: account_rows(&accounts),
        })
    }
}
