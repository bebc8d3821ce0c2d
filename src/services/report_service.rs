// src/services/report_service.rs

// Página de relatórios. O snapshot guarda os dados crus (já deduplicados);
// a janela do gráfico é aplicada a cada leitura, sem nova busca.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::{error::AppError, money::format_rupiah},
    models::{
        order::{Order, OrderDetail},
        product::Product,
        views::ReportView,
    },
    services::{
        aggregation::{dedup_orders, select_low_stock, DedupPolicy},
        revenue::{bucketize_revenue, RevenueWindow},
        view_assembler::report_cards,
        view_state::{Loaded, ViewSlot},
    },
    store::{OrderRepository, ProductRepository},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub details: Vec<OrderDetail>,
}

impl ReportData {
    pub fn view(&self, window: RevenueWindow) -> ReportView {
        let revenue = bucketize_revenue(&self.orders, &self.details, window);
        let revenue_total = revenue
            .iter()
            .fold(Decimal::ZERO, |acc, point| acc.saturating_add(point.value));

        let low_stock = select_low_stock(&self.products);
        if low_stock.is_fallback() {
            tracing::debug!(
                "Nenhum produto com estoque baixo; exibindo {} itens de amostra",
                low_stock.items().len()
            );
        }

        ReportView {
            cards: report_cards(&self.orders, &self.details),
            months: window.months(),
            revenue,
            revenue_total,
            revenue_total_label: format_rupiah(revenue_total),
            low_stock,
        }
    }
}

#[derive(Clone)]
pub struct ReportService {
    products: ProductRepository,
    orders: OrderRepository,
    dedup: DedupPolicy,
    slot: Arc<ViewSlot<ReportData>>,
}

impl ReportService {
    pub fn new(products: ProductRepository, orders: OrderRepository, dedup: DedupPolicy) -> Self {
        Self {
            products,
            orders,
            dedup,
            slot: Arc::new(ViewSlot::new()),
        }
    }

    pub async fn load(&self) -> Result<Loaded<ReportData>, AppError> {
        self.slot.load(self.fetch()).await
    }

    async fn fetch(&self) -> Result<ReportData, AppError> {
        let (products, orders, details) = tokio::try_join!(
            self.products.list(),
            self.orders.list_orders(),
            self.orders.list_details(),
        )?;

        Ok(ReportData {
            products,
            orders: dedup_orders(orders, self.dedup),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::views::LowStockSelection,
        store::{RecordStore, Resource},
        test_utils::{detail_row, order_row, product_row, InMemoryStore},
    };
    use rust_decimal::dec;

    fn service(store: Arc<InMemoryStore>) -> ReportService {
        let store: Arc<dyn RecordStore> = store;
        ReportService::new(
            ProductRepository::new(store.clone()),
            OrderRepository::new(store),
            DedupPolicy::LastWins,
        )
    }

    #[tokio::test]
    async fn single_pending_order_feeds_every_section() {
        let store = InMemoryStore::new()
            .with_rows(Resource::Orders, vec![order_row(1, "2025-03-15", "Pending")])
            .with_rows(Resource::OrderDetails, vec![detail_row(1, 1, 1, 2, 50000)])
            .with_rows(
                Resource::Products,
                vec![product_row(1, "Pizza Margherita", 4), product_row(2, "Pepperoni", 6)],
            )
            .bare(Resource::OrderDetails)
            .shared();

        let loaded = service(store).load().await.unwrap();
        let view = loaded.snapshot.view(RevenueWindow::default());

        assert_eq!(view.months, 6);
        assert_eq!(view.revenue.len(), 1);
        assert_eq!(view.revenue[0].label, "Mar 25");
        assert_eq!(view.revenue[0].value, dec!(50000));
        assert_eq!(view.revenue_total_label, "Rp. 50.000");
        assert_eq!(view.cards[0].value, "2");
        assert_eq!(view.cards[2].value, "Rp. 50.000");

        match &view.low_stock {
            LowStockSelection::Computed(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].name, "Pizza Margherita");
            }
            other => panic!("esperava seleção calculada, veio {:?}", other),
        }
    }

    #[tokio::test]
    async fn window_is_applied_per_read() {
        let orders = (1..=8)
            .map(|month| order_row(month, &format!("2024-{:02}-10", month), "Selesai"))
            .collect();
        let details = (1..=8).map(|id| detail_row(id, id, 1, 1, 1000)).collect();
        let store = InMemoryStore::new()
            .with_rows(Resource::Orders, orders)
            .with_rows(Resource::OrderDetails, details)
            .shared();

        let loaded = service(store).load().await.unwrap();
        let six = loaded.snapshot.view(RevenueWindow::Six);
        let three = loaded.snapshot.view(RevenueWindow::Three);

        assert_eq!(six.revenue.first().map(|p| p.label.as_str()), Some("Mar 24"));
        assert_eq!(three.revenue.len(), 3);
        assert_eq!(three.revenue_total, dec!(3000));
        // Sem produtos: conjunto de demonstração
        assert!(six.low_stock.is_fallback());
    }
}
