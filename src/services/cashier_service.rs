// src/services/cashier_service.rs

// Fluxo do caixa: filas de espera e em preparo, detalhe do pedido e as
// ações aprovar / rejeitar / concluir. Cada ação roda em sequência e termina
// recarregando a fila de onde saiu.

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::{
        order::{OrderLifecycle, OrderStatus},
        product::ProductRecord,
        views::{CashierQueueView, OrderDetailView},
    },
    services::{
        aggregation::{aggregate_order_totals, dedup_orders, DedupPolicy},
        view_assembler::{order_detail_view, order_queue},
        view_state::{Loaded, ViewSlot},
    },
    store::{OrderRepository, ProductRepository, UserRepository},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Approve,
    Reject,
    Complete,
}

impl OrderAction {
    fn required(self) -> OrderStatus {
        match self {
            OrderAction::Approve | OrderAction::Reject => OrderStatus::Pending,
            OrderAction::Complete => OrderStatus::Diproses,
        }
    }

    fn target(self) -> OrderStatus {
        match self {
            OrderAction::Approve => OrderStatus::Diproses,
            OrderAction::Reject => OrderStatus::Dibatalkan,
            OrderAction::Complete => OrderStatus::Selesai,
        }
    }

    fn target_name(self) -> &'static str {
        match self {
            OrderAction::Approve => "Diproses",
            OrderAction::Reject => "Dibatalkan",
            OrderAction::Complete => "Selesai",
        }
    }

    // Fila que a tela recarrega depois da ação
    fn origin(self) -> OrderLifecycle {
        match self {
            OrderAction::Approve | OrderAction::Reject => OrderLifecycle::Waiting,
            OrderAction::Complete => OrderLifecycle::Processing,
        }
    }
}

#[derive(Clone)]
pub struct CashierService {
    orders: OrderRepository,
    products: ProductRepository,
    users: UserRepository,
    dedup: DedupPolicy,
    waiting: Arc<ViewSlot<CashierQueueView>>,
    processing: Arc<ViewSlot<CashierQueueView>>,
    done: Arc<ViewSlot<CashierQueueView>>,
}

impl CashierService {
    pub fn new(
        orders: OrderRepository,
        products: ProductRepository,
        users: UserRepository,
        dedup: DedupPolicy,
    ) -> Self {
        Self {
            orders,
            products,
            users,
            dedup,
            waiting: Arc::new(ViewSlot::new()),
            processing: Arc::new(ViewSlot::new()),
            done: Arc::new(ViewSlot::new()),
        }
    }

    pub async fn queue(&self, lifecycle: OrderLifecycle) -> Result<Loaded<CashierQueueView>, AppError> {
        let slot = match lifecycle {
            OrderLifecycle::Waiting => &self.waiting,
            OrderLifecycle::Processing => &self.processing,
            OrderLifecycle::Done => &self.done,
        };
        slot.load(self.fetch_queue(lifecycle)).await
    }

    async fn fetch_queue(&self, lifecycle: OrderLifecycle) -> Result<CashierQueueView, AppError> {
        let (orders, details) =
            tokio::try_join!(self.orders.list_orders(), self.orders.list_details())?;
        let orders = dedup_orders(orders, self.dedup);
        let totals = aggregate_order_totals(&orders, &details);

        Ok(CashierQueueView {
            lifecycle,
            orders: order_queue(&orders, &totals, lifecycle),
        })
    }

    pub async fn order_detail(&self, order_id: i64) -> Result<OrderDetailView, AppError> {
        let (order, details, products, accounts) = tokio::try_join!(
            self.orders.get_order(order_id),
            self.orders.list_details(),
            self.products.list(),
            self.users.list(),
        )?;

        Ok(order_detail_view(&order, &details, &products, &accounts))
    }

    pub async fn apply(
        &self,
        order_id: i64,
        action: OrderAction,
    ) -> Result<Loaded<CashierQueueView>, AppError> {
        // 1. Confere a transição contra o status atual
        let order = self.orders.get_order(order_id).await?;
        if order.parsed_status() != action.required() {
            return Err(AppError::InvalidTransition {
                order_id,
                from: order.status.clone(),
                to: action.target_name(),
            });
        }

        // 2. Concluir abate o estoque antes de mudar o status
        if action == OrderAction::Complete {
            self.consume_stock(order_id).await?;
        }

        // 3. Status novo, registro inteiro de volta ao store
        self.orders.update_status(&order, action.target()).await?;
        tracing::info!(
            "Pedido {} movido de '{}' para '{}'",
            order_id,
            order.status,
            action.target_name()
        );

        // 4. Recarrega a fila de origem
        self.queue(action.origin()).await
    }

    // Um produto por vez; produtos que sumiram do store são ignorados
    async fn consume_stock(&self, order_id: i64) -> Result<(), AppError> {
        let details = self.orders.list_details().await?;

        for detail in details.iter().filter(|detail| detail.order_id == order_id) {
            let product = match self.products.get(detail.product_id).await {
                Ok(product) => product,
                Err(AppError::EmptyResult { .. }) => {
                    tracing::warn!(
                        "Produto {} do pedido {} não existe mais; estoque não abatido",
                        detail.product_id,
                        order_id
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };

            let record = ProductRecord::with_stock_consumed(&product, detail.quantity);
            self.products.update(product.id, &record).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        store::{RecordStore, Resource},
        test_utils::{detail_row, order_row, product_row, user_row, InMemoryStore, StoreWrite},
    };
    use rust_decimal::dec;
    use serde_json::json;

    fn service(store: Arc<InMemoryStore>) -> CashierService {
        let store: Arc<dyn RecordStore> = store;
        CashierService::new(
            OrderRepository::new(store.clone()),
            ProductRepository::new(store.clone()),
            UserRepository::new(store),
            DedupPolicy::LastWins,
        )
    }

    fn kitchen() -> Arc<InMemoryStore> {
        InMemoryStore::new()
            .with_rows(
                Resource::Orders,
                vec![
                    order_row(1, "2025-03-15", "Pending"),
                    order_row(2, "2025-03-15", "Diproses"),
                    order_row(3, "2025-03-16", "Selesai"),
                ],
            )
            .with_rows(
                Resource::OrderDetails,
                vec![
                    detail_row(1, 1, 100, 2, 50000),
                    detail_row(2, 2, 100, 5, 125000),
                    detail_row(3, 2, 200, 1, 30000),
                    detail_row(4, 2, 999, 1, 10000),
                ],
            )
            .with_rows(
                Resource::Products,
                vec![product_row(100, "Pizza Margherita", 3), product_row(200, "Pepperoni", 9)],
            )
            .with_rows(Resource::Users, vec![user_row(11, "budi", "kasir")])
            .shared()
    }

    #[tokio::test]
    async fn queues_split_by_lifecycle() {
        let service = service(kitchen());

        let waiting = service.queue(OrderLifecycle::Waiting).await.unwrap();
        assert_eq!(waiting.snapshot.orders.len(), 1);
        assert_eq!(waiting.snapshot.orders[0].total_price, "Rp. 50.000");
        assert_eq!(waiting.snapshot.orders[0].total_products, 2);

        let processing = service.queue(OrderLifecycle::Processing).await.unwrap();
        assert_eq!(processing.snapshot.orders.len(), 1);
        assert_eq!(processing.snapshot.orders[0].id, 2);
    }

    #[tokio::test]
    async fn approve_moves_the_order_to_processing() {
        let store = kitchen();
        let service = service(store.clone());

        let reloaded = service.apply(1, OrderAction::Approve).await.unwrap();
        assert!(reloaded.snapshot.orders.is_empty());

        let row = store.row(Resource::Orders, 1).unwrap();
        assert_eq!(row["status"], json!("Diproses"));
        assert_eq!(row["pesanan_date"], json!("2025-03-15"));
    }

    #[tokio::test]
    async fn wrong_state_is_rejected_without_writes() {
        let store = kitchen();
        let service = service(store.clone());

        let err = service.apply(3, OrderAction::Reject).await.err().unwrap();
        assert!(matches!(err, AppError::InvalidTransition { order_id: 3, .. }));

        let err = service.apply(1, OrderAction::Complete).await.err().unwrap();
        assert!(matches!(err, AppError::InvalidTransition { to: "Selesai", .. }));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn complete_floors_stock_and_skips_vanished_products() {
        let store = kitchen();
        let service = service(store.clone());

        service.apply(2, OrderAction::Complete).await.unwrap();

        // 3 - 5 fica em 0; 9 - 1 = 8; o produto 999 não existe
        assert_eq!(store.row(Resource::Products, 100).unwrap()["stock"], json!(0));
        assert_eq!(store.row(Resource::Products, 200).unwrap()["stock"], json!(8));
        assert_eq!(store.row(Resource::Orders, 2).unwrap()["status"], json!("Selesai"));

        // Estoque primeiro, status por último
        let writes = store.writes();
        assert_eq!(writes.len(), 3);
        assert!(matches!(writes[0], StoreWrite::Update(Resource::Products, 100, _)));
        assert!(matches!(writes[1], StoreWrite::Update(Resource::Products, 200, _)));
        assert!(matches!(writes[2], StoreWrite::Update(Resource::Orders, 2, _)));
    }

    #[tokio::test]
    async fn detail_view_enriches_items() {
        let service = service(kitchen());

        let view = service.order_detail(2).await.unwrap();
        assert_eq!(view.summary.user_name, "ID User #12");
        assert_eq!(view.status_label, "Diproses");
        assert_eq!(view.items.len(), 3);
        assert_eq!(view.items[2].product_name, "Produk #999");
        assert_eq!(view.summary.total_amount, dec!(165000));

        let view = service.order_detail(1).await.unwrap();
        assert_eq!(view.summary.user_name, "budi");
        assert_eq!(view.status_label, "Menunggu");
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let service = service(kitchen());
        let err = service.order_detail(42).await.err().unwrap();
        assert!(matches!(err, AppError::EmptyResult { id: 42, .. }));
    }

    #[tokio::test]
    async fn failed_reload_keeps_the_last_queue() {
        let store = kitchen();
        let service = service(store.clone());
        service.queue(OrderLifecycle::Waiting).await.unwrap();

        store.fail(Resource::OrderDetails);
        let loaded = service.queue(OrderLifecycle::Waiting).await.unwrap();
        assert!(loaded.failure.is_some());
        assert_eq!(loaded.snapshot.orders.len(), 1);

        store.recover(Resource::OrderDetails);
        let loaded = service.queue(OrderLifecycle::Waiting).await.unwrap();
        assert!(loaded.failure.is_none());
    }

    #[tokio::test]
    async fn each_lifecycle_keeps_its_own_snapshot() {
        let store = kitchen();
        let service = service(store.clone());
        service.queue(OrderLifecycle::Waiting).await.unwrap();

        let done = service.queue(OrderLifecycle::Done).await.unwrap();
        assert_eq!(done.snapshot.orders.len(), 1);
        assert_eq!(done.snapshot.orders[0].id, 3);

        // A fila de espera antiga continua sendo a de espera
        store.fail(Resource::Orders);
        let waiting = service.queue(OrderLifecycle::Waiting).await.unwrap();
        assert!(waiting.failure.is_some());
        assert_eq!(waiting.snapshot.lifecycle, OrderLifecycle::Waiting);
        assert_eq!(waiting.snapshot.orders[0].id, 1);
    }
}
