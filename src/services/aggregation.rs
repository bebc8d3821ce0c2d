// src/services/aggregation.rs

// Núcleo puro do pipeline: deduplicação, totais por pedido, mapeamento de
// status e seleção de estoque baixo. Nada aqui faz I/O.

use std::collections::HashMap;

use crate::models::{
    order::{Order, OrderDetail, OrderLifecycle},
    product::Product,
    views::{LowStockItem, LowStockSelection, OrderTotals},
};

pub const LOW_STOCK_THRESHOLD: i64 = 5;

pub const PLACEHOLDER_IMAGE: &str = "/assets/images/pizza.png";

/// Desempate para ids de pedido repetidos. A posição é sempre a da primeira
/// ocorrência; muda apenas qual registro ocupa essa posição.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    FirstWins,
    #[default]
    LastWins,
}

impl DedupPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "first" | "first-wins" | "firstwins" => Some(DedupPolicy::FirstWins),
            "last" | "last-wins" | "lastwins" => Some(DedupPolicy::LastWins),
            _ => None,
        }
    }
}

pub fn dedup_orders(orders: Vec<Order>, policy: DedupPolicy) -> Vec<Order> {
    let mut positions: HashMap<i64, usize> = HashMap::with_capacity(orders.len());
    let mut unique: Vec<Order> = Vec::with_capacity(orders.len());

    for order in orders {
        match positions.get(&order.id) {
            Some(&slot) => {
                if policy == DedupPolicy::LastWins {
                    unique[slot] = order;
                }
            }
            None => {
                positions.insert(order.id, unique.len());
                unique.push(order);
            }
        }
    }

    unique
}

/// Totais por id de pedido. Todo pedido conhecido começa em {0, 0}; detalhes de
/// pedidos desconhecidos ganham entrada própria e continuam somando.
pub fn aggregate_order_totals(orders: &[Order], details: &[OrderDetail]) -> HashMap<i64, OrderTotals> {
    let mut totals: HashMap<i64, OrderTotals> = orders
        .iter()
        .map(|order| (order.id, OrderTotals::default()))
        .collect();

    for detail in details {
        totals
            .entry(detail.order_id)
            .or_default()
            .add(detail.quantity, detail.subtotal);
    }

    totals
}

/// "Diproses" -> Processing, "Pending" -> Waiting, o resto -> Done.
pub fn normalize_status(status: &str) -> OrderLifecycle {
    match status {
        "Diproses" => OrderLifecycle::Processing,
        "Pending" => OrderLifecycle::Waiting,
        _ => OrderLifecycle::Done,
    }
}

pub fn select_low_stock(products: &[Product]) -> LowStockSelection {
    let computed: Vec<LowStockItem> = products
        .iter()
        .filter(|product| product.stock <= LOW_STOCK_THRESHOLD)
        .map(|product| LowStockItem {
            id: product.id,
            name: product.name.clone(),
            stock: product.stock,
            image: product
                .image_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        })
        .collect();

    if computed.is_empty() {
        LowStockSelection::Fallback(sample_low_stock())
    } else {
        LowStockSelection::Computed(computed)
    }
}

// Conjunto de demonstração exibido quando nada está com estoque baixo
fn sample_low_stock() -> Vec<LowStockItem> {
    [
        (1, "Pizza Margherita Classica", 4, "/assets/images/pizza-margherita.png"),
        (2, "Pepperoni Volcano", 2, PLACEHOLDER_IMAGE),
        (3, "Truffle Mushroom Pizza", 3, PLACEHOLDER_IMAGE),
        (4, "Spinach Ricotta Pizza", 1, PLACEHOLDER_IMAGE),
    ]
    .into_iter()
    .map(|(id, name, stock, image)| LowStockItem {
        id,
        name: name.to_string(),
        stock,
        image: image.to_string(),
    })
    .collect()
}
