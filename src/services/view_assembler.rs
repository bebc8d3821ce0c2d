// src/services/view_assembler.rs

// Projeção dos dados agregados nos formatos de cada página. Só renomeia,
// formata e aplica valores padrão; ids sem correspondência viram rótulos
// de fallback.

use std::collections::HashMap;

use crate::{
    common::money::format_rupiah,
    models::{
        account::Account,
        order::{Order, OrderDetail, OrderLifecycle},
        product::Product,
        views::{
            AccountRow, OrderCard, OrderDetailView, OrderItemView, OrderSummary, OrderTotals,
            ProductRow, StatCard,
        },
    },
    services::aggregation::{normalize_status, PLACEHOLDER_IMAGE},
};

pub fn product_label(product_id: i64) -> String {
    format!("Produk #{}", product_id)
}

pub fn user_label(user_id: i64) -> String {
    format!("ID User #{}", user_id)
}

pub fn order_label(order_id: i64) -> String {
    format!("Pesanan #{}", order_id)
}

// --- Dashboard ---

pub fn dashboard_cards(products: &[Product], accounts: &[Account], orders: &[Order]) -> Vec<StatCard> {
    vec![
        StatCard {
            id: "products",
            label: "Produk",
            value: products.len().to_string(),
            helper: "Produk Terdaftar".to_string(),
        },
        StatCard {
            id: "accounts",
            label: "Akun",
            value: accounts.len().to_string(),
            helper: "Akun Terdaftar".to_string(),
        },
        StatCard {
            id: "orders",
            label: "Pesanan",
            value: orders.len().to_string(),
            helper: "Pesanan Dibuat".to_string(),
        },
    ]
}

pub fn product_rows(products: &[Product]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|product| ProductRow {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            image_url: product.image_url.clone(),
        })
        .collect()
}

pub fn account_rows(accounts: &[Account]) -> Vec<AccountRow> {
    accounts
        .iter()
        .map(|account| AccountRow {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            telp: account.telp.clone(),
            role: account.role.clone(),
            image: account.image.clone(),
        })
        .collect()
}

// --- Relatórios ---

pub fn report_cards(orders: &[Order], details: &[OrderDetail]) -> Vec<StatCard> {
    let mut sold = OrderTotals::default();
    for detail in details {
        sold.add(detail.quantity, detail.subtotal);
    }
    let (products_sold, income) = (sold.count, sold.sum);

    vec![
        StatCard {
            id: "products",
            label: "Produk",
            value: products_sold.to_string(),
            helper: "Produk Terjual".to_string(),
        },
        StatCard {
            id: "orders",
            label: "Pesanan",
            value: orders.len().to_string(),
            helper: "Pesanan Dibuat".to_string(),
        },
        StatCard {
            id: "income",
            label: "Total pemasukan",
            value: format_rupiah(income),
            helper: "Total subtotal".to_string(),
        },
    ]
}

// --- Caixa ---

pub fn order_card(order: &Order, totals: OrderTotals) -> OrderCard {
    // Sem valor somado, o card mostra a data do pedido no lugar do preço
    let total_price = if totals.sum.is_zero() {
        order.date.clone()
    } else {
        format_rupiah(totals.sum)
    };

    OrderCard {
        id: order.id,
        name: order_label(order.id),
        note: order
            .note
            .clone()
            .unwrap_or_else(|| "Tidak ada catatan".to_string()),
        total_products: totals.count,
        total_price,
        status: normalize_status(&order.status),
        image: PLACEHOLDER_IMAGE.to_string(),
    }
}

pub fn order_queue(
    orders: &[Order],
    totals: &HashMap<i64, OrderTotals>,
    lifecycle: OrderLifecycle,
) -> Vec<OrderCard> {
    orders
        .iter()
        .map(|order| order_card(order, totals.get(&order.id).copied().unwrap_or_default()))
        .filter(|card| card.status == lifecycle)
        .collect()
}

pub fn order_summary(order: &Order, totals: OrderTotals, accounts: &[Account]) -> OrderSummary {
    let status = order.parsed_status();
    let user_name = accounts
        .iter()
        .rev()
        .find(|account| account.id == order.user_id)
        .map(|account| account.username.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| user_label(order.user_id));

    OrderSummary {
        id: order.id,
        label: order_label(order.id),
        user_id: order.user_id,
        user_name,
        lifecycle: normalize_status(&order.status),
        cancelled: status.is_cancelled(),
        status,
        note: order.note.clone(),
        date: order.date.clone(),
        total_items: totals.count,
        total_amount: totals.sum,
    }
}

pub fn order_items(details: &[OrderDetail], products: &[Product]) -> Vec<OrderItemView> {
    let by_id: HashMap<i64, &Product> = products.iter().map(|product| (product.id, product)).collect();

    details
        .iter()
        .map(|detail| {
            let product = by_id.get(&detail.product_id);
            OrderItemView {
                detail_id: detail.id,
                product_id: detail.product_id,
                product_name: product
                    .map(|p| p.name.clone())
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| product_label(detail.product_id)),
                product_image: product
                    .and_then(|p| p.image_url.clone())
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
                quantity: detail.quantity,
                subtotal: detail.subtotal,
            }
        })
        .collect()
}

/// Tela de detalhe: só os itens do pedido, enriquecidos com produto e usuário.
pub fn order_detail_view(
    order: &Order,
    details: &[OrderDetail],
    products: &[Product],
    accounts: &[Account],
) -> OrderDetailView {
    let own: Vec<OrderDetail> = details
        .iter()
        .filter(|detail| detail.order_id == order.id)
        .cloned()
        .collect();
    let totals = own.iter().fold(OrderTotals::default(), |mut acc, detail| {
        acc.add(detail.quantity, detail.subtotal);
        acc
    });

    let summary = order_summary(order, totals, accounts);
    OrderDetailView {
        status_label: summary.status.display_label(),
        items: order_items(&own, products),
        total_amount_label: format_rupiah(totals.sum),
        summary,
    }
}
