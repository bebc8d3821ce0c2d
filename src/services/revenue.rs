// src/services/revenue.rs

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{
    order::{Order, OrderDetail},
    views::RevenuePoint,
};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Janelas aceitas pelo gráfico de receita: 1, 3 ou 6 meses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum RevenueWindow {
    One,
    Three,
    #[default]
    Six,
}

impl RevenueWindow {
    pub fn months(self) -> u8 {
        match self {
            RevenueWindow::One => 1,
            RevenueWindow::Three => 3,
            RevenueWindow::Six => 6,
        }
    }
}

impl TryFrom<u8> for RevenueWindow {
    type Error = String;

    fn try_from(months: u8) -> Result<Self, Self::Error> {
        match months {
            1 => Ok(RevenueWindow::One),
            3 => Ok(RevenueWindow::Three),
            6 => Ok(RevenueWindow::Six),
            other => Err(format!("janela de {} meses não suportada (use 1, 3 ou 6)", other)),
        }
    }
}

/// Receita mensal: soma dos subtotais pela data do pedido-pai, em ordem
/// cronológica, limitada aos `window` meses mais recentes com dados.
pub fn bucketize_revenue(
    orders: &[Order],
    details: &[OrderDetail],
    window: RevenueWindow,
) -> Vec<RevenuePoint> {
    // Ids repetidos: vale o último
    let by_id: HashMap<i64, &Order> = orders.iter().map(|order| (order.id, order)).collect();

    // Chave numérica (ano, mês base 0): ordena certo entre fev/out e viradas de ano
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for detail in details {
        let Some(date) = by_id
            .get(&detail.order_id)
            .and_then(|order| order.parsed_date())
        else {
            continue;
        };
        let bucket = buckets.entry((date.year(), date.month0())).or_default();
        *bucket = bucket.saturating_add(detail.subtotal);
    }

    let skip = buckets.len().saturating_sub(usize::from(window.months()));
    let points: Vec<RevenuePoint> = buckets
        .into_iter()
        .skip(skip)
        .map(|((year, month0), value)| RevenuePoint {
            label: bucket_label(year, month0),
            value,
        })
        .collect();

    if points.is_empty() {
        return vec![RevenuePoint {
            label: "N/A".to_string(),
            value: Decimal::ZERO,
        }];
    }
    points
}

fn bucket_label(year: i32, month0: u32) -> String {
    let month = MONTH_LABELS.get(month0 as usize).copied().unwrap_or("N/A");
    format!("{} {:02}", month, year.rem_euclid(100))
}
