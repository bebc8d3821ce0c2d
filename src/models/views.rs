// src/models/views.rs

// Estruturas prontas para a UI. Nenhuma regra de negócio aqui, só o formato.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::order::{OrderLifecycle, OrderStatus};

// 1. Cards do topo (label, valor, ajuda)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
    pub helper: String,
}

// 2. Linhas de tabela
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub telp: String,
    pub role: String,
    pub image: Option<String>,
}

// 3. Gráfico de receita
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevenuePoint {
    pub label: String,
    pub value: Decimal,
}

// 4. Produtos com estoque baixo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LowStockItem {
    pub id: i64,
    pub name: String,
    pub stock: i64,
    pub image: String,
}

/// `Fallback` carrega o conjunto de demonstração, nunca dados reais.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "items", rename_all = "lowercase")]
pub enum LowStockSelection {
    Computed(Vec<LowStockItem>),
    Fallback(Vec<LowStockItem>),
}

impl LowStockSelection {
    pub fn items(&self) -> &[LowStockItem] {
        match self {
            LowStockSelection::Computed(items) | LowStockSelection::Fallback(items) => items,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LowStockSelection::Fallback(_))
    }
}

// 5. Pedidos agregados
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub count: i64,
    pub sum: Decimal,
}

impl OrderTotals {
    /// Soma saturada: valores absurdos do store param no teto em vez de estourar.
    pub fn add(&mut self, quantity: i64, subtotal: Decimal) {
        self.count = self.count.saturating_add(quantity);
        self.sum = self.sum.saturating_add(subtotal);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    pub label: String,
    pub user_id: i64,
    pub user_name: String,
    #[schema(value_type = String)]
    pub status: OrderStatus,
    pub lifecycle: OrderLifecycle,
    pub cancelled: bool,
    pub note: Option<String>,
    pub date: String,
    pub total_items: i64,
    pub total_amount: Decimal,
}

// Card da fila do caixa
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCard {
    pub id: i64,
    pub name: String,
    pub note: String,
    pub total_products: i64,
    pub total_price: String,
    pub status: OrderLifecycle,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub detail_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_image: String,
    pub quantity: i64,
    pub subtotal: Decimal,
}

// --- Views completas por página ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub products: Vec<ProductRow>,
    pub accounts: Vec<AccountRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub cards: Vec<StatCard>,
    pub months: u8,
    pub revenue: Vec<RevenuePoint>,
    pub revenue_total: Decimal,
    pub revenue_total_label: String,
    #[schema(value_type = Object)]
    pub low_stock: LowStockSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CashierQueueView {
    pub lifecycle: OrderLifecycle,
    pub orders: Vec<OrderCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailView {
    pub summary: OrderSummary,
    pub status_label: String,
    pub items: Vec<OrderItemView>,
    pub total_amount_label: String,
}

/// Envelope das views carregadas. `stale = true` quando a última carga falhou
/// e o snapshot anterior está sendo servido.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ViewResponse<T> {
    pub data: T,
    pub stale: bool,
    pub error: Option<String>,
}

impl<T> ViewResponse<T> {
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            stale: false,
            error: None,
        }
    }

    pub fn stale(data: T, error: String) -> Self {
        Self {
            data,
            stale: true,
            error: Some(error),
        }
    }
}
