// src/models/order.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use crate::common::lenient::{decimal_or_zero, i64_or_zero, non_empty_string, string_or_empty};

// --- Registros crus do record store (/pesanans e /detail-pesanan) ---

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    #[serde(rename = "pesanan_id", default, deserialize_with = "i64_or_zero")]
    pub id: i64,
    #[serde(default, deserialize_with = "i64_or_zero")]
    pub user_id: i64,
    #[serde(rename = "pesanan_date", default, deserialize_with = "string_or_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub note: Option<String>,
}

impl Order {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_order_date(&self.date)
    }

    pub fn parsed_status(&self) -> OrderStatus {
        OrderStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderDetail {
    #[serde(rename = "detail_id", default, deserialize_with = "i64_or_zero")]
    pub id: i64,
    #[serde(rename = "pesanan_id", default, deserialize_with = "i64_or_zero")]
    pub order_id: i64,
    #[serde(rename = "produk_id", default, deserialize_with = "i64_or_zero")]
    pub product_id: i64,
    #[serde(rename = "jumlah_order", default, deserialize_with = "i64_or_zero")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub subtotal: Decimal,
}

// Corpo do PUT /pesanans/{id}. O store exige o registro inteiro.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub user_id: i64,
    pub pesanan_date: String,
    pub status: String,
    pub note: String,
}

impl OrderRecord {
    pub fn with_status(order: &Order, status: OrderStatus) -> Self {
        Self {
            user_id: order.user_id,
            pesanan_date: order.date.clone(),
            status: status.as_str().to_string(),
            note: order.note.clone().unwrap_or_default(),
        }
    }
}

// --- Status ---

/// Status textual do pedido, como gravado no store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Diproses,
    Selesai,
    Dibatalkan,
    Other(String),
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Pending" => OrderStatus::Pending,
            "Diproses" => OrderStatus::Diproses,
            "Selesai" => OrderStatus::Selesai,
            "Dibatalkan" => OrderStatus::Dibatalkan,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Diproses => "Diproses",
            OrderStatus::Selesai => "Selesai",
            OrderStatus::Dibatalkan => "Dibatalkan",
            OrderStatus::Other(raw) => raw,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Dibatalkan)
    }

    /// Rótulo da tela de detalhe do caixa.
    pub fn display_label(&self) -> String {
        match self {
            OrderStatus::Diproses => "Diproses".to_string(),
            OrderStatus::Pending => "Menunggu".to_string(),
            OrderStatus::Other(raw) if raw.is_empty() => "-".to_string(),
            other => other.as_str().to_string(),
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Conjunto fechado usado nos filtros da UI. `Done` é um balde genérico:
/// inclui pedidos concluídos, cancelados e status desconhecidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderLifecycle {
    Waiting,
    Processing,
    Done,
}

// --- Datas ---

/// Aceita RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD HH:MM:SS` e `YYYY-MM-DD`.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(stamp.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;
    use serde_json::json;

    #[test]
    fn order_decodes_with_missing_fields() {
        let order: Order = serde_json::from_value(json!({
            "pesanan_id": 7,
            "status": "Pending"
        }))
        .unwrap();

        assert_eq!(order.id, 7);
        assert_eq!(order.user_id, 0);
        assert_eq!(order.date, "");
        assert_eq!(order.note, None);
    }

    #[test]
    fn detail_defaults_non_numeric_fields_to_zero() {
        let detail: OrderDetail = serde_json::from_value(json!({
            "detail_id": 1,
            "pesanan_id": "3",
            "produk_id": 9,
            "jumlah_order": "x",
            "subtotal": "25000"
        }))
        .unwrap();

        assert_eq!(detail.order_id, 3);
        assert_eq!(detail.quantity, 0);
        assert_eq!(detail.subtotal, dec!(25000));
    }

    #[test]
    fn dates_in_common_shapes_parse() {
        let march = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(parse_order_date("2025-03-15"), Some(march));
        assert_eq!(parse_order_date("2025-03-15T10:20:30"), Some(march));
        assert_eq!(parse_order_date("2025-03-15T10:20:30.123Z"), Some(march));
        assert_eq!(parse_order_date("2025-03-15 08:00:00"), Some(march));
        assert_eq!(parse_order_date("15/03/2025"), None);
        assert_eq!(parse_order_date(""), None);
    }

    #[test]
    fn status_labels_match_the_cashier_screen() {
        assert_eq!(OrderStatus::parse("Pending").display_label(), "Menunggu");
        assert_eq!(OrderStatus::parse("Diproses").display_label(), "Diproses");
        assert_eq!(OrderStatus::parse("Selesai").display_label(), "Selesai");
        assert_eq!(OrderStatus::parse("").display_label(), "-");
        assert!(OrderStatus::parse("Dibatalkan").is_cancelled());
    }

    #[test]
    fn status_update_keeps_the_rest_of_the_record() {
        let order = Order {
            id: 4,
            user_id: 2,
            date: "2025-03-15".into(),
            status: "Pending".into(),
            note: None,
        };
        let record = OrderRecord::with_status(&order, OrderStatus::Diproses);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "user_id": 2,
                "pesanan_date": "2025-03-15",
                "status": "Diproses",
                "note": ""
            })
        );
    }
}
