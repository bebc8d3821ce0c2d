// src/models/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::lenient::{decimal_or_zero, i64_or_zero, non_empty_string, string_or_empty};

// Registro cru de /produks
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(rename = "produk_id", default, deserialize_with = "i64_or_zero")]
    pub id: i64,
    #[serde(rename = "nama_produk", default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(rename = "deskripsi", default, deserialize_with = "string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "i64_or_zero")]
    pub stock: i64,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub image_url: Option<String>,
}

// Corpo de POST/PUT /produks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub nama_produk: String,
    pub deskripsi: String,
    pub stock: i64,
    pub price: Decimal,
    pub image_url: String,
}

impl ProductRecord {
    /// Mesmo produto com o estoque abatido, nunca abaixo de zero.
    pub fn with_stock_consumed(product: &Product, quantity: i64) -> Self {
        Self {
            nama_produk: product.name.clone(),
            deskripsi: product.description.clone(),
            stock: product.stock.saturating_sub(quantity).max(0),
            price: product.price,
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Harga tidak boleh negatif.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: formulário de produto (criar / editar)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "Nama produk wajib diisi."))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0, message = "Stok tidak boleh negatif."))]
    pub stock: i64,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<ProductPayload> for ProductRecord {
    fn from(payload: ProductPayload) -> Self {
        Self {
            nama_produk: payload.name.trim().to_string(),
            deskripsi: payload.description,
            stock: payload.stock,
            price: payload.price,
            image_url: payload.image_url.unwrap_or_default(),
        }
    }
}
