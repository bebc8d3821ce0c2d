// src/common/lenient.rs

// Desserializadores tolerantes para os campos do record store.
// Campo ausente, nulo ou não numérico vira zero / string vazia, nunca erro.

use std::str::FromStr;

use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn decimal_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| parse_decimal(&n.to_string()))
            .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => parse_decimal(s.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

pub fn i64_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(decimal_from_value).unwrap_or(Decimal::ZERO))
}

pub fn i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(i64_from_value).unwrap_or(0))
}

pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

// "" conta como ausente (a UI trata string vazia como falsy)
pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = string_or_empty(deserializer)?;
    Ok(Some(value).filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings_are_accepted() {
        assert_eq!(decimal_from_value(&json!(50000)), dec!(50000));
        assert_eq!(decimal_from_value(&json!("12500.50")), dec!(12500.50));
        assert_eq!(decimal_from_value(&json!(2.5)), dec!(2.5));
        assert_eq!(i64_from_value(&json!("3")), 3);
        assert_eq!(i64_from_value(&json!(4.0)), 4);
    }

    #[test]
    fn garbage_defaults_to_zero() {
        assert_eq!(decimal_from_value(&json!("abc")), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!(null)), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!({"x": 1})), Decimal::ZERO);
        assert_eq!(i64_from_value(&json!([])), 0);
        assert_eq!(i64_from_value(&json!("")), 0);
    }
}
