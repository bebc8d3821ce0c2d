// src/store/response.rs

// Decodificação única, na fronteira de I/O, dos formatos de resposta do store:
// `{ "data": [...] }`, `[...]` ou qualquer outra coisa (vazio).

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{common::error::AppError, store::Resource};

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    Wrapped(Vec<Value>),
    Sequence(Vec<Value>),
    Empty,
}

impl ResponseShape {
    pub fn classify(response: Value) -> Self {
        match response {
            Value::Array(rows) => ResponseShape::Sequence(rows),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(rows)) => ResponseShape::Wrapped(rows),
                _ => ResponseShape::Empty,
            },
            _ => ResponseShape::Empty,
        }
    }

    pub fn into_records(self) -> Vec<Value> {
        match self {
            ResponseShape::Wrapped(rows) | ResponseShape::Sequence(rows) => rows,
            ResponseShape::Empty => Vec::new(),
        }
    }
}

/// Sequência uniforme de registros. Total: nunca falha.
pub fn normalize_records(response: Value) -> Vec<Value> {
    ResponseShape::classify(response).into_records()
}

/// Normaliza e tipa. Registros que nem são objetos são descartados com aviso;
/// campos ruins dentro de um objeto já viram zero/vazio na desserialização.
pub fn decode_records<T: DeserializeOwned>(resource: Resource, response: Value) -> Vec<T> {
    normalize_records(response)
        .into_iter()
        .enumerate()
        .filter_map(|(position, row)| match serde_json::from_value::<T>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Registro {} de {} ignorado: {}", position, resource, e);
                None
            }
        })
        .collect()
}

/// Resposta de "get by id": `R.data` quando for objeto, senão o próprio `R`.
pub fn decode_record<T: DeserializeOwned>(
    resource: Resource,
    id: i64,
    response: Value,
) -> Result<T, AppError> {
    let record = match response {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner @ Value::Object(_)) => inner,
            Some(Value::Null) => Value::Null,
            Some(other) => {
                map.insert("data".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    };

    if !record.is_object() {
        return Err(AppError::EmptyResult { resource, id });
    }

    serde_json::from_value(record).map_err(|e| AppError::FetchFailed {
        resource,
        reason: format!("registro {} ilegível: {}", id, e),
    })
}
