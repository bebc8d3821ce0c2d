// src/test_utils.rs

// Fixtures de teste: um RecordStore em memória e construtores de registros crus.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    common::error::AppError,
    models::auth::{StoreLoginReply, StoreLoginUser},
    store::{RecordStore, Resource},
};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreWrite {
    Create(Resource, Value),
    Update(Resource, i64, Value),
    Delete(Resource, i64),
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<HashMap<Resource, Vec<Value>>>,
    bare: Mutex<HashSet<Resource>>,
    failing: Mutex<HashSet<Resource>>,
    writes: Mutex<Vec<StoreWrite>>,
    logins: Mutex<Vec<(String, String, Option<String>)>>,
}

fn id_key(resource: Resource) -> &'static str {
    match resource {
        Resource::Orders => "pesanan_id",
        Resource::OrderDetails => "detail_id",
        Resource::Products => "produk_id",
        Resource::Users => "user_id",
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, resource: Resource, rows: Vec<Value>) -> Self {
        self.tables.lock().unwrap().insert(resource, rows);
        self
    }

    /// Lista esse recurso como array puro em vez de `{ data: [...] }`.
    pub fn bare(self, resource: Resource) -> Self {
        self.bare.lock().unwrap().insert(resource);
        self
    }

    pub fn with_login(self, username: &str, password: &str, role: Option<&str>) -> Self {
        self.logins.lock().unwrap().push((
            username.to_string(),
            password.to_string(),
            role.map(str::to_string),
        ));
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn fail(&self, resource: Resource) {
        self.failing.lock().unwrap().insert(resource);
    }

    pub fn recover(&self, resource: Resource) {
        self.failing.lock().unwrap().remove(&resource);
    }

    pub fn set_rows(&self, resource: Resource, rows: Vec<Value>) {
        self.tables.lock().unwrap().insert(resource, rows);
    }

    pub fn rows(&self, resource: Resource) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn row(&self, resource: Resource, id: i64) -> Option<Value> {
        self.rows(resource)
            .into_iter()
            .find(|row| row[id_key(resource)] == json!(id))
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }

    fn check(&self, resource: Resource) -> Result<(), AppError> {
        if self.failing.lock().unwrap().contains(&resource) {
            return Err(AppError::FetchFailed {
                resource,
                reason: "falha simulada".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list(&self, resource: Resource) -> Result<Value, AppError> {
        self.check(resource)?;
        let rows = Value::Array(self.rows(resource));
        if self.bare.lock().unwrap().contains(&resource) {
            Ok(rows)
        } else {
            Ok(json!({ "data": rows }))
        }
    }

    async fn get(&self, resource: Resource, id: i64) -> Result<Value, AppError> {
        self.check(resource)?;
        // Mesmo contrato do store HTTP: 404 vira EmptyResult
        self.row(resource, id)
            .map(|row| json!({ "data": row }))
            .ok_or(AppError::EmptyResult { resource, id })
    }

    async fn create(&self, resource: Resource, body: Value) -> Result<Value, AppError> {
        self.check(resource)?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(resource).or_default();
        let next_id = rows
            .iter()
            .filter_map(|row| row[id_key(resource)].as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let mut row = body.clone();
        row[id_key(resource)] = json!(next_id);
        rows.push(row.clone());
        self.writes.lock().unwrap().push(StoreWrite::Create(resource, body));
        Ok(json!({ "data": row }))
    }

    async fn update(&self, resource: Resource, id: i64, body: Value) -> Result<Value, AppError> {
        self.check(resource)?;
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .entry(resource)
            .or_default()
            .iter_mut()
            .find(|row| row[id_key(resource)] == json!(id))
            .ok_or(AppError::EmptyResult { resource, id })?;
        if let (Some(target), Some(fields)) = (row.as_object_mut(), body.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        self.writes
            .lock()
            .unwrap()
            .push(StoreWrite::Update(resource, id, body));
        Ok(json!({ "message": "ok" }))
    }

    async fn delete(&self, resource: Resource, id: i64) -> Result<(), AppError> {
        self.check(resource)?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(resource).or_default();
        let before = rows.len();
        rows.retain(|row| row[id_key(resource)] != json!(id));
        if rows.len() == before {
            return Err(AppError::EmptyResult { resource, id });
        }
        self.writes.lock().unwrap().push(StoreWrite::Delete(resource, id));
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<StoreLoginReply, AppError> {
        let logins = self.logins.lock().unwrap();
        let found = logins
            .iter()
            .find(|(user, pass, _)| user == username && pass == password);

        match found {
            Some((_, _, role)) => Ok(StoreLoginReply {
                access_token: Some(format!("upstream-{}", username)),
                user: Some(StoreLoginUser { role: role.clone() }),
                message: None,
            }),
            None => Err(AppError::LoginRejected("Username atau password salah".into())),
        }
    }
}

// --- Construtores de registros crus ---

pub fn order_row(id: i64, date: &str, status: &str) -> Value {
    json!({
        "pesanan_id": id,
        "user_id": 10 + id,
        "pesanan_date": date,
        "status": status,
        "note": ""
    })
}

pub fn detail_row(id: i64, order_id: i64, product_id: i64, quantity: i64, subtotal: i64) -> Value {
    json!({
        "detail_id": id,
        "pesanan_id": order_id,
        "produk_id": product_id,
        "jumlah_order": quantity,
        "subtotal": subtotal
    })
}

pub fn product_row(id: i64, name: &str, stock: i64) -> Value {
    json!({
        "produk_id": id,
        "nama_produk": name,
        "deskripsi": format!("{} enak", name),
        "price": 50000,
        "stock": stock,
        "image_url": format!("/img/{}.png", id)
    })
}

pub fn user_row(id: i64, username: &str, role: &str) -> Value {
    json!({
        "user_id": id,
        "username": username,
        "email": format!("{}@eatway.id", username),
        "password": "rahasia",
        "telp": "0812",
        "role": role,
        "image": null
    })
}
