// src/store/product_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::product::{Product, ProductRecord},
    store::{
        response::{decode_record, decode_records},
        RecordStore, Resource,
    },
};

#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn RecordStore>,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let response = self.store.list(Resource::Products).await?;
        Ok(decode_records(Resource::Products, response))
    }

    pub async fn get(&self, product_id: i64) -> Result<Product, AppError> {
        let response = self.store.get(Resource::Products, product_id).await?;
        decode_record(Resource::Products, product_id, response)
    }

    pub async fn create(&self, record: &ProductRecord) -> Result<(), AppError> {
        let body = serde_json::to_value(record).map_err(anyhow::Error::from)?;
        self.store.create(Resource::Products, body).await?;
        Ok(())
    }

    pub async fn update(&self, product_id: i64, record: &ProductRecord) -> Result<(), AppError> {
        let body = serde_json::to_value(record).map_err(anyhow::Error::from)?;
        self.store.update(Resource::Products, product_id, body).await?;
        Ok(())
    }

    pub async fn delete(&self, product_id: i64) -> Result<(), AppError> {
        self.store.delete(Resource::Products, product_id).await
    }
}
