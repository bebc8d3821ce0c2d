// src/store/user_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::{
        account::{Account, AccountRecord},
        auth::StoreLoginReply,
    },
    store::{
        response::{decode_record, decode_records},
        RecordStore, Resource,
    },
};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn RecordStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Account>, AppError> {
        let response = self.store.list(Resource::Users).await?;
        Ok(decode_records(Resource::Users, response))
    }

    pub async fn get(&self, user_id: i64) -> Result<Account, AppError> {
        let response = self.store.get(Resource::Users, user_id).await?;
        decode_record(Resource::Users, user_id, response)
    }

    pub async fn create(&self, record: &AccountRecord) -> Result<(), AppError> {
        let body = serde_json::to_value(record).map_err(anyhow::Error::from)?;
        self.store.create(Resource::Users, body).await?;
        Ok(())
    }

    pub async fn update(&self, user_id: i64, record: &AccountRecord) -> Result<(), AppError> {
        let body = serde_json::to_value(record).map_err(anyhow::Error::from)?;
        self.store.update(Resource::Users, user_id, body).await?;
        Ok(())
    }

    pub async fn delete(&self, user_id: i64) -> Result<(), AppError> {
        self.store.delete(Resource::Users, user_id).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<StoreLoginReply, AppError> {
        self.store.login(username, password).await
    }
}
