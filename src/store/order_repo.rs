// src/store/order_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderDetail, OrderRecord, OrderStatus},
    store::{
        response::{decode_record, decode_records},
        RecordStore, Resource,
    },
};

#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<dyn RecordStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let response = self.store.list(Resource::Orders).await?;
        Ok(decode_records(Resource::Orders, response))
    }

    pub async fn get_order(&self, order_id: i64) -> Result<Order, AppError> {
        let response = self.store.get(Resource::Orders, order_id).await?;
        decode_record(Resource::Orders, order_id, response)
    }

    // O store não filtra por pedido: sempre a tabela inteira
    pub async fn list_details(&self) -> Result<Vec<OrderDetail>, AppError> {
        let response = self.store.list(Resource::OrderDetails).await?;
        Ok(decode_records(Resource::OrderDetails, response))
    }

    pub async fn update_status(&self, order: &Order, status: OrderStatus) -> Result<(), AppError> {
        let body = serde_json::to_value(OrderRecord::with_status(order, status))
            .map_err(anyhow::Error::from)?;
        self.store.update(Resource::Orders, order.id, body).await?;
        Ok(())
    }
}
