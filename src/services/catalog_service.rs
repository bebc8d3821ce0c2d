// src/services/catalog_service.rs

// Cadastros do admin: produtos e contas. Toda escrita é seguida da lista
// atualizada, que é o que a tabela da tela mostra em seguida.

use crate::{
    common::error::AppError,
    models::{
        account::AccountRecord,
        product::ProductRecord,
        views::{AccountRow, ProductRow},
    },
    services::view_assembler::{account_rows, product_rows},
    store::{ProductRepository, UserRepository},
};

#[derive(Clone)]
pub struct CatalogService {
    products: ProductRepository,
    users: UserRepository,
}

impl CatalogService {
    pub fn new(products: ProductRepository, users: UserRepository) -> Self {
        Self { products, users }
    }

    // --- Produtos ---

    pub async fn list_products(&self) -> Result<Vec<ProductRow>, AppError> {
        Ok(product_rows(&self.products.list().await?))
    }

    pub async fn get_product(&self, product_id: i64) -> Result<ProductRow, AppError> {
        let product = self.products.get(product_id).await?;
        Ok(product_rows(std::slice::from_ref(&product)).remove(0))
    }

    pub async fn create_product(&self, record: &ProductRecord) -> Result<Vec<ProductRow>, AppError> {
        self.products.create(record).await?;
        tracing::info!("Produto '{}' criado", record.nama_produk);
        self.list_products().await
    }

    pub async fn update_product(
        &self,
        product_id: i64,
        record: &ProductRecord,
    ) -> Result<Vec<ProductRow>, AppError> {
        // Garante 404 para ids inexistentes antes de escrever
        self.products.get(product_id).await?;
        self.products.update(product_id, record).await?;
        tracing::info!("Produto {} atualizado", product_id);
        self.list_products().await
    }

    pub async fn delete_product(&self, product_id: i64) -> Result<Vec<ProductRow>, AppError> {
        self.products.delete(product_id).await?;
        tracing::info!("Produto {} removido", product_id);
        self.list_products().await
    }

    // --- Contas ---

    pub async fn list_accounts(&self) -> Result<Vec<AccountRow>, AppError> {
        Ok(account_rows(&self.users.list().await?))
    }

    pub async fn get_account(&self, user_id: i64) -> Result<AccountRow, AppError> {
        let account = self.users.get(user_id).await?;
        Ok(account_rows(std::slice::from_ref(&account)).remove(0))
    }

    pub async fn create_account(&self, record: &AccountRecord) -> Result<Vec<AccountRow>, AppError> {
        self.users.create(record).await?;
        tracing::info!("Conta '{}' criada", record.username);
        self.list_accounts().await
    }

    pub async fn update_account(
        &self,
        user_id: i64,
        record: &AccountRecord,
    ) -> Result<Vec<AccountRow>, AppError> {
        self.users.get(user_id).await?;
        self.users.update(user_id, record).await?;
        tracing::info!("Conta {} atualizada", user_id);
        self.list_accounts().await
    }

    pub async fn delete_account(&self, user_id: i64) -> Result<Vec<AccountRow>, AppError> {
        self.users.delete(user_id).await?;
        tracing::info!("Conta {} removida", user_id);
        self.list_accounts().await
    }
}
