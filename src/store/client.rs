// src/store/client.rs

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use crate::{common::error::AppError, middleware::i18n::Locale, models::auth::StoreLoginReply};

/// Coleções expostas pelo record store externo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Orders,
    OrderDetails,
    Products,
    Users,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Orders => "pesanans",
            Resource::OrderDetails => "detail-pesanan",
            Resource::Products => "produks",
            Resource::Users => "users",
        }
    }

    /// Nome usado nas mensagens ao usuário.
    pub fn noun(&self, locale: &Locale) -> &'static str {
        match (self, locale.is_english()) {
            (Resource::Orders, false) => "pesanan",
            (Resource::Orders, true) => "orders",
            (Resource::OrderDetails, false) => "detail pesanan",
            (Resource::OrderDetails, true) => "order details",
            (Resource::Products, false) => "produk",
            (Resource::Products, true) => "products",
            (Resource::Users, false) => "akun",
            (Resource::Users, true) => "accounts",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Acesso cru ao record store. As respostas voltam como JSON não tipado;
/// a normalização acontece nos repositórios.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, resource: Resource) -> Result<Value, AppError>;
    async fn get(&self, resource: Resource, id: i64) -> Result<Value, AppError>;
    async fn create(&self, resource: Resource, body: Value) -> Result<Value, AppError>;
    async fn update(&self, resource: Resource, id: i64, body: Value) -> Result<Value, AppError>;
    async fn delete(&self, resource: Resource, id: i64) -> Result<(), AppError>;
    async fn login(&self, username: &str, password: &str) -> Result<StoreLoginReply, AppError>;
}

// ---
// Implementação HTTP (reqwest)
// ---
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Falha ao criar o cliente HTTP: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, resource: Resource, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}/{}/{}", self.base_url, resource.path(), id),
            None => format!("{}/{}", self.base_url, resource.path()),
        }
    }

    fn request(&self, method: Method, resource: Resource, id: Option<i64>) -> RequestBuilder {
        self.client.request(method, self.url(resource, id))
    }

    async fn send_json(
        &self,
        resource: Resource,
        id: Option<i64>,
        request: RequestBuilder,
    ) -> Result<Value, AppError> {
        let fetch_failed = |reason: String| AppError::FetchFailed { resource, reason };

        let response = request
            .send()
            .await
            .map_err(|e| fetch_failed(format!("requisição falhou: {}", e)))?;

        let status = response.status();
        // 404 num registro específico = registro inexistente
        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(AppError::EmptyResult { resource, id });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fetch_failed(format!("status {}: {}", status, body)));
        }

        // Corpo vazio (ex.: 204) conta como "sem registros"
        let text = response
            .text()
            .await
            .map_err(|e| fetch_failed(format!("corpo ilegível: {}", e)))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| fetch_failed(format!("JSON inválido: {}", e)))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self, resource: Resource) -> Result<Value, AppError> {
        tracing::debug!("GET {}", resource);
        self.send_json(resource, None, self.request(Method::GET, resource, None))
            .await
    }

    async fn get(&self, resource: Resource, id: i64) -> Result<Value, AppError> {
        tracing::debug!("GET {}/{}", resource, id);
        self.send_json(resource, Some(id), self.request(Method::GET, resource, Some(id)))
            .await
    }

    async fn create(&self, resource: Resource, body: Value) -> Result<Value, AppError> {
        tracing::debug!("POST {}", resource);
        self.send_json(resource, None, self.request(Method::POST, resource, None).json(&body))
            .await
    }

    async fn update(&self, resource: Resource, id: i64, body: Value) -> Result<Value, AppError> {
        tracing::debug!("PUT {}/{}", resource, id);
        self.send_json(
            resource,
            Some(id),
            self.request(Method::PUT, resource, Some(id)).json(&body),
        )
            .await
    }

    async fn delete(&self, resource: Resource, id: i64) -> Result<(), AppError> {
        tracing::debug!("DELETE {}/{}", resource, id);
        self.send_json(resource, Some(id), self.request(Method::DELETE, resource, Some(id)))
            .await
            .map(|_| ())
    }

    async fn login(&self, username: &str, password: &str) -> Result<StoreLoginReply, AppError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::LoginRejected(format!("Login failed: {}", e)))?;

        let status = response.status();
        // Corpo ilegível vira resposta vazia
        let reply: StoreLoginReply = response.json().await.unwrap_or_default();

        if !status.is_success() {
            let message = reply
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(AppError::LoginRejected(message));
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProductRepository;
    use axum::{
        http::StatusCode as HttpStatus,
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use std::sync::Arc;

    // Sobe um record store falso em porta efêmera e devolve a URL base
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn store(base_url: &str) -> HttpRecordStore {
        HttpRecordStore::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn urls_are_built_from_resource_paths() {
        let store = store("http://localhost:8000/");
        assert_eq!(store.url(Resource::Orders, None), "http://localhost:8000/pesanans");
        assert_eq!(
            store.url(Resource::OrderDetails, Some(4)),
            "http://localhost:8000/detail-pesanan/4"
        );
    }

    #[tokio::test]
    async fn missing_record_maps_to_empty_result() {
        let app = Router::new().route(
            "/produks/{id}",
            get(|| async {
                (
                    HttpStatus::NOT_FOUND,
                    Json(json!({ "message": "Produk tidak ditemukan" })),
                )
            })
            .put(|| async { HttpStatus::NOT_FOUND }),
        );
        let base_url = serve(app).await;
        let products = ProductRepository::new(Arc::new(store(&base_url)));

        let err = products.get(7).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::EmptyResult { resource: Resource::Products, id: 7 }
        ));

        let err = store(&base_url)
            .update(Resource::Products, 7, json!({ "stock": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyResult { id: 7, .. }));
    }

    #[tokio::test]
    async fn not_found_on_a_collection_is_still_a_fetch_failure() {
        let app = Router::new().route("/pesanans", get(|| async { HttpStatus::NOT_FOUND }));
        let base_url = serve(app).await;

        let err = store(&base_url).list(Resource::Orders).await.unwrap_err();
        assert!(matches!(err, AppError::FetchFailed { resource: Resource::Orders, .. }));
    }

    #[tokio::test]
    async fn server_errors_are_fetch_failures() {
        let app = Router::new().route(
            "/pesanans/{id}",
            get(|| async { (HttpStatus::INTERNAL_SERVER_ERROR, "boom").into_response() }),
        );
        let base_url = serve(app).await;

        let err = store(&base_url).get(Resource::Orders, 3).await.unwrap_err();
        match err {
            AppError::FetchFailed { resource, reason } => {
                assert_eq!(resource, Resource::Orders);
                assert!(reason.contains("500"));
                assert!(reason.contains("boom"));
            }
            other => panic!("erro inesperado: {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_body_reads_as_no_records() {
        let app = Router::new().route("/detail-pesanan", get(|| async { HttpStatus::NO_CONTENT }));
        let base_url = serve(app).await;

        let body = store(&base_url).list(Resource::OrderDetails).await.unwrap();
        assert_eq!(body, Value::Null);
        assert!(crate::store::response::normalize_records(body).is_empty());
    }

    #[tokio::test]
    async fn invalid_json_is_a_fetch_failure() {
        let app = Router::new().route("/users", get(|| async { "{ not json" }));
        let base_url = serve(app).await;

        let err = store(&base_url).list(Resource::Users).await.unwrap_err();
        assert!(matches!(err, AppError::FetchFailed { resource: Resource::Users, .. }));
    }
}
