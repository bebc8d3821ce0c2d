// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    services::{
        aggregation::DedupPolicy,
        auth::{AuthService, SessionStore},
        cashier_service::CashierService,
        catalog_service::CatalogService,
        dashboard_service::DashboardService,
        report_service::ReportService,
    },
    store::{HttpRecordStore, OrderRepository, ProductRepository, RecordStore, UserRepository},
};

const DEFAULT_STORE_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_base_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub store_timeout: Duration,
    pub dedup_policy: DedupPolicy,
    pub session_ttl: chrono::Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .context("JWT_SECRET deve ser definido")?;

        let store_timeout_secs: u64 = match lookup("STORE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("STORE_TIMEOUT_SECS inválido: '{}'", raw))?,
            None => 10,
        };

        let session_ttl_hours: i64 = match lookup("SESSION_TTL_HOURS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("SESSION_TTL_HOURS inválido: '{}'", raw))?,
            None => 12,
        };

        let dedup_policy = match lookup("ORDER_DEDUP_POLICY") {
            Some(raw) => DedupPolicy::parse(&raw)
                .with_context(|| format!("ORDER_DEDUP_POLICY deve ser 'last' ou 'first', veio '{}'", raw))?,
            None => DedupPolicy::default(),
        };

        Ok(Self {
            store_base_url: lookup("STORE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_STORE_BASE_URL.to_string()),
            jwt_secret,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            store_timeout: Duration::from_secs(store_timeout_secs),
            dedup_policy,
            session_ttl: chrono::Duration::hours(session_ttl_hours),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub report_service: ReportService,
    pub cashier_service: CashierService,
    pub catalog_service: CatalogService,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = HttpRecordStore::new(&config.store_base_url, config.store_timeout)?;
        tracing::info!("✅ Record store configurado em {}", config.store_base_url);

        Ok(Self::with_store(config, Arc::new(store)))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(config: AppConfig, store: Arc<dyn RecordStore>) -> Self {
        let order_repo = OrderRepository::new(store.clone());
        let product_repo = ProductRepository::new(store.clone());
        let user_repo = UserRepository::new(store);

        let auth_service = AuthService::new(
            user_repo.clone(),
            SessionStore::new(),
            config.jwt_secret.clone(),
            config.session_ttl,
        );
        let dashboard_service = DashboardService::new(
            product_repo.clone(),
            user_repo.clone(),
            order_repo.clone(),
            config.dedup_policy,
        );
        let report_service =
            ReportService::new(product_repo.clone(), order_repo.clone(), config.dedup_policy);
        let cashier_service = CashierService::new(
            order_repo,
            product_repo.clone(),
            user_repo.clone(),
            config.dedup_policy,
        );
        let catalog_service = CatalogService::new(product_repo, user_repo);

        Self {
            config: Arc::new(config),
            auth_service,
            dashboard_service,
            report_service,
            cashier_service,
            catalog_service,
        }
    }
}
