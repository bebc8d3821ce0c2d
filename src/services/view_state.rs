// src/services/view_state.rs

// Cada view guarda o próprio snapshot dos dados buscados. Cada carga recebe
// um número de geração crescente; uma carga antiga que termina depois de uma
// mais nova é descartada em vez de sobrescrever o snapshot.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use tokio::sync::RwLock;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// Resultado de uma carga: o snapshot vigente e, se a busca falhou,
/// o erro que obrigou a servir o snapshot anterior.
pub struct Loaded<T> {
    pub snapshot: Arc<T>,
    pub failure: Option<AppError>,
}

pub struct ViewSlot<T> {
    issued: AtomicU64,
    committed: RwLock<Option<(LoadTicket, Arc<T>)>>,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            committed: RwLock::new(None),
        }
    }
}

impl<T> ViewSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Grava o snapshot se o ticket for mais novo que o vigente e devolve o vigente.
    pub async fn commit(&self, ticket: LoadTicket, snapshot: T) -> Arc<T> {
        let mut committed = self.committed.write().await;
        match committed.as_ref() {
            Some((current, existing)) if *current > ticket => {
                tracing::debug!(
                    "Carga {:?} descartada: geração {:?} já publicada",
                    ticket,
                    current
                );
                Arc::clone(existing)
            }
            _ => {
                let snapshot = Arc::new(snapshot);
                *committed = Some((ticket, Arc::clone(&snapshot)));
                snapshot
            }
        }
    }

    pub async fn last(&self) -> Option<Arc<T>> {
        self.committed
            .read()
            .await
            .as_ref()
            .map(|(_, snapshot)| Arc::clone(snapshot))
    }

    /// Roda a busca completa. Em falha, mantém o snapshot anterior (se houver)
    /// e devolve junto o erro; sem snapshot anterior, o erro sobe.
    pub async fn load<F>(&self, fetch: F) -> Result<Loaded<T>, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let ticket = self.begin();
        match fetch.await {
            Ok(snapshot) => Ok(Loaded {
                snapshot: self.commit(ticket, snapshot).await,
                failure: None,
            }),
            Err(err) => match self.last().await {
                Some(previous) => {
                    tracing::warn!("Carga falhou, servindo snapshot anterior: {}", err);
                    Ok(Loaded {
                        snapshot: previous,
                        failure: Some(err),
                    })
                }
                None => Err(err),
            },
        }
    }
}
