//! Bridge between async handlers and the blocking catalog store.

use super::error::ApiError;
use super::metrics::{record_db_error, record_db_query};
use super::state::GuardedCatalogStore;
use crate::catalog_store::CatalogStore;
use std::time::{Duration, Instant};
use tokio::task::JoinError;
use tracing::error;

/// Handle used by the route handlers to reach the catalog store.
#[derive(Clone)]
pub struct StoreAccess {
    store: GuardedCatalogStore,
    timeout: Option<Duration>,
}

impl StoreAccess {
    pub fn new(store: GuardedCatalogStore, timeout: Option<Duration>) -> Self {
        StoreAccess { store, timeout }
    }

    /// Runs `op` on the blocking thread pool so the calling task is suspended
    /// rather than the runtime worker.
    ///
    /// A timeout only abandons the wait: the statement itself keeps running
    /// until SQLite returns.
    pub async fn run<T, F>(&self, operation: &'static str, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CatalogStore) -> anyhow::Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        let start = Instant::now();
        let task = tokio::task::spawn_blocking(move || op(store.as_ref()));

        let result = match self.timeout {
            Some(after) => match tokio::time::timeout(after, task).await {
                Ok(joined) => flatten(joined),
                Err(_) => Err(ApiError::Timeout { operation, after }),
            },
            None => flatten(task.await),
        };
        record_db_query(operation, start.elapsed());

        if let Err(err) = &result {
            error!("{} failed: {:#}", operation, err);
            record_db_error(operation, err.kind());
        }
        result
    }
}

fn flatten<T>(joined: Result<anyhow::Result<T>, JoinError>) -> Result<T, ApiError> {
    Ok(joined??)
}
