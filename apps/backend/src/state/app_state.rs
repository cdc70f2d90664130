use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::catalog::SpeciesCatalog;
use crate::config::app::AppConfig;

/// Shared handles for every request.
#[derive(Clone)]
pub struct AppState {
    /// Pooled connection; the only process-wide mutable resource
    pub db: DatabaseConnection,
    pub catalog: Arc<dyn SpeciesCatalog>,
    pub config: AppConfig,
    /// Tripped at shutdown; in-flight service calls abort and roll back
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(db: DatabaseConnection, catalog: Arc<dyn SpeciesCatalog>, config: AppConfig) -> Self {
        Self {
            db,
            catalog,
            config,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn catalog(&self) -> &dyn SpeciesCatalog {
        self.catalog.as_ref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
