use std::sync::Arc;

use tracing::info;

use crate::catalog::{PokeApiCatalog, SpeciesCatalog};
use crate::config::app::AppConfig;
use crate::config::db::DbSettings;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    db_settings: Option<DbSettings>,
    catalog: Option<Arc<dyn SpeciesCatalog>>,
    config: Option<AppConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, settings: DbSettings) -> Self {
        self.db_settings = Some(settings);
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn SpeciesCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connect, migrate, and assemble the state.
    ///
    /// Without an explicit catalog the PokeAPI client is built from the config.
    pub async fn build(self) -> Result<AppState, AppError> {
        let settings = self
            .db_settings
            .ok_or_else(|| AppError::config("database settings are required"))?;
        let config = self.config.unwrap_or_default();

        let catalog: Arc<dyn SpeciesCatalog> = match self.catalog {
            Some(c) => c,
            None => Arc::new(
                PokeApiCatalog::new(config.pokeapi_base_url.clone(), config.request_timeout)
                    .map_err(|e| AppError::config(format!("catalog client: {e}")))?,
            ),
        };

        // single entrypoint: build + migrate
        let conn = bootstrap_db(&settings).await?;
        info!(pokeapi = %config.pokeapi_base_url, "application state ready");
        Ok(AppState::new(conn, catalog, config))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
