#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use catalog::memory::InMemoryCatalog;
pub use catalog::pokeapi::PokeApiCatalog;
pub use catalog::{CatalogError, Species, SpeciesCatalog, SpeciesKey};
pub use config::app::AppConfig;
pub use config::db::DbSettings;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use extractors::current_user::CurrentUser;
pub use infra::db::{bootstrap_db, connect_db};
pub use infra::state::build_state;
pub use middleware::request_trace::RequestTrace;
pub use state::app_state::AppState;

// Prelude for test convenience
pub mod prelude {
    pub use super::catalog::{InMemoryCatalog, Species, SpeciesCatalog, SpeciesKey};
    pub use super::config::app::AppConfig;
    pub use super::config::db::DbSettings;
    pub use super::db::txn::with_txn;
    pub use super::error::AppError;
    pub use super::errors::domain::*;
    pub use super::errors::ErrorCode;
    pub use super::infra::state::{build_state, StateBuilder};
    pub use super::services::*;
    pub use super::state::app_state::AppState;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
