//! Species catalog: resolves a species id or name to the data a new card
//! is stamped from.

pub mod memory;
pub mod pokeapi;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{BaseStats, Move};
use crate::errors::domain::{DomainError, InfraErrorKind};

pub use memory::InMemoryCatalog;
pub use pokeapi::PokeApiCatalog;

/// Species lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpeciesKey {
    Id(u32),
    Name(String),
}

impl fmt::Display for SpeciesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesKey::Id(id) => write!(f, "{id}"),
            SpeciesKey::Name(name) => f.write_str(&name.to_lowercase()),
        }
    }
}

impl From<u32> for SpeciesKey {
    fn from(id: u32) -> Self {
        SpeciesKey::Id(id)
    }
}

impl From<&str> for SpeciesKey {
    fn from(name: &str) -> Self {
        SpeciesKey::Name(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    pub name: String,
    pub base: BaseStats,
    pub types: Vec<String>,
    pub moves: Vec<Move>,
    pub sprite: String,
    pub is_legendary: bool,
    pub is_mythical: bool,
}

impl Species {
    /// Legendary and mythical species are excluded from starter decks.
    pub fn is_special(&self) -> bool {
        self.is_legendary || self.is_mythical
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("species {0} not found")]
    NotFound(String),
    #[error("catalog request timed out")]
    Timeout,
    #[error("catalog returned HTTP {0}")]
    Http(u16),
    #[error("catalog transport error: {0}")]
    Transport(String),
    #[error("catalog response could not be decoded: {0}")]
    Decode(String),
}

impl From<CatalogError> for DomainError {
    fn from(e: CatalogError) -> Self {
        DomainError::infra(InfraErrorKind::Catalog, e.to_string())
    }
}

#[async_trait]
pub trait SpeciesCatalog: Send + Sync {
    async fn fetch(&self, key: &SpeciesKey) -> Result<Species, CatalogError>;
}
