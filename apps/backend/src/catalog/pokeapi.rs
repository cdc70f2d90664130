use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{CatalogError, Species, SpeciesCatalog, SpeciesKey};
use crate::domain::{BaseStats, Move};

/// Moves copied onto a card.
pub const MOVES_PER_CARD: usize = 4;

/// PokeAPI-backed catalog.
#[derive(Debug, Clone)]
pub struct PokeApiCatalog {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Deserialize)]
struct StatWire {
    base_stat: i32,
    stat: NamedRef,
}

#[derive(Deserialize)]
struct TypeSlotWire {
    slot: u8,
    #[serde(rename = "type")]
    type_: NamedRef,
}

#[derive(Deserialize)]
struct MoveSlotWire {
    #[serde(rename = "move")]
    move_: NamedRef,
}

#[derive(Deserialize, Default)]
struct SpritesWire {
    front_default: Option<String>,
}

#[derive(Deserialize)]
struct PokemonWire {
    name: String,
    stats: Vec<StatWire>,
    types: Vec<TypeSlotWire>,
    moves: Vec<MoveSlotWire>,
    #[serde(default)]
    sprites: SpritesWire,
    species: NamedRef,
}

#[derive(Deserialize)]
struct SpeciesWire {
    #[serde(default)]
    is_legendary: bool,
    #[serde(default)]
    is_mythical: bool,
}

#[derive(Deserialize)]
struct MoveWire {
    power: Option<i32>,
    #[serde(rename = "type")]
    type_: NamedRef,
}

fn base_stats(stats: &[StatWire]) -> BaseStats {
    let pick = |name: &str| {
        stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
            .unwrap_or(0)
    };
    BaseStats {
        hp: pick("hp"),
        attack: pick("attack"),
        defense: pick("defense"),
        speed: pick("speed"),
    }
}

impl PokeApiCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "catalog request");

        let resp = match self.http.get(&url).timeout(self.timeout).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Err(CatalogError::Timeout),
            Err(e) => return Err(CatalogError::Transport(e.to_string())),
        };

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Http(status.as_u16()));
        }

        resp.json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }

    async fn fetch_move(&self, name: &str) -> Result<Move, CatalogError> {
        let wire: MoveWire = self.get_json(&format!("move/{name}")).await?;
        Ok(Move::new(name, wire.power.unwrap_or(0), wire.type_.name))
    }
}

#[async_trait]
impl SpeciesCatalog for PokeApiCatalog {
    async fn fetch(&self, key: &SpeciesKey) -> Result<Species, CatalogError> {
        let pokemon: PokemonWire = self.get_json(&format!("pokemon/{key}")).await?;
        let flags: SpeciesWire = self
            .get_json(&format!("pokemon-species/{}", pokemon.species.name))
            .await?;

        let mut type_slots = pokemon.types;
        type_slots.sort_by_key(|t| t.slot);
        let types = type_slots.into_iter().map(|t| t.type_.name).collect();

        let mut moves = Vec::with_capacity(MOVES_PER_CARD);
        for slot in pokemon.moves.iter().take(MOVES_PER_CARD) {
            match self.fetch_move(&slot.move_.name).await {
                Ok(m) => moves.push(m),
                Err(e) => {
                    // A species stays usable with fewer moves
                    warn!(species = %pokemon.name, move_name = %slot.move_.name, error = %e, "skipping move");
                }
            }
        }

        Ok(Species {
            base: base_stats(&pokemon.stats),
            name: pokemon.name,
            types,
            moves,
            sprite: pokemon.sprites.front_default.unwrap_or_default(),
            is_legendary: flags.is_legendary,
            is_mythical: flags.is_mythical,
        })
    }
}
