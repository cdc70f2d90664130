use std::collections::HashMap;

use async_trait::async_trait;

use super::{CatalogError, Species, SpeciesCatalog, SpeciesKey};
use crate::domain::{BaseStats, Move};

/// Fixed species table for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    by_id: HashMap<u32, Species>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_species(mut self, id: u32, species: Species) -> Self {
        self.insert(id, species);
        self
    }

    pub fn insert(&mut self, id: u32, species: Species) {
        self.by_id.insert(id, species);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Every id in `ids` resolves to a distinct ordinary species, except the
    /// ones listed in `legendary` which are flagged legendary.
    pub fn generated(ids: impl IntoIterator<Item = u32>, legendary: &[u32]) -> Self {
        let mut catalog = Self::new();
        for id in ids {
            let mut species = sample_species(&format!("species-{id}"), id as i32);
            species.is_legendary = legendary.contains(&id);
            catalog.insert(id, species);
        }
        catalog
    }

    /// A handful of real Gen 1 species.
    pub fn starter_pack() -> Self {
        let mut catalog = Self::new();
        let rows: [(u32, &str, [i32; 4], &[&str], bool); 8] = [
            (1, "bulbasaur", [45, 49, 49, 45], &["grass", "poison"], false),
            (4, "charmander", [39, 52, 43, 65], &["fire"], false),
            (7, "squirtle", [44, 48, 65, 43], &["water"], false),
            (25, "pikachu", [35, 55, 40, 90], &["electric"], false),
            (39, "jigglypuff", [115, 45, 20, 20], &["normal", "fairy"], false),
            (52, "meowth", [40, 45, 35, 90], &["normal"], false),
            (133, "eevee", [55, 55, 50, 55], &["normal"], false),
            (150, "mewtwo", [106, 110, 90, 130], &["psychic"], true),
        ];
        for (id, name, [hp, attack, defense, speed], types, legendary) in rows {
            catalog.insert(
                id,
                Species {
                    name: name.to_string(),
                    base: BaseStats {
                        hp,
                        attack,
                        defense,
                        speed,
                    },
                    types: types.iter().map(|t| t.to_string()).collect(),
                    moves: vec![Move::new("tackle", 40, "normal")],
                    sprite: sprite_url(id),
                    is_legendary: legendary,
                    is_mythical: false,
                },
            );
        }
        catalog
    }
}

fn sprite_url(id: u32) -> String {
    format!("https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png")
}

fn sample_species(name: &str, seed: i32) -> Species {
    Species {
        name: name.to_string(),
        base: BaseStats {
            hp: 40 + seed % 20,
            attack: 45 + seed % 15,
            defense: 40 + seed % 10,
            speed: 50 + seed % 25,
        },
        types: vec!["normal".to_string()],
        moves: vec![
            Move::new("tackle", 40, "normal"),
            Move::new("growl", 0, "normal"),
        ],
        sprite: sprite_url(seed.max(0) as u32),
        is_legendary: false,
        is_mythical: false,
    }
}

#[async_trait]
impl SpeciesCatalog for InMemoryCatalog {
    async fn fetch(&self, key: &SpeciesKey) -> Result<Species, CatalogError> {
        let found = match key {
            SpeciesKey::Id(id) => self.by_id.get(id),
            SpeciesKey::Name(name) => self
                .by_id
                .values()
                .find(|s| s.name.eq_ignore_ascii_case(name)),
        };
        found
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }
}
