//! DTOs for cards_sea adapter.

use crate::domain::{BaseStats, Move};

/// DTO for inserting a card.
#[derive(Debug, Clone)]
pub struct CardCreate {
    pub user_id: i64,
    pub pokemon_name: String,
    pub level: i32,
    pub xp: i32,
    pub base: BaseStats,
    pub types: Vec<String>,
    pub moves: Vec<Move>,
    pub sprite: String,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub deck_position: Option<i16>,
}

impl CardCreate {
    pub fn new(user_id: i64, pokemon_name: impl Into<String>, base: BaseStats) -> Self {
        Self {
            user_id,
            pokemon_name: pokemon_name.into(),
            level: 1,
            xp: 0,
            base,
            types: Vec::new(),
            moves: Vec::new(),
            sprite: String::new(),
            is_legendary: false,
            is_mythical: false,
            deck_position: None,
        }
    }

    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = sprite.into();
        self
    }

    pub fn with_flags(mut self, is_legendary: bool, is_mythical: bool) -> Self {
        self.is_legendary = is_legendary;
        self.is_mythical = is_mythical;
        self
    }

    pub fn with_progress(mut self, level: i32, xp: i32) -> Self {
        self.level = level;
        self.xp = xp;
        self
    }

    /// `in_deck` is derived from the position, keeping the two coherent.
    pub fn in_deck_at(mut self, position: i16) -> Self {
        self.deck_position = Some(position);
        self
    }
}

/// DTO for a card update guarded by `lock_version`.
///
/// Deck membership is not part of it; only the deck replacement moves cards
/// in or out of the deck.
#[derive(Debug, Clone)]
pub struct CardUpdate {
    pub id: i64,
    pub expected_lock_version: i32,
    pub pokemon_name: String,
    pub level: i32,
    pub xp: i32,
    pub sprite: String,
}
