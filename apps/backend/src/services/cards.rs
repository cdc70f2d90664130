//! Card service: starter decks, deck replacement, xp.

use std::collections::HashSet;

use rand::Rng;
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adapters::cards_sea::CardCreate;
use crate::catalog::{Species, SpeciesCatalog, SpeciesKey};
use crate::domain::deck::{deck_position, DECK_SIZE};
use crate::domain::stats::current_stats;
use crate::domain::BaseStats;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::repos::cards::{self, PlayerCard};

/// Species ids sampled for starters; the non-legendary/mythical space.
pub const STARTER_SPECIES_MIN: u32 = 1;
pub const STARTER_SPECIES_MAX: u32 = 898;
/// Catalog draws allowed before starter generation gives up.
pub const STARTER_ATTEMPT_BUDGET: usize = DECK_SIZE * 10;

/// A card together with its effective stats at its level.
#[derive(Debug, Clone, Serialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: PlayerCard,
    pub current_stats: BaseStats,
}

/// Effective stats of `card` at its current level.
pub fn card_current_stats(card: &PlayerCard) -> BaseStats {
    current_stats(card.base, card.level)
}

fn starter_card(user_id: i64, species: Species, position: i16) -> CardCreate {
    CardCreate::new(user_id, species.name, species.base)
        .with_types(species.types)
        .with_moves(species.moves)
        .with_sprite(species.sprite)
        .with_flags(false, false)
        .in_deck_at(position)
}

/// Draw five distinct ordinary species from the catalog.
///
/// Touches no database; callers draw before opening a transaction.
pub async fn draw_starter_species<R>(
    catalog: &dyn SpeciesCatalog,
    rng: &mut R,
) -> Result<Vec<Species>, DomainError>
where
    R: Rng + Send,
{
    let mut chosen: Vec<Species> = Vec::with_capacity(DECK_SIZE);
    let mut names: HashSet<String> = HashSet::with_capacity(DECK_SIZE);

    for attempt in 1..=STARTER_ATTEMPT_BUDGET {
        if chosen.len() == DECK_SIZE {
            break;
        }
        let id = rng.random_range(STARTER_SPECIES_MIN..=STARTER_SPECIES_MAX);
        let species = match catalog.fetch(&SpeciesKey::Id(id)).await {
            Ok(s) => s,
            Err(e) => {
                debug!(species_id = id, attempt, error = %e, "starter draw skipped: fetch failed");
                continue;
            }
        };
        if species.is_special() {
            debug!(species = %species.name, attempt, "starter draw skipped: legendary or mythical");
            continue;
        }
        if !names.insert(species.name.clone()) {
            debug!(species = %species.name, attempt, "starter draw skipped: duplicate");
            continue;
        }
        chosen.push(species);
    }

    if chosen.len() < DECK_SIZE {
        warn!(
            found = chosen.len(),
            budget = STARTER_ATTEMPT_BUDGET,
            "starter generation exhausted its budget"
        );
        return Err(DomainError::infra(
            InfraErrorKind::StarterGenerationFailed,
            format!(
                "found only {} of {DECK_SIZE} starter species after {STARTER_ATTEMPT_BUDGET} draws",
                chosen.len()
            ),
        ));
    }
    Ok(chosen)
}

/// Card domain service.
pub struct CardService;

impl CardService {
    pub fn new() -> Self {
        Self
    }

    /// Create the five-card starter deck for a user who has no deck yet.
    ///
    /// Catalog draws happen before any write; the five inserts share one
    /// transaction (a savepoint when `conn` is already a transaction).
    pub async fn generate_starter_deck<C, R>(
        &self,
        conn: &C,
        catalog: &dyn SpeciesCatalog,
        rng: &mut R,
        user_id: i64,
    ) -> Result<Vec<PlayerCard>, AppError>
    where
        C: ConnectionTrait + TransactionTrait + Send + Sync,
        R: Rng + Send,
    {
        self.ensure_no_deck(conn, user_id).await?;
        let species = draw_starter_species(catalog, rng).await?;
        self.insert_starter_deck(conn, user_id, species).await
    }

    /// Insert already drawn starter species into deck slots 1..=5.
    pub async fn insert_starter_deck<C>(
        &self,
        conn: &C,
        user_id: i64,
        species: Vec<Species>,
    ) -> Result<Vec<PlayerCard>, AppError>
    where
        C: ConnectionTrait + TransactionTrait + Send + Sync,
    {
        if species.len() != DECK_SIZE {
            return Err(DomainError::invalid_deck(format!(
                "a starter deck needs {DECK_SIZE} species, got {}",
                species.len()
            ))
            .into());
        }
        self.ensure_no_deck(conn, user_id).await?;

        let txn = conn.begin().await?;
        let mut deck = Vec::with_capacity(DECK_SIZE);
        for (index, s) in species.into_iter().enumerate() {
            let card = cards::create_card(&txn, starter_card(user_id, s, deck_position(index)))
                .await?;
            deck.push(card);
        }
        txn.commit().await?;

        info!(user_id, cards = deck.len(), "starter deck generated");
        Ok(deck)
    }

    async fn ensure_no_deck<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<(), AppError> {
        if !cards::get_user_deck(conn, user_id).await?.is_empty() {
            return Err(DomainError::conflict(
                ConflictKind::StarterDeckExists,
                format!("user {user_id} already has a deck"),
            )
            .into());
        }
        Ok(())
    }

    pub async fn get_user_cards<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<PlayerCard>, AppError> {
        Ok(cards::get_user_cards(conn, user_id).await?)
    }

    pub async fn get_user_deck<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<PlayerCard>, AppError> {
        Ok(cards::get_user_deck(conn, user_id).await?)
    }

    /// A card the caller owns. `FORBIDDEN` for someone else's card.
    pub async fn get_card_for_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        card_id: i64,
    ) -> Result<PlayerCard, AppError> {
        let card = cards::get_card(conn, card_id).await?;
        if card.user_id != user_id {
            warn!(user_id, card_id, owner = card.user_id, "card access denied");
            return Err(DomainError::forbidden(format!("card {card_id} belongs to another user")).into());
        }
        Ok(card)
    }

    pub async fn get_card_detail<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        card_id: i64,
    ) -> Result<CardDetail, AppError> {
        let card = self.get_card_for_user(conn, user_id, card_id).await?;
        Ok(CardDetail {
            current_stats: card_current_stats(&card),
            card,
        })
    }

    /// Atomically replace the deck. `INVALID_DECK` for wrong size, duplicates
    /// or cards the caller does not own; the previous deck survives failures.
    pub async fn update_deck<C>(
        &self,
        conn: &C,
        user_id: i64,
        card_ids: &[i64],
    ) -> Result<Vec<PlayerCard>, AppError>
    where
        C: ConnectionTrait + TransactionTrait + Send + Sync,
    {
        let deck = cards::update_deck(conn, user_id, card_ids).await?;
        info!(user_id, ?card_ids, "deck replaced");
        Ok(deck)
    }

    /// Grant xp to one of the caller's cards.
    pub async fn add_xp<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        card_id: i64,
        delta: u32,
    ) -> Result<PlayerCard, AppError> {
        self.get_card_for_user(conn, user_id, card_id).await?;
        Ok(cards::add_xp(conn, card_id, delta).await?)
    }
}

impl Default for CardService {
    fn default() -> Self {
        Self::new()
    }
}
