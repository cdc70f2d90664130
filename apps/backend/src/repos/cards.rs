//! Card repository: inventory, deck membership and xp progression.

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Serialize;
use tracing::{debug, warn};

use crate::adapters::cards_sea::{self as cards_adapter, CardCreate, CardUpdate};
use crate::domain::deck::{deck_position, validate_deck_ids, DECK_SIZE};
use crate::domain::progression::{apply_xp, is_valid_progress};
use crate::domain::{BaseStats, Move};
use crate::entities::player_cards;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Re-reads after a version mismatch before giving up with `OptimisticLock`.
pub const MAX_XP_RETRIES: u32 = 3;

/// Card domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCard {
    pub id: i64,
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
    pub in_deck: bool,
    pub deck_position: Option<i16>,
    #[serde(skip_serializing)]
    pub lock_version: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

fn card_not_found(card_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Card, format!("card {card_id} not found"))
}

fn decode_cards(models: Vec<player_cards::Model>) -> Result<Vec<PlayerCard>, DomainError> {
    models.into_iter().map(PlayerCard::try_from).collect()
}

pub async fn create_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CardCreate,
) -> Result<PlayerCard, DomainError> {
    if !is_valid_progress(dto.level, dto.xp) {
        return Err(DomainError::validation_other(format!(
            "invalid progress level={} xp={}",
            dto.level, dto.xp
        )));
    }
    if let Some(pos) = dto.deck_position {
        if !(1..=DECK_SIZE as i16).contains(&pos) {
            return Err(DomainError::invalid_deck(format!(
                "deck position {pos} out of range"
            )));
        }
    }
    let card = cards_adapter::create_card(conn, dto).await?;
    PlayerCard::try_from(card)
}

pub async fn find_card_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<Option<PlayerCard>, DomainError> {
    cards_adapter::find_by_id(conn, card_id)
        .await?
        .map(PlayerCard::try_from)
        .transpose()
}

pub async fn get_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<PlayerCard, DomainError> {
    find_card_by_id(conn, card_id)
        .await?
        .ok_or_else(|| card_not_found(card_id))
}

/// All cards of a user, newest first.
pub async fn get_user_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<PlayerCard>, DomainError> {
    decode_cards(cards_adapter::find_by_user(conn, user_id).await?)
}

/// In-deck cards ordered by slot.
pub async fn get_user_deck<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<PlayerCard>, DomainError> {
    decode_cards(cards_adapter::find_deck(conn, user_id).await?)
}

pub async fn count_user_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, DomainError> {
    Ok(cards_adapter::count_by_user(conn, user_id).await?)
}

/// Replace the user's deck with `card_ids` (slot order = list order).
///
/// Runs in its own transaction, or a savepoint when `conn` already is one.
/// Every id must match exactly one card owned by `user_id`; otherwise the
/// whole replacement is rolled back with `InvalidDeck`.
pub async fn update_deck<C>(
    conn: &C,
    user_id: i64,
    card_ids: &[i64],
) -> Result<Vec<PlayerCard>, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    validate_deck_ids(card_ids)?;

    let txn = conn.begin().await?;
    let cleared = cards_adapter::clear_deck(&txn, user_id).await?;
    debug!(user_id, cleared, "deck cleared");

    for (index, card_id) in card_ids.iter().copied().enumerate() {
        let rows = cards_adapter::assign_deck_slot(&txn, user_id, card_id, deck_position(index))
            .await?;
        if rows != 1 {
            warn!(user_id, card_id, "deck update referenced a card the user does not own");
            txn.rollback().await?;
            return Err(DomainError::invalid_deck(format!(
                "card {card_id} is not in your collection"
            )));
        }
    }

    let deck = decode_cards(cards_adapter::find_deck(&txn, user_id).await?)?;
    txn.commit().await?;
    Ok(deck)
}

/// Add xp to a card and level it up along the curve.
///
/// The write is guarded by `lock_version`; a concurrent writer forces a
/// re-read, up to `MAX_XP_RETRIES` times.
pub async fn add_xp<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
    delta: u32,
) -> Result<PlayerCard, DomainError> {
    let mut attempt = 0;
    loop {
        let card = get_card(conn, card_id).await?;
        let (level, xp) = apply_xp(card.level, card.xp, delta);
        if (level, xp) == (card.level, card.xp) {
            return Ok(card);
        }

        match cards_adapter::update_progress(conn, card_id, card.lock_version, level, xp).await {
            Ok(updated) => {
                if level > card.level {
                    debug!(card_id, from = card.level, to = level, "card levelled up");
                }
                return PlayerCard::try_from(updated);
            }
            Err(e) => {
                let err = DomainError::from(e);
                if err.is_optimistic_lock() && attempt < MAX_XP_RETRIES {
                    attempt += 1;
                    debug!(card_id, attempt, "xp update lost a race, retrying");
                    continue;
                }
                return Err(err);
            }
        }
    }
}

/// Highest level among the user's cards, 0 when they own none.
pub async fn get_highest_level<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<i32, DomainError> {
    Ok(cards_adapter::max_level(conn, user_id).await?.unwrap_or(0))
}

pub async fn count_legendary<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<i64, DomainError> {
    Ok(cards_adapter::count_legendary(conn, user_id).await? as i64)
}

pub async fn count_mythical<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<i64, DomainError> {
    Ok(cards_adapter::count_mythical(conn, user_id).await? as i64)
}

/// Persist name, progress and sprite of `card`.
///
/// Owner and deck membership are immutable here: a `card` whose deck slot
/// differs from the stored one is rejected with `InvalidDeck`, since moving a
/// single card would break the 0-or-5 deck rule. Use [`update_deck`].
pub async fn update_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card: &PlayerCard,
) -> Result<PlayerCard, DomainError> {
    if !is_valid_progress(card.level, card.xp) {
        return Err(DomainError::validation_other(format!(
            "invalid progress level={} xp={}",
            card.level, card.xp
        )));
    }
    let stored = get_card(conn, card.id).await?;
    if stored.user_id != card.user_id {
        return Err(DomainError::validation_other(format!(
            "card {} cannot change owner",
            card.id
        )));
    }
    if (stored.in_deck, stored.deck_position) != (card.in_deck, card.deck_position) {
        return Err(DomainError::invalid_deck(format!(
            "card {} deck membership can only change through a deck update",
            card.id
        )));
    }
    let updated = cards_adapter::update_card(
        conn,
        CardUpdate {
            id: card.id,
            expected_lock_version: card.lock_version,
            pokemon_name: card.pokemon_name.clone(),
            level: card.level,
            xp: card.xp,
            sprite: card.sprite.clone(),
        },
    )
    .await?;
    PlayerCard::try_from(updated)
}

pub async fn delete_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<(), DomainError> {
    match cards_adapter::delete_card(conn, card_id).await? {
        0 => Err(card_not_found(card_id)),
        _ => Ok(()),
    }
}

impl TryFrom<player_cards::Model> for PlayerCard {
    type Error = DomainError;

    fn try_from(model: player_cards::Model) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, e: serde_json::Error| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("card {} has unreadable {what}: {e}", model.id),
            )
        };
        let types: Vec<String> =
            serde_json::from_value(model.types.clone()).map_err(|e| corrupt("types", e))?;
        let moves: Vec<Move> =
            serde_json::from_value(model.moves.clone()).map_err(|e| corrupt("moves", e))?;

        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            pokemon_name: model.pokemon_name,
            level: model.level,
            xp: model.xp,
            base: BaseStats {
                hp: model.base_hp,
                attack: model.base_attack,
                defense: model.base_defense,
                speed: model.base_speed,
            },
            types,
            moves,
            sprite: model.sprite,
            is_legendary: model.is_legendary,
            is_mythical: model.is_mythical,
            in_deck: model.in_deck,
            deck_position: model.deck_position,
            lock_version: model.lock_version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
