use backend_test_support::unique_helpers::{unique_email, unique_username};
use pokedeck_backend::adapters::cards_sea::CardCreate;
use pokedeck_backend::domain::{BaseStats, Move};
use pokedeck_backend::repos::cards::{self, PlayerCard};
use pokedeck_backend::repos::users::{self, User};
use pokedeck_backend::DomainError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_orm::ConnectionTrait;

pub const TEST_PASSWORD_HASH: &str = "plain:pikachu";

/// Deterministic rng for starter sampling.
pub fn test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub async fn create_test_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
) -> Result<User, DomainError> {
    users::create_user(
        conn,
        &unique_username(prefix),
        &unique_email(prefix),
        TEST_PASSWORD_HASH,
    )
    .await
}

pub fn test_base() -> BaseStats {
    BaseStats {
        hp: 50,
        attack: 60,
        defense: 40,
        speed: 70,
    }
}

pub fn card_dto(user_id: i64, name: &str) -> CardCreate {
    CardCreate::new(user_id, name, test_base())
        .with_types(vec!["normal".to_string()])
        .with_moves(vec![Move::new("tackle", 40, "normal")])
}

/// Insert `n` cards outside the deck, named `{prefix}-{i}`.
pub async fn create_test_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    prefix: &str,
    n: usize,
) -> Result<Vec<PlayerCard>, DomainError> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        out.push(cards::create_card(conn, card_dto(user_id, &format!("{prefix}-{i}"))).await?);
    }
    Ok(out)
}

/// Five cards occupying deck slots 1..=5 plus `extra` cards outside the deck.
pub async fn create_deck_with_bench<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    extra: usize,
) -> Result<(Vec<PlayerCard>, Vec<PlayerCard>), DomainError> {
    let mut deck = Vec::with_capacity(5);
    for slot in 1..=5i16 {
        let dto = card_dto(user_id, &format!("deck-{slot}")).in_deck_at(slot);
        deck.push(cards::create_card(conn, dto).await?);
    }
    let bench = create_test_cards(conn, user_id, "bench", extra).await?;
    Ok((deck, bench))
}
