use std::collections::HashSet;
use std::sync::Arc;

use pokedeck_backend::catalog::InMemoryCatalog;
use pokedeck_backend::errors::ErrorCode;
use pokedeck_backend::repos::{cards, stats, users};
use pokedeck_backend::services::UserService;
use pokedeck_backend::AppError;

use crate::support::catalog::UserCountingCatalog;
use crate::support::factory::{test_rng, TEST_PASSWORD_HASH};
use crate::support::password::PlainVerifier;
use crate::support::test_state::{build_test_state, build_test_state_with, full_catalog};

#[tokio::test]
async fn register_creates_user_stats_and_starter_deck() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let mut rng = test_rng(7);

    let registered = UserService::new()
        .register_user(db, state.catalog(), &mut rng, "ash", "ash@p.com", TEST_PASSWORD_HASH)
        .await?;

    assert_eq!(registered.user.username, "ash");
    assert_eq!(registered.user.coins, 0);

    let deck = &registered.starter_deck;
    assert_eq!(deck.len(), 5);
    let names: HashSet<_> = deck.iter().map(|c| c.pokemon_name.as_str()).collect();
    assert_eq!(names.len(), 5, "starter species must be distinct");
    for (index, card) in deck.iter().enumerate() {
        assert_eq!((card.level, card.xp), (1, 0));
        assert!(card.in_deck);
        assert_eq!(card.deck_position, Some(index as i16 + 1));
        assert!(!card.is_legendary && !card.is_mythical);
    }

    let stored = cards::get_user_deck(db, registered.user.id).await?;
    assert_eq!(stored.len(), 5);
    let player_stats = stats::find_stats(db, registered.user.id).await?.expect("stats row");
    assert_eq!(player_stats.total_battles(), 0);
    Ok(())
}

#[tokio::test]
async fn duplicate_username_and_email_are_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let service = UserService::new();
    let mut rng = test_rng(1);

    service
        .register_user(db, state.catalog(), &mut rng, "ash", "ash@p.com", TEST_PASSWORD_HASH)
        .await?;

    let err = service
        .register_user(db, state.catalog(), &mut rng, "ash", "other@p.com", TEST_PASSWORD_HASH)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateUsername);

    let err = service
        .register_user(db, state.catalog(), &mut rng, "gary", "ash@p.com", TEST_PASSWORD_HASH)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateEmail);
    Ok(())
}

#[tokio::test]
async fn failed_starter_generation_leaves_no_account() -> Result<(), AppError> {
    // Only legendary species resolve, so every draw is rejected
    let catalog = InMemoryCatalog::generated(1..=898, &(1..=898).collect::<Vec<_>>());
    let state = build_test_state_with(Arc::new(catalog)).await?;
    let db = state.db();
    let mut rng = test_rng(3);

    let err = UserService::new()
        .register_user(db, state.catalog(), &mut rng, "ash", "ash@p.com", TEST_PASSWORD_HASH)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::StarterGenerationFailed);
    assert!(users::find_user_by_username(db, "ash").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn authenticate_by_username_or_email() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let service = UserService::new();
    let mut rng = test_rng(11);

    let registered = service
        .register_user(db, state.catalog(), &mut rng, "ash", "ash@p.com", TEST_PASSWORD_HASH)
        .await?;

    let by_name = service.authenticate(db, "ash", "pikachu", &PlainVerifier).await?;
    let by_email = service.authenticate(db, "ash@p.com", "pikachu", &PlainVerifier).await?;
    assert_eq!(by_name.id, registered.user.id);
    assert_eq!(by_email.id, registered.user.id);

    let wrong = service
        .authenticate(db, "ash", "raichu", &PlainVerifier)
        .await
        .unwrap_err();
    let unknown = service
        .authenticate(db, "brock", "pikachu", &PlainVerifier)
        .await
        .unwrap_err();
    assert_eq!(wrong.code(), ErrorCode::Unauthorized);
    assert_eq!(unknown.code(), ErrorCode::Unauthorized);
    Ok(())
}

#[tokio::test]
async fn delete_user_cascades_everything() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let service = UserService::new();
    let mut rng = test_rng(5);

    let registered = service
        .register_user(db, state.catalog(), &mut rng, "ash", "ash@p.com", TEST_PASSWORD_HASH)
        .await?;
    let user_id = registered.user.id;

    service.delete_user(db, user_id).await?;

    assert!(cards::get_user_cards(db, user_id).await?.is_empty());
    assert!(stats::find_stats(db, user_id).await?.is_none());
    let err = service.get_current_user(db, user_id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotFound);
    Ok(())
}

#[tokio::test]
async fn starter_species_are_drawn_before_the_account_exists() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let catalog = UserCountingCatalog::new(full_catalog(), db.clone());
    let mut rng = test_rng(21);

    let registered = UserService::new()
        .register_user(db, &catalog, &mut rng, "ash", "ash@p.com", TEST_PASSWORD_HASH)
        .await?;

    let seen = catalog.seen();
    assert!(seen.len() >= 5);
    assert!(seen.iter().all(|&count| count == 0), "seen: {seen:?}");
    assert_eq!(registered.starter_deck.len(), 5);
    Ok(())
}
