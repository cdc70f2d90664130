use pokedeck_backend::adapters::cards_sea;
use pokedeck_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use pokedeck_backend::repos::cards;
use pokedeck_backend::AppError;

use crate::support::factory::{card_dto, create_deck_with_bench, create_test_user};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn create_card_defaults_to_level_one_outside_deck() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;

    let card = cards_sea::create_card(db, card_dto(user.id, "pikachu")).await?;

    assert_eq!(card.level, 1);
    assert_eq!(card.xp, 0);
    assert!(!card.in_deck);
    assert_eq!(card.deck_position, None);
    assert_eq!(card.lock_version, 1);
    Ok(())
}

#[tokio::test]
async fn deck_is_ordered_by_slot() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;

    for (name, slot) in [("c", 3), ("a", 1), ("b", 2)] {
        cards_sea::create_card(db, card_dto(user.id, name).in_deck_at(slot)).await?;
    }
    cards_sea::create_card(db, card_dto(user.id, "bench")).await?;

    let deck = cards_sea::find_deck(db, user.id).await?;
    let names: Vec<_> = deck.iter().map(|c| c.pokemon_name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(cards_sea::count_by_user(db, user.id).await?, 4);
    Ok(())
}

#[tokio::test]
async fn clear_then_assign_slot_respects_ownership() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let ash = create_test_user(db, "ash").await?;
    let gary = create_test_user(db, "gary").await?;

    let mine = cards_sea::create_card(db, card_dto(ash.id, "pikachu").in_deck_at(1)).await?;
    let theirs = cards_sea::create_card(db, card_dto(gary.id, "eevee")).await?;

    assert_eq!(cards_sea::clear_deck(db, ash.id).await?, 1);
    assert!(cards_sea::find_deck(db, ash.id).await?.is_empty());

    assert_eq!(cards_sea::assign_deck_slot(db, ash.id, theirs.id, 1).await?, 0);
    assert_eq!(cards_sea::assign_deck_slot(db, ash.id, mine.id, 2).await?, 1);

    let deck = cards_sea::find_deck(db, ash.id).await?;
    assert_eq!(deck.len(), 1);
    assert_eq!(deck[0].deck_position, Some(2));
    Ok(())
}

#[tokio::test]
async fn stale_lock_version_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let card = cards_sea::create_card(db, card_dto(user.id, "pikachu")).await?;

    let updated = cards_sea::update_progress(db, card.id, card.lock_version, 2, 10).await?;
    assert_eq!(updated.lock_version, card.lock_version + 1);
    assert_eq!((updated.level, updated.xp), (2, 10));

    let err = cards_sea::update_progress(db, card.id, card.lock_version, 3, 0)
        .await
        .unwrap_err();
    assert!(matches!(
        DomainError::from(err),
        DomainError::Conflict(ConflictKind::OptimisticLock, _)
    ));
    Ok(())
}

#[tokio::test]
async fn max_level_and_special_counts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;

    assert_eq!(cards_sea::max_level(db, user.id).await?, None);

    cards_sea::create_card(db, card_dto(user.id, "mewtwo").with_flags(true, false).with_progress(7, 0))
        .await?;
    cards_sea::create_card(db, card_dto(user.id, "mew").with_flags(false, true)).await?;
    cards_sea::create_card(db, card_dto(user.id, "rattata").with_progress(3, 5)).await?;

    assert_eq!(cards_sea::max_level(db, user.id).await?, Some(7));
    assert_eq!(cards_sea::count_legendary(db, user.id).await?, 1);
    assert_eq!(cards_sea::count_mythical(db, user.id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn cards_cascade_with_owner() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let card = cards_sea::create_card(db, card_dto(user.id, "pikachu")).await?;

    pokedeck_backend::adapters::users_sea::delete_user(db, user.id).await?;

    assert!(cards_sea::find_by_id(db, card.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn update_card_persists_fields_and_keeps_owner() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let card = cards::create_card(db, card_dto(user.id, "pikachu")).await?;

    let mut edited = card.clone();
    edited.pokemon_name = "raichu".to_string();
    edited.level = 4;
    edited.xp = 120;
    edited.sprite = "raichu.png".to_string();
    let updated = cards::update_card(db, &edited).await?;

    assert_eq!(updated.user_id, user.id);
    assert_eq!(updated.pokemon_name, "raichu");
    assert_eq!((updated.level, updated.xp), (4, 120));
    assert_eq!(updated.sprite, "raichu.png");
    assert_eq!(updated.lock_version, card.lock_version + 1);

    let mut stolen = updated.clone();
    stolen.user_id = user.id + 1;
    let err = cards::update_card(db, &stolen).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(..)));
    assert_eq!(cards::get_card(db, card.id).await?.user_id, user.id);
    Ok(())
}

#[tokio::test]
async fn update_card_cannot_change_deck_membership() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let (deck, bench) = create_deck_with_bench(db, user.id, 1).await?;

    let mut pulled = deck[0].clone();
    pulled.in_deck = false;
    pulled.deck_position = None;
    let err = cards::update_card(db, &pulled).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidDeck, _)
    ));

    let mut pushed = bench[0].clone();
    pushed.in_deck = true;
    pushed.deck_position = Some(1);
    let err = cards::update_card(db, &pushed).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidDeck, _)
    ));

    let positions: Vec<_> = cards::get_user_deck(db, user.id)
        .await?
        .iter()
        .map(|c| c.deck_position)
        .collect();
    assert_eq!(positions, [Some(1), Some(2), Some(3), Some(4), Some(5)]);

    // Same slot, other fields: allowed
    let mut renamed = deck[2].clone();
    renamed.pokemon_name = "renamed".to_string();
    let kept = cards::update_card(db, &renamed).await?;
    assert_eq!(kept.deck_position, Some(3));
    assert!(kept.in_deck);
    Ok(())
}

#[tokio::test]
async fn update_and_delete_missing_card_are_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let card = cards::create_card(db, card_dto(user.id, "pikachu")).await?;

    cards::delete_card(db, card.id).await?;
    assert!(cards::find_card_by_id(db, card.id).await?.is_none());

    let err = cards::delete_card(db, card.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Card, _)));

    let err = cards::update_card(db, &card).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Card, _)));
    Ok(())
}
