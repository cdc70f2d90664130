use pokedeck_backend::adapters::users_sea::{self, UserCreate};
use pokedeck_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use pokedeck_backend::repos::users;
use pokedeck_backend::AppError;

use crate::support::test_state::build_test_state;

#[tokio::test]
async fn create_then_find_by_each_key() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();

    let user = users_sea::create_user(db, UserCreate::new("ash", "ash@p.com", "h")).await?;
    assert!(user.id > 0);
    assert_eq!(user.coins, 0);

    let by_id = users_sea::find_user_by_id(db, user.id).await?.expect("by id");
    let by_name = users_sea::find_user_by_username(db, "ash").await?.expect("by name");
    let by_email = users_sea::find_user_by_email(db, "ash@p.com").await?.expect("by email");
    assert_eq!(by_id.id, user.id);
    assert_eq!(by_name.id, user.id);
    assert_eq!(by_email.id, user.id);

    assert!(users_sea::username_exists(db, "ash").await?);
    assert!(!users_sea::username_exists(db, "misty").await?);
    assert!(users_sea::email_exists(db, "ash@p.com").await?);
    Ok(())
}

#[tokio::test]
async fn duplicate_username_maps_to_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();

    users_sea::create_user(db, UserCreate::new("ash", "ash@p.com", "h")).await?;
    let err = users_sea::create_user(db, UserCreate::new("ash", "other@p.com", "h"))
        .await
        .unwrap_err();

    assert!(matches!(
        DomainError::from(err),
        DomainError::Conflict(ConflictKind::UniqueUsername, _)
    ));
    Ok(())
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();

    users_sea::create_user(db, UserCreate::new("ash", "ash@p.com", "h")).await?;
    let err = users_sea::create_user(db, UserCreate::new("gary", "ash@p.com", "h"))
        .await
        .unwrap_err();

    assert!(matches!(
        DomainError::from(err),
        DomainError::Conflict(ConflictKind::UniqueEmail, _)
    ));
    Ok(())
}

#[tokio::test]
async fn coins_cannot_go_negative() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();

    let user = users_sea::create_user(db, UserCreate::new("ash", "ash@p.com", "h")).await?;
    assert_eq!(users_sea::add_coins(db, user.id, 40).await?, 1);

    let err = users_sea::add_coins(db, user.id, -100).await.unwrap_err();
    assert!(matches!(
        DomainError::from(err),
        DomainError::Validation(ValidationKind::InsufficientCoins, _)
    ));

    let reloaded = users_sea::find_user_by_id(db, user.id).await?.expect("user");
    assert_eq!(reloaded.coins, 40);
    Ok(())
}

#[tokio::test]
async fn delete_reports_rows_affected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();

    let user = users_sea::create_user(db, UserCreate::new("ash", "ash@p.com", "h")).await?;
    assert_eq!(users_sea::delete_user(db, user.id).await?, 1);
    assert_eq!(users_sea::delete_user(db, user.id).await?, 0);
    assert!(users_sea::find_user_by_id(db, user.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn update_coins_sets_an_absolute_balance() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();

    let user = users_sea::create_user(db, UserCreate::new("ash", "ash@p.com", "h")).await?;
    users::add_coins(db, user.id, 40).await?;

    users::update_coins(db, user.id, 15).await?;
    assert_eq!(users::get_user(db, user.id).await?.coins, 15);

    users::update_coins(db, user.id, 0).await?;
    assert_eq!(users::get_user(db, user.id).await?.coins, 0);
    Ok(())
}

#[tokio::test]
async fn update_coins_on_missing_user_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();

    let err = users::update_coins(db, 9_999, 10).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
    Ok(())
}
