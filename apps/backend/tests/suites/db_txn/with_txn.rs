use std::time::Duration;

use pokedeck_backend::db::txn::with_txn;
use pokedeck_backend::db::txn_policy::{current, TxnPolicy};
use pokedeck_backend::errors::ErrorCode;
use pokedeck_backend::infra::cancel::guarded;
use pokedeck_backend::repos::users;
use pokedeck_backend::AppError;

use crate::support::factory::TEST_PASSWORD_HASH;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn test_binaries_commit_by_default() {
    assert_eq!(current(), TxnPolicy::CommitOnOk);
}

#[tokio::test]
async fn ok_commits() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let created = with_txn(&state, |txn| async move {
        let user = users::create_user(txn.as_ref(), "ash", "ash@p.com", TEST_PASSWORD_HASH).await?;
        Ok::<_, AppError>(user)
    })
    .await?;

    let found = users::find_user_by_id(state.db(), created.id).await?;
    assert!(found.is_some());
    Ok(())
}

#[tokio::test]
async fn err_rolls_back() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let out: Result<(), AppError> = with_txn(&state, |txn| async move {
        users::create_user(txn.as_ref(), "ash", "ash@p.com", TEST_PASSWORD_HASH).await?;
        Err::<(), _>(AppError::internal("boom"))
    })
    .await;

    assert_eq!(out.unwrap_err().code(), ErrorCode::Internal);
    assert!(users::find_user_by_username(state.db(), "ash").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn deadline_drops_the_unit_of_work() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let out = guarded(
        &state.shutdown,
        Duration::from_millis(20),
        with_txn(&state, |txn| async move {
            users::create_user(txn.as_ref(), "ash", "ash@p.com", TEST_PASSWORD_HASH).await?;
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<(), AppError>(())
        }),
    )
    .await;

    assert_eq!(out.unwrap_err().code(), ErrorCode::Cancelled);
    assert!(users::find_user_by_username(state.db(), "ash").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn shutdown_token_cancels_in_flight_work() -> Result<(), AppError> {
    let state = build_test_state().await?;
    state.shutdown.cancel();

    let out: Result<(), AppError> = guarded(
        &state.shutdown,
        Duration::from_secs(5),
        with_txn(&state, |_txn| async move { Ok::<(), AppError>(()) }),
    )
    .await;

    assert_eq!(out.unwrap_err().code(), ErrorCode::Cancelled);
    Ok(())
}
