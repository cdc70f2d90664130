use pokedeck_backend::adapters::battle_history_sea::{self, BattleCreate};
use pokedeck_backend::adapters::stats_sea::{self, BattleTally};
use pokedeck_backend::domain::battle::{BattleMode, BattleResult};
use pokedeck_backend::errors::domain::{DomainError, NotFoundKind};
use pokedeck_backend::repos::stats;
use pokedeck_backend::AppError;

use crate::support::factory::create_test_user;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn insert_if_absent_is_idempotent() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;

    assert_eq!(stats_sea::insert_if_absent(db, user.id).await?, 1);
    assert_eq!(stats_sea::insert_if_absent(db, user.id).await?, 0);

    let row = stats_sea::find(db, user.id).await?.expect("stats row");
    assert_eq!(row.total_battles_1v1, 0);
    assert_eq!(row.highest_level, 0);
    Ok(())
}

#[tokio::test]
async fn record_battle_bumps_only_the_mode_counters() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    stats_sea::insert_if_absent(db, user.id).await?;

    let tally = |mode, result, coins_earned| BattleTally {
        mode,
        result,
        coins_earned,
    };
    stats_sea::record_battle(db, user.id, tally(BattleMode::OneVsOne, BattleResult::Win, 10)).await?;
    stats_sea::record_battle(db, user.id, tally(BattleMode::OneVsOne, BattleResult::Loss, 0)).await?;
    stats_sea::record_battle(db, user.id, tally(BattleMode::FiveVsFive, BattleResult::Draw, 3)).await?;

    let row = stats_sea::find(db, user.id).await?.expect("stats row");
    assert_eq!((row.total_battles_1v1, row.wins_1v1, row.losses_1v1), (2, 1, 1));
    assert_eq!((row.total_battles_5v5, row.wins_5v5, row.losses_5v5), (1, 0, 0));
    assert_eq!(row.total_coins_earned, 13);
    Ok(())
}

#[tokio::test]
async fn highest_level_only_rises() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    stats_sea::insert_if_absent(db, user.id).await?;

    assert_eq!(stats_sea::raise_highest_level(db, user.id, 5).await?, 1);
    assert_eq!(stats_sea::raise_highest_level(db, user.id, 3).await?, 0);

    let row = stats_sea::find(db, user.id).await?.expect("stats row");
    assert_eq!(row.highest_level, 5);
    Ok(())
}

#[tokio::test]
async fn history_lists_newest_first_with_limit() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;

    for coins in [1, 2, 3] {
        battle_history_sea::create(
            db,
            BattleCreate {
                user_id: user.id,
                mode: BattleMode::OneVsOne,
                result: BattleResult::Win,
                coins_earned: coins,
                duration_secs: 30,
            },
        )
        .await?;
    }

    let recent = battle_history_sea::list_for_user(db, user.id, 2).await?;
    let coins: Vec<_> = recent.iter().map(|r| r.coins_earned).collect();
    assert_eq!(coins, [3, 2]);
    assert_eq!(battle_history_sea::count_for_user(db, user.id).await?, 3);
    Ok(())
}

#[tokio::test]
async fn update_stats_only_moves_counters_forward() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;

    let mut grown = stats::get_or_create(db, user.id).await?;
    grown.total_battles_1v1 = 10;
    grown.wins_1v1 = 5;
    grown.losses_1v1 = 4;
    grown.highest_level = 40;
    let saved = stats::update_stats(db, &grown).await?;
    assert_eq!((saved.wins_1v1, saved.highest_level), (5, 40));

    let mut lowered = saved.clone();
    lowered.wins_1v1 = 0;
    lowered.highest_level = 2;
    let err = stats::update_stats(db, &lowered).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(..)));

    let row = stats::get_or_create(db, user.id).await?;
    assert_eq!((row.wins_1v1, row.highest_level), (5, 40));
    Ok(())
}

#[tokio::test]
async fn update_stats_rejects_more_results_than_battles() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;

    let mut bogus = stats::get_or_create(db, user.id).await?;
    bogus.total_battles_1v1 = 1;
    bogus.wins_1v1 = 5;
    bogus.losses_1v1 = 5;
    let err = stats::update_stats(db, &bogus).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(..)));

    let row = stats::get_or_create(db, user.id).await?;
    assert_eq!((row.total_battles_1v1, row.wins_1v1), (0, 0));
    Ok(())
}

#[tokio::test]
async fn delete_stats_then_missing_row_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    stats::get_or_create(db, user.id).await?;

    stats::delete_stats(db, user.id).await?;
    assert!(stats::find_stats(db, user.id).await?.is_none());

    let err = stats::delete_stats(db, user.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Stats, _)));

    let stale = stats::get_or_create(db, user.id).await?;
    stats::delete_stats(db, user.id).await?;
    let err = stats::update_stats(db, &stale).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Stats, _)));
    Ok(())
}
