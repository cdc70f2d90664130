use pokedeck_backend::domain::battle::{BattleMode, BattleResult};
use pokedeck_backend::errors::ErrorCode;
use pokedeck_backend::repos::{battle_history, cards, stats, users};
use pokedeck_backend::services::progression::{BattleOutcome, MAX_HISTORY_LIMIT};
use pokedeck_backend::services::ProgressionService;
use pokedeck_backend::AppError;

use crate::support::factory::{card_dto, create_deck_with_bench, create_test_user};
use crate::support::test_state::build_test_state;

fn outcome(mode: BattleMode, result: BattleResult, coins_earned: i64) -> BattleOutcome {
    BattleOutcome {
        mode,
        result,
        coins_earned,
        duration_secs: 45,
        participating_card_ids: Vec::new(),
        xp_per_card: 0,
    }
}

#[tokio::test]
async fn outcome_updates_history_stats_and_coins() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let service = ProgressionService::new();

    let report = service
        .record_battle_outcome(db, user.id, outcome(BattleMode::OneVsOne, BattleResult::Win, 25))
        .await?;

    assert_eq!(report.history.mode, BattleMode::OneVsOne);
    assert_eq!(report.history.result, BattleResult::Win);
    assert_eq!((report.stats.total_battles_1v1, report.stats.wins_1v1), (1, 1));
    assert_eq!(report.stats.total_coins_earned, 25);
    assert_eq!(users::get_user(db, user.id).await?.coins, 25);
    Ok(())
}

#[tokio::test]
async fn counters_never_decrease() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let service = ProgressionService::new();

    let sequence = [
        (BattleMode::OneVsOne, BattleResult::Win),
        (BattleMode::FiveVsFive, BattleResult::Loss),
        (BattleMode::OneVsOne, BattleResult::Draw),
        (BattleMode::FiveVsFive, BattleResult::Win),
        (BattleMode::OneVsOne, BattleResult::Loss),
    ];

    let mut previous = stats::get_or_create(db, user.id).await?;
    for (mode, result) in sequence {
        let now = service
            .record_battle_outcome(db, user.id, outcome(mode, result, 5))
            .await?
            .stats;
        assert_eq!(now.total_battles(), previous.total_battles() + 1);
        assert!(now.wins_1v1 >= previous.wins_1v1 && now.wins_5v5 >= previous.wins_5v5);
        assert!(now.losses_1v1 >= previous.losses_1v1 && now.losses_5v5 >= previous.losses_5v5);
        assert!(now.total_coins_earned > previous.total_coins_earned);
        previous = now;
    }
    assert_eq!(battle_history::count_for_user(db, user.id).await?, 5);
    Ok(())
}

#[tokio::test]
async fn participating_cards_gain_xp_and_raise_highest_level() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let (deck, _) = create_deck_with_bench(db, user.id, 0).await?;

    let mut battle = outcome(BattleMode::FiveVsFive, BattleResult::Win, 10);
    battle.participating_card_ids = deck.iter().map(|c| c.id).collect();
    battle.xp_per_card = 150;

    let report = ProgressionService::new()
        .record_battle_outcome(db, user.id, battle)
        .await?;

    assert_eq!(report.levels.len(), 5);
    for level in &report.levels {
        assert_eq!((level.level, level.xp), (2, 50));
        assert!(level.leveled_up);
    }
    assert_eq!(report.stats.highest_level, 2);
    assert_eq!(cards::get_highest_level(db, user.id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn foreign_card_aborts_the_whole_outcome() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let ash = create_test_user(db, "ash").await?;
    let gary = create_test_user(db, "gary").await?;
    let mine = cards::create_card(db, card_dto(ash.id, "pikachu")).await?;
    let theirs = cards::create_card(db, card_dto(gary.id, "eevee")).await?;

    let mut battle = outcome(BattleMode::OneVsOne, BattleResult::Win, 50);
    battle.participating_card_ids = vec![mine.id, theirs.id];
    battle.xp_per_card = 500;

    let err = ProgressionService::new()
        .record_battle_outcome(db, ash.id, battle)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);

    assert_eq!(battle_history::count_for_user(db, ash.id).await?, 0);
    assert_eq!(users::get_user(db, ash.id).await?.coins, 0);
    assert_eq!(cards::get_card(db, mine.id).await?.level, 1);
    assert_eq!(cards::get_card(db, theirs.id).await?.xp, 0);
    Ok(())
}

#[tokio::test]
async fn malformed_outcomes_are_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let card = cards::create_card(db, card_dto(user.id, "pikachu")).await?;
    let service = ProgressionService::new();

    let negative = outcome(BattleMode::OneVsOne, BattleResult::Loss, -1);
    let mut repeated = outcome(BattleMode::OneVsOne, BattleResult::Win, 1);
    repeated.participating_card_ids = vec![card.id, card.id];

    for bad in [negative, repeated] {
        let err = service
            .record_battle_outcome(db, user.id, bad)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    let err = service
        .record_battle_outcome(db, 999_999, outcome(BattleMode::OneVsOne, BattleResult::Win, 1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotFound);
    Ok(())
}

#[tokio::test]
async fn history_limit_is_clamped() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_test_user(db, "ash").await?;
    let service = ProgressionService::new();

    for coins in 0..3 {
        service
            .record_battle_outcome(db, user.id, outcome(BattleMode::OneVsOne, BattleResult::Win, coins))
            .await?;
    }

    let newest = service.get_history(db, user.id, Some(1)).await?;
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].coins_earned, 2);

    let zero = service.get_history(db, user.id, Some(0)).await?;
    assert_eq!(zero.len(), 1);

    let all = service
        .get_history(db, user.id, Some(MAX_HISTORY_LIMIT * 10))
        .await?;
    assert_eq!(all.len(), 3);
    Ok(())
}
