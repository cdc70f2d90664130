//! SeaORM adapter for the per-user stats row.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::domain::battle::{BattleMode, BattleResult};
use crate::entities::player_stats;

pub mod dto;

pub use dto::{BattleTally, StatsUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn now() -> time::OffsetDateTime {
    time::OffsetDateTime::now_utc()
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<player_stats::Model>, sea_orm::DbErr> {
    player_stats::Entity::find_by_id(user_id).one(conn).await
}

/// Insert a zeroed row unless one exists. Returns rows inserted (0 or 1).
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let row = player_stats::ActiveModel {
        user_id: Set(user_id),
        total_battles_1v1: Set(0),
        wins_1v1: Set(0),
        losses_1v1: Set(0),
        total_battles_5v5: Set(0),
        wins_5v5: Set(0),
        losses_5v5: Set(0),
        total_coins_earned: Set(0),
        highest_level: Set(0),
        updated_at: Set(now()),
    };

    player_stats::Entity::insert(row)
        .on_conflict(
            OnConflict::column(player_stats::Column::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
}

fn counters_for(mode: BattleMode) -> (player_stats::Column, player_stats::Column, player_stats::Column) {
    match mode {
        BattleMode::OneVsOne => (
            player_stats::Column::TotalBattles1v1,
            player_stats::Column::Wins1v1,
            player_stats::Column::Losses1v1,
        ),
        BattleMode::FiveVsFive => (
            player_stats::Column::TotalBattles5v5,
            player_stats::Column::Wins5v5,
            player_stats::Column::Losses5v5,
        ),
    }
}

/// Bump the counters for one battle in a single `col = col + n` statement.
pub async fn record_battle<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    tally: BattleTally,
) -> Result<u64, sea_orm::DbErr> {
    let (total, wins, losses) = counters_for(tally.mode);

    let mut update = player_stats::Entity::update_many()
        .col_expr(total, Expr::col(total).add(1))
        .col_expr(
            player_stats::Column::TotalCoinsEarned,
            Expr::col(player_stats::Column::TotalCoinsEarned).add(tally.coins_earned),
        )
        .col_expr(player_stats::Column::UpdatedAt, Expr::val(now()).into());

    update = match tally.result {
        BattleResult::Win => update.col_expr(wins, Expr::col(wins).add(1)),
        BattleResult::Loss => update.col_expr(losses, Expr::col(losses).add(1)),
        BattleResult::Draw => update,
    };

    let result = update
        .filter(player_stats::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// `highest_level := max(highest_level, level)`, portable across engines.
pub async fn raise_highest_level<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    level: i32,
) -> Result<u64, sea_orm::DbErr> {
    let result = player_stats::Entity::update_many()
        .col_expr(player_stats::Column::HighestLevel, Expr::val(level).into())
        .col_expr(player_stats::Column::UpdatedAt, Expr::val(now()).into())
        .filter(player_stats::Column::UserId.eq(user_id))
        .filter(player_stats::Column::HighestLevel.lt(level))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StatsUpdate,
) -> Result<u64, sea_orm::DbErr> {
    let result = player_stats::Entity::update_many()
        .col_expr(
            player_stats::Column::TotalBattles1v1,
            Expr::val(dto.total_battles_1v1).into(),
        )
        .col_expr(player_stats::Column::Wins1v1, Expr::val(dto.wins_1v1).into())
        .col_expr(player_stats::Column::Losses1v1, Expr::val(dto.losses_1v1).into())
        .col_expr(
            player_stats::Column::TotalBattles5v5,
            Expr::val(dto.total_battles_5v5).into(),
        )
        .col_expr(player_stats::Column::Wins5v5, Expr::val(dto.wins_5v5).into())
        .col_expr(player_stats::Column::Losses5v5, Expr::val(dto.losses_5v5).into())
        .col_expr(
            player_stats::Column::TotalCoinsEarned,
            Expr::val(dto.total_coins_earned).into(),
        )
        .col_expr(
            player_stats::Column::HighestLevel,
            Expr::val(dto.highest_level).into(),
        )
        .col_expr(player_stats::Column::UpdatedAt, Expr::val(now()).into())
        .filter(player_stats::Column::UserId.eq(dto.user_id))
        // Never lower a counter, even if the row moved since it was read
        .filter(player_stats::Column::TotalBattles1v1.lte(dto.total_battles_1v1))
        .filter(player_stats::Column::Wins1v1.lte(dto.wins_1v1))
        .filter(player_stats::Column::Losses1v1.lte(dto.losses_1v1))
        .filter(player_stats::Column::TotalBattles5v5.lte(dto.total_battles_5v5))
        .filter(player_stats::Column::Wins5v5.lte(dto.wins_5v5))
        .filter(player_stats::Column::Losses5v5.lte(dto.losses_5v5))
        .filter(player_stats::Column::TotalCoinsEarned.lte(dto.total_coins_earned))
        .filter(player_stats::Column::HighestLevel.lte(dto.highest_level))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = player_stats::Entity::delete_by_id(user_id).exec(conn).await?;
    Ok(result.rows_affected)
}
