//! Stats repository: one aggregate row per user, created lazily.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::stats_sea::{self as stats_adapter, BattleTally, StatsUpdate};
use crate::adapters::users_sea as users_adapter;
use crate::entities::player_stats;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Stats domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub user_id: i64,
    pub total_battles_1v1: i64,
    pub wins_1v1: i64,
    pub losses_1v1: i64,
    pub total_battles_5v5: i64,
    pub wins_5v5: i64,
    pub losses_5v5: i64,
    pub total_coins_earned: i64,
    pub highest_level: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl PlayerStats {
    pub fn total_wins(&self) -> i64 {
        self.wins_1v1 + self.wins_5v5
    }

    pub fn total_battles(&self) -> i64 {
        self.total_battles_1v1 + self.total_battles_5v5
    }
}

fn stats_not_found(user_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Stats, format!("stats for user {user_id} not found"))
}

pub async fn find_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<PlayerStats>, DomainError> {
    let row = stats_adapter::find(conn, user_id).await?;
    Ok(row.map(PlayerStats::from))
}

/// Existing row, or a freshly inserted zero row.
///
/// Safe under concurrent first access: the insert is `ON CONFLICT DO NOTHING`
/// and the row is re-read afterwards, whoever won.
pub async fn get_or_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<PlayerStats, DomainError> {
    if let Some(stats) = find_stats(conn, user_id).await? {
        return Ok(stats);
    }

    if users_adapter::find_user_by_id(conn, user_id).await?.is_none() {
        return Err(DomainError::not_found(
            NotFoundKind::User,
            format!("user {user_id} not found"),
        ));
    }

    stats_adapter::insert_if_absent(conn, user_id).await?;
    find_stats(conn, user_id)
        .await?
        .ok_or_else(|| stats_not_found(user_id))
}

/// Count one battle. Every affected counter strictly increases.
pub async fn record_battle<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    tally: BattleTally,
) -> Result<PlayerStats, DomainError> {
    get_or_create(conn, user_id).await?;
    match stats_adapter::record_battle(conn, user_id, tally).await? {
        0 => Err(stats_not_found(user_id)),
        _ => find_stats(conn, user_id)
            .await?
            .ok_or_else(|| stats_not_found(user_id)),
    }
}

/// `highest_level := max(highest_level, level)`. Returns whether it moved.
pub async fn update_highest_level<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    level: i32,
) -> Result<bool, DomainError> {
    get_or_create(conn, user_id).await?;
    Ok(stats_adapter::raise_highest_level(conn, user_id, level).await? > 0)
}

/// Reject writes that would lower a counter or report more decided battles
/// than were fought in a mode.
fn check_stats_update(current: &PlayerStats, next: &PlayerStats) -> Result<(), DomainError> {
    let per_mode = [
        ("1v1", next.total_battles_1v1, next.wins_1v1, next.losses_1v1),
        ("5v5", next.total_battles_5v5, next.wins_5v5, next.losses_5v5),
    ];
    for (mode, total, wins, losses) in per_mode {
        if wins + losses > total {
            return Err(DomainError::validation_other(format!(
                "{mode}: wins {wins} + losses {losses} exceed {total} battles"
            )));
        }
    }

    let counters = [
        ("total_battles_1v1", current.total_battles_1v1, next.total_battles_1v1),
        ("wins_1v1", current.wins_1v1, next.wins_1v1),
        ("losses_1v1", current.losses_1v1, next.losses_1v1),
        ("total_battles_5v5", current.total_battles_5v5, next.total_battles_5v5),
        ("wins_5v5", current.wins_5v5, next.wins_5v5),
        ("losses_5v5", current.losses_5v5, next.losses_5v5),
        ("total_coins_earned", current.total_coins_earned, next.total_coins_earned),
        (
            "highest_level",
            i64::from(current.highest_level),
            i64::from(next.highest_level),
        ),
    ];
    match counters.iter().find(|(_, old, new)| new < old) {
        Some((name, old, new)) => Err(DomainError::validation_other(format!(
            "{name} cannot decrease from {old} to {new}"
        ))),
        None => Ok(()),
    }
}

/// Overwrite the counters of `stats.user_id`; they may only grow.
pub async fn update_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    stats: &PlayerStats,
) -> Result<PlayerStats, DomainError> {
    let current = find_stats(conn, stats.user_id)
        .await?
        .ok_or_else(|| stats_not_found(stats.user_id))?;
    check_stats_update(&current, stats)?;

    let dto = StatsUpdate {
        user_id: stats.user_id,
        total_battles_1v1: stats.total_battles_1v1,
        wins_1v1: stats.wins_1v1,
        losses_1v1: stats.losses_1v1,
        total_battles_5v5: stats.total_battles_5v5,
        wins_5v5: stats.wins_5v5,
        losses_5v5: stats.losses_5v5,
        total_coins_earned: stats.total_coins_earned,
        highest_level: stats.highest_level,
    };
    match stats_adapter::update_stats(conn, dto).await? {
        0 => Err(DomainError::validation_other(format!(
            "stats for user {} changed concurrently; counters cannot decrease",
            stats.user_id
        ))),
        _ => find_stats(conn, stats.user_id)
            .await?
            .ok_or_else(|| stats_not_found(stats.user_id)),
    }
}

pub async fn delete_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<(), DomainError> {
    match stats_adapter::delete(conn, user_id).await? {
        0 => Err(stats_not_found(user_id)),
        _ => Ok(()),
    }
}

impl From<player_stats::Model> for PlayerStats {
    fn from(model: player_stats::Model) -> Self {
        Self {
            user_id: model.user_id,
            total_battles_1v1: model.total_battles_1v1,
            wins_1v1: model.wins_1v1,
            losses_1v1: model.losses_1v1,
            total_battles_5v5: model.total_battles_5v5,
            wins_5v5: model.wins_5v5,
            losses_5v5: model.losses_5v5,
            total_coins_earned: model.total_coins_earned,
            highest_level: model.highest_level,
            updated_at: model.updated_at,
        }
    }
}
