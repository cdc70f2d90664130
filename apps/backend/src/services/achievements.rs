//! Achievement engine: evaluates catalog rules against a user's progress.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::achievements::ProgressSnapshot;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::achievements::{self, Achievement, AchievementStatus};
use crate::repos::{cards, stats, users};

/// Achievement domain service.
pub struct AchievementService;

impl AchievementService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregates the rules are evaluated against.
    pub async fn progress_snapshot<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<ProgressSnapshot, DomainError> {
        let player_stats = stats::get_or_create(conn, user_id).await?;
        let card_high = cards::get_highest_level(conn, user_id).await?;
        let user = users::get_user(conn, user_id).await?;

        Ok(ProgressSnapshot {
            total_wins: player_stats.total_wins(),
            legendary_owned: cards::count_legendary(conn, user_id).await?,
            mythical_owned: cards::count_mythical(conn, user_id).await?,
            highest_level: i64::from(player_stats.highest_level.max(card_high)),
            coins: user.coins,
        })
    }

    /// Unlock every satisfied, not-yet-unlocked achievement.
    ///
    /// Returns only what this call unlocked; a repeat call with unchanged
    /// progress returns an empty list.
    pub async fn check_and_unlock<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<Achievement>, AppError> {
        let progress = self.progress_snapshot(conn, user_id).await?;

        let mut newly_unlocked = Vec::new();
        for status in achievements::list_for_user(conn, user_id).await? {
            if status.unlocked || !status.achievement.requirement().is_satisfied(&progress) {
                continue;
            }
            if achievements::unlock(conn, user_id, status.achievement.id).await? {
                info!(
                    user_id,
                    achievement_id = status.achievement.id,
                    name = %status.achievement.name,
                    "achievement unlocked"
                );
                newly_unlocked.push(status.achievement);
            }
        }
        Ok(newly_unlocked)
    }

    pub async fn get_achievements<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<AchievementStatus>, AppError> {
        Ok(achievements::list_for_user(conn, user_id).await?)
    }

    pub async fn seed_defaults<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<u64, AppError> {
        Ok(achievements::seed_defaults(conn).await?)
    }
}

impl Default for AchievementService {
    fn default() -> Self {
        Self::new()
    }
}
