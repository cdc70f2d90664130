//! Progression service: turns a finished battle into history, stats, coins,
//! card xp and achievement unlocks.

use std::collections::HashSet;

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::achievements::AchievementService;
use super::cards::CardService;
use crate::adapters::battle_history_sea::BattleCreate;
use crate::adapters::stats_sea::BattleTally;
use crate::domain::battle::{BattleMode, BattleResult};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::achievements::Achievement;
use crate::repos::battle_history::{self, BattleRecord};
use crate::repos::stats::{self, PlayerStats};
use crate::repos::{cards, users};

pub const DEFAULT_HISTORY_LIMIT: u64 = 20;
pub const MAX_HISTORY_LIMIT: u64 = 100;

/// A finished battle as reported by the game client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BattleOutcome {
    pub mode: BattleMode,
    pub result: BattleResult,
    pub coins_earned: i64,
    #[serde(default)]
    pub duration_secs: i32,
    #[serde(default)]
    pub participating_card_ids: Vec<i64>,
    #[serde(default)]
    pub xp_per_card: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardLevel {
    pub card_id: i64,
    pub level: i32,
    pub xp: i32,
    pub leveled_up: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BattleReport {
    pub history: BattleRecord,
    pub stats: PlayerStats,
    pub levels: Vec<CardLevel>,
    pub newly_unlocked: Vec<Achievement>,
}

fn validate_outcome(outcome: &BattleOutcome) -> Result<(), DomainError> {
    if outcome.coins_earned < 0 {
        return Err(DomainError::validation_other(
            "coins_earned must not be negative",
        ));
    }
    if outcome.duration_secs < 0 {
        return Err(DomainError::validation_other(
            "duration_secs must not be negative",
        ));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = outcome
        .participating_card_ids
        .iter()
        .find(|id| !seen.insert(**id))
    {
        return Err(DomainError::validation_other(format!(
            "card {dup} listed more than once"
        )));
    }
    Ok(())
}

/// Progression domain service.
pub struct ProgressionService;

impl ProgressionService {
    pub fn new() -> Self {
        Self
    }

    /// Apply a battle outcome for `user_id` in one transaction.
    ///
    /// Order: history row, stats counters, coins, card xp (and highest level),
    /// then achievement evaluation over the updated state. Any failure rolls
    /// the whole outcome back.
    pub async fn record_battle_outcome<C>(
        &self,
        conn: &C,
        user_id: i64,
        outcome: BattleOutcome,
    ) -> Result<BattleReport, AppError>
    where
        C: ConnectionTrait + TransactionTrait + Send + Sync,
    {
        validate_outcome(&outcome)?;

        let txn = conn.begin().await?;
        users::get_user(&txn, user_id).await?;

        // Ownership first so a foreign card never sees partial effects
        let card_service = CardService::new();
        for card_id in &outcome.participating_card_ids {
            card_service
                .get_card_for_user(&txn, user_id, *card_id)
                .await?;
        }

        let history = battle_history::create_record(
            &txn,
            BattleCreate {
                user_id,
                mode: outcome.mode,
                result: outcome.result,
                coins_earned: outcome.coins_earned,
                duration_secs: outcome.duration_secs,
            },
        )
        .await?;

        let recorded = stats::record_battle(
            &txn,
            user_id,
            BattleTally {
                mode: outcome.mode,
                result: outcome.result,
                coins_earned: outcome.coins_earned,
            },
        )
        .await?;

        users::add_coins(&txn, user_id, outcome.coins_earned).await?;

        let mut levels = Vec::with_capacity(outcome.participating_card_ids.len());
        let mut top_level = recorded.highest_level;
        for card_id in &outcome.participating_card_ids {
            let before = cards::get_card(&txn, *card_id).await?.level;
            let card = cards::add_xp(&txn, *card_id, outcome.xp_per_card).await?;
            top_level = top_level.max(card.level);
            levels.push(CardLevel {
                card_id: card.id,
                level: card.level,
                xp: card.xp,
                leveled_up: card.level > before,
            });
        }
        if top_level > recorded.highest_level {
            stats::update_highest_level(&txn, user_id, top_level).await?;
        }

        let newly_unlocked = AchievementService::new()
            .check_and_unlock(&txn, user_id)
            .await?;
        let stats = stats::get_or_create(&txn, user_id).await?;
        txn.commit().await?;

        info!(
            user_id,
            mode = %outcome.mode,
            result = %outcome.result,
            coins = outcome.coins_earned,
            cards = levels.len(),
            unlocked = newly_unlocked.len(),
            "battle outcome recorded"
        );

        Ok(BattleReport {
            history,
            stats,
            levels,
            newly_unlocked,
        })
    }

    pub async fn get_stats<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<PlayerStats, AppError> {
        Ok(stats::get_or_create(conn, user_id).await?)
    }

    /// Most recent battles, newest first. `limit` defaults to 20, caps at 100.
    pub async fn get_history<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        limit: Option<u64>,
    ) -> Result<Vec<BattleRecord>, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);
        Ok(battle_history::list_for_user(conn, user_id, limit).await?)
    }
}

impl Default for ProgressionService {
    fn default() -> Self {
        Self::new()
    }
}
