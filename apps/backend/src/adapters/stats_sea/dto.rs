//! DTOs for stats_sea adapter.

use crate::domain::battle::{BattleMode, BattleResult};

/// One completed battle's contribution to the aggregate counters.
#[derive(Debug, Clone, Copy)]
pub struct BattleTally {
    pub mode: BattleMode,
    pub result: BattleResult,
    pub coins_earned: i64,
}

/// Absolute overwrite of every counter. Rows whose stored counters exceed
/// the new values are left untouched.
#[derive(Debug, Clone, Default)]
pub struct StatsUpdate {
    pub user_id: i64,
    pub total_battles_1v1: i64,
    pub wins_1v1: i64,
    pub losses_1v1: i64,
    pub total_battles_5v5: i64,
    pub wins_5v5: i64,
    pub losses_5v5: i64,
    pub total_coins_earned: i64,
    pub highest_level: i32,
}
