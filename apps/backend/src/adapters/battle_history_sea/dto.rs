//! DTOs for battle_history_sea adapter.

use crate::domain::battle::{BattleMode, BattleResult};

#[derive(Debug, Clone, Copy)]
pub struct BattleCreate {
    pub user_id: i64,
    pub mode: BattleMode,
    pub result: BattleResult,
    pub coins_earned: i64,
    pub duration_secs: i32,
}
