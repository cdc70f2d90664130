//! Battle history repository (append-only).

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::battle_history_sea::{self as history_adapter, BattleCreate};
use crate::domain::battle::{BattleMode, BattleResult};
use crate::entities::battle_history;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleRecord {
    pub id: i64,
    pub user_id: i64,
    pub mode: BattleMode,
    pub result: BattleResult,
    pub coins_earned: i64,
    pub duration_secs: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

pub async fn create_record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: BattleCreate,
) -> Result<BattleRecord, DomainError> {
    let row = history_adapter::create(conn, dto).await?;
    Ok(BattleRecord::from(row))
}

/// Newest first, at most `limit` entries.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    limit: u64,
) -> Result<Vec<BattleRecord>, DomainError> {
    let rows = history_adapter::list_for_user(conn, user_id, limit).await?;
    Ok(rows.into_iter().map(BattleRecord::from).collect())
}

pub async fn count_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, DomainError> {
    Ok(history_adapter::count_for_user(conn, user_id).await?)
}

impl From<battle_history::Model> for BattleRecord {
    fn from(model: battle_history::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            mode: model.mode.into(),
            result: model.result.into(),
            coins_earned: model.coins_earned,
            duration_secs: model.duration,
            created_at: model.created_at,
        }
    }
}
