//! SeaORM adapter for the append-only battle log.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::battle_history;

pub mod dto;

pub use dto::BattleCreate;

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: BattleCreate,
) -> Result<battle_history::Model, sea_orm::DbErr> {
    let row = battle_history::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        mode: Set(dto.mode.into()),
        result: Set(dto.result.into()),
        coins_earned: Set(dto.coins_earned),
        duration: Set(dto.duration_secs),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    row.insert(conn).await
}

/// Newest first, at most `limit` rows.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    limit: u64,
) -> Result<Vec<battle_history::Model>, sea_orm::DbErr> {
    battle_history::Entity::find()
        .filter(battle_history::Column::UserId.eq(user_id))
        .order_by_desc(battle_history::Column::CreatedAt)
        .order_by_desc(battle_history::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn count_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    battle_history::Entity::find()
        .filter(battle_history::Column::UserId.eq(user_id))
        .count(conn)
        .await
}
