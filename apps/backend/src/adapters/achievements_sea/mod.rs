//! SeaORM adapter for the achievement catalog and per-user unlocks.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{achievements, user_achievements};

pub mod dto;

pub use dto::AchievementCreate;

fn active_from(dto: AchievementCreate) -> achievements::ActiveModel {
    achievements::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        icon: Set(dto.icon),
        requirement_type: Set(dto.requirement_type),
        requirement_value: Set(dto.requirement_value),
    }
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AchievementCreate,
) -> Result<achievements::Model, sea_orm::DbErr> {
    active_from(dto).insert(conn).await
}

/// Insert unless an achievement with the same name exists. Returns rows inserted.
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AchievementCreate,
) -> Result<u64, sea_orm::DbErr> {
    achievements::Entity::insert(active_from(dto))
        .on_conflict(
            OnConflict::column(achievements::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<achievements::Model>, sea_orm::DbErr> {
    achievements::Entity::find()
        .order_by_asc(achievements::Column::Id)
        .all(conn)
        .await
}

pub async fn list_unlocks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<user_achievements::Model>, sea_orm::DbErr> {
    user_achievements::Entity::find()
        .filter(user_achievements::Column::UserId.eq(user_id))
        .order_by_asc(user_achievements::Column::AchievementId)
        .all(conn)
        .await
}

/// Record an unlock once. Returns 1 when this call inserted the row.
pub async fn unlock<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    achievement_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let row = user_achievements::ActiveModel {
        user_id: Set(user_id),
        achievement_id: Set(achievement_id),
        unlocked_at: Set(time::OffsetDateTime::now_utc()),
    };

    user_achievements::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                user_achievements::Column::UserId,
                user_achievements::Column::AchievementId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await
}
