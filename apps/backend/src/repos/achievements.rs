//! Achievement catalog and unlock repository.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::info;

use crate::adapters::achievements_sea::{self as achievements_adapter, AchievementCreate};
use crate::domain::achievements::{default_catalog, Requirement};
use crate::entities::achievements;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub requirement_type: String,
    pub requirement_value: i64,
}

impl Achievement {
    pub fn requirement(&self) -> Requirement {
        Requirement::parse(&self.requirement_type, self.requirement_value)
    }
}

/// Catalog entry with the caller's unlock state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub achievement: Achievement,
    pub unlocked: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub unlocked_at: Option<time::OffsetDateTime>,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AchievementCreate,
) -> Result<Achievement, DomainError> {
    let row = achievements_adapter::create(conn, dto).await?;
    Ok(Achievement::from(row))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Achievement>, DomainError> {
    let rows = achievements_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Achievement::from).collect())
}

/// Whole catalog, each entry flagged with the user's unlock.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<AchievementStatus>, DomainError> {
    let unlocked: HashMap<i64, time::OffsetDateTime> =
        achievements_adapter::list_unlocks(conn, user_id)
            .await?
            .into_iter()
            .map(|u| (u.achievement_id, u.unlocked_at))
            .collect();

    Ok(list_all(conn)
        .await?
        .into_iter()
        .map(|achievement| {
            let unlocked_at = unlocked.get(&achievement.id).copied();
            AchievementStatus {
                achievement,
                unlocked: unlocked_at.is_some(),
                unlocked_at,
            }
        })
        .collect())
}

/// Insert-once. Returns `true` only for the call that created the row.
pub async fn unlock<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    achievement_id: i64,
) -> Result<bool, DomainError> {
    Ok(achievements_adapter::unlock(conn, user_id, achievement_id).await? == 1)
}

/// Insert the built-in catalog, skipping names already present.
pub async fn seed_defaults<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    let mut inserted = 0;
    for seed in default_catalog() {
        let dto = AchievementCreate::new(
            seed.name,
            seed.requirement.type_name(),
            seed.requirement.threshold().unwrap_or_default(),
        )
        .with_description(seed.description)
        .with_icon(seed.icon);
        inserted += achievements_adapter::insert_if_absent(conn, dto).await?;
    }
    info!(inserted, "achievement catalog seeded");
    Ok(inserted)
}

impl From<achievements::Model> for Achievement {
    fn from(model: achievements::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            icon: model.icon,
            requirement_type: model.requirement_type,
            requirement_value: model.requirement_value,
        }
    }
}
