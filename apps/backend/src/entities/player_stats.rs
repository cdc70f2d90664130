use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "total_battles_1v1")]
    pub total_battles_1v1: i64,
    #[sea_orm(column_name = "wins_1v1")]
    pub wins_1v1: i64,
    #[sea_orm(column_name = "losses_1v1")]
    pub losses_1v1: i64,
    #[sea_orm(column_name = "total_battles_5v5")]
    pub total_battles_5v5: i64,
    #[sea_orm(column_name = "wins_5v5")]
    pub wins_5v5: i64,
    #[sea_orm(column_name = "losses_5v5")]
    pub losses_5v5: i64,
    #[sea_orm(column_name = "total_coins_earned")]
    pub total_coins_earned: i64,
    #[sea_orm(column_name = "highest_level")]
    pub highest_level: i32,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
