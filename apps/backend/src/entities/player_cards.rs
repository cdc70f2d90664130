use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "pokemon_name")]
    pub pokemon_name: String,
    pub level: i32,
    pub xp: i32,
    #[sea_orm(column_name = "base_hp")]
    pub base_hp: i32,
    #[sea_orm(column_name = "base_attack")]
    pub base_attack: i32,
    #[sea_orm(column_name = "base_defense")]
    pub base_defense: i32,
    #[sea_orm(column_name = "base_speed")]
    pub base_speed: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub types: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub moves: Json,
    pub sprite: String,
    #[sea_orm(column_name = "is_legendary")]
    pub is_legendary: bool,
    #[sea_orm(column_name = "is_mythical")]
    pub is_mythical: bool,
    #[sea_orm(column_name = "in_deck")]
    pub in_deck: bool,
    #[sea_orm(column_name = "deck_position")]
    pub deck_position: Option<i16>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
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
