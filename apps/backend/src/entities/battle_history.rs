use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::battle::{BattleMode, BattleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum Mode {
    #[sea_orm(string_value = "1v1")]
    OneVsOne,
    #[sea_orm(string_value = "5v5")]
    FiveVsFive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum Outcome {
    #[sea_orm(string_value = "win")]
    Win,
    #[sea_orm(string_value = "loss")]
    Loss,
    #[sea_orm(string_value = "draw")]
    Draw,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "battle_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    pub mode: Mode,
    pub result: Outcome,
    #[sea_orm(column_name = "coins_earned")]
    pub coins_earned: i64,
    pub duration: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
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

impl From<BattleMode> for Mode {
    fn from(m: BattleMode) -> Self {
        match m {
            BattleMode::OneVsOne => Mode::OneVsOne,
            BattleMode::FiveVsFive => Mode::FiveVsFive,
        }
    }
}

impl From<Mode> for BattleMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::OneVsOne => BattleMode::OneVsOne,
            Mode::FiveVsFive => BattleMode::FiveVsFive,
        }
    }
}

impl From<BattleResult> for Outcome {
    fn from(r: BattleResult) -> Self {
        match r {
            BattleResult::Win => Outcome::Win,
            BattleResult::Loss => Outcome::Loss,
            BattleResult::Draw => Outcome::Draw,
        }
    }
}

impl From<Outcome> for BattleResult {
    fn from(r: Outcome) -> Self {
        match r {
            Outcome::Win => BattleResult::Win,
            Outcome::Loss => BattleResult::Loss,
            Outcome::Draw => BattleResult::Draw,
        }
    }
}
