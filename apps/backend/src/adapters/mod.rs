//! SeaORM adapters. Free functions over `ConnectionTrait` returning `DbErr`.

pub mod achievements_sea;
pub mod battle_history_sea;
pub mod cards_sea;
pub mod stats_sea;
pub mod users_sea;
