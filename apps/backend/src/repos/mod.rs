//! Repository functions for domain layer.

pub mod achievements;
pub mod battle_history;
pub mod cards;
pub mod stats;
pub mod users;
