//! Pure progression rules. Nothing in here touches the database or suspends.

pub mod achievements;
pub mod battle;
pub mod deck;
pub mod pokemon;
pub mod progression;
pub mod stats;

pub use pokemon::{BaseStats, Move};
