use serde::{Deserialize, Serialize};

/// Species base stats, copied onto each card at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

/// A move as stored on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub power: i32,
    pub stamina_cost: i32,
    #[serde(rename = "type")]
    pub move_type: String,
}

/// Floor applied to every move's stamina cost, including zero-power moves.
pub const MIN_STAMINA_COST: i32 = 5;

pub fn stamina_cost_for(power: i32) -> i32 {
    (power / 4).max(MIN_STAMINA_COST)
}

impl Move {
    pub fn new(name: impl Into<String>, power: i32, move_type: impl Into<String>) -> Self {
        let power = power.max(0);
        Self {
            name: name.into(),
            power,
            stamina_cost: stamina_cost_for(power),
            move_type: move_type.into(),
        }
    }
}
