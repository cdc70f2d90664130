use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Battle format; each mode has its own counter group in player stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleMode {
    #[serde(rename = "1v1")]
    OneVsOne,
    #[serde(rename = "5v5")]
    FiveVsFive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
    Win,
    Loss,
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBattleError(pub String);

impl fmt::Display for ParseBattleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized battle value '{}'", self.0)
    }
}

impl std::error::Error for ParseBattleError {}

impl BattleMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneVsOne => "1v1",
            Self::FiveVsFive => "5v5",
        }
    }
}

impl BattleResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Draw => "draw",
        }
    }
}

impl FromStr for BattleMode {
    type Err = ParseBattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1v1" => Ok(Self::OneVsOne),
            "5v5" => Ok(Self::FiveVsFive),
            other => Err(ParseBattleError(other.to_string())),
        }
    }
}

impl FromStr for BattleResult {
    type Err = ParseBattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "draw" => Ok(Self::Draw),
            other => Err(ParseBattleError(other.to_string())),
        }
    }
}

impl fmt::Display for BattleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BattleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
