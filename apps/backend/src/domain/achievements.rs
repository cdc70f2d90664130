//! Achievement requirement rules.
//!
//! Catalog rows carry `(requirement_type, requirement_value)` as plain data;
//! they are parsed into a closed set here. Unrecognized types never unlock.

/// Aggregates a rule is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total_wins: i64,
    pub legendary_owned: i64,
    pub mythical_owned: i64,
    pub highest_level: i64,
    pub coins: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    TotalWins(i64),
    LegendaryOwned(i64),
    MythicalOwned(i64),
    MaxLevel(i64),
    CoinsTotal(i64),
    Unknown(String),
}

impl Requirement {
    pub fn parse(requirement_type: &str, value: i64) -> Self {
        match requirement_type {
            "total_wins" => Self::TotalWins(value),
            "legendary_owned" => Self::LegendaryOwned(value),
            "mythical_owned" => Self::MythicalOwned(value),
            "max_level" => Self::MaxLevel(value),
            "coins_total" => Self::CoinsTotal(value),
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::TotalWins(_) => "total_wins",
            Self::LegendaryOwned(_) => "legendary_owned",
            Self::MythicalOwned(_) => "mythical_owned",
            Self::MaxLevel(_) => "max_level",
            Self::CoinsTotal(_) => "coins_total",
            Self::Unknown(t) => t,
        }
    }

    pub fn threshold(&self) -> Option<i64> {
        match self {
            Self::TotalWins(n)
            | Self::LegendaryOwned(n)
            | Self::MythicalOwned(n)
            | Self::MaxLevel(n)
            | Self::CoinsTotal(n) => Some(*n),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_satisfied(&self, p: &ProgressSnapshot) -> bool {
        match *self {
            Self::TotalWins(n) => p.total_wins >= n,
            Self::LegendaryOwned(n) => p.legendary_owned >= n,
            Self::MythicalOwned(n) => p.mythical_owned >= n,
            Self::MaxLevel(n) => p.highest_level >= n,
            Self::CoinsTotal(n) => p.coins >= n,
            Self::Unknown(_) => false,
        }
    }
}

/// Catalog entry shipped with the server and seeded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: Requirement,
}

pub fn default_catalog() -> Vec<AchievementSeed> {
    vec![
        AchievementSeed {
            name: "First Victory",
            description: "Win your first battle",
            icon: "trophy",
            requirement: Requirement::TotalWins(1),
        },
        AchievementSeed {
            name: "Seasoned Trainer",
            description: "Win 10 battles",
            icon: "medal",
            requirement: Requirement::TotalWins(10),
        },
        AchievementSeed {
            name: "Champion",
            description: "Win 100 battles",
            icon: "crown",
            requirement: Requirement::TotalWins(100),
        },
        AchievementSeed {
            name: "Legend Keeper",
            description: "Own a legendary Pokemon",
            icon: "star",
            requirement: Requirement::LegendaryOwned(1),
        },
        AchievementSeed {
            name: "Myth Hunter",
            description: "Own a mythical Pokemon",
            icon: "sparkles",
            requirement: Requirement::MythicalOwned(1),
        },
        AchievementSeed {
            name: "Rising Star",
            description: "Raise a card to level 10",
            icon: "arrow-up",
            requirement: Requirement::MaxLevel(10),
        },
        AchievementSeed {
            name: "Master Trainer",
            description: "Raise a card to level 50",
            icon: "flame",
            requirement: Requirement::MaxLevel(50),
        },
        AchievementSeed {
            name: "Coin Collector",
            description: "Hold 1000 coins",
            icon: "coins",
            requirement: Requirement::CoinsTotal(1000),
        },
    ]
}
