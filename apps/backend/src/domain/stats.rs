//! Effective stats at a level.
//!
//! Every stat grows linearly by 2% of its base per level above 1, floored:
//! `stat(L) = base + base * 2 * (L - 1) / 100`. A level-50 card has roughly
//! double its base stats.

use super::pokemon::BaseStats;
use super::progression::{MAX_LEVEL, MIN_LEVEL};

const GROWTH_PERCENT_PER_LEVEL: i64 = 2;

fn grow(base: i32, level: i32) -> i32 {
    let base = i64::from(base.max(0));
    let steps = i64::from(level - MIN_LEVEL);
    (base + base * GROWTH_PERCENT_PER_LEVEL * steps / 100) as i32
}

pub fn current_stats(base: BaseStats, level: i32) -> BaseStats {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    BaseStats {
        hp: grow(base.hp, level),
        attack: grow(base.attack, level),
        defense: grow(base.defense, level),
        speed: grow(base.speed, level),
    }
}
