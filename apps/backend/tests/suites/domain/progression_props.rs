use pokedeck_backend::domain::progression::{
    apply_xp, is_valid_progress, xp_to_next, MAX_LEVEL, MIN_LEVEL,
};
use pokedeck_backend::domain::stats::current_stats;
use pokedeck_backend::domain::BaseStats;
use proptest::prelude::*;

fn valid_progress() -> impl Strategy<Value = (i32, i32)> {
    (MIN_LEVEL..=MAX_LEVEL).prop_flat_map(|level| {
        let max_xp = if level == MAX_LEVEL {
            0
        } else {
            (xp_to_next(level) - 1) as i32
        };
        (Just(level), 0..=max_xp)
    })
}

fn base_stats() -> impl Strategy<Value = BaseStats> {
    (1..=255i32, 1..=255i32, 1..=255i32, 1..=255i32).prop_map(|(hp, attack, defense, speed)| {
        BaseStats {
            hp,
            attack,
            defense,
            speed,
        }
    })
}

/// Total xp spent to reach `(level, xp)` from level 1.
fn lifetime_xp(level: i32, xp: i32) -> i64 {
    (MIN_LEVEL..level).map(xp_to_next).sum::<i64>() + i64::from(xp)
}

proptest! {
    #[test]
    fn result_is_always_valid((level, xp) in valid_progress(), delta in any::<u32>()) {
        let (l, x) = apply_xp(level, xp, delta);
        prop_assert!(is_valid_progress(l, x));
    }

    #[test]
    fn level_never_decreases((level, xp) in valid_progress(), delta in any::<u32>()) {
        let (l, _) = apply_xp(level, xp, delta);
        prop_assert!(l >= level);
    }

    #[test]
    fn xp_is_conserved_below_the_cap((level, xp) in valid_progress(), delta in 0u32..200_000) {
        let (l, x) = apply_xp(level, xp, delta);
        if l < MAX_LEVEL {
            prop_assert_eq!(lifetime_xp(l, x), lifetime_xp(level, xp) + i64::from(delta));
        }
    }

    #[test]
    fn split_grants_match_one_grant((level, xp) in valid_progress(), a in 0u32..50_000, b in 0u32..50_000) {
        let (l1, x1) = apply_xp(level, xp, a);
        let split = apply_xp(l1, x1, b);
        prop_assert_eq!(split, apply_xp(level, xp, a + b));
    }

    #[test]
    fn stats_grow_with_level(base in base_stats(), level in MIN_LEVEL..MAX_LEVEL) {
        let lower = current_stats(base, level);
        let higher = current_stats(base, level + 1);
        prop_assert!(higher.hp >= lower.hp);
        prop_assert!(higher.attack >= lower.attack);
        prop_assert!(higher.defense >= lower.defense);
        prop_assert!(higher.speed >= lower.speed);
        prop_assert_eq!(current_stats(base, MIN_LEVEL), base);
    }
}
