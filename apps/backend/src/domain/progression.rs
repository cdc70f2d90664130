//! Level curve: advancing from level `L` to `L + 1` costs `100 * L` xp.

pub const MIN_LEVEL: i32 = 1;
pub const MAX_LEVEL: i32 = 50;

/// Xp needed to leave `level`.
pub const fn xp_to_next(level: i32) -> i64 {
    100 * level as i64
}

/// Apply `delta` xp to a card at `(level, xp)` and return the new `(level, xp)`.
///
/// Levels up while the pool covers the next step. At `MAX_LEVEL` the residual
/// is discarded and xp pinned at 0.
pub fn apply_xp(level: i32, xp: i32, delta: u32) -> (i32, i32) {
    let mut level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    if level >= MAX_LEVEL {
        return (MAX_LEVEL, 0);
    }

    let mut pool = i64::from(xp.max(0)) + i64::from(delta);
    while level < MAX_LEVEL && pool >= xp_to_next(level) {
        pool -= xp_to_next(level);
        level += 1;
    }

    if level >= MAX_LEVEL {
        return (MAX_LEVEL, 0);
    }
    // Below MAX_LEVEL the pool is < 100 * 49
    (level, pool as i32)
}

/// Whether `(level, xp)` is a reachable state on the curve.
pub fn is_valid_progress(level: i32, xp: i32) -> bool {
    match level {
        MAX_LEVEL => xp == 0,
        l if (MIN_LEVEL..MAX_LEVEL).contains(&l) => xp >= 0 && i64::from(xp) < xp_to_next(l),
        _ => false,
    }
}
