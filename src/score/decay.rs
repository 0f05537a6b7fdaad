//! Decaying rest bonuses.
//!
//! A gap of `d` days (or weeks) since a person last worked earns
//! `w + w*k + w*k^2 + ...` over `d - 1` terms, where `w` is the base weight
//! and `k` the decay. A gap of one (working on consecutive days) earns
//! nothing.

use crate::weights::{Weight, Weights};

/// Partial sum of the geometric series `base * decay^i` for `i in 0..gap-1`.
///
/// Non-positive gaps earn nothing.
pub fn decaying_sum(base: f64, decay: f64, gap: i64) -> f64 {
    let mut sum = 0.0;
    let mut term = base;
    for _ in 1..gap {
        sum += term;
        term *= decay;
    }
    sum
}

/// Bonus for `gap` days since the last worked day.
#[inline]
pub fn days_off_bonus(weights: &Weights, gap: i64) -> f64 {
    decaying_sum(weights[Weight::DayOff], weights[Weight::DayOffDecay], gap)
}

/// Bonus for `gap` weeks since the last ward week.
#[inline]
pub fn no_ward_week_bonus(weights: &Weights, gap: i64) -> f64 {
    decaying_sum(
        weights[Weight::NoWardWeek],
        weights[Weight::NoWardWeekDecay],
        gap,
    )
}
