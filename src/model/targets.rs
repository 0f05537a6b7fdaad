//! Fair-share target allocation.
//!
//! Each person receives a share of every pool-wide quantity proportional to
//! their effective full-time fraction. Targets include biases; the derived
//! spacing targets are computed from the bias-free expectation and are only
//! informational (the scorer never reads them).

use super::config::PoolTotals;
use super::person::{Person, Spacing, Targets};

/// Share of the on call pool and of the ward pool for one person.
fn shares(person: &Person, totals: &PoolTotals) -> (f64, f64) {
    let on_call = person.effective_full_time / totals.effective_on_call_people;
    let ward = if person.no_ward_weeks {
        0.0
    } else {
        person.effective_full_time / totals.effective_ward_people
    };
    (on_call, ward)
}

/// Bias-inclusive fair-share targets.
pub(crate) fn targets_for(person: &Person, totals: &PoolTotals) -> Targets {
    let (on_call, ward) = shares(person, totals);
    Targets {
        on_call_days: on_call * totals.on_call_days,
        on_call_weekends: on_call * totals.on_call_weekends,
        ward_weeks: ward * totals.ward_weeks,
        on_call_bank_holidays: on_call * totals.bank_holidays,
    }
}

/// Day-off block size and ward week spacing implied by the bias-free targets.
pub(crate) fn spacing_for(person: &Person, targets: &Targets) -> Spacing {
    let expected_on_call_days = targets.on_call_days - person.bias.on_call_days;
    let expected_weekends = targets.on_call_weekends - person.bias.on_call_weekends;
    let expected_ward_weeks = targets.ward_weeks - person.bias.ward_weeks;

    let expected_working_days =
        expected_on_call_days + 2.0 * expected_weekends + 5.0 * expected_ward_weeks;

    // a weekend on call straight after a ward week is one block of work, not two
    let follow_on = expected_ward_weeks.min(expected_weekends);
    let expected_shifts = expected_on_call_days + expected_weekends + expected_ward_weeks - follow_on;

    let days = person.non_holiday_days as f64;
    Spacing {
        day_off_block_size: positive_ratio(days - expected_working_days, expected_shifts),
        ward_week_spacing: positive_ratio(days, expected_ward_weeks),
    }
}

fn positive_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 && denominator.is_finite() {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Fills in targets and spacing for every person.
///
/// The pool counts in `totals` must be positive; `RotaConfigBuilder::build`
/// rejects configurations where they are not.
pub(crate) fn allocate(people: &mut [Person], totals: &PoolTotals) {
    for person in people.iter_mut() {
        let targets = targets_for(person, totals);
        person.spacing = spacing_for(person, &targets);
        person.targets = targets;

        tracing::debug!(
            event = "targets_allocated",
            person = %person.name,
            on_call_days = targets.on_call_days,
            on_call_weekends = targets.on_call_weekends,
            ward_weeks = targets.ward_weeks,
            on_call_bank_holidays = targets.on_call_bank_holidays,
        );
    }
}
