//! Neighbor generation: one local edit of a schedule.
//!
//! Two moves, chosen with equal probability:
//!
//! - **Reassign**: a random slot of a random week gets a different person.
//! - **Swap**: two slots of the same kind exchange occupants. Weekday on
//!   call slots swap with any weekday on call slot (possibly a different
//!   weekday); ward swaps with ward; weekend with weekend. Picking the same
//!   slot twice is allowed and leaves the schedule unchanged.

use crate::model::{RotaConfig, Schedule, Shift, SHIFTS_PER_WEEK, WEEKDAYS};
use crate::random::UniformSource;

/// Position of one shift slot in a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub week: usize,
    pub shift: Shift,
}

impl Slot {
    pub fn new(week: usize, shift: Shift) -> Self {
        Self { week, shift }
    }

    fn random<U: UniformSource + ?Sized>(config: &RotaConfig, rng: &mut U) -> Self {
        let week = rng.next_below(config.week_count());
        let shift = Shift::ALL[rng.next_below(SHIFTS_PER_WEEK)];
        Self { week, shift }
    }
}

/// A single local edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborMove {
    Reassign { slot: Slot, person: usize },
    Swap { first: Slot, second: Slot },
}

impl NeighborMove {
    /// Reassign or swap with equal probability.
    pub fn random<U: UniformSource + ?Sized>(
        config: &RotaConfig,
        schedule: &Schedule,
        rng: &mut U,
    ) -> Self {
        match rng.next_below(2) {
            0 => Self::random_reassign(config, schedule, rng),
            _ => Self::random_swap(config, rng),
        }
    }

    /// Uniform slot, uniform new occupant other than the current one.
    ///
    /// With a single person the move reassigns that same person.
    pub fn random_reassign<U: UniformSource + ?Sized>(
        config: &RotaConfig,
        schedule: &Schedule,
        rng: &mut U,
    ) -> Self {
        let slot = Slot::random(config, rng);
        let person_count = config.person_count();
        let person = if person_count > 1 {
            let current = schedule.get(slot.week, slot.shift);
            let drawn = rng.next_below(person_count - 1);
            if drawn >= current {
                drawn + 1
            } else {
                drawn
            }
        } else {
            0
        };
        NeighborMove::Reassign { slot, person }
    }

    /// Uniform first slot; second slot of the same kind in a uniform week.
    pub fn random_swap<U: UniformSource + ?Sized>(config: &RotaConfig, rng: &mut U) -> Self {
        let first = Slot::random(config, rng);
        let week = rng.next_below(config.week_count());
        let shift = if first.shift.is_weekday_on_call() {
            Shift::WEEKDAY_ON_CALL[rng.next_below(WEEKDAYS)]
        } else {
            first.shift
        };
        NeighborMove::Swap {
            first,
            second: Slot { week, shift },
        }
    }

    /// Applies the move in place.
    pub fn apply(&self, schedule: &mut Schedule) {
        match *self {
            NeighborMove::Reassign { slot, person } => {
                schedule.set(slot.week, slot.shift, person);
            }
            NeighborMove::Swap { first, second } => {
                let a = schedule.get(first.week, first.shift);
                let b = schedule.get(second.week, second.shift);
                schedule.set(first.week, first.shift, b);
                schedule.set(second.week, second.shift, a);
            }
        }
    }
}

/// Returns a neighbor of `schedule`, leaving `schedule` untouched.
///
/// # Examples
///
/// ```
/// use u_rota::model::{PersonSpec, RotaConfig, Schedule};
/// use u_rota::neighbor::mutate;
/// use u_rota::random::create_rng;
///
/// let mut builder = RotaConfig::builder(2);
/// builder.add_person(PersonSpec::new("a")).unwrap();
/// builder.add_person(PersonSpec::new("b")).unwrap();
/// let config = builder.build().unwrap();
///
/// let mut rng = create_rng(3);
/// let source = Schedule::random(&config, &mut rng);
/// let neighbor = mutate(&config, &source, &mut rng);
/// assert!(source.diff_count(&neighbor) <= 2);
/// ```
pub fn mutate<U: UniformSource + ?Sized>(
    config: &RotaConfig,
    schedule: &Schedule,
    rng: &mut U,
) -> Schedule {
    let mut neighbor = schedule.clone();
    NeighborMove::random(config, schedule, rng).apply(&mut neighbor);
    neighbor
}

/// Writes a neighbor of `source` into `target`, reusing its allocation.
pub fn mutate_into<U: UniformSource + ?Sized>(
    config: &RotaConfig,
    source: &Schedule,
    target: &mut Schedule,
    rng: &mut U,
) -> NeighborMove {
    target.clone_from(source);
    let mv = NeighborMove::random(config, source, rng);
    mv.apply(target);
    mv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonSpec;
    use crate::random::create_rng;
    use crate::random::testing::Scripted;
    use proptest::prelude::*;

    fn config(people: usize, weeks: usize) -> RotaConfig {
        let mut builder = RotaConfig::builder(weeks);
        for i in 0..people {
            builder.add_person(PersonSpec::new(format!("p{i}"))).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_reassign_skips_current_occupant() {
        let config = config(3, 2);
        let schedule = Schedule::filled(2, 1);
        // week 1, ward, draw 1 of 2 -> skips person 1 -> person 2
        let mut rng = Scripted::new(&[1, 6, 1]);
        let mv = NeighborMove::random_reassign(&config, &schedule, &mut rng);
        assert_eq!(
            mv,
            NeighborMove::Reassign {
                slot: Slot::new(1, Shift::Ward),
                person: 2
            }
        );
        // draw 0 stays below the occupant
        let mut rng = Scripted::new(&[0, 0, 0]);
        let mv = NeighborMove::random_reassign(&config, &schedule, &mut rng);
        assert_eq!(
            mv,
            NeighborMove::Reassign {
                slot: Slot::new(0, Shift::OnCallMon),
                person: 0
            }
        );
    }

    #[test]
    fn test_single_person_reassign_is_noop() {
        let config = config(1, 1);
        let source = Schedule::filled(1, 0);
        let mut target = source.clone();
        let mut rng = Scripted::new(&[0, 0, 3]);
        mutate_into(&config, &source, &mut target, &mut rng);
        assert_eq!(source, target);
    }

    #[test]
    fn test_swap_same_slot_is_noop() {
        let config = config(4, 3);
        let mut rng = create_rng(11);
        let source = Schedule::random(&config, &mut rng);
        // move kind 1 (swap), week 2, ward, week 2
        let mut scripted = Scripted::new(&[1, 2, 6, 2]);
        let mut target = Schedule::filled(3, 0);
        let mv = mutate_into(&config, &source, &mut target, &mut scripted);
        assert_eq!(
            mv,
            NeighborMove::Swap {
                first: Slot::new(2, Shift::Ward),
                second: Slot::new(2, Shift::Ward)
            }
        );
        assert_eq!(source, target);
    }

    #[test]
    fn test_weekday_swap_may_change_weekday() {
        let config = config(2, 2);
        // week 0, Tuesday, week 1, Friday
        let mut rng = Scripted::new(&[0, 1, 1, 4]);
        let mv = NeighborMove::random_swap(&config, &mut rng);
        assert_eq!(
            mv,
            NeighborMove::Swap {
                first: Slot::new(0, Shift::OnCallTue),
                second: Slot::new(1, Shift::OnCallFri)
            }
        );

        let mut schedule = Schedule::filled(2, 0);
        schedule.set(1, Shift::OnCallFri, 1);
        mv.apply(&mut schedule);
        assert_eq!(schedule.get(0, Shift::OnCallTue), 1);
        assert_eq!(schedule.get(1, Shift::OnCallFri), 0);
    }

    #[test]
    fn test_weekend_swaps_with_weekend() {
        let config = config(2, 4);
        let mut rng = Scripted::new(&[3, 5, 0]);
        match NeighborMove::random_swap(&config, &mut rng) {
            NeighborMove::Swap { first, second } => {
                assert_eq!(first, Slot::new(3, Shift::OnCallWeekend));
                assert_eq!(second, Slot::new(0, Shift::OnCallWeekend));
            }
            other => panic!("expected swap, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_reassign_changes_exactly_one_slot(seed in any::<u64>(), people in 2usize..6) {
            let config = config(people, 3);
            let mut rng = create_rng(seed);
            let source = Schedule::random(&config, &mut rng);
            let mut neighbor = source.clone();
            NeighborMove::random_reassign(&config, &source, &mut rng).apply(&mut neighbor);
            prop_assert_eq!(source.diff_count(&neighbor), 1);
            prop_assert!(neighbor.is_valid_for(&config));
        }

        #[test]
        fn prop_swap_changes_at_most_two_slots(seed in any::<u64>(), people in 1usize..6) {
            let config = config(people, 3);
            let mut rng = create_rng(seed);
            let source = Schedule::random(&config, &mut rng);
            let mut neighbor = source.clone();
            let mv = NeighborMove::random_swap(&config, &mut rng);
            mv.apply(&mut neighbor);
            let diff = source.diff_count(&neighbor);
            prop_assert!(diff == 0 || diff == 2);
            if let NeighborMove::Swap { first, second } = mv {
                prop_assert_eq!(first.shift.is_weekday_on_call(), second.shift.is_weekday_on_call());
                if !first.shift.is_weekday_on_call() {
                    prop_assert_eq!(first.shift, second.shift);
                }
                if first == second {
                    prop_assert_eq!(diff, 0);
                }
            }
        }

        #[test]
        fn prop_mutate_keeps_source(seed in any::<u64>()) {
            let config = config(3, 2);
            let mut rng = create_rng(seed);
            let source = Schedule::random(&config, &mut rng);
            let copy = source.clone();
            let neighbor = mutate(&config, &source, &mut rng);
            prop_assert_eq!(&source, &copy);
            prop_assert!(source.diff_count(&neighbor) <= 2);
        }
    }
}
