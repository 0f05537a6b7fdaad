//! The subject of optimization: one person per shift slot per week.

use super::calendar::{Shift, DAYS_PER_WEEK, SHIFTS_PER_WEEK};
use super::config::RotaConfig;
use crate::random::UniformSource;

/// Seven shift slots of one week, each holding a person index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Week {
    shifts: [usize; SHIFTS_PER_WEEK],
}

impl Week {
    /// A week with every slot held by `person`.
    pub fn filled(person: usize) -> Self {
        Self {
            shifts: [person; SHIFTS_PER_WEEK],
        }
    }

    /// A week from slots in [`Shift::ALL`] order.
    pub fn from_slots(shifts: [usize; SHIFTS_PER_WEEK]) -> Self {
        Self { shifts }
    }

    #[inline]
    pub fn get(&self, shift: Shift) -> usize {
        self.shifts[shift.index()]
    }

    #[inline]
    pub fn set(&mut self, shift: Shift, person: usize) {
        self.shifts[shift.index()] = person;
    }

    pub fn ward(&self) -> usize {
        self.get(Shift::Ward)
    }

    pub fn weekend(&self) -> usize {
        self.get(Shift::OnCallWeekend)
    }

    /// On call person for a weekday index (0 = Monday .. 6 = Sunday).
    ///
    /// # Panics
    ///
    /// Panics if `weekday >= 7`.
    pub fn on_call_for_day(&self, weekday: usize) -> usize {
        match Shift::on_call_for_weekday(weekday) {
            Some(shift) => self.get(shift),
            None => panic!("weekday {weekday} out of range"),
        }
    }

    pub fn slots(&self) -> &[usize; SHIFTS_PER_WEEK] {
        &self.shifts
    }
}

/// A full rota: an ordered sequence of weeks.
///
/// Any person may hold several slots in the same week; that is scored, not
/// forbidden.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    weeks: Vec<Week>,
}

impl Schedule {
    /// A schedule of `week_count` weeks with every slot held by `person`.
    pub fn filled(week_count: usize, person: usize) -> Self {
        Self {
            weeks: vec![Week::filled(person); week_count],
        }
    }

    pub fn from_weeks(weeks: Vec<Week>) -> Self {
        Self { weeks }
    }

    /// Every slot drawn independently and uniformly from the people of `config`.
    pub fn random<U: UniformSource + ?Sized>(config: &RotaConfig, rng: &mut U) -> Self {
        let person_count = config.person_count();
        let weeks = (0..config.week_count())
            .map(|_| {
                let mut shifts = [0; SHIFTS_PER_WEEK];
                for slot in shifts.iter_mut() {
                    *slot = rng.next_below(person_count);
                }
                Week { shifts }
            })
            .collect();
        Self { weeks }
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn week(&self, index: usize) -> &Week {
        &self.weeks[index]
    }

    #[inline]
    pub fn get(&self, week: usize, shift: Shift) -> usize {
        self.weeks[week].get(shift)
    }

    #[inline]
    pub fn set(&mut self, week: usize, shift: Shift, person: usize) {
        self.weeks[week].set(shift, person);
    }

    /// On call person for an absolute day index.
    pub fn on_call_on_day(&self, day: usize) -> usize {
        self.weeks[day / DAYS_PER_WEEK].on_call_for_day(day % DAYS_PER_WEEK)
    }

    /// Whether the shape and every person index fit `config`.
    pub fn is_valid_for(&self, config: &RotaConfig) -> bool {
        self.weeks.len() == config.week_count()
            && self
                .weeks
                .iter()
                .all(|w| w.shifts.iter().all(|&p| p < config.person_count()))
    }

    /// Number of slots whose occupant differs. Both schedules must have the same length.
    pub fn diff_count(&self, other: &Schedule) -> usize {
        self.weeks
            .iter()
            .zip(&other.weeks)
            .map(|(a, b)| {
                a.shifts
                    .iter()
                    .zip(&b.shifts)
                    .filter(|(x, y)| x != y)
                    .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(people: usize, weeks: usize) -> RotaConfig {
        let mut builder = RotaConfig::builder(weeks);
        for i in 0..people {
            builder.add_person(PersonSpec::new(format!("p{i}"))).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_week_accessors() {
        let mut week = Week::from_slots([0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(week.on_call_for_day(0), 0);
        assert_eq!(week.on_call_for_day(4), 4);
        assert_eq!(week.on_call_for_day(5), 5);
        assert_eq!(week.on_call_for_day(6), 5);
        assert_eq!(week.ward(), 6);
        week.set(Shift::Ward, 2);
        assert_eq!(week.ward(), 2);
    }

    #[test]
    fn test_random_is_valid() {
        let config = config(3, 5);
        let mut rng = StdRng::seed_from_u64(7);
        let schedule = Schedule::random(&config, &mut rng);
        assert_eq!(schedule.week_count(), 5);
        assert!(schedule.is_valid_for(&config));
    }

    #[test]
    fn test_invalid_person_detected() {
        let config = config(2, 1);
        let mut schedule = Schedule::filled(1, 0);
        assert!(schedule.is_valid_for(&config));
        schedule.set(0, Shift::OnCallTue, 2);
        assert!(!schedule.is_valid_for(&config));
        assert!(!Schedule::filled(2, 0).is_valid_for(&config));
    }

    #[test]
    fn test_diff_count() {
        let a = Schedule::filled(2, 0);
        let mut b = a.clone();
        assert_eq!(a.diff_count(&b), 0);
        b.set(1, Shift::Ward, 1);
        b.set(0, Shift::OnCallMon, 1);
        assert_eq!(a.diff_count(&b), 2);
        assert_eq!(b.on_call_on_day(0), 1);
        assert_eq!(b.on_call_on_day(7), 0);
    }
}
