//! Validated rota configuration and its builder.

use super::calendar::{is_weekend, DAYS_PER_WEEK, WEEKDAYS};
use super::flags::{DaySet, FlagGrid};
use super::person::{Person, PersonSpec, Spacing, Targets};
use super::targets;
use crate::error::RotaError;

/// Pool-wide totals, each including the sum of all individual biases.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolTotals {
    pub on_call_days: f64,
    pub on_call_weekends: f64,
    pub ward_weeks: f64,
    pub bank_holidays: f64,
    /// Sum of effective full-time fractions.
    pub effective_on_call_people: f64,
    /// Same, over people allowed to do ward weeks.
    pub effective_ward_people: f64,
}

/// Immutable description of a rota problem.
///
/// Built once through [`RotaConfigBuilder`] and read by the scorer, the
/// neighbor generator and the search driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RotaConfig {
    week_count: usize,
    people: Vec<Person>,
    bank_holidays: DaySet,
    holidays: FlagGrid,
    invalid_on_call_days: FlagGrid,
    disliked_on_call_days: FlagGrid,
    invalid_ward_weeks: FlagGrid,
    disliked_ward_weeks: FlagGrid,
    forced_on_call: Vec<Option<usize>>,
    totals: PoolTotals,
}

impl RotaConfig {
    /// Starts a builder for a rota of `week_count` weeks.
    pub fn builder(week_count: usize) -> RotaConfigBuilder {
        RotaConfigBuilder::new(week_count)
    }

    pub fn week_count(&self) -> usize {
        self.week_count
    }

    pub fn day_count(&self) -> usize {
        self.week_count * DAYS_PER_WEEK
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, index: usize) -> &Person {
        &self.people[index]
    }

    /// Index of the person with the given name.
    pub fn person_index(&self, name: &str) -> Option<usize> {
        self.people.iter().position(|p| p.name == name)
    }

    pub fn totals(&self) -> &PoolTotals {
        &self.totals
    }

    pub fn is_bank_holiday(&self, day: usize) -> bool {
        self.bank_holidays.contains(day)
    }

    pub fn bank_holiday_count(&self) -> usize {
        self.bank_holidays.len()
    }

    /// Holiday or outside the person's active range. `false` past the horizon.
    pub fn is_holiday(&self, day: usize, person: usize) -> bool {
        self.holidays.get(day, person)
    }

    pub fn is_invalid_on_call_day(&self, day: usize, person: usize) -> bool {
        self.invalid_on_call_days.get(day, person)
    }

    pub fn is_disliked_on_call_day(&self, day: usize, person: usize) -> bool {
        self.disliked_on_call_days.get(day, person)
    }

    pub fn is_invalid_ward_week(&self, week: usize, person: usize) -> bool {
        self.invalid_ward_weeks.get(week, person)
    }

    pub fn is_disliked_ward_week(&self, week: usize, person: usize) -> bool {
        self.disliked_ward_weeks.get(week, person)
    }

    /// Person who must be on call on `day`, if any.
    pub fn forced_on_call(&self, day: usize) -> Option<usize> {
        self.forced_on_call.get(day).copied().flatten()
    }
}

/// Collects people and per-day/per-week flags, then validates them into a
/// [`RotaConfig`].
///
/// # Examples
///
/// ```
/// use u_rota::model::{PersonSpec, RotaConfig};
///
/// let mut builder = RotaConfig::builder(4);
/// let alice = builder.add_person(PersonSpec::new("alice")).unwrap();
/// let bob = builder.add_person(PersonSpec::new("bob").with_full_time(0.5)).unwrap();
/// builder.set_holiday(alice, 3).unwrap();
/// builder.force_on_call(bob, 10).unwrap();
/// builder.set_bank_holiday(0).unwrap();
///
/// let config = builder.build().unwrap();
/// assert_eq!(config.person_count(), 2);
/// assert!(config.is_holiday(3, alice));
/// assert_eq!(config.forced_on_call(10), Some(bob));
/// ```
#[derive(Debug, Clone)]
pub struct RotaConfigBuilder {
    week_count: usize,
    people: Vec<PersonSpec>,
    bank_holidays: Vec<usize>,
    holidays: Vec<(usize, usize)>,
    invalid_on_call_days: Vec<(usize, usize)>,
    disliked_on_call_days: Vec<(usize, usize)>,
    invalid_ward_weeks: Vec<(usize, usize)>,
    disliked_ward_weeks: Vec<(usize, usize)>,
    forced_on_call: Vec<Option<usize>>,
}

impl RotaConfigBuilder {
    pub fn new(week_count: usize) -> Self {
        Self {
            week_count,
            people: Vec::new(),
            bank_holidays: Vec::new(),
            holidays: Vec::new(),
            invalid_on_call_days: Vec::new(),
            disliked_on_call_days: Vec::new(),
            invalid_ward_weeks: Vec::new(),
            disliked_ward_weeks: Vec::new(),
            forced_on_call: vec![None; week_count * DAYS_PER_WEEK],
        }
    }

    fn day_count(&self) -> usize {
        self.week_count * DAYS_PER_WEEK
    }

    fn check_person(&self, person: usize) -> Result<(), RotaError> {
        if person >= self.people.len() {
            return Err(RotaError::PersonOutOfRange {
                person,
                count: self.people.len(),
            });
        }
        Ok(())
    }

    fn check_day(&self, day: usize) -> Result<(), RotaError> {
        if day >= self.day_count() {
            return Err(RotaError::DayOutOfRange {
                day,
                count: self.day_count(),
            });
        }
        Ok(())
    }

    fn check_week(&self, week: usize) -> Result<(), RotaError> {
        if week >= self.week_count {
            return Err(RotaError::WeekOutOfRange {
                week,
                count: self.week_count,
            });
        }
        Ok(())
    }

    fn check_weekday(weekday: usize) -> Result<(), RotaError> {
        if weekday >= DAYS_PER_WEEK {
            return Err(RotaError::WeekdayOutOfRange(weekday));
        }
        Ok(())
    }

    fn day_flag(
        &mut self,
        person: usize,
        day: usize,
        select: fn(&mut Self) -> &mut Vec<(usize, usize)>,
    ) -> Result<(), RotaError> {
        self.check_person(person)?;
        self.check_day(day)?;
        select(self).push((day, person));
        Ok(())
    }

    fn weekday_always(
        &mut self,
        person: usize,
        weekday: usize,
        select: fn(&mut Self) -> &mut Vec<(usize, usize)>,
    ) -> Result<(), RotaError> {
        self.check_person(person)?;
        Self::check_weekday(weekday)?;
        let weeks = self.week_count;
        select(self).extend((0..weeks).map(|week| (week * DAYS_PER_WEEK + weekday, person)));
        Ok(())
    }

    /// Ward flags are given on a weekday of the week they apply to.
    fn ward_day_flag(
        &mut self,
        person: usize,
        day: usize,
        select: fn(&mut Self) -> &mut Vec<(usize, usize)>,
    ) -> Result<(), RotaError> {
        self.check_person(person)?;
        self.check_day(day)?;
        if is_weekend(day % DAYS_PER_WEEK) {
            return Err(RotaError::WardFlagOnWeekend(day));
        }
        select(self).push((day / DAYS_PER_WEEK, person));
        Ok(())
    }

    /// Adds a person and returns their index.
    pub fn add_person(&mut self, spec: PersonSpec) -> Result<usize, RotaError> {
        if spec.name.is_empty() {
            return Err(RotaError::EmptyName);
        }
        if self.people.iter().any(|p| p.name == spec.name) {
            return Err(RotaError::DuplicatePerson(spec.name));
        }
        self.people.push(spec);
        Ok(self.people.len() - 1)
    }

    pub fn set_holiday(&mut self, person: usize, day: usize) -> Result<(), RotaError> {
        self.day_flag(person, day, |b| &mut b.holidays)
    }

    pub fn set_invalid_on_call_day(&mut self, person: usize, day: usize) -> Result<(), RotaError> {
        self.day_flag(person, day, |b| &mut b.invalid_on_call_days)
    }

    /// Marks the same weekday (0 = Monday) invalid for on call in every week.
    pub fn set_invalid_on_call_weekday_always(
        &mut self,
        person: usize,
        weekday: usize,
    ) -> Result<(), RotaError> {
        self.weekday_always(person, weekday, |b| &mut b.invalid_on_call_days)
    }

    pub fn set_disliked_on_call_day(
        &mut self,
        person: usize,
        day: usize,
    ) -> Result<(), RotaError> {
        self.day_flag(person, day, |b| &mut b.disliked_on_call_days)
    }

    pub fn set_disliked_on_call_weekday_always(
        &mut self,
        person: usize,
        weekday: usize,
    ) -> Result<(), RotaError> {
        self.weekday_always(person, weekday, |b| &mut b.disliked_on_call_days)
    }

    pub fn set_invalid_ward_week(&mut self, person: usize, week: usize) -> Result<(), RotaError> {
        self.check_week(week)?;
        self.ward_day_flag(person, week * DAYS_PER_WEEK, |b| &mut b.invalid_ward_weeks)
    }

    /// Marks the ward week containing weekday `day` invalid.
    pub fn set_invalid_ward_week_by_day(
        &mut self,
        person: usize,
        day: usize,
    ) -> Result<(), RotaError> {
        self.ward_day_flag(person, day, |b| &mut b.invalid_ward_weeks)
    }

    pub fn set_disliked_ward_week(&mut self, person: usize, week: usize) -> Result<(), RotaError> {
        self.check_week(week)?;
        self.ward_day_flag(person, week * DAYS_PER_WEEK, |b| &mut b.disliked_ward_weeks)
    }

    pub fn set_disliked_ward_week_by_day(
        &mut self,
        person: usize,
        day: usize,
    ) -> Result<(), RotaError> {
        self.ward_day_flag(person, day, |b| &mut b.disliked_ward_weeks)
    }

    pub fn set_bank_holiday(&mut self, day: usize) -> Result<(), RotaError> {
        self.check_day(day)?;
        if !self.bank_holidays.contains(&day) {
            self.bank_holidays.push(day);
        }
        Ok(())
    }

    /// Requires `person` to be on call on `day`. At most one person per day.
    pub fn force_on_call(&mut self, person: usize, day: usize) -> Result<(), RotaError> {
        self.check_person(person)?;
        self.check_day(day)?;
        let slot = &mut self.forced_on_call[day];
        if slot.is_some() {
            return Err(RotaError::DuplicateForcedOnCall(day));
        }
        *slot = Some(person);
        Ok(())
    }

    /// Validates everything and allocates fair-share targets.
    pub fn build(self) -> Result<RotaConfig, RotaError> {
        if self.week_count == 0 {
            return Err(RotaError::NoWeeks);
        }
        if self.people.is_empty() {
            return Err(RotaError::NoPeople);
        }

        let day_count = self.day_count();
        let person_count = self.people.len();

        let mut holidays = FlagGrid::new(day_count, person_count);
        for &(day, person) in &self.holidays {
            holidays.set(day, person);
        }
        let mut invalid_on_call_days = FlagGrid::new(day_count, person_count);
        for &(day, person) in &self.invalid_on_call_days {
            invalid_on_call_days.set(day, person);
        }
        let mut disliked_on_call_days = FlagGrid::new(day_count, person_count);
        for &(day, person) in &self.disliked_on_call_days {
            disliked_on_call_days.set(day, person);
        }
        let mut invalid_ward_weeks = FlagGrid::new(self.week_count, person_count);
        for &(week, person) in &self.invalid_ward_weeks {
            invalid_ward_weeks.set(week, person);
        }
        let mut disliked_ward_weeks = FlagGrid::new(self.week_count, person_count);
        for &(week, person) in &self.disliked_ward_weeks {
            disliked_ward_weeks.set(week, person);
        }
        let mut bank_holidays = DaySet::new(day_count);
        for &day in &self.bank_holidays {
            bank_holidays.insert(day);
        }

        let mut totals = PoolTotals {
            on_call_days: (WEEKDAYS * self.week_count) as f64,
            on_call_weekends: self.week_count as f64,
            ward_weeks: self.week_count as f64,
            bank_holidays: bank_holidays.len() as f64,
            effective_on_call_people: 0.0,
            effective_ward_people: 0.0,
        };

        let mut people = Vec::with_capacity(person_count);
        for (index, spec) in self.people.into_iter().enumerate() {
            let person = validate_person(spec, index, day_count, &mut holidays)?;

            totals.on_call_days += person.bias.on_call_days;
            totals.on_call_weekends += person.bias.on_call_weekends;
            totals.ward_weeks += person.bias.ward_weeks;
            totals.bank_holidays += person.bias.bank_holidays;
            totals.effective_on_call_people += person.effective_full_time;
            if !person.no_ward_weeks {
                totals.effective_ward_people += person.effective_full_time;
            }
            people.push(person);
        }

        if totals.effective_on_call_people <= 0.0 {
            return Err(RotaError::EmptyOnCallPool);
        }
        if totals.effective_ward_people <= 0.0 {
            return Err(RotaError::EmptyWardPool);
        }

        targets::allocate(&mut people, &totals);

        Ok(RotaConfig {
            week_count: self.week_count,
            people,
            bank_holidays,
            holidays,
            invalid_on_call_days,
            disliked_on_call_days,
            invalid_ward_weeks,
            disliked_ward_weeks,
            forced_on_call: self.forced_on_call,
            totals,
        })
    }
}

/// Checks one person and marks the days outside their active range as holidays.
fn validate_person(
    spec: PersonSpec,
    index: usize,
    day_count: usize,
    holidays: &mut FlagGrid,
) -> Result<Person, RotaError> {
    if !spec.full_time.is_finite() || !(0.0..=1.0).contains(&spec.full_time) {
        return Err(RotaError::InvalidFullTime {
            name: spec.name,
            amount: spec.full_time,
        });
    }
    let first_day = spec.first_day.unwrap_or(0);
    let last_day = spec.last_day.unwrap_or(day_count - 1);
    if first_day > last_day || last_day >= day_count {
        return Err(RotaError::InvalidActiveRange {
            name: spec.name,
            first: first_day,
            last: last_day,
        });
    }
    let biases = [
        ("on call day", spec.bias.on_call_days),
        ("on call weekend", spec.bias.on_call_weekends),
        ("ward week", spec.bias.ward_weeks),
        ("bank holiday", spec.bias.bank_holidays),
    ];
    if let Some(&(kind, amount)) = biases.iter().find(|(_, b)| !b.is_finite()) {
        return Err(RotaError::InvalidBias {
            name: spec.name,
            kind,
            amount,
        });
    }
    if spec.no_ward_weeks && spec.bias.ward_weeks != 0.0 {
        return Err(RotaError::WardBiasWithoutWardWeeks(spec.name));
    }

    for day in (0..first_day).chain(last_day + 1..day_count) {
        holidays.set(day, index);
    }
    let non_holiday_days = (first_day..=last_day)
        .filter(|&day| !holidays.get(day, index))
        .count();

    let active_days = last_day + 1 - first_day;
    let effective_full_time = spec.full_time * active_days as f64 / day_count as f64;

    Ok(Person {
        name: spec.name,
        first_day,
        last_day,
        non_holiday_days,
        full_time: spec.full_time,
        effective_full_time,
        no_ward_weeks: spec.no_ward_weeks,
        bias: spec.bias,
        targets: Targets::default(),
        spacing: Spacing::default(),
    })
}
