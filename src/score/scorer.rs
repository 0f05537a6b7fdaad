//! Single-pass schedule scorer.
//!
//! The sweep visits weeks in order and days Monday to Sunday within a week,
//! tracking for each person the last day worked, the last week on call and
//! the last ward week, plus yesterday's on call person.
//!
//! Weekday checks fire for every Monday to Friday. Ward-level checks
//! (eligibility, lagged repeats, disliked week, ward days-off and
//! no-ward-week bonuses) fire once per week, on Monday. For the weekend the
//! per-day flags (holiday, invalid, forced, disliked) are checked on both
//! days because each day carries its own flags, while checks about the
//! weekend as one shift fire only on Saturday.

use super::decay::{days_off_bonus, no_ward_week_bonus};
use super::types::{FailureKind, PersonTally, Score};
use crate::model::{is_weekend, RotaConfig, Schedule, Shift, Week, DAYS_PER_WEEK, SATURDAY};
use crate::weights::{Weight, Weights};

/// Scores `schedule` against `config` with the coefficients in `weights`.
///
/// Pure and total for a schedule that [`is_valid_for`](Schedule::is_valid_for)
/// the configuration. Higher values are better.
///
/// # Panics
///
/// Panics if the schedule holds a person index outside the configuration.
///
/// # Examples
///
/// ```
/// use u_rota::model::{PersonSpec, RotaConfig, Schedule};
/// use u_rota::score::{score, FailureKind};
/// use u_rota::weights::{Weight, Weights};
///
/// let mut builder = RotaConfig::builder(1);
/// builder.add_person(PersonSpec::new("solo")).unwrap();
/// let config = builder.build().unwrap();
/// let weights = Weights::new().with(Weight::ShiftOverlap, -10.0);
///
/// let result = score(&config, &weights, &Schedule::filled(1, 0));
/// assert_eq!(result.failures.count_kind(FailureKind::MultipleShiftsAtOnce), 5);
/// assert_eq!(result.value, -50.0);
/// ```
pub fn score(config: &RotaConfig, weights: &Weights, schedule: &Schedule) -> Score {
    let mut sweep = Sweep::new(config, weights);
    for (week_index, week) in schedule.weeks().iter().enumerate() {
        sweep.week(schedule, week_index, week);
    }
    sweep.close_horizon();
    sweep.balance();
    sweep.score
}

struct Sweep<'a> {
    config: &'a RotaConfig,
    weights: &'a Weights,
    score: Score,
    last_work_day: Vec<i64>,
    last_ward_week: Vec<i64>,
    last_on_call_week: Vec<Option<usize>>,
    on_call_yesterday: Option<usize>,
}

impl<'a> Sweep<'a> {
    fn new(config: &'a RotaConfig, weights: &'a Weights) -> Self {
        let people = config.people();
        Self {
            config,
            weights,
            score: Score::empty(people.len()),
            last_work_day: people.iter().map(|p| p.first_day() as i64 - 1).collect(),
            last_ward_week: people
                .iter()
                .map(|p| (p.first_day() / DAYS_PER_WEEK) as i64 - 1)
                .collect(),
            last_on_call_week: vec![None; people.len()],
            on_call_yesterday: None,
        }
    }

    #[inline]
    fn add(&mut self, weight: Weight) {
        self.score.value += self.weights[weight];
    }

    #[inline]
    fn fail(&mut self, weight: Weight, kind: FailureKind, person: usize, day: usize) {
        self.add(weight);
        self.score.failures.push(kind, person, day);
    }

    fn days_off(&self, person: usize, day: usize) -> f64 {
        days_off_bonus(self.weights, day as i64 - self.last_work_day[person])
    }

    fn week(&mut self, schedule: &Schedule, week_index: usize, week: &Week) {
        for weekday in 0..DAYS_PER_WEEK {
            let day = week_index * DAYS_PER_WEEK + weekday;
            if !is_weekend(weekday) {
                self.weekday(schedule, week_index, week, weekday, day);
            } else {
                self.weekend_day(week_index, week, weekday, day);
            }
        }

        if week.weekend() == week.ward() {
            self.add(Weight::OnCallWeekendFollowsWardWeek);
        }
    }

    fn weekday(
        &mut self,
        schedule: &Schedule,
        week_index: usize,
        week: &Week,
        weekday: usize,
        day: usize,
    ) {
        let config = self.config;
        let on_call = week.get(Shift::WEEKDAY_ON_CALL[weekday]);
        let ward = week.ward();
        let monday = weekday == 0;

        if on_call == ward {
            self.fail(Weight::ShiftOverlap, FailureKind::MultipleShiftsAtOnce, on_call, day);
        }
        if monday && config.person(ward).no_ward_weeks() {
            self.fail(Weight::OnWardOnInvalidWeek, FailureKind::OnWardWhenCannot, ward, day);
        }

        if config.is_holiday(day, on_call) {
            self.fail(Weight::WorkOnHoliday, FailureKind::WorkOnHoliday, on_call, day);
        }
        if config.is_holiday(day, ward) {
            self.fail(Weight::WorkOnHoliday, FailureKind::WorkOnHoliday, ward, day);
        }
        if config.is_holiday(day + 1, on_call) {
            self.fail(Weight::WorkOnHoliday, FailureKind::WorkJustBeforeHoliday, on_call, day);
        }

        if monday && config.is_invalid_ward_week(week_index, ward) {
            self.fail(Weight::OnWardOnInvalidWeek, FailureKind::OnWardWhenCannot, ward, day);
        }
        if config.is_invalid_on_call_day(day, on_call) {
            self.fail(Weight::OnCallOnInvalidDay, FailureKind::OnCallWhenCannot, on_call, day);
        }

        self.check_forced(day, on_call);

        if monday && Some(ward) == self.on_call_yesterday {
            self.fail(Weight::WorkFollowingOnCall, FailureKind::WorkFollowingOnCall, ward, day);
        }
        if Some(on_call) == self.on_call_yesterday {
            self.fail(Weight::WorkFollowingOnCall, FailureKind::WorkFollowingOnCall, on_call, day);
        }

        if self.last_on_call_week[on_call] == Some(week_index) {
            self.add(Weight::MultipleOnCallsPerWeek);
        }

        if monday && week_index >= 1 && schedule.get(week_index - 1, Shift::Ward) == ward {
            self.add(Weight::WardWeekOneWeekAgo);
        }
        if monday && week_index >= 2 && schedule.get(week_index - 2, Shift::Ward) == ward {
            self.add(Weight::WardWeekTwoWeeksAgo);
        }

        if config.is_disliked_on_call_day(day, on_call) {
            self.add(Weight::OnCallOnDislikedDay);
        }
        if monday && config.is_disliked_ward_week(week_index, ward) {
            self.add(Weight::WardWeekOnDislikedWeek);
        }

        self.score.value += self.days_off(on_call, day);
        if monday {
            self.score.value += self.days_off(ward, day);
            let weeks_since = week_index as i64 - self.last_ward_week[ward];
            self.score.value += no_ward_week_bonus(self.weights, weeks_since);
        }

        self.last_on_call_week[on_call] = Some(week_index);
        self.last_ward_week[ward] = week_index as i64;
        self.last_work_day[on_call] = day as i64;
        self.last_work_day[ward] = day as i64;
        self.on_call_yesterday = Some(on_call);

        let tally = &mut self.score.people[on_call];
        tally.on_call_days += 1;
        if config.is_bank_holiday(day) {
            tally.on_call_bank_holidays += 1;
        }
        if monday {
            self.score.people[ward].ward_weeks += 1;
        }
    }

    fn weekend_day(&mut self, week_index: usize, week: &Week, weekday: usize, day: usize) {
        let config = self.config;
        let on_call = week.weekend();
        let saturday = weekday == SATURDAY;

        if config.is_holiday(day, on_call) {
            self.fail(Weight::WorkOnHoliday, FailureKind::WorkOnHoliday, on_call, day);
        }
        if config.is_invalid_on_call_day(day, on_call) {
            self.fail(Weight::OnCallOnInvalidDay, FailureKind::OnCallWhenCannot, on_call, day);
        }

        self.check_forced(day, on_call);

        if saturday && Some(on_call) == self.on_call_yesterday {
            self.fail(Weight::WorkFollowingOnCall, FailureKind::WorkFollowingOnCall, on_call, day);
        }
        if saturday && self.last_on_call_week[on_call] == Some(week_index) {
            self.add(Weight::MultipleOnCallsPerWeek);
        }

        if config.is_disliked_on_call_day(day, on_call) {
            self.add(Weight::OnCallOnDislikedDay);
        }

        if saturday {
            self.score.value += self.days_off(on_call, day);
        }

        self.last_on_call_week[on_call] = Some(week_index);
        self.last_work_day[on_call] = day as i64;
        self.on_call_yesterday = Some(on_call);

        if saturday {
            self.score.people[on_call].on_call_weekends += 1;
        }
    }

    fn check_forced(&mut self, day: usize, on_call: usize) {
        if let Some(forced) = self.config.forced_on_call(day) {
            if forced != on_call {
                self.fail(
                    Weight::NotOnCallWhenForced,
                    FailureKind::NotOnCallWhenForced,
                    forced,
                    day,
                );
            }
        }
    }

    /// Rest bonuses for the gap between each person's last shift and their
    /// last active day.
    fn close_horizon(&mut self) {
        for (index, person) in self.config.people().iter().enumerate() {
            let last_day = person.last_day() as i64;
            let last_week = last_day / DAYS_PER_WEEK as i64;
            self.score.value += days_off_bonus(self.weights, last_day - self.last_work_day[index]);
            self.score.value +=
                no_ward_week_bonus(self.weights, last_week - self.last_ward_week[index]);
        }
    }

    /// Quadratic pull of every count towards its fair-share target.
    fn balance(&mut self) {
        let w = self.weights;
        let config = self.config;
        for (person, tally) in config.people().iter().zip(self.score.people.iter_mut()) {
            let bias = person.bias();
            let targets = person.targets();
            *tally = PersonTally {
                on_call_day_deviation: tally.on_call_days as f64 + bias.on_call_days
                    - targets.on_call_days,
                on_call_weekend_deviation: tally.on_call_weekends as f64 + bias.on_call_weekends
                    - targets.on_call_weekends,
                ward_week_deviation: tally.ward_weeks as f64 + bias.ward_weeks
                    - targets.ward_weeks,
                on_call_bank_holiday_deviation: tally.on_call_bank_holidays as f64
                    + bias.bank_holidays
                    - targets.on_call_bank_holidays,
                ..*tally
            };

            self.score.value += w[Weight::OnCallDayDifference] * sqr(tally.on_call_day_deviation)
                + w[Weight::OnCallWeekendDifference] * sqr(tally.on_call_weekend_deviation)
                + w[Weight::WardWeekDifference] * sqr(tally.ward_week_deviation)
                + w[Weight::OnCallBankHolidayDifference]
                    * sqr(tally.on_call_bank_holiday_deviation);
        }
    }
}

#[inline]
fn sqr(x: f64) -> f64 {
    x * x
}
