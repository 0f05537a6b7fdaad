//! Score, per-person tallies and the hard-failure log.

use std::fmt;

/// Maximum number of individually recorded hard failures per score.
pub const MAX_FAILURES: usize = 16;

/// Kind of hard-constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    /// On call and ward on the same day.
    MultipleShiftsAtOnce,
    WorkOnHoliday,
    /// Weekday on call the day before a holiday.
    WorkJustBeforeHoliday,
    /// Someone else is on call on a day the person must be.
    NotOnCallWhenForced,
    /// Ward week for someone who cannot do ward weeks, or cannot that week.
    OnWardWhenCannot,
    OnCallWhenCannot,
    /// Working the day after being on call.
    WorkFollowingOnCall,
}

impl FailureKind {
    pub fn description(self) -> &'static str {
        match self {
            FailureKind::MultipleShiftsAtOnce => "multiple shifts at once",
            FailureKind::WorkOnHoliday => "working on holiday",
            FailureKind::WorkJustBeforeHoliday => "working just before holiday",
            FailureKind::NotOnCallWhenForced => "not on call when forced",
            FailureKind::OnWardWhenCannot => "on ward when cannot",
            FailureKind::OnCallWhenCannot => "on call when cannot",
            FailureKind::WorkFollowingOnCall => "work following on call",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One recorded hard-constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Failure {
    pub kind: FailureKind,
    /// Person the violation is attributed to.
    pub person: usize,
    /// Absolute day index of the violation.
    pub day: usize,
}

/// Bounded append-only list of failures.
///
/// Appends beyond the capacity are dropped and set [`truncated`](Self::truncated);
/// the violation still counts towards the objective value. At most
/// `capacity` records are held, and a truncated log is full.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFailureLog"))]
pub struct FailureLog {
    records: Vec<Failure>,
    capacity: usize,
    truncated: bool,
}

/// Unchecked wire form of a [`FailureLog`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFailureLog {
    records: Vec<Failure>,
    capacity: usize,
    truncated: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFailureLog> for FailureLog {
    type Error = String;

    fn try_from(raw: RawFailureLog) -> Result<Self, Self::Error> {
        if raw.records.len() > raw.capacity {
            return Err(format!(
                "failure log holds {} records but its capacity is {}",
                raw.records.len(),
                raw.capacity
            ));
        }
        if raw.truncated && raw.records.len() < raw.capacity {
            return Err(format!(
                "failure log is marked truncated with {} of {} records",
                raw.records.len(),
                raw.capacity
            ));
        }
        Ok(Self {
            records: raw.records,
            capacity: raw.capacity,
            truncated: raw.truncated,
        })
    }
}

impl Default for FailureLog {
    fn default() -> Self {
        Self::with_capacity(MAX_FAILURES)
    }
}

impl FailureLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    pub(crate) fn push(&mut self, kind: FailureKind, person: usize, day: usize) {
        if self.records.len() < self.capacity {
            self.records.push(Failure { kind, person, day });
        } else {
            self.truncated = true;
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && !self.truncated
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` when at least one violation was not recorded.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Failure> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Failure] {
        &self.records
    }

    /// Recorded failures of one kind.
    pub fn count_kind(&self, kind: FailureKind) -> usize {
        self.records.iter().filter(|f| f.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a FailureLog {
    type Item = &'a Failure;
    type IntoIter = std::slice::Iter<'a, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Shifts worked by one person and their deviation from the fair share.
///
/// A deviation is `count + bias - target`; positive means more than the
/// fair share.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonTally {
    pub on_call_days: u32,
    pub on_call_weekends: u32,
    pub ward_weeks: u32,
    pub on_call_bank_holidays: u32,
    pub on_call_day_deviation: f64,
    pub on_call_weekend_deviation: f64,
    pub ward_week_deviation: f64,
    pub on_call_bank_holiday_deviation: f64,
}

/// Result of scoring a schedule. Higher `value` is better.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    pub value: f64,
    pub people: Vec<PersonTally>,
    pub failures: FailureLog,
}

impl Score {
    pub(crate) fn empty(person_count: usize) -> Self {
        Self {
            value: 0.0,
            people: vec![PersonTally::default(); person_count],
            failures: FailureLog::default(),
        }
    }

    /// No hard constraint is violated.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn person(&self, index: usize) -> &PersonTally {
        &self.people[index]
    }
}
