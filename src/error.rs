//! Fatal configuration errors.
//!
//! Everything that can go wrong happens before a search starts: building a
//! [`RotaConfig`](crate::model::RotaConfig), reading a weight table, or
//! validating an [`AnnealConfig`](crate::anneal::AnnealConfig). Once those
//! succeed, scoring and searching are total.

use thiserror::Error;

/// Error raised while assembling the inputs of a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RotaError {
    #[error("rota must contain at least one week")]
    NoWeeks,

    #[error("rota must contain at least one person")]
    NoPeople,

    #[error("person name must not be empty")]
    EmptyName,

    #[error("person \"{0}\" is defined more than once")]
    DuplicatePerson(String),

    #[error("person index {person} is out of range (person count {count})")]
    PersonOutOfRange { person: usize, count: usize },

    #[error("day index {day} is out of range (day count {count})")]
    DayOutOfRange { day: usize, count: usize },

    #[error("week index {week} is out of range (week count {count})")]
    WeekOutOfRange { week: usize, count: usize },

    #[error("weekday index {0} is out of range (expected 0..7)")]
    WeekdayOutOfRange(usize),

    #[error("day {0} is a weekend day and cannot carry a ward week flag")]
    WardFlagOnWeekend(usize),

    #[error("part time amount {amount} for \"{name}\" is not within [0, 1]")]
    InvalidFullTime { name: String, amount: f64 },

    #[error("{kind} bias for \"{name}\" must be finite, got {amount}")]
    InvalidBias {
        name: String,
        kind: &'static str,
        amount: f64,
    },

    #[error("active range {first}..={last} for \"{name}\" is empty or outside the rota")]
    InvalidActiveRange {
        name: String,
        first: usize,
        last: usize,
    },

    #[error("person that cannot do ward weeks cannot have a ward week bias (\"{0}\")")]
    WardBiasWithoutWardWeeks(String),

    #[error("multiple people are set as must be on call on day {0}")]
    DuplicateForcedOnCall(usize),

    #[error("effective on call person count is zero")]
    EmptyOnCallPool,

    #[error("effective ward person count is zero")]
    EmptyWardPool,

    #[error("unknown weight \"{0}\"")]
    UnknownWeight(String),

    #[error("invalid value \"{value}\" for weight \"{name}\"")]
    InvalidWeightValue { name: String, value: String },

    #[error("invalid search configuration: {0}")]
    InvalidSearch(String),
}
