//! Constraint scoring.
//!
//! [`score`] evaluates a whole [`Schedule`](crate::model::Schedule) in one
//! chronological sweep and returns a [`Score`]: a scalar objective (higher
//! is better), per-person tallies with their deviation from the fair share,
//! and a bounded [`FailureLog`] of hard-constraint violations.
//!
//! Hard violations add their weight and a [`Failure`] record. Soft rules
//! only add their weight. Rest bonuses decay geometrically with the length
//! of the gap (see [`decaying_sum`]), and deviations from fair-share
//! targets are penalized quadratically.

mod decay;
mod scorer;
mod types;

pub use decay::{days_off_bonus, decaying_sum, no_ward_week_bonus};
pub use scorer::score;
pub use types::{Failure, FailureKind, FailureLog, PersonTally, Score, MAX_FAILURES};
