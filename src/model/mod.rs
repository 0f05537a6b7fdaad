//! Problem data: calendar layout, people, per-day flags, validated
//! configuration and the schedule being optimized.
//!
//! # Key Types
//!
//! - [`RotaConfig`]: immutable problem description, built by [`RotaConfigBuilder`]
//! - [`Person`]: validated person with fair-share and spacing targets
//! - [`Schedule`]: one person index per [`Shift`] slot per week

mod calendar;
mod config;
mod flags;
mod person;
mod schedule;
mod targets;

pub use calendar::{is_weekend, Shift, DAYS_PER_WEEK, SATURDAY, SHIFTS_PER_WEEK, WEEKDAYS};
pub use config::{PoolTotals, RotaConfig, RotaConfigBuilder};
pub use person::{Bias, Person, PersonSpec, Spacing, Targets};
pub use schedule::{Schedule, Week};
