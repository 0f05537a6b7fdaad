//! Duty rota optimization.
//!
//! Assigns people to recurring weekly duty shifts (five weekday on-call
//! slots, one weekend on-call slot and one ward week) across a fixed
//! planning horizon, and searches for a near-optimal assignment:
//!
//! - **Model** ([`model`]): the immutable [`RotaConfig`](model::RotaConfig)
//!   of people, availability flags, bank holidays and fair-share targets,
//!   plus the [`Schedule`](model::Schedule) being optimized.
//! - **Weights** ([`weights`]): the named table of penalty and bonus
//!   coefficients.
//! - **Scoring** ([`score`]): one chronological pass producing an objective
//!   value (higher is better) and a bounded log of hard violations.
//! - **Neighbors** ([`neighbor`]): reassign and swap moves.
//! - **Annealing** ([`anneal`]): acceptance-probability local search
//!   tracking the best schedule seen.
//!
//! # Example
//!
//! ```
//! use u_rota::anneal::{AnnealConfig, AnnealRunner};
//! use u_rota::model::{PersonSpec, RotaConfig};
//! use u_rota::weights::{Weight, Weights};
//!
//! let mut builder = RotaConfig::builder(4);
//! builder.add_person(PersonSpec::new("alice")).unwrap();
//! builder.add_person(PersonSpec::new("bob").with_full_time(0.5)).unwrap();
//! let config = builder.build().unwrap();
//!
//! let weights = Weights::new()
//!     .with(Weight::ShiftOverlap, -10.0)
//!     .with(Weight::OnCallDayDifference, -1.0);
//!
//! let anneal = AnnealConfig::default().with_iterations(5_000).with_half_life(500);
//! let result = AnnealRunner::run(&config, &weights, &anneal).unwrap();
//! assert!(result.best.is_valid_for(&config));
//! ```
//!
//! Runs are reproducible for a fixed seed. The library logs through
//! [`tracing`] and never installs a subscriber.

pub mod anneal;
pub mod error;
pub mod model;
pub mod neighbor;
pub mod random;
pub mod score;
pub mod weights;

pub use error::RotaError;
