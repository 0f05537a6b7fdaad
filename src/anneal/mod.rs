//! Acceptance-probability annealing.
//!
//! A single-trajectory local search over [`Schedule`](crate::model::Schedule)s.
//! Each iteration draws a neighbor of the current schedule, scores it, and
//! accepts it when it is strictly better or, blindly, with a probability that
//! halves every `half_life` iterations. Unlike Metropolis annealing the
//! acceptance of a worse neighbor does not depend on how much worse it is.
//!
//! The run always spends its full iteration budget; there is no early stop.

mod config;
mod runner;

pub use config::AnnealConfig;
pub use runner::{acceptance_probability, search, AnnealResult, AnnealRunner, ACCEPT_RESOLUTION};
