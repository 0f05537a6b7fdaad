//! Annealing loop.

use super::config::AnnealConfig;
use crate::error::RotaError;
use crate::model::{RotaConfig, Schedule};
use crate::neighbor::mutate_into;
use crate::random::{create_rng, UniformSource};
use crate::score::{score, Score};
use crate::weights::Weights;
use std::mem;
use tracing::{debug, info, warn};

/// Number of equally spaced steps of the uniform acceptance draw.
pub const ACCEPT_RESOLUTION: usize = 1 << 24;

/// Probability of blindly accepting a neighbor at iteration `i`.
///
/// Starts at 0.5 and halves every `half_life` iterations.
///
/// ```
/// use u_rota::anneal::acceptance_probability;
///
/// assert_eq!(acceptance_probability(0, 100), 0.5);
/// assert_eq!(acceptance_probability(100, 100), 0.25);
/// ```
#[inline]
pub fn acceptance_probability(i: usize, half_life: usize) -> f64 {
    0.5f64.powf(1.0 + i as f64 / half_life as f64)
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// The best schedule found.
    pub best: Schedule,

    /// Score of the best schedule.
    pub best_score: Score,

    /// Total number of neighbor evaluations.
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of moves strictly better than the schedule they replaced.
    pub improving_moves: usize,

    /// Best value, sampled at the start, every `history_interval`
    /// iterations, and at the end.
    pub best_history: Vec<f64>,
}

/// Executes acceptance-probability annealing.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs a search seeded from `anneal.seed`.
    pub fn run(
        config: &RotaConfig,
        weights: &Weights,
        anneal: &AnnealConfig,
    ) -> Result<AnnealResult, RotaError> {
        let mut rng = create_rng(anneal.seed);
        Self::run_with_source(config, weights, anneal, &mut rng)
    }

    /// Runs a search drawing every random number from `rng`.
    ///
    /// `anneal.seed` is ignored.
    pub fn run_with_source<U: UniformSource + ?Sized>(
        config: &RotaConfig,
        weights: &Weights,
        anneal: &AnnealConfig,
        rng: &mut U,
    ) -> Result<AnnealResult, RotaError> {
        anneal.validate()?;
        Ok(anneal_loop(
            config,
            weights,
            anneal.iterations,
            anneal.half_life,
            anneal.history_interval,
            rng,
        ))
    }

    /// Runs one independent search per seed in parallel and returns the best.
    ///
    /// Each run has its own random stream, so the result only depends on
    /// the seeds. Ties go to the earlier seed.
    #[cfg(feature = "parallel")]
    pub fn run_multi_start(
        config: &RotaConfig,
        weights: &Weights,
        anneal: &AnnealConfig,
        seeds: &[u64],
    ) -> Result<AnnealResult, RotaError> {
        use rayon::prelude::*;

        anneal.validate()?;
        if seeds.is_empty() {
            return Err(RotaError::InvalidSearch("no seeds given".into()));
        }

        let results: Vec<AnnealResult> = seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = create_rng(seed);
                anneal_loop(
                    config,
                    weights,
                    anneal.iterations,
                    anneal.half_life,
                    anneal.history_interval,
                    &mut rng,
                )
            })
            .collect();

        let mut best: Option<AnnealResult> = None;
        for result in results {
            let better = best
                .as_ref()
                .is_none_or(|b| result.best_score.value > b.best_score.value);
            if better {
                best = Some(result);
            }
        }
        best.ok_or_else(|| RotaError::InvalidSearch("no seeds given".into()))
    }
}

/// Searches for a high-scoring schedule and returns the best one seen.
///
/// A `half_life` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// use u_rota::anneal::search;
/// use u_rota::model::{PersonSpec, RotaConfig};
/// use u_rota::random::create_rng;
/// use u_rota::score::score;
/// use u_rota::weights::{Weight, Weights};
///
/// let mut builder = RotaConfig::builder(2);
/// builder.add_person(PersonSpec::new("a")).unwrap();
/// builder.add_person(PersonSpec::new("b")).unwrap();
/// let config = builder.build().unwrap();
/// let weights = Weights::new().with(Weight::ShiftOverlap, -10.0);
///
/// let mut rng = create_rng(1);
/// let (best, best_score) = search(&config, &weights, &mut rng, 2_000, 200);
/// assert_eq!(score(&config, &weights, &best), best_score);
/// ```
pub fn search<U: UniformSource + ?Sized>(
    config: &RotaConfig,
    weights: &Weights,
    rng: &mut U,
    iterations: usize,
    half_life: usize,
) -> (Schedule, Score) {
    let result = anneal_loop(config, weights, iterations, half_life.max(1), 0, rng);
    (result.best, result.best_score)
}

fn anneal_loop<U: UniformSource + ?Sized>(
    config: &RotaConfig,
    weights: &Weights,
    iterations: usize,
    half_life: usize,
    history_interval: usize,
    rng: &mut U,
) -> AnnealResult {
    info!(
        event = "search_start",
        people = config.person_count(),
        weeks = config.week_count(),
        iterations,
        half_life
    );

    let mut current = Schedule::random(config, rng);
    let mut current_score = score(config, weights, &current);
    let mut candidate = current.clone();
    let mut best = current.clone();
    let mut best_score = current_score.clone();

    let mut accepted_moves = 0usize;
    let mut improving_moves = 0usize;
    let mut best_history = vec![best_score.value];
    let mut last_percent = 0usize;

    for i in 0..iterations {
        let percent = i * 100 / iterations;
        if percent != last_percent {
            debug!(
                event = "search_progress",
                percent,
                best = best_score.value,
                current = current_score.value
            );
            last_percent = percent;
        }

        mutate_into(config, &current, &mut candidate, rng);
        let candidate_score = score(config, weights, &candidate);

        let improving = candidate_score.value > current_score.value;
        let u = rng.next_unit(ACCEPT_RESOLUTION);
        if improving || u < acceptance_probability(i, half_life) {
            mem::swap(&mut current, &mut candidate);
            current_score = candidate_score;
            accepted_moves += 1;
            if improving {
                improving_moves += 1;
            }

            if current_score.value > best_score.value {
                best.clone_from(&current);
                best_score.clone_from(&current_score);
            }
        }

        if history_interval > 0 && (i + 1) % history_interval == 0 {
            best_history.push(best_score.value);
        }
    }

    if best_history.last() != Some(&best_score.value) {
        best_history.push(best_score.value);
    }

    info!(
        event = "search_end",
        best = best_score.value,
        valid = best_score.is_valid(),
        failures = best_score.failures.len(),
        accepted_moves,
        improving_moves
    );
    if best_score.failures.truncated() {
        warn!(
            event = "failures_truncated",
            recorded = best_score.failures.len(),
            "best schedule has more hard violations than were recorded"
        );
    }

    AnnealResult {
        best,
        best_score,
        iterations,
        accepted_moves,
        improving_moves,
        best_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonSpec;
    use crate::weights::Weight;

    fn config(people: usize, weeks: usize) -> RotaConfig {
        let mut builder = RotaConfig::builder(weeks);
        for i in 0..people {
            builder.add_person(PersonSpec::new(format!("p{i}"))).unwrap();
        }
        builder.build().unwrap()
    }

    fn weights() -> Weights {
        Weights::new()
            .with(Weight::ShiftOverlap, -10.0)
            .with(Weight::WorkFollowingOnCall, -5.0)
            .with(Weight::OnCallDayDifference, -1.0)
            .with(Weight::WardWeekDifference, -1.0)
    }

    #[test]
    fn test_acceptance_probability_halves() {
        assert_eq!(acceptance_probability(0, 10), 0.5);
        assert_eq!(acceptance_probability(10, 10), 0.25);
        assert_eq!(acceptance_probability(20, 10), 0.125);
        assert!(acceptance_probability(5, 10) < 0.5);
        assert!(acceptance_probability(5, 10) > 0.25);
    }

    #[test]
    fn test_history_non_decreasing() {
        let config = config(3, 4);
        let anneal = AnnealConfig::default()
            .with_iterations(5_000)
            .with_half_life(500)
            .with_history_interval(100)
            .with_seed(5);
        let result = AnnealRunner::run(&config, &weights(), &anneal).unwrap();

        assert!(result.best_history.len() >= 50);
        for pair in result.best_history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(*result.best_history.last().unwrap(), result.best_score.value);
    }

    #[test]
    fn test_best_score_matches_best_schedule() {
        let config = config(3, 3);
        let weights = weights();
        let anneal = AnnealConfig::default()
            .with_iterations(3_000)
            .with_half_life(300)
            .with_seed(17);
        let result = AnnealRunner::run(&config, &weights, &anneal).unwrap();

        assert_eq!(result.iterations, 3_000);
        assert!(result.accepted_moves >= result.improving_moves);
        assert!(result.best.is_valid_for(&config));
        assert_eq!(score(&config, &weights, &result.best), result.best_score);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = config(4, 3);
        let anneal = AnnealConfig::default()
            .with_iterations(2_000)
            .with_half_life(200)
            .with_seed(1234);
        let a = AnnealRunner::run(&config, &weights(), &anneal).unwrap();
        let b = AnnealRunner::run(&config, &weights(), &anneal).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_score, b.best_score);
        assert_eq!(a.accepted_moves, b.accepted_moves);
        assert_eq!(a.best_history, b.best_history);
    }

    #[test]
    fn test_zero_iterations_returns_initial() {
        let config = config(2, 2);
        let weights = weights();
        let anneal = AnnealConfig::default().with_iterations(0).with_seed(3);
        let result = AnnealRunner::run(&config, &weights, &anneal).unwrap();

        let mut rng = create_rng(3);
        let initial = Schedule::random(&config, &mut rng);
        assert_eq!(result.best, initial);
        assert_eq!(result.accepted_moves, 0);
        assert_eq!(result.best_history, vec![result.best_score.value]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = config(2, 2);
        let anneal = AnnealConfig::default().with_half_life(0);
        assert!(matches!(
            AnnealRunner::run(&config, &weights(), &anneal),
            Err(RotaError::InvalidSearch(_))
        ));
    }

    #[test]
    fn test_search_improves_on_start() {
        let config = config(2, 4);
        let weights = weights();
        let mut rng = create_rng(8);
        let start = score(&config, &weights, &Schedule::random(&config, &mut rng));

        let mut rng = create_rng(8);
        let (best, best_score) = search(&config, &weights, &mut rng, 20_000, 0);
        assert!(best_score.value >= start.value);
        assert_eq!(score(&config, &weights, &best), best_score);
    }

    #[test]
    fn test_search_matches_runner() {
        let config = config(3, 2);
        let weights = weights();
        let anneal = AnnealConfig::default()
            .with_iterations(1_000)
            .with_half_life(100)
            .with_seed(77);
        let result = AnnealRunner::run(&config, &weights, &anneal).unwrap();

        let mut rng = create_rng(77);
        let (best, best_score) = search(&config, &weights, &mut rng, 1_000, 100);
        assert_eq!(best, result.best);
        assert_eq!(best_score, result.best_score);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_multi_start_picks_best_seed() {
        let config = config(3, 3);
        let weights = weights();
        let anneal = AnnealConfig::default()
            .with_iterations(1_000)
            .with_half_life(100);
        let seeds = [1, 2, 3, 4];
        let best = AnnealRunner::run_multi_start(&config, &weights, &anneal, &seeds).unwrap();

        for &seed in &seeds {
            let single = AnnealRunner::run(&config, &weights, &anneal.clone().with_seed(seed))
                .unwrap();
            assert!(best.best_score.value >= single.best_score.value);
        }
        assert!(AnnealRunner::run_multi_start(&config, &weights, &anneal, &[]).is_err());
    }
}
