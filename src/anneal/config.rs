//! Search configuration.

use crate::error::RotaError;

/// Default iteration budget.
pub const DEFAULT_ITERATIONS: usize = 6 * 1024 * 1024;

/// Default number of iterations over which the acceptance probability halves.
pub const DEFAULT_HALF_LIFE: usize = 256 * 1024;

/// Default seed, so that unseeded runs are still reproducible.
pub const DEFAULT_SEED: u64 = 0xABCD_0123;

/// Configuration for an annealing run.
///
/// # Examples
///
/// ```
/// use u_rota::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_iterations(100_000)
///     .with_half_life(4_096)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Number of neighbor evaluations.
    pub iterations: usize,

    /// Iterations after which the blind acceptance probability has halved.
    pub half_life: usize,

    /// Seed for the run's random stream.
    pub seed: u64,

    /// Best value is sampled into the history every this many iterations.
    /// 0 disables the history apart from its first and last entries.
    pub history_interval: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            half_life: DEFAULT_HALF_LIFE,
            seed: DEFAULT_SEED,
            history_interval: 1024,
        }
    }
}

impl AnnealConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_half_life(mut self, n: usize) -> Self {
        self.half_life = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RotaError> {
        if self.half_life == 0 {
            return Err(RotaError::InvalidSearch(
                "half_life must be positive".into(),
            ));
        }
        Ok(())
    }
}
