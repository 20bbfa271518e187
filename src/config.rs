//! Solver configuration.

/// Default cap on batched role-2 iterations in the exact engine.
pub const DEFAULT_WORK_BUDGET: u64 = 2_000_000_000;

/// Default number of randomized trials in the approximate engine.
pub const DEFAULT_TRIALS: usize = 15_000;

/// Default RNG seed; a fixed seed keeps the fallback path reproducible.
pub const DEFAULT_SEED: u64 = 114_514;

/// Configuration for [`solve`](crate::solve).
///
/// # Examples
///
/// ```
/// use triad_solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_work_budget(1_000_000)
///     .with_trials(2_000)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Exact-engine work budget, counted in batched role-2 iterations.
    ///
    /// When exceeded, the call falls back to the approximate engine.
    /// `0` forces the fallback on the first batched scan.
    pub work_budget: u64,

    /// Number of randomized hashing trials the approximate engine runs.
    pub trials: usize,

    /// Seed for the approximate engine's bucket assignments.
    ///
    /// Identical inputs and an identical seed produce identical results,
    /// including when the approximate path is taken.
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            work_budget: DEFAULT_WORK_BUDGET,
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
        }
    }
}

impl SolverConfig {
    pub fn with_work_budget(mut self, budget: u64) -> Self {
        self.work_budget = budget;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.trials == 0 {
            return Err("trials must be at least 1".into());
        }
        Ok(())
    }
}
