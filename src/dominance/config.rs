//! Configuration options for the reduction engine.
//!
//! This module provides the configuration struct that controls the behavior
//! of the iterated-removal algorithm, plus the statistics collected during
//! a run.

use serde::{Deserialize, Serialize};

/// Configuration for the reduction engine.
///
/// This struct controls various aspects of the algorithm including:
/// - The numeric tolerance separating "strictly below one" from "one"
/// - The pivot budget of the bundled simplex solver
/// - Whether dominance probes within a scan run in parallel
///
/// # Example
/// ```
/// use dominance_solver::dominance::ReductionConfig;
///
/// let config = ReductionConfig::default();
/// assert!(!config.parallel_probes); // probes run sequentially by default
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// Numeric tolerance for the strict-dominance decision.
    ///
    /// A candidate is dominated when the optimal mixture weight is below
    /// `1.0 - epsilon`. The same tolerance guards the indifference
    /// denominators during equilibrium extraction.
    pub epsilon: f64,

    /// Maximum simplex pivots per LP solve.
    ///
    /// A solve that exhausts the budget is treated as "no solution", which
    /// the probe reads as "not dominated". Keeps a cycling LP from hanging
    /// a round.
    pub max_simplex_pivots: usize,

    /// Probe the candidates of one scan in parallel.
    ///
    /// The lowest-index dominated candidate is still the one retired, so
    /// the reduction result is identical either way. Worthwhile only for
    /// large strategy spaces; the per-probe LPs are small.
    pub parallel_probes: bool,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            max_simplex_pivots: 10_000,
            parallel_probes: false,
        }
    }
}

impl ReductionConfig {
    /// Create a new ReductionConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the strictness tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder method: set the simplex pivot budget.
    pub fn with_max_simplex_pivots(mut self, pivots: usize) -> Self {
        self.max_simplex_pivots = pivots;
        self
    }

    /// Builder method: enable or disable parallel probing.
    pub fn with_parallel_probes(mut self, enable: bool) -> Self {
        self.parallel_probes = enable;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 || self.epsilon >= 1.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.max_simplex_pivots == 0 {
            return Err(ConfigError::ZeroPivotBudget);
        }
        Ok(())
    }
}

/// Errors that can occur when validating the reduction configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Epsilon is not a finite value in [0, 1).
    InvalidEpsilon(f64),
    /// The simplex pivot budget is zero, so no LP could ever be solved.
    ZeroPivotBudget,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidEpsilon(val) => {
                write!(f, "Epsilon {} is not a finite value in [0, 1)", val)
            }
            ConfigError::ZeroPivotBudget => {
                write!(f, "Simplex pivot budget must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Statistics tracked during one reduction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReductionStats {
    /// Row strategies retired.
    pub rows_removed: u64,

    /// Column strategies retired.
    pub cols_removed: u64,

    /// Full row+column cycles executed, including the final clean one.
    pub passes: u64,

    /// Dominance LPs solved.
    pub lp_probes: u64,

    /// Total time spent reducing (in seconds).
    pub elapsed_seconds: f64,
}

impl ReductionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total strategies retired across both players.
    pub fn total_removed(&self) -> u64 {
        self.rows_removed + self.cols_removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReductionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.epsilon, 1e-9);
        assert_eq!(config.max_simplex_pivots, 10_000);
        assert!(!config.parallel_probes);
    }

    #[test]
    fn test_builder_methods() {
        let config = ReductionConfig::new()
            .with_epsilon(1e-6)
            .with_max_simplex_pivots(500)
            .with_parallel_probes(true);
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.max_simplex_pivots, 500);
        assert!(config.parallel_probes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_epsilon_rejected() {
        for bad in [f64::NAN, f64::INFINITY, -1e-9, 1.0] {
            let config = ReductionConfig::new().with_epsilon(bad);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidEpsilon(_))
            ));
        }
    }

    #[test]
    fn test_zero_pivot_budget_rejected() {
        let config = ReductionConfig::new().with_max_simplex_pivots(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPivotBudget)));
    }

    #[test]
    fn test_stats_total() {
        let mut stats = ReductionStats::new();
        stats.rows_removed = 3;
        stats.cols_removed = 2;
        assert_eq!(stats.total_removed(), 5);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ReductionConfig::new().with_parallel_probes(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: ReductionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.epsilon, config.epsilon);
        assert!(back.parallel_probes);
    }
}
