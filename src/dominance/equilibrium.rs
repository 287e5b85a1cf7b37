//! Equilibrium extraction from a reduced game.
//!
//! After the fixpoint, the surviving (row, column) cells are the candidate
//! pure equilibria. A single surviving cell is the equilibrium outright.
//! When exactly two strategies survive per axis, the mixed probabilities
//! come from the classic 2x2 indifference formula: each player mixes to make
//! the *other* player indifferent, so the row mix is computed from the
//! column player's payoffs and vice versa. Larger survivor sets are reported
//! as unresolved rather than guessed; the profile then falls back to a
//! uniform distribution over the survivors so the round can still answer.

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::dominance::game::{short_label, NormalFormGame, Player};

/// Why the extractor could not pin down a single equilibrium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnresolvedReason {
    /// More than two strategies survive on some axis; general mixed-strategy
    /// solving is out of scope.
    TooManySurvivors,
    /// The 2x2 indifference formula degenerated (payoff-equivalent
    /// strategies give a vanishing denominator, or a probability outside
    /// [0, 1]).
    DegenerateIndifference,
}

/// Classification of the surviving profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EquilibriumOutcome {
    /// No cell survived the reduction. Theoretically impossible for finite
    /// games, but reportable rather than fatal.
    NoSurvivors,
    /// A unique surviving cell; both players play it with probability 1.
    Pure {
        /// Original index of the surviving row.
        row: usize,
        /// Original index of the surviving column.
        col: usize,
    },
    /// At most two survivors per axis; probabilities from the indifference
    /// formula (or trivially 1 for a lone survivor).
    Mixed {
        /// Probability of the lower-indexed surviving row.
        row_mix: f64,
        /// Probability of the lower-indexed surviving column.
        col_mix: f64,
    },
    /// Equilibrium left undetermined; the profile holds a uniform fallback.
    Unresolved {
        /// What prevented resolution.
        reason: UnresolvedReason,
    },
}

/// Per-player probabilities over the original strategy labels.
///
/// Strategies removed during reduction keep an explicit probability of zero,
/// so the vectors always line up with the original game and each side sums
/// to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyProfile {
    /// Original row labels.
    pub row_labels: Vec<String>,
    /// Original column labels.
    pub col_labels: Vec<String>,
    /// Row player's probability per original row.
    pub row_probabilities: Vec<f64>,
    /// Column player's probability per original column.
    pub col_probabilities: Vec<f64>,
}

impl StrategyProfile {
    fn zeroed(game: &NormalFormGame) -> Self {
        Self {
            row_labels: game.row_labels().to_vec(),
            col_labels: game.col_labels().to_vec(),
            row_probabilities: vec![0.0; game.num_rows()],
            col_probabilities: vec![0.0; game.num_cols()],
        }
    }

    /// Uniform distribution over the given surviving indices of each axis.
    fn uniform_over(game: &NormalFormGame, rows: &[usize], cols: &[usize]) -> Self {
        let mut profile = Self::zeroed(game);
        for &i in rows {
            profile.row_probabilities[i] = 1.0 / rows.len() as f64;
        }
        for &j in cols {
            profile.col_probabilities[j] = 1.0 / cols.len() as f64;
        }
        profile
    }

    /// Row player's mapping from full label to probability, as submitted to
    /// the platform.
    pub fn row_map(&self) -> FxHashMap<String, f64> {
        self.row_labels
            .iter()
            .cloned()
            .zip(self.row_probabilities.iter().copied())
            .collect()
    }

    /// Column player's mapping from full label to probability.
    pub fn col_map(&self) -> FxHashMap<String, f64> {
        self.col_labels
            .iter()
            .cloned()
            .zip(self.col_probabilities.iter().copied())
            .collect()
    }

    /// Whether both sides are proper distributions within `tolerance`.
    pub fn is_valid(&self, tolerance: f64) -> bool {
        let ok = |probs: &[f64]| {
            probs.iter().all(|&p| (-tolerance..=1.0 + tolerance).contains(&p))
                && (probs.iter().sum::<f64>() - 1.0).abs() <= tolerance
        };
        ok(&self.row_probabilities) && ok(&self.col_probabilities)
    }
}

/// Turns a reduced [`NormalFormGame`] into an outcome and a profile.
#[derive(Debug, Clone, Copy)]
pub struct EquilibriumExtractor {
    epsilon: f64,
}

impl EquilibriumExtractor {
    /// Create an extractor; `epsilon` guards the indifference denominators.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Classify the survivors and build the probability profile.
    pub fn extract(&self, game: &NormalFormGame) -> (EquilibriumOutcome, StrategyProfile) {
        let rows = game.live_rows();
        let cols = game.live_cols();

        if rows.is_empty() || cols.is_empty() {
            warn!("no surviving cells after reduction");
            let all_rows: Vec<usize> = (0..game.num_rows()).collect();
            let all_cols: Vec<usize> = (0..game.num_cols()).collect();
            return (
                EquilibriumOutcome::NoSurvivors,
                StrategyProfile::uniform_over(game, &all_rows, &all_cols),
            );
        }

        if rows.len() == 1 && cols.len() == 1 {
            let (row, col) = (rows[0], cols[0]);
            debug!(
                "pure equilibrium ({}, {})",
                short_label(game.row_label(row)),
                short_label(game.col_label(col))
            );
            let mut profile = StrategyProfile::zeroed(game);
            profile.row_probabilities[row] = 1.0;
            profile.col_probabilities[col] = 1.0;
            return (EquilibriumOutcome::Pure { row, col }, profile);
        }

        if rows.len() > 2 || cols.len() > 2 {
            debug!(
                "{} rows x {} columns survive; general mixed-strategy solving required",
                rows.len(),
                cols.len()
            );
            return (
                EquilibriumOutcome::Unresolved {
                    reason: UnresolvedReason::TooManySurvivors,
                },
                StrategyProfile::uniform_over(game, &rows, &cols),
            );
        }

        // At most two survivors per axis, at least two cells in total.
        let row_mix = match rows.len() {
            1 => Some(1.0),
            _ if cols.len() == 2 => self.indifference_mix(game, Player::Row, &rows, &cols),
            _ => Some(0.5),
        };
        let col_mix = match cols.len() {
            1 => Some(1.0),
            _ if rows.len() == 2 => self.indifference_mix(game, Player::Column, &cols, &rows),
            _ => Some(0.5),
        };

        let (Some(row_mix), Some(col_mix)) = (row_mix, col_mix) else {
            return (
                EquilibriumOutcome::Unresolved {
                    reason: UnresolvedReason::DegenerateIndifference,
                },
                StrategyProfile::uniform_over(game, &rows, &cols),
            );
        };

        let mut profile = StrategyProfile::zeroed(game);
        profile.row_probabilities[rows[0]] = row_mix;
        if rows.len() == 2 {
            profile.row_probabilities[rows[1]] = 1.0 - row_mix;
        }
        profile.col_probabilities[cols[0]] = col_mix;
        if cols.len() == 2 {
            profile.col_probabilities[cols[1]] = 1.0 - col_mix;
        }
        (EquilibriumOutcome::Mixed { row_mix, col_mix }, profile)
    }

    /// Probability of the first of two `mixer` strategies that makes the
    /// opponent indifferent between its own two surviving strategies.
    ///
    /// `own` are the mixer's two surviving indices, `opp` the opponent's.
    /// Computed from the *opponent's* payoffs. `None` when the denominator
    /// vanishes or the probability falls outside [0, 1].
    fn indifference_mix(
        &self,
        game: &NormalFormGame,
        mixer: Player,
        own: &[usize],
        opp: &[usize],
    ) -> Option<f64> {
        let other = mixer.opponent();
        // Opponent's payoff when the mixer plays `i` and the opponent `j`.
        let u = |i: usize, j: usize| game.payoff(other, opp[j], own[i]) as f64;

        let numerator = u(1, 1) - u(1, 0);
        let denominator = u(0, 0) - u(1, 0) - u(0, 1) + u(1, 1);
        if denominator.abs() < self.epsilon.max(f64::EPSILON) {
            warn!("indifference denominator vanished for {} mix", mixer);
            return None;
        }
        let p = numerator / denominator;
        if !(0.0..=1.0).contains(&p) {
            warn!("indifference probability {} out of range for {} mix", p, mixer);
            return None;
        }
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::game::NormalFormGame;

    const TOL: f64 = 1e-6;

    fn game(u1: Vec<Vec<i64>>, u2: Vec<Vec<i64>>) -> NormalFormGame {
        let rows = u1.len();
        let cols = u1[0].len();
        let row_labels = (0..rows).map(|i| format!("1:1:R{}", i)).collect();
        let col_labels = (0..cols).map(|j| format!("2:1:C{}", j)).collect();
        NormalFormGame::from_matrices(u1, u2, row_labels, col_labels).unwrap()
    }

    fn extractor() -> EquilibriumExtractor {
        EquilibriumExtractor::new(1e-9)
    }

    #[test]
    fn test_single_cell_is_pure() {
        let mut g = game(vec![vec![3, 0], vec![5, 1]], vec![vec![3, 5], vec![0, 1]]);
        g.retire(Player::Row, 0);
        g.retire(Player::Column, 0);
        let (outcome, profile) = extractor().extract(&g);
        assert_eq!(outcome, EquilibriumOutcome::Pure { row: 1, col: 1 });
        assert_eq!(profile.row_probabilities, vec![0.0, 1.0]);
        assert_eq!(profile.col_probabilities, vec![0.0, 1.0]);
        assert!(profile.is_valid(TOL));
    }

    #[test]
    fn test_matching_pennies_mixes_evenly() {
        let g = game(
            vec![vec![1, -1], vec![-1, 1]],
            vec![vec![-1, 1], vec![1, -1]],
        );
        let (outcome, profile) = extractor().extract(&g);
        let EquilibriumOutcome::Mixed { row_mix, col_mix } = outcome else {
            panic!("expected mixed outcome, got {:?}", outcome);
        };
        assert!((row_mix - 0.5).abs() < TOL);
        assert!((col_mix - 0.5).abs() < TOL);
        assert!(profile.is_valid(TOL));
    }

    #[test]
    fn test_asymmetric_mixed_probabilities() {
        // Row player mixes from the column player's payoffs: indifference at
        // p = (u2[1][1]-u2[1][0]) / (u2[0][0]-u2[1][0]-u2[0][1]+u2[1][1]).
        let g = game(
            vec![vec![2, 0], vec![0, 1]],
            vec![vec![1, 0], vec![0, 2]],
        );
        let (outcome, profile) = extractor().extract(&g);
        let EquilibriumOutcome::Mixed { row_mix, col_mix } = outcome else {
            panic!("expected mixed outcome, got {:?}", outcome);
        };
        // p = (2 - 0) / (1 - 0 - 0 + 2) = 2/3; q from u1: (1 - 0) / 3 = 1/3.
        assert!((row_mix - 2.0 / 3.0).abs() < TOL);
        assert!((col_mix - 1.0 / 3.0).abs() < TOL);
        assert!(profile.is_valid(TOL));
    }

    #[test]
    fn test_two_rows_one_column_split_evenly() {
        let mut g = game(
            vec![vec![1, 9], vec![1, 9]],
            vec![vec![5, 0], vec![5, 0]],
        );
        g.retire(Player::Column, 1);
        let (outcome, profile) = extractor().extract(&g);
        assert!(matches!(outcome, EquilibriumOutcome::Mixed { .. }));
        assert_eq!(profile.row_probabilities, vec![0.5, 0.5]);
        assert_eq!(profile.col_probabilities, vec![1.0, 0.0]);
        assert!(profile.is_valid(TOL));
    }

    #[test]
    fn test_three_survivors_unresolved_uniform() {
        let g = game(
            vec![vec![0, 1, 2], vec![2, 0, 1], vec![1, 2, 0]],
            vec![vec![0, 2, 1], vec![1, 0, 2], vec![2, 1, 0]],
        );
        let (outcome, profile) = extractor().extract(&g);
        assert_eq!(
            outcome,
            EquilibriumOutcome::Unresolved {
                reason: UnresolvedReason::TooManySurvivors
            }
        );
        for p in &profile.row_probabilities {
            assert!((p - 1.0 / 3.0).abs() < TOL);
        }
        assert!(profile.is_valid(TOL));
    }

    #[test]
    fn test_degenerate_indifference_falls_back() {
        // Column player's payoffs identical across rows: denominator is 0.
        let g = game(
            vec![vec![1, 0], vec![0, 1]],
            vec![vec![2, 3], vec![2, 3]],
        );
        let (outcome, profile) = extractor().extract(&g);
        assert_eq!(
            outcome,
            EquilibriumOutcome::Unresolved {
                reason: UnresolvedReason::DegenerateIndifference
            }
        );
        assert_eq!(profile.row_probabilities, vec![0.5, 0.5]);
        assert!(profile.is_valid(TOL));
        // No NaN ever leaks into a submitted probability.
        assert!(profile.row_probabilities.iter().all(|p| p.is_finite()));
        assert!(profile.col_probabilities.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_maps_keyed_by_full_labels() {
        let mut g = game(vec![vec![3, 0], vec![5, 1]], vec![vec![3, 5], vec![0, 1]]);
        g.retire(Player::Row, 0);
        g.retire(Player::Column, 0);
        let (_, profile) = extractor().extract(&g);
        let rows = profile.row_map();
        assert_eq!(rows.get("1:1:R0"), Some(&0.0));
        assert_eq!(rows.get("1:1:R1"), Some(&1.0));
    }
}
