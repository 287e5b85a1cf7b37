//! Iterated removal of strictly dominated strategies.
//!
//! The engine alternates a row pass and a column pass. Each pass scans the
//! still-considered strategies from the lowest index, probes each for mixed
//! dominance, retires the first confirmed one and restarts its scan (a
//! removal changes every later probe's inputs). A pass ends after one clean
//! scan, or immediately when a single strategy remains. The outer loop stops
//! when a full row+column cycle retires nothing; since every other cycle
//! shrinks the game, the loop terminates within `rows + cols` removals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::dominance::config::{ReductionConfig, ReductionStats};
use crate::dominance::equilibrium::{EquilibriumExtractor, EquilibriumOutcome, StrategyProfile};
use crate::dominance::game::{GameNode, NormalFormGame, Player, StructureError};
use crate::dominance::lp::LpSolver;
use crate::dominance::probe;

/// Drives one reduction run over a [`NormalFormGame`].
///
/// Generic over the LP solver so the dominance oracle stays a black box.
/// One engine serves one round: build it from the round's game, call
/// [`reduce`](Self::reduce), then read the reduced game back out.
pub struct ReductionEngine<S: LpSolver> {
    game: NormalFormGame,
    solver: S,
    config: ReductionConfig,
    stats: ReductionStats,
}

impl<S: LpSolver> ReductionEngine<S> {
    /// Create an engine for one game.
    pub fn new(game: NormalFormGame, solver: S, config: ReductionConfig) -> Self {
        Self {
            game,
            solver,
            config,
            stats: ReductionStats::new(),
        }
    }

    /// Run row and column passes until a full cycle removes nothing.
    pub fn reduce(&mut self) -> &ReductionStats {
        let start = Instant::now();
        loop {
            self.stats.passes += 1;
            let removed_rows = self.run_pass(Player::Row);
            let removed_cols = self.run_pass(Player::Column);
            if !removed_rows && !removed_cols {
                break;
            }
        }
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        info!(
            "reduction fixpoint: {} rows and {} columns removed in {} passes",
            self.stats.rows_removed, self.stats.cols_removed, self.stats.passes
        );
        &self.stats
    }

    /// One pass over the strategies of `player`. Returns whether anything
    /// was retired.
    fn run_pass(&mut self, player: Player) -> bool {
        let mut removed_any = false;
        while self.game.live_count(player) > 1 {
            let Some(dominated) = self.find_dominated(player) else {
                break;
            };
            self.game.retire(player, dominated);
            match player {
                Player::Row => self.stats.rows_removed += 1,
                Player::Column => self.stats.cols_removed += 1,
            }
            removed_any = true;
            debug!("{} pass: retired strategy {}, rescanning", player, dominated);
        }
        removed_any
    }

    /// Lowest-index live strategy of `player` that is strictly dominated,
    /// or `None` after a clean scan.
    fn find_dominated(&mut self, player: Player) -> Option<usize> {
        let candidates = self.game.live_strategies(player);
        if self.config.parallel_probes {
            let probes = AtomicU64::new(0);
            let found = candidates.par_iter().copied().find_first(|&candidate| {
                probes.fetch_add(1, Ordering::Relaxed);
                probe::is_dominated(
                    &self.game,
                    player,
                    candidate,
                    &self.solver,
                    self.config.epsilon,
                )
            });
            self.stats.lp_probes += probes.into_inner();
            found
        } else {
            for candidate in candidates {
                self.stats.lp_probes += 1;
                if probe::is_dominated(
                    &self.game,
                    player,
                    candidate,
                    &self.solver,
                    self.config.epsilon,
                ) {
                    return Some(candidate);
                }
            }
            None
        }
    }

    /// The game in its current (possibly reduced) state.
    pub fn game(&self) -> &NormalFormGame {
        &self.game
    }

    /// Statistics for this run so far.
    pub fn stats(&self) -> &ReductionStats {
        &self.stats
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Consume the engine, returning the reduced game.
    pub fn into_game(self) -> NormalFormGame {
        self.game
    }
}

/// Result of one round: the equilibrium outcome, the probability profile to
/// submit, and the reduction statistics.
///
/// The profile is always valid — even for an
/// [`Unresolved`](EquilibriumOutcome::Unresolved) outcome it carries the
/// uniform fallback over surviving strategies, so the caller can always
/// answer the platform's request.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSolution {
    /// How the surviving profile was classified.
    pub outcome: EquilibriumOutcome,
    /// Per-player probabilities over the original strategy labels.
    pub profile: StrategyProfile,
    /// Reduction statistics for the round.
    pub stats: ReductionStats,
}

/// Solve one round from a game tree snapshot.
///
/// Builds the normal-form game (a malformed tree is fatal and surfaced),
/// reduces it to a fixpoint and extracts the equilibrium profile.
pub fn solve_round<N: GameNode, S: LpSolver>(
    root: &N,
    solver: S,
    config: &ReductionConfig,
) -> Result<RoundSolution, StructureError> {
    let game = NormalFormGame::from_tree(root)?;
    let mut engine = ReductionEngine::new(game, solver, config.clone());
    engine.reduce();
    let stats = engine.stats().clone();
    let (outcome, profile) =
        EquilibriumExtractor::new(config.epsilon).extract(engine.game());
    Ok(RoundSolution {
        outcome,
        profile,
        stats,
    })
}
