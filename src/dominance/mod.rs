//! Iterated strict-dominance reduction for two-player normal-form games.
//!
//! This module implements the full pipeline from a game-tree snapshot to an
//! equilibrium answer.
//!
//! # Overview
//!
//! A strategy is strictly dominated when some probability mixture over the
//! player's other strategies beats it against every strategy the opponent
//! might still play. Removing a dominated strategy can expose new dominance,
//! so the removal iterates:
//!
//! 1. Build a normal-form payoff view of the game tree
//! 2. Probe each row strategy with a small linear program; retire the first
//!    dominated one and rescan
//! 3. Do the same for column strategies
//! 4. Repeat until a full row+column cycle removes nothing
//! 5. Classify the survivors as a pure or 2x2 mixed equilibrium
//!
//! # Usage
//!
//! To reduce a game:
//!
//! 1. Build a game tree of [`MoveNode`]s (or implement [`GameNode`] on your
//!    own tree type)
//! 2. Pick an LP solver; the bundled [`SimplexSolver`] handles the probe LPs
//! 3. Call [`solve_round`] for the tree-to-answer pipeline, or drive a
//!    [`ReductionEngine`] directly when you only want the reduced game
//!
//! # Example
//!
//! ```
//! use dominance_solver::dominance::{solve_round, ReductionConfig, SimplexSolver};
//! use dominance_solver::games::classic::prisoners_dilemma;
//!
//! let root = prisoners_dilemma();
//! let solution = solve_round(&root, SimplexSolver::default(), &ReductionConfig::default())
//!     .expect("well-formed game");
//! println!("{:?}", solution.outcome);
//! assert!(solution.profile.is_valid(1e-6));
//! ```
//!
//! # Theory
//!
//! The dominance probe for a candidate strategy `s` solves:
//!
//! ```text
//! minimize   sum(w_i)                          over the other strategies i
//! subject to sum(w_i * U(i, t)) >= U(s, t)     for every live opponent t
//!            w_i >= 0
//! ```
//!
//! If the optimum exists with `sum(w_i) < 1`, scaling the weights up to a
//! proper distribution beats `s` strictly everywhere, so `s` is strictly
//! dominated by a mixed strategy. Iterated removal of strictly dominated
//! strategies is order-independent in outcome, which is why retiring always
//! the lowest-index hit is safe.
//!
//! # References
//!
//! - Osborne, M., Rubinstein, A. "A Course in Game Theory" (1994), ch. 4
//! - Dantzig, G. "Linear Programming and Extensions" (1963)

pub mod config;
pub mod engine;
pub mod equilibrium;
pub mod game;
pub mod lp;
pub mod probe;

// Re-export main types for convenient access
pub use config::{ConfigError, ReductionConfig, ReductionStats};
pub use engine::{solve_round, ReductionEngine, RoundSolution};
pub use equilibrium::{EquilibriumExtractor, EquilibriumOutcome, StrategyProfile, UnresolvedReason};
pub use game::{GameNode, MoveNode, NormalFormGame, Player, StructureError};
pub use lp::{Constraint, LinearProgram, LpSolver, Relation, SimplexSolver};
