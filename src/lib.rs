//! # Dominance Solver
//!
//! An iterated strict-dominance reduction engine for two-player
//! normal-form games, with LP-backed mixed-strategy dominance probes and
//! 2x2 equilibrium extraction.
//!
//! ## Features
//!
//! - **Tree Intake**: Builds payoff matrices from any [`GameNode`] tree,
//!   with full structural validation
//! - **Mixed Dominance**: Detects strategies dominated by probability
//!   mixtures, not just by single strategies
//! - **Bundled LP Solver**: A dense Big-M simplex behind the [`LpSolver`]
//!   trait, swappable for testing
//! - **Masked Reduction**: Removal flips a liveness bit; payoff grids are
//!   never rebuilt or mutated
//! - **Equilibrium Extraction**: Pure outcomes and 2x2 indifference mixing,
//!   with safe fallbacks for everything else
//!
//! ## Quick Start
//!
//! ```
//! use dominance_solver::dominance::{solve_round, ReductionConfig, SimplexSolver};
//! use dominance_solver::games::classic::prisoners_dilemma;
//!
//! let solution = solve_round(
//!     &prisoners_dilemma(),
//!     SimplexSolver::default(),
//!     &ReductionConfig::default(),
//! )
//! .expect("well-formed game");
//!
//! // Both players defect with probability 1.
//! assert_eq!(solution.profile.row_map()["1:1:Defect"], 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`dominance`]: Core reduction engine, LP solver and equilibrium logic
//! - [`games`]: Classic example games (Prisoner's Dilemma, Matching Pennies)
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     solve_round (pipeline)                 │
//! │  game tree ──▶ NormalFormGame ──▶ fixpoint ──▶ equilibrium │
//! └────────────────────────────────────────────────────────────┘
//!                          │
//!                          │ one LP per dominance probe
//!                          ▼
//!               ┌─────────────────────┐
//!               │  LpSolver (trait)   │
//!               │  SimplexSolver      │
//!               └─────────────────────┘
//! ```

#![warn(missing_docs)]

/// Strict-dominance reduction module.
///
/// This is the core module containing the engine, probe and LP solver.
pub mod dominance;

/// Game implementations module.
///
/// Contains classic games for testing and demonstration.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use dominance::{
    solve_round, EquilibriumOutcome, GameNode, LpSolver, MoveNode, NormalFormGame, Player,
    ReductionConfig, ReductionEngine, ReductionStats, RoundSolution, SimplexSolver,
    StrategyProfile,
};
