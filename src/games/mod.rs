//! Game implementations for the reduction engine.
//!
//! This module contains classic normal-form games built as [`MoveNode`]
//! trees. These serve as:
//!
//! 1. **Validation**: Games with known outcomes (like the Prisoner's
//!    Dilemma) verify that the reduction is correct.
//!
//! 2. **Examples**: Demonstrate how to lay out the two-level tree the
//!    engine expects.
//!
//! 3. **Benchmarks**: Provide standardized games for performance testing.
//!
//! ## Available Games
//!
//! - [`classic`]: Prisoner's Dilemma, Matching Pennies, a mixture-dominance
//!   game, and seeded random payoff generation
//!
//! ## Adding New Games
//!
//! To add a new game:
//!
//! 1. Build a two-level tree of decision and terminal nodes (or implement
//!    `GameNode` on your own tree type)
//! 2. Label moves `"<player>:<group>:<MoveName>"`
//! 3. Add tests that verify the expected survivors and profile
//!
//! See the [`classic`] module for complete examples.
//!
//! [`MoveNode`]: crate::dominance::MoveNode

pub mod classic;
