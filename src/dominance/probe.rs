//! The LP-based strict-dominance probe.
//!
//! One probe answers one question: can some probability mixture over the
//! other still-considered strategies of a player match or beat a candidate
//! strategy against every still-considered opposing strategy, using strictly
//! less than one unit of total weight? If yes, the candidate is strictly
//! dominated by a mixed strategy and can be removed.
//!
//! The LP solver in use requires non-negative input data, so when the
//! compared payoffs contain negatives all of them are lifted by the same
//! constant while the program is built. Shifting every compared value by one
//! constant preserves which mixtures dominate. The stored payoff grids are
//! never touched; only the probe's own coefficient copies are shifted.

use log::trace;

use crate::dominance::game::{NormalFormGame, Player};
use crate::dominance::lp::{LinearProgram, LpSolver, Relation};

/// Minimum payoff among the strategies a mixture may draw from.
///
/// Scans every still-considered strategy of `player` except the candidate,
/// across all still-considered opposing strategies. Returns `None` when
/// nothing is scanned, which means no shift is needed.
pub fn min_coefficient(game: &NormalFormGame, player: Player, candidate: usize) -> Option<i64> {
    let opposing = game.live_strategies(player.opponent());
    game.live_strategies(player)
        .into_iter()
        .filter(|&own| own != candidate)
        .flat_map(|own| opposing.iter().map(move |&opp| game.payoff(player, own, opp)))
        .min()
}

/// Additive lift that makes every compared coefficient non-negative.
///
/// Zero when the minimum compared payoff is already non-negative.
fn coefficient_shift(game: &NormalFormGame, player: Player, candidate: usize) -> f64 {
    match min_coefficient(game, player, candidate) {
        Some(min) if min < 0 => -min as f64,
        _ => 0.0,
    }
}

/// Build the dominance feasibility program for one candidate strategy.
///
/// Variables are the mixture weights over the other still-considered
/// strategies of `player`, objective is their sum (minimized), and there is
/// one `>=` constraint per still-considered opposing strategy.
fn build_program(game: &NormalFormGame, player: Player, candidate: usize) -> LinearProgram {
    let shift = coefficient_shift(game, player, candidate);
    let others: Vec<usize> = game
        .live_strategies(player)
        .into_iter()
        .filter(|&own| own != candidate)
        .collect();

    let mut program = LinearProgram::minimize(vec![1.0; others.len()]);
    for opp in game.live_strategies(player.opponent()) {
        let coefficients = others
            .iter()
            .map(|&own| game.payoff(player, own, opp) as f64 + shift)
            .collect();
        let rhs = game.payoff(player, candidate, opp) as f64 + shift;
        program.add_constraint(coefficients, Relation::Ge, rhs);
    }
    program
}

/// Test whether one strategy is strictly dominated by a mixed strategy.
///
/// `candidate` is an original (live) strategy index of `player`. Returns
/// `false` outright when fewer than two strategies remain: dominance needs
/// at least one alternative. Otherwise the probe is dominated iff the LP has
/// a solution whose component sum is strictly below one; a total weight of
/// exactly one (or more) is rejected. An infeasible or failed solve simply
/// means "not dominated".
pub fn is_dominated<S: LpSolver>(
    game: &NormalFormGame,
    player: Player,
    candidate: usize,
    solver: &S,
    epsilon: f64,
) -> bool {
    if game.live_count(player) < 2 {
        return false;
    }
    debug_assert!(
        game.live_strategies(player).contains(&candidate),
        "probing a retired strategy"
    );

    let program = build_program(game, player, candidate);
    match solver.solve(&program) {
        Some(solution) => {
            let weight: f64 = solution.iter().sum();
            trace!(
                "{} strategy {}: mixture weight {:.6}",
                player,
                candidate,
                weight
            );
            weight < 1.0 - epsilon
        }
        None => {
            trace!("{} strategy {}: probe infeasible", player, candidate);
            false
        }
    }
}
