//! Classic normal-form games as two-level move trees.
//!
//! Each game is built through [`matrix_game`], which lays out the tree the
//! engine expects: the root's children are the row player's moves, their
//! children are the column player's moves, and the leaves carry both
//! payoffs. Row moves are labeled `1:1:<Name>`, column moves `2:1:<Name>`.

use rand::Rng;

use crate::dominance::game::MoveNode;

/// Build a two-level game tree from payoff matrices and move names.
///
/// # Arguments
/// * `row_names` - Short names of the row player's moves
/// * `col_names` - Short names of the column player's moves
/// * `u1` - Row player's payoffs, `u1[row][col]`
/// * `u2` - Column player's payoffs, same shape
///
/// # Panics
/// Panics when the matrices do not match the name counts; callers hand in
/// literal game definitions.
pub fn matrix_game(
    row_names: &[&str],
    col_names: &[&str],
    u1: &[Vec<i64>],
    u2: &[Vec<i64>],
) -> MoveNode {
    assert_eq!(u1.len(), row_names.len(), "row count mismatch");
    assert_eq!(u2.len(), row_names.len(), "row count mismatch");

    let rows = row_names
        .iter()
        .enumerate()
        .map(|(i, row_name)| {
            assert_eq!(u1[i].len(), col_names.len(), "column count mismatch");
            assert_eq!(u2[i].len(), col_names.len(), "column count mismatch");
            let cols = col_names
                .iter()
                .enumerate()
                .map(|(j, col_name)| {
                    MoveNode::terminal(format!("2:1:{}", col_name), u1[i][j], u2[i][j])
                })
                .collect();
            MoveNode::decision(format!("1:1:{}", row_name), cols)
        })
        .collect();
    MoveNode::decision("root", rows)
}

/// The Prisoner's Dilemma.
///
/// Defection strictly dominates cooperation for both players, so iterated
/// removal collapses the game to (Defect, Defect).
pub fn prisoners_dilemma() -> MoveNode {
    matrix_game(
        &["Cooperate", "Defect"],
        &["Cooperate", "Defect"],
        &[vec![3, 0], vec![5, 1]],
        &[vec![3, 5], vec![0, 1]],
    )
}

/// Matching Pennies.
///
/// No strategy is dominated; the unique equilibrium mixes both moves with
/// probability one half each.
pub fn matching_pennies() -> MoveNode {
    matrix_game(
        &["Heads", "Tails"],
        &["Heads", "Tails"],
        &[vec![1, -1], vec![-1, 1]],
        &[vec![-1, 1], vec![1, -1]],
    )
}

/// A 3x3 game where only mixtures dominate.
///
/// Each player's `Hedge` move is beaten by the equal mixture of the other
/// two moves but by neither alone, so pure-strategy comparison would remove
/// nothing. The reduced 2x2 game mixes evenly.
pub fn mixed_dominance() -> MoveNode {
    matrix_game(
        &["Top", "Bottom", "Hedge"],
        &["Left", "Right", "Hedge"],
        &[vec![6, 0, 4], vec![0, 6, 4], vec![2, 2, 2]],
        &[vec![6, 0, 2], vec![0, 6, 2], vec![4, 4, 2]],
    )
}

/// Generate a pair of uniformly random payoff matrices.
///
/// Payoffs are drawn independently from `lo..=hi`. Useful with a seeded
/// generator for reproducible stress tests and benchmarks.
pub fn random_payoffs(
    rng: &mut impl Rng,
    rows: usize,
    cols: usize,
    lo: i64,
    hi: i64,
) -> (Vec<Vec<i64>>, Vec<Vec<i64>>) {
    let mut grid = || {
        (0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_range(lo..=hi)).collect())
            .collect::<Vec<Vec<i64>>>()
    };
    let u1 = grid();
    let u2 = grid();
    (u1, u2)
}

/// Generate a random game tree with numbered move names.
pub fn random_game(rng: &mut impl Rng, rows: usize, cols: usize, lo: i64, hi: i64) -> MoveNode {
    let (u1, u2) = random_payoffs(rng, rows, cols, lo, hi);
    let row_names: Vec<String> = (0..rows).map(|i| format!("R{}", i)).collect();
    let col_names: Vec<String> = (0..cols).map(|j| format!("C{}", j)).collect();
    matrix_game(
        &row_names.iter().map(String::as_str).collect::<Vec<_>>(),
        &col_names.iter().map(String::as_str).collect::<Vec<_>>(),
        &u1,
        &u2,
    )
}
