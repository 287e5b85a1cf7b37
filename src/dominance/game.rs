//! Game-tree input contract and the normal-form payoff arena.
//!
//! The reduction engine consumes a two-level game tree: the root's children
//! are the row player's moves, each child's children are the column player's
//! moves, and every grandchild is a leaf carrying both players' payoffs.
//! Anything deeper or shallower is a structural mismatch and the round fails.
//!
//! Internally the game is held as a pair of fixed integer payoff grids plus a
//! liveness mask per axis. Removing a dominated strategy clears its mask bit;
//! the grids are never resized, so index bookkeeping lives in one place.

use std::fmt;

use log::debug;

/// Trait for nodes of the external game tree.
///
/// Implement this to feed a platform-specific tree into the engine. Labels
/// follow the `"<player>:<group>:<MoveName>"` convention; payoffs are only
/// present on terminal nodes.
pub trait GameNode {
    /// Child nodes in tree order.
    fn children(&self) -> Vec<&Self>;

    /// Number of children without materializing them.
    fn num_children(&self) -> usize {
        self.children().len()
    }

    /// Full move label of this node.
    fn label(&self) -> &str;

    /// Row player's payoff, present at terminal nodes only.
    fn payoff_p1(&self) -> Option<i64>;

    /// Column player's payoff, present at terminal nodes only.
    fn payoff_p2(&self) -> Option<i64>;
}

/// A simple owned tree node for tests, demos and benches.
#[derive(Debug, Clone)]
pub struct MoveNode {
    label: String,
    children: Vec<MoveNode>,
    payoffs: Option<(i64, i64)>,
}

impl MoveNode {
    /// Create a decision node with the given children.
    pub fn decision(label: impl Into<String>, children: Vec<MoveNode>) -> Self {
        Self {
            label: label.into(),
            children,
            payoffs: None,
        }
    }

    /// Create a terminal node carrying both players' payoffs.
    pub fn terminal(label: impl Into<String>, payoff_p1: i64, payoff_p2: i64) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
            payoffs: Some((payoff_p1, payoff_p2)),
        }
    }
}

impl GameNode for MoveNode {
    fn children(&self) -> Vec<&Self> {
        self.children.iter().collect()
    }

    fn num_children(&self) -> usize {
        self.children.len()
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn payoff_p1(&self) -> Option<i64> {
        self.payoffs.map(|(p1, _)| p1)
    }

    fn payoff_p2(&self) -> Option<i64> {
        self.payoffs.map(|(_, p2)| p2)
    }
}

/// The two roles in a normal-form game.
///
/// The row player chooses among rows of the payoff grids, the column player
/// among columns. The dominance probe and the reduction passes are written
/// once and parameterized by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    /// The row player (payoffs in `u1`).
    Row,
    /// The column player (payoffs in `u2`).
    Column,
}

impl Player {
    /// The opposing role.
    pub fn opponent(self) -> Player {
        match self {
            Player::Row => Player::Column,
            Player::Column => Player::Row,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Row => write!(f, "row"),
            Player::Column => write!(f, "column"),
        }
    }
}

/// Errors raised while building a [`NormalFormGame`] from a tree.
///
/// All of these mean the tree is not a two-level normal-form game. They are
/// fatal for the round and must be surfaced to the caller; the engine never
/// guesses a matrix from a malformed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// The root has no children, so the row player has no moves.
    NoRowMoves,
    /// A row move has no children, so the column player has no moves there.
    NoColumnMoves {
        /// Label of the offending row move.
        row: String,
    },
    /// Rows disagree on the number of column moves.
    RaggedColumns {
        /// Label of the offending row move.
        row: String,
        /// Column count of the first row.
        expected: usize,
        /// Column count found under this row.
        found: usize,
    },
    /// A grandchild node is missing one of the two payoffs.
    MissingPayoff {
        /// Label of the row move.
        row: String,
        /// Label of the column move.
        column: String,
    },
    /// A grandchild node has children of its own (tree deeper than 2 levels).
    ExtraDepth {
        /// Label of the row move.
        row: String,
        /// Label of the offending column move.
        column: String,
    },
    /// Matrices handed in directly do not share one shape.
    ShapeMismatch {
        /// Rows × columns of the row player's matrix.
        u1: (usize, usize),
        /// Rows × columns of the column player's matrix.
        u2: (usize, usize),
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::NoRowMoves => {
                write!(f, "game tree root has no children (no row moves)")
            }
            StructureError::NoColumnMoves { row } => {
                write!(f, "row move {} has no children (no column moves)", row)
            }
            StructureError::RaggedColumns {
                row,
                expected,
                found,
            } => write!(
                f,
                "row move {} has {} column moves, expected {}",
                row, found, expected
            ),
            StructureError::MissingPayoff { row, column } => {
                write!(f, "terminal node ({}, {}) is missing a payoff", row, column)
            }
            StructureError::ExtraDepth { row, column } => write!(
                f,
                "node ({}, {}) is not terminal; tree has more than two decision levels",
                row, column
            ),
            StructureError::ShapeMismatch { u1, u2 } => write!(
                f,
                "payoff matrices have mismatched shapes {}x{} vs {}x{}",
                u1.0, u1.1, u2.0, u2.1
            ),
        }
    }
}

impl std::error::Error for StructureError {}

/// Shorten a full move label to the part after the last `:`.
///
/// `"1:1:Cooperate"` becomes `"Cooperate"`. Labels without a colon pass
/// through unchanged.
pub fn short_label(label: &str) -> &str {
    match label.rfind(':') {
        Some(idx) => &label[idx + 1..],
        None => label,
    }
}

/// A two-player normal-form game with per-axis liveness masks.
///
/// Payoff grids are fixed at construction. Reduction retires strategies by
/// clearing their mask bit; a retired strategy is never revived within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalFormGame {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    u1: Vec<Vec<i64>>,
    u2: Vec<Vec<i64>>,
    row_live: Vec<bool>,
    col_live: Vec<bool>,
}

impl NormalFormGame {
    /// Build a game directly from payoff matrices and full move labels.
    pub fn from_matrices(
        u1: Vec<Vec<i64>>,
        u2: Vec<Vec<i64>>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    ) -> Result<Self, StructureError> {
        let shape = |m: &[Vec<i64>]| (m.len(), m.first().map_or(0, Vec::len));
        let (s1, s2) = (shape(&u1), shape(&u2));
        if s1 != s2
            || s1.0 == 0
            || s1.1 == 0
            || u1.iter().any(|r| r.len() != s1.1)
            || u2.iter().any(|r| r.len() != s2.1)
            || row_labels.len() != s1.0
            || col_labels.len() != s1.1
        {
            return Err(StructureError::ShapeMismatch { u1: s1, u2: s2 });
        }
        let (rows, cols) = s1;
        Ok(Self {
            row_labels,
            col_labels,
            u1,
            u2,
            row_live: vec![true; rows],
            col_live: vec![true; cols],
        })
    }

    /// Build a game from a two-level game tree.
    ///
    /// The root's children are row moves; each child's children are column
    /// moves. Column labels are taken from the first row. Every grandchild
    /// must be a leaf carrying both payoffs.
    pub fn from_tree<N: GameNode>(root: &N) -> Result<Self, StructureError> {
        let row_nodes = root.children();
        if row_nodes.is_empty() {
            return Err(StructureError::NoRowMoves);
        }

        let mut row_labels = Vec::with_capacity(row_nodes.len());
        let mut col_labels = Vec::new();
        let mut u1 = Vec::with_capacity(row_nodes.len());
        let mut u2 = Vec::with_capacity(row_nodes.len());

        for (i, row_node) in row_nodes.iter().enumerate() {
            let col_nodes = row_node.children();
            if col_nodes.is_empty() {
                return Err(StructureError::NoColumnMoves {
                    row: row_node.label().to_string(),
                });
            }
            if i == 0 {
                col_labels = col_nodes.iter().map(|n| n.label().to_string()).collect();
            } else if col_nodes.len() != col_labels.len() {
                return Err(StructureError::RaggedColumns {
                    row: row_node.label().to_string(),
                    expected: col_labels.len(),
                    found: col_nodes.len(),
                });
            }

            let mut row_u1 = Vec::with_capacity(col_nodes.len());
            let mut row_u2 = Vec::with_capacity(col_nodes.len());
            for col_node in &col_nodes {
                if col_node.num_children() != 0 {
                    return Err(StructureError::ExtraDepth {
                        row: row_node.label().to_string(),
                        column: col_node.label().to_string(),
                    });
                }
                match (col_node.payoff_p1(), col_node.payoff_p2()) {
                    (Some(p1), Some(p2)) => {
                        row_u1.push(p1);
                        row_u2.push(p2);
                    }
                    _ => {
                        return Err(StructureError::MissingPayoff {
                            row: row_node.label().to_string(),
                            column: col_node.label().to_string(),
                        })
                    }
                }
            }
            row_labels.push(row_node.label().to_string());
            u1.push(row_u1);
            u2.push(row_u2);
        }

        debug!(
            "built {}x{} normal-form game from tree",
            row_labels.len(),
            col_labels.len()
        );
        Self::from_matrices(u1, u2, row_labels, col_labels)
    }

    /// Total number of rows in the original game.
    pub fn num_rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Total number of columns in the original game.
    pub fn num_cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Row player's payoff at `(row, col)`.
    pub fn u1(&self, row: usize, col: usize) -> i64 {
        self.u1[row][col]
    }

    /// Column player's payoff at `(row, col)`.
    pub fn u2(&self, row: usize, col: usize) -> i64 {
        self.u2[row][col]
    }

    /// Payoff of `player` when it plays its strategy `own` against the
    /// opponent's strategy `opp`.
    pub fn payoff(&self, player: Player, own: usize, opp: usize) -> i64 {
        match player {
            Player::Row => self.u1[own][opp],
            Player::Column => self.u2[opp][own],
        }
    }

    /// Full label of a row strategy.
    pub fn row_label(&self, row: usize) -> &str {
        &self.row_labels[row]
    }

    /// Full label of a column strategy.
    pub fn col_label(&self, col: usize) -> &str {
        &self.col_labels[col]
    }

    /// All original row labels in order.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// All original column labels in order.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Whether a row strategy is still considered.
    pub fn is_row_live(&self, row: usize) -> bool {
        self.row_live[row]
    }

    /// Whether a column strategy is still considered.
    pub fn is_col_live(&self, col: usize) -> bool {
        self.col_live[col]
    }

    /// Still-considered strategy indices of `player`, ascending.
    pub fn live_strategies(&self, player: Player) -> Vec<usize> {
        let mask = match player {
            Player::Row => &self.row_live,
            Player::Column => &self.col_live,
        };
        mask.iter()
            .enumerate()
            .filter_map(|(i, &live)| live.then_some(i))
            .collect()
    }

    /// Number of still-considered strategies of `player`.
    pub fn live_count(&self, player: Player) -> usize {
        let mask = match player {
            Player::Row => &self.row_live,
            Player::Column => &self.col_live,
        };
        mask.iter().filter(|&&live| live).count()
    }

    /// Still-considered row indices, ascending.
    pub fn live_rows(&self) -> Vec<usize> {
        self.live_strategies(Player::Row)
    }

    /// Still-considered column indices, ascending.
    pub fn live_cols(&self) -> Vec<usize> {
        self.live_strategies(Player::Column)
    }

    /// Retire a dominated strategy of `player`.
    ///
    /// The index must be live; retiring never resurrects and the last live
    /// strategy of an axis is never retired by the engine.
    pub fn retire(&mut self, player: Player, index: usize) {
        let mask = match player {
            Player::Row => &mut self.row_live,
            Player::Column => &mut self.col_live,
        };
        debug_assert!(mask[index], "retiring an already retired strategy");
        mask[index] = false;
        debug!(
            "retired {} strategy {} ({})",
            player,
            index,
            match player {
                Player::Row => short_label(&self.row_labels[index]),
                Player::Column => short_label(&self.col_labels[index]),
            }
        );
    }
}

impl fmt::Display for NormalFormGame {
    /// Renders the still-considered part of the game in matrix form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.live_cols();
        write!(f, "{:>12}", "")?;
        for &j in &cols {
            write!(f, " {:>9}", short_label(&self.col_labels[j]))?;
        }
        writeln!(f)?;
        for i in self.live_rows() {
            write!(f, "{:>12}", short_label(&self.row_labels[i]))?;
            for &j in &cols {
                write!(f, " {:>4},{:<4}", self.u1[i][j], self.u2[i][j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::classic::prisoners_dilemma;

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("1:1:Cooperate"), "Cooperate");
        assert_eq!(short_label("2:3:Defect"), "Defect");
        assert_eq!(short_label("plain"), "plain");
    }

    #[test]
    fn test_from_tree_builds_matrices() {
        let game = NormalFormGame::from_tree(&prisoners_dilemma()).unwrap();
        assert_eq!(game.num_rows(), 2);
        assert_eq!(game.num_cols(), 2);
        assert_eq!(short_label(game.row_label(0)), "Cooperate");
        assert_eq!(short_label(game.col_label(1)), "Defect");
        assert_eq!(game.u1(0, 0), 3);
        assert_eq!(game.u1(1, 0), 5);
        assert_eq!(game.u2(0, 1), 5);
        assert_eq!(game.u2(1, 1), 1);
    }

    #[test]
    fn test_payoff_is_role_symmetric() {
        let game = NormalFormGame::from_tree(&prisoners_dilemma()).unwrap();
        assert_eq!(game.payoff(Player::Row, 1, 0), game.u1(1, 0));
        assert_eq!(game.payoff(Player::Column, 1, 0), game.u2(0, 1));
    }

    #[test]
    fn test_empty_root_rejected() {
        let root = MoveNode::decision("root", vec![]);
        assert_eq!(
            NormalFormGame::from_tree(&root),
            Err(StructureError::NoRowMoves)
        );
    }

    #[test]
    fn test_childless_row_rejected() {
        // Scenario: root has children but one child has zero grandchildren.
        let root = MoveNode::decision(
            "root",
            vec![
                MoveNode::decision(
                    "1:1:A",
                    vec![MoveNode::terminal("2:1:X", 1, 1)],
                ),
                MoveNode::decision("1:1:B", vec![]),
            ],
        );
        assert!(matches!(
            NormalFormGame::from_tree(&root),
            Err(StructureError::NoColumnMoves { .. })
        ));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let root = MoveNode::decision(
            "root",
            vec![
                MoveNode::decision(
                    "1:1:A",
                    vec![
                        MoveNode::terminal("2:1:X", 1, 1),
                        MoveNode::terminal("2:1:Y", 0, 0),
                    ],
                ),
                MoveNode::decision("1:1:B", vec![MoveNode::terminal("2:1:X", 2, 2)]),
            ],
        );
        assert!(matches!(
            NormalFormGame::from_tree(&root),
            Err(StructureError::RaggedColumns {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_deep_tree_rejected() {
        let root = MoveNode::decision(
            "root",
            vec![MoveNode::decision(
                "1:1:A",
                vec![MoveNode::decision(
                    "2:1:X",
                    vec![MoveNode::terminal("1:2:Again", 0, 0)],
                )],
            )],
        );
        assert!(matches!(
            NormalFormGame::from_tree(&root),
            Err(StructureError::ExtraDepth { .. })
        ));
    }

    #[test]
    fn test_missing_payoff_rejected() {
        let root = MoveNode::decision(
            "root",
            vec![MoveNode::decision(
                "1:1:A",
                vec![MoveNode::decision("2:1:X", vec![])],
            )],
        );
        // A childless decision node has no payoffs.
        assert!(matches!(
            NormalFormGame::from_tree(&root),
            Err(StructureError::MissingPayoff { .. })
        ));
    }

    #[test]
    fn test_retire_and_masks() {
        let game = NormalFormGame::from_tree(&prisoners_dilemma()).unwrap();
        let mut game = game;
        assert_eq!(game.live_rows(), vec![0, 1]);
        game.retire(Player::Row, 0);
        assert_eq!(game.live_rows(), vec![1]);
        assert_eq!(game.live_count(Player::Row), 1);
        assert!(game.is_col_live(0));
        // Grids are untouched by retirement.
        assert_eq!(game.u1(0, 0), 3);
    }
}
