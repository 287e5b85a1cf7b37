//! Linear programs and the dominance oracle's solver.
//!
//! The engine only ever asks one kind of question of a linear program: given
//! an objective, a set of linear constraints and non-negative variables,
//! return an optimal solution vector or report that none exists. That
//! contract is the [`LpSolver`] trait; the engine never looks inside the
//! solver, so any implementation can be swapped in.
//!
//! [`SimplexSolver`] is the bundled implementation: a dense Big-M simplex
//! with an iteration cap. It is sized for the tiny programs the dominance
//! probe produces (a handful of variables and constraints), not for general
//! optimization.

use std::fmt;

/// Relation of a linear constraint to its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Left-hand side must be less than or equal to the rhs.
    Le,
    /// Left-hand side must be greater than or equal to the rhs.
    Ge,
    /// Left-hand side must equal the rhs.
    Eq,
}

impl Relation {
    fn flipped(self) -> Relation {
        match self {
            Relation::Le => Relation::Ge,
            Relation::Ge => Relation::Le,
            Relation::Eq => Relation::Eq,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
            Relation::Eq => write!(f, "=="),
        }
    }
}

/// A single linear constraint: `coefficients · x <relation> rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Coefficient per variable, same length as the objective.
    pub coefficients: Vec<f64>,
    /// How the left-hand side relates to `rhs`.
    pub relation: Relation,
    /// Right-hand side value.
    pub rhs: f64,
}

/// A linear program over variables bounded below.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    objective: Vec<f64>,
    minimize: bool,
    constraints: Vec<Constraint>,
    lower_bounds: Vec<f64>,
}

impl LinearProgram {
    /// Create a minimization program with the given objective coefficients.
    ///
    /// All variables start with a lower bound of zero.
    pub fn minimize(objective: Vec<f64>) -> Self {
        let n = objective.len();
        Self {
            objective,
            minimize: true,
            constraints: Vec::new(),
            lower_bounds: vec![0.0; n],
        }
    }

    /// Create a maximization program with the given objective coefficients.
    pub fn maximize(objective: Vec<f64>) -> Self {
        Self {
            minimize: false,
            ..Self::minimize(objective)
        }
    }

    /// Append a constraint. Coefficients must match the objective length.
    pub fn add_constraint(&mut self, coefficients: Vec<f64>, relation: Relation, rhs: f64) {
        debug_assert_eq!(
            coefficients.len(),
            self.objective.len(),
            "constraint arity must match objective arity"
        );
        self.constraints.push(Constraint {
            coefficients,
            relation,
            rhs,
        });
    }

    /// Replace the per-variable lower bounds.
    pub fn set_lower_bounds(&mut self, lower_bounds: Vec<f64>) {
        debug_assert_eq!(lower_bounds.len(), self.objective.len());
        self.lower_bounds = lower_bounds;
    }

    /// Number of decision variables.
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// Objective coefficients.
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Whether this is a minimization problem.
    pub fn is_minimize(&self) -> bool {
        self.minimize
    }

    /// The constraints in insertion order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Per-variable lower bounds.
    pub fn lower_bounds(&self) -> &[f64] {
        &self.lower_bounds
    }

    /// Objective value at a given point.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(x.iter())
            .map(|(&c, &v)| c * v)
            .sum()
    }
}

impl fmt::Display for LinearProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let goal = if self.minimize { "minimize" } else { "maximize" };
        write!(f, "  {}: ", goal)?;
        for (j, &c) in self.objective.iter().enumerate() {
            if c != 0.0 {
                write!(f, "{:+7.1}*x[{}]", c, j)?;
            }
        }
        writeln!(f)?;
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i == 0 {
                write!(f, "subject to: ")?;
            } else {
                write!(f, "            ")?;
            }
            for (j, &a) in constraint.coefficients.iter().enumerate() {
                if a != 0.0 {
                    write!(f, "{:+7.1}*x[{}]", a, j)?;
                } else {
                    write!(f, "            ")?;
                }
            }
            writeln!(f, " {} {:6.1}", constraint.relation, constraint.rhs)?;
        }
        Ok(())
    }
}

/// The black-box solver contract the engine depends on.
///
/// Returns an optimal solution vector of objective length, or `None` when no
/// feasible solution exists. Implementations must also map internal failures
/// (iteration caps, numerical trouble) to `None`: the reduction treats "no
/// solution" as "not dominated" and is never allowed to crash on a probe.
pub trait LpSolver: Send + Sync {
    /// Solve the program, returning the optimal solution or `None`.
    fn solve(&self, program: &LinearProgram) -> Option<Vec<f64>>;
}

/// Dense Big-M simplex solver.
///
/// Converts the program to standard maximization form with slack, surplus
/// and artificial variables and pivots with Dantzig's rule. Any artificial
/// variable left in the optimal basis means the program is infeasible.
#[derive(Debug, Clone)]
pub struct SimplexSolver {
    max_pivots: usize,
}

const PIVOT_EPS: f64 = 1e-9;
const FEAS_EPS: f64 = 1e-6;

impl Default for SimplexSolver {
    fn default() -> Self {
        Self { max_pivots: 10_000 }
    }
}

impl SimplexSolver {
    /// Create a solver with a custom pivot cap.
    pub fn new(max_pivots: usize) -> Self {
        Self { max_pivots }
    }
}

impl LpSolver for SimplexSolver {
    fn solve(&self, program: &LinearProgram) -> Option<Vec<f64>> {
        let n = program.num_variables();
        if n == 0 {
            return Some(Vec::new());
        }
        let lb = program.lower_bounds();

        // Substitute x = lb + x' so every variable is >= 0, then normalize
        // each constraint to a non-negative rhs.
        let mut rows: Vec<(Vec<f64>, Relation, f64)> = Vec::with_capacity(program.constraints().len());
        for constraint in program.constraints() {
            let mut coeffs = constraint.coefficients.clone();
            let shift: f64 = coeffs.iter().zip(lb.iter()).map(|(&a, &b)| a * b).sum();
            let mut rhs = constraint.rhs - shift;
            let mut relation = constraint.relation;
            if rhs < 0.0 {
                for a in &mut coeffs {
                    *a = -*a;
                }
                rhs = -rhs;
                relation = relation.flipped();
            }
            rows.push((coeffs, relation, rhs));
        }
        let m = rows.len();

        // Column layout: structural, then slack/surplus, then artificial.
        let num_slack = rows
            .iter()
            .filter(|(_, r, _)| matches!(r, Relation::Le | Relation::Ge))
            .count();
        let num_artificial = rows
            .iter()
            .filter(|(_, r, _)| matches!(r, Relation::Ge | Relation::Eq))
            .count();
        let total = n + num_slack + num_artificial;

        let mut scale: f64 = 1.0;
        for (coeffs, _, rhs) in &rows {
            for &a in coeffs {
                scale = scale.max(a.abs());
            }
            scale = scale.max(rhs.abs());
        }
        for &c in program.objective() {
            scale = scale.max(c.abs());
        }
        let big_m = 1e7 * scale;

        // Internal form is maximization.
        let sign = if program.is_minimize() { -1.0 } else { 1.0 };
        let mut obj = vec![0.0; total];
        for (j, &c) in program.objective().iter().enumerate() {
            obj[j] = sign * c;
        }

        let mut tableau = vec![vec![0.0; total + 1]; m];
        let mut basis = vec![0usize; m];
        let mut next_slack = n;
        let mut next_artificial = n + num_slack;
        for (i, (coeffs, relation, rhs)) in rows.iter().enumerate() {
            tableau[i][..n].copy_from_slice(coeffs);
            tableau[i][total] = *rhs;
            match relation {
                Relation::Le => {
                    tableau[i][next_slack] = 1.0;
                    basis[i] = next_slack;
                    next_slack += 1;
                }
                Relation::Ge => {
                    tableau[i][next_slack] = -1.0;
                    next_slack += 1;
                    tableau[i][next_artificial] = 1.0;
                    obj[next_artificial] = -big_m;
                    basis[i] = next_artificial;
                    next_artificial += 1;
                }
                Relation::Eq => {
                    tableau[i][next_artificial] = 1.0;
                    obj[next_artificial] = -big_m;
                    basis[i] = next_artificial;
                    next_artificial += 1;
                }
            }
        }

        for _ in 0..self.max_pivots {
            // Reduced costs: c_j - cB . column_j.
            let mut entering = None;
            let mut best = PIVOT_EPS;
            for j in 0..total {
                let mut reduced = obj[j];
                for i in 0..m {
                    reduced -= obj[basis[i]] * tableau[i][j];
                }
                if reduced > best {
                    best = reduced;
                    entering = Some(j);
                }
            }
            let Some(enter) = entering else {
                // Optimal. Infeasible if an artificial stays basic.
                for i in 0..m {
                    if basis[i] >= n + num_slack && tableau[i][total] > FEAS_EPS {
                        return None;
                    }
                }
                let mut x = lb.to_vec();
                for i in 0..m {
                    if basis[i] < n {
                        x[basis[i]] += tableau[i][total];
                    }
                }
                return Some(x);
            };

            // Ratio test.
            let mut leave = None;
            let mut best_ratio = f64::INFINITY;
            for i in 0..m {
                if tableau[i][enter] > PIVOT_EPS {
                    let ratio = tableau[i][total] / tableau[i][enter];
                    if ratio < best_ratio {
                        best_ratio = ratio;
                        leave = Some(i);
                    }
                }
            }
            // No limiting row: the objective is unbounded, which for the
            // dominance probe is equivalent to "no usable solution".
            let leave = leave?;

            // Pivot.
            let pivot = tableau[leave][enter];
            for v in tableau[leave].iter_mut() {
                *v /= pivot;
            }
            for i in 0..m {
                if i != leave {
                    let factor = tableau[i][enter];
                    if factor != 0.0 {
                        for j in 0..=total {
                            tableau[i][j] -= factor * tableau[leave][j];
                        }
                    }
                }
            }
            basis[leave] = enter;
        }

        // Pivot cap exhausted; report failure rather than a bogus optimum.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_minimize_separable_ge() {
        // min x0 + x1  s.t.  8*x0 >= 2,  7*x1 >= 2.
        let mut lp = LinearProgram::minimize(vec![1.0, 1.0]);
        lp.add_constraint(vec![8.0, 0.0], Relation::Ge, 2.0);
        lp.add_constraint(vec![0.0, 7.0], Relation::Ge, 2.0);
        let x = SimplexSolver::default().solve(&lp).unwrap();
        assert_near(x[0], 0.25);
        assert_near(x[1], 2.0 / 7.0);
        assert_near(lp.evaluate(&x), 0.25 + 2.0 / 7.0);
    }

    #[test]
    fn test_minimize_with_free_variable_at_zero() {
        // min x0 + x1  s.t.  2*x1 >= 8,  7*x0 + 2*x1 >= 0.
        let mut lp = LinearProgram::minimize(vec![1.0, 1.0]);
        lp.add_constraint(vec![0.0, 2.0], Relation::Ge, 8.0);
        lp.add_constraint(vec![7.0, 2.0], Relation::Ge, 0.0);
        let x = SimplexSolver::default().solve(&lp).unwrap();
        assert_near(x[0], 0.0);
        assert_near(x[1], 4.0);
    }

    #[test]
    fn test_maximize_with_le_constraints() {
        // max 150*x0 + 175*x1 s.t. 7x0+11x1 <= 77, 10x0+8x1 <= 80, x0 <= 9, x1 <= 6.
        let mut lp = LinearProgram::maximize(vec![150.0, 175.0]);
        lp.add_constraint(vec![7.0, 11.0], Relation::Le, 77.0);
        lp.add_constraint(vec![10.0, 8.0], Relation::Le, 80.0);
        lp.add_constraint(vec![1.0, 0.0], Relation::Le, 9.0);
        lp.add_constraint(vec![0.0, 1.0], Relation::Le, 6.0);
        let x = SimplexSolver::default().solve(&lp).unwrap();
        assert_near(x[0], 44.0 / 9.0);
        assert_near(x[1], 35.0 / 9.0);
        assert_near(lp.evaluate(&x), 12725.0 / 9.0);
    }

    #[test]
    fn test_mixed_relations() {
        // min 3x + 2y + 7z  s.t.  -x + y == 10,  2x - y + z >= 10.
        let mut lp = LinearProgram::minimize(vec![3.0, 2.0, 7.0]);
        lp.add_constraint(vec![-1.0, 1.0, 0.0], Relation::Eq, 10.0);
        lp.add_constraint(vec![2.0, -1.0, 1.0], Relation::Ge, 10.0);
        let x = SimplexSolver::default().solve(&lp).unwrap();
        assert_near(x[0], 20.0);
        assert_near(x[1], 30.0);
        assert_near(x[2], 0.0);
        assert_near(lp.evaluate(&x), 120.0);
    }

    #[test]
    fn test_infeasible_returns_none() {
        // 0*x >= 1 can never hold.
        let mut lp = LinearProgram::minimize(vec![1.0]);
        lp.add_constraint(vec![0.0], Relation::Ge, 1.0);
        assert!(SimplexSolver::default().solve(&lp).is_none());
    }

    #[test]
    fn test_lower_bounds_respected() {
        // min x0 + x1 with x >= (1, 2) and no binding constraints.
        let mut lp = LinearProgram::minimize(vec![1.0, 1.0]);
        lp.add_constraint(vec![1.0, 1.0], Relation::Ge, 0.0);
        lp.set_lower_bounds(vec![1.0, 2.0]);
        let x = SimplexSolver::default().solve(&lp).unwrap();
        assert_near(x[0], 1.0);
        assert_near(x[1], 2.0);
    }

    #[test]
    fn test_display_renders_relations() {
        let mut lp = LinearProgram::minimize(vec![1.0, 1.0]);
        lp.add_constraint(vec![3.0, 0.0], Relation::Ge, 1.0);
        lp.add_constraint(vec![0.0, 3.0], Relation::Le, 5.0);
        let rendered = lp.to_string();
        assert!(rendered.contains("minimize"));
        assert!(rendered.contains(">="));
        assert!(rendered.contains("<="));
    }
}
