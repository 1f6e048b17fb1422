use microlp::{ComparisonOp, OptimizationDirection};

use crate::problem::{ConstraintOp, LpProblem};
use crate::solution::Solution;

/// Linear programming solver backed by `microlp`
pub struct Solver {
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self { tolerance: 1e-9 }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Solve the LP problem.
    ///
    /// A malformed problem yields [`SolutionStatus::Error`](crate::SolutionStatus::Error)
    /// instead of reaching the backend.
    pub fn solve(&self, problem: &LpProblem) -> Solution {
        if let Err(e) = problem.validate() {
            log::warn!("rejecting malformed LP problem: {}", e);
            return Solution::error();
        }

        log::debug!(
            "solving LP with {} variables and {} constraints",
            problem.num_variables(),
            problem.num_constraints()
        );

        let direction = if problem.objective.minimize {
            OptimizationDirection::Minimize
        } else {
            OptimizationDirection::Maximize
        };
        let mut lp = microlp::Problem::new(direction);

        let vars: Vec<microlp::Variable> = problem
            .objective
            .coefficients
            .iter()
            .zip(&problem.bounds)
            .map(|(&cost, bound)| lp.add_var(cost, (bound.lower, bound.upper)))
            .collect();

        for c in &problem.constraints {
            let expr: Vec<(microlp::Variable, f64)> = vars
                .iter()
                .copied()
                .zip(c.coefficients.iter().copied())
                .filter(|(_, coef)| *coef != 0.0)
                .collect();

            // An all-zero row reads `0 op rhs` and is decided here
            if expr.is_empty() {
                let holds = match c.op {
                    ConstraintOp::Le => 0.0 <= c.rhs + self.tolerance,
                    ConstraintOp::Ge => 0.0 >= c.rhs - self.tolerance,
                    ConstraintOp::Eq => c.rhs.abs() <= self.tolerance,
                };
                if !holds {
                    log::debug!("constraint {} has no terms and cannot hold", c.name);
                    return Solution::infeasible();
                }
                continue;
            }

            let op = match c.op {
                ConstraintOp::Le => ComparisonOp::Le,
                ConstraintOp::Ge => ComparisonOp::Ge,
                ConstraintOp::Eq => ComparisonOp::Eq,
            };
            lp.add_constraint(expr, op, c.rhs);
        }

        match lp.solve() {
            Ok(solution) => {
                let values: Vec<f64> = solution.iter().map(|x| *x.1).collect();
                let objective_value = problem.objective_value(&values);
                log::debug!("optimal objective {}", objective_value);
                Solution::optimal(values, objective_value)
            }
            Err(microlp::Error::Infeasible) => {
                log::debug!("LP is infeasible");
                Solution::infeasible()
            }
            Err(microlp::Error::Unbounded) => {
                log::debug!("LP is unbounded");
                Solution::unbounded()
            }
            #[allow(unreachable_patterns)]
            Err(e) => {
                log::warn!("LP backend failed: {}", e);
                Solution::error()
            }
        }
    }
}
