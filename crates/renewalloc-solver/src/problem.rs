use thiserror::Error;

/// Represents a linear programming problem
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Variable names
    pub variables: Vec<String>,
    /// Objective function coefficients
    pub objective: Objective,
    /// Constraints
    pub constraints: Vec<Constraint>,
    /// Lower and upper bound for each variable (`f64::INFINITY` for no upper bound)
    pub bounds: Vec<Bound>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct Objective {
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Whether to minimize or maximize
    pub minimize: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Objective has {actual} coefficients, expected {expected}")]
    ObjectiveLength { expected: usize, actual: usize },
    #[error("Constraint {name} has {actual} coefficients, expected {expected}")]
    ConstraintLength {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("Problem has {actual} bounds, expected {expected}")]
    BoundsLength { expected: usize, actual: usize },
    #[error("Variable {name} has lower bound {lower} above upper bound {upper}")]
    InvertedBound { name: String, lower: f64, upper: f64 },
    #[error("Non-finite value in {0}")]
    NotANumber(String),
}

/// Information about a violated constraint
#[derive(Debug, Clone)]
pub struct ConstraintViolation {
    /// Constraint name
    pub constraint: String,
    /// Required value (from constraint RHS)
    pub required: f64,
    /// Actual value achieved
    pub actual: f64,
    /// How much the constraint is violated by
    pub violation_amount: f64,
}

/// Standard matrix form `min c·x` s.t. `A_ub x <= b_ub`, `A_eq x = b_eq`, bounds.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm {
    pub c: Vec<f64>,
    pub a_ub: Vec<Vec<f64>>,
    pub b_ub: Vec<f64>,
    pub a_eq: Vec<Vec<f64>>,
    pub b_eq: Vec<f64>,
    pub bounds: Vec<(f64, Option<f64>)>,
}

impl Bound {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn non_negative() -> Self {
        Self::new(0.0, f64::INFINITY)
    }
}

impl LpProblem {
    /// Creates a minimization problem with a zero objective and every variable in `[0, inf)`.
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: Objective {
                coefficients: vec![0.0; n],
                minimize: true,
            },
            constraints: Vec::new(),
            bounds: vec![Bound::non_negative(); n],
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>, minimize: bool) {
        self.objective = Objective { coefficients, minimize };
    }

    pub fn set_bounds(&mut self, variable: usize, lower: f64, upper: f64) {
        self.bounds[variable] = Bound::new(lower, upper);
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, coefficients: Vec<f64>, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            op,
            rhs,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Checks that every vector is sized to the variable count and every bound is usable.
    pub fn validate(&self) -> Result<(), ProblemError> {
        let n = self.num_variables();

        if self.objective.coefficients.len() != n {
            return Err(ProblemError::ObjectiveLength {
                expected: n,
                actual: self.objective.coefficients.len(),
            });
        }
        if self.objective.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ProblemError::NotANumber("objective".to_string()));
        }

        for c in &self.constraints {
            if c.coefficients.len() != n {
                return Err(ProblemError::ConstraintLength {
                    name: c.name.clone(),
                    expected: n,
                    actual: c.coefficients.len(),
                });
            }
            if !c.rhs.is_finite() || c.coefficients.iter().any(|x| !x.is_finite()) {
                return Err(ProblemError::NotANumber(c.name.clone()));
            }
        }

        if self.bounds.len() != n {
            return Err(ProblemError::BoundsLength {
                expected: n,
                actual: self.bounds.len(),
            });
        }
        for (name, b) in self.variables.iter().zip(&self.bounds) {
            if b.lower.is_nan() || b.upper.is_nan() {
                return Err(ProblemError::NotANumber(name.clone()));
            }
            if b.lower > b.upper {
                return Err(ProblemError::InvertedBound {
                    name: name.clone(),
                    lower: b.lower,
                    upper: b.upper,
                });
            }
        }

        Ok(())
    }

    /// Objective `c · x` for the given values.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .coefficients
            .iter()
            .zip(values)
            .map(|(c, x)| c * x)
            .sum()
    }

    /// Rows not satisfied by `values` beyond `tolerance`, worst first.
    pub fn violations(&self, values: &[f64], tolerance: f64) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();

        for c in &self.constraints {
            let lhs: f64 = c.coefficients.iter().zip(values).map(|(a, x)| a * x).sum();

            let violation_amount = match c.op {
                ConstraintOp::Le => lhs - c.rhs,
                ConstraintOp::Ge => c.rhs - lhs,
                ConstraintOp::Eq => (lhs - c.rhs).abs(),
            };

            if violation_amount > tolerance {
                violations.push(ConstraintViolation {
                    constraint: c.name.clone(),
                    required: c.rhs,
                    actual: lhs,
                    violation_amount,
                });
            }
        }

        violations.sort_by(|a, b| {
            b.violation_amount
                .partial_cmp(&a.violation_amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        violations
    }

    /// Rewrites the problem as `min c·x` over `A_ub`/`A_eq` rows.
    ///
    /// Maximization negates `c`, `>=` rows are negated into `A_ub`, and an
    /// infinite upper bound becomes `None`.
    pub fn to_standard_form(&self) -> StandardForm {
        let c = if self.objective.minimize {
            self.objective.coefficients.clone()
        } else {
            self.objective.coefficients.iter().map(|c| -c).collect()
        };

        let mut a_ub = Vec::new();
        let mut b_ub = Vec::new();
        let mut a_eq = Vec::new();
        let mut b_eq = Vec::new();

        for row in &self.constraints {
            match row.op {
                ConstraintOp::Le => {
                    a_ub.push(row.coefficients.clone());
                    b_ub.push(row.rhs);
                }
                ConstraintOp::Ge => {
                    a_ub.push(row.coefficients.iter().map(|a| -a).collect());
                    b_ub.push(-row.rhs);
                }
                ConstraintOp::Eq => {
                    a_eq.push(row.coefficients.clone());
                    b_eq.push(row.rhs);
                }
            }
        }

        let bounds = self
            .bounds
            .iter()
            .map(|b| (b.lower, b.upper.is_finite().then_some(b.upper)))
            .collect();

        StandardForm {
            c,
            a_ub,
            b_ub,
            a_eq,
            b_eq,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_var_problem() -> LpProblem {
        let mut problem = LpProblem::new(vec!["x".to_string(), "y".to_string()]);
        problem.set_objective(vec![3.0, 2.0], false);
        problem.add_constraint("sum", vec![1.0, 1.0], ConstraintOp::Le, 4.0);
        problem.add_constraint("x_min", vec![1.0, 0.0], ConstraintOp::Ge, 1.0);
        problem.add_constraint("y_fixed", vec![0.0, 1.0], ConstraintOp::Eq, 2.0);
        problem
    }

    #[test]
    fn test_new_defaults() {
        let problem = LpProblem::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(problem.num_variables(), 3);
        assert_eq!(problem.num_constraints(), 0);
        assert!(problem.objective.minimize);
        assert!(problem.bounds.iter().all(|b| *b == Bound::non_negative()));
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_row() {
        let mut problem = two_var_problem();
        problem.add_constraint("short", vec![1.0], ConstraintOp::Le, 1.0);
        assert_eq!(
            problem.validate(),
            Err(ProblemError::ConstraintLength {
                name: "short".to_string(),
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_validate_rejects_inverted_bound() {
        let mut problem = two_var_problem();
        problem.set_bounds(0, 0.0, -5.0);
        assert!(matches!(problem.validate(), Err(ProblemError::InvertedBound { .. })));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut problem = two_var_problem();
        problem.set_objective(vec![f64::NAN, 1.0], true);
        assert_eq!(problem.validate(), Err(ProblemError::NotANumber("objective".to_string())));
    }

    #[test]
    fn test_violations_sorted_worst_first() {
        let problem = two_var_problem();
        // x=0 misses x_min by 1, y=5 misses y_fixed by 3 and sum by 1
        let violations = problem.violations(&[0.0, 5.0], 1e-9);
        let names: Vec<_> = violations.iter().map(|v| v.constraint.as_str()).collect();
        assert_eq!(names[0], "y_fixed");
        assert_eq!(violations.len(), 3);
        assert!(problem.violations(&[2.0, 2.0], 1e-9).is_empty());
    }

    #[test]
    fn test_standard_form() {
        let mut problem = two_var_problem();
        problem.set_bounds(1, 0.0, 3.0);
        let form = problem.to_standard_form();

        assert_eq!(form.c, vec![-3.0, -2.0]);
        assert_eq!(form.a_ub, vec![vec![1.0, 1.0], vec![-1.0, -0.0]]);
        assert_eq!(form.b_ub, vec![4.0, -1.0]);
        assert_eq!(form.a_eq, vec![vec![0.0, 1.0]]);
        assert_eq!(form.b_eq, vec![2.0]);
        assert_eq!(form.bounds, vec![(0.0, None), (0.0, Some(3.0))]);
    }

    #[test]
    fn test_objective_value() {
        let problem = two_var_problem();
        assert!((problem.objective_value(&[1.0, 2.0]) - 7.0).abs() < 1e-12);
    }
}
