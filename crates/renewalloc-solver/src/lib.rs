mod problem;
mod solution;
mod solver;

pub use problem::{Bound, Constraint, ConstraintOp, ConstraintViolation, LpProblem, Objective, ProblemError, StandardForm};
pub use solution::{Solution, SolutionStatus};
pub use solver::Solver;
