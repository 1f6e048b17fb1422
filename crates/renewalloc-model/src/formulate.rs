use renewalloc_solver::{ConstraintOp, LpProblem};

use crate::scenario::Consumer;

/// Index of the solar allocation variable
pub const SOLAR: usize = 0;
/// Index of the wind allocation variable
pub const WIND: usize = 1;

/// Index of the demand variable for the consumer at `position`
pub fn demand_variable(position: usize) -> usize {
    2 + position
}

/// Switches that change the shape of the LP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulationOptions {
    /// Append `solar + wind - sum(demand) = 0` after the per-consumer rows.
    /// Off by default: generation is then not tied to demand and both sources
    /// run at capacity.
    pub supply_balance: bool,
}

impl Default for FormulationOptions {
    fn default() -> Self {
        Self { supply_balance: false }
    }
}

impl FormulationOptions {
    /// Ties generation to total demand, so demand above capacity is infeasible.
    pub fn balanced() -> Self {
        Self { supply_balance: true }
    }
}

/// Builds the allocation LP over `[solar, wind, demand_1, ..., demand_n]`.
///
/// The objective minimizes `-solar_capacity * solar - wind_capacity * wind`.
/// Each demand variable is pinned to its consumer's demand by an equality row.
/// Capacities and demands are not validated; a negative capacity produces an
/// inverted bound that the solver rejects.
pub fn formulate(
    solar_capacity: f64,
    wind_capacity: f64,
    consumers: &[Consumer],
    options: FormulationOptions,
) -> LpProblem {
    let n = 2 + consumers.len();

    let mut variables = vec!["solar".to_string(), "wind".to_string()];
    variables.extend(consumers.iter().map(|c| format!("demand[{}]", c.name)));

    let mut problem = LpProblem::new(variables);

    let mut objective = vec![0.0; n];
    objective[SOLAR] = -solar_capacity;
    objective[WIND] = -wind_capacity;
    problem.set_objective(objective, true);

    problem.add_constraint("solar_capacity", unit_row(n, SOLAR, 1.0), ConstraintOp::Le, solar_capacity);
    problem.add_constraint("wind_capacity", unit_row(n, WIND, 1.0), ConstraintOp::Le, wind_capacity);
    problem.add_constraint("solar_non_negative", unit_row(n, SOLAR, -1.0), ConstraintOp::Le, 0.0);
    problem.add_constraint("wind_non_negative", unit_row(n, WIND, -1.0), ConstraintOp::Le, 0.0);

    for (i, consumer) in consumers.iter().enumerate() {
        problem.add_constraint(
            format!("demand[{}]", consumer.name),
            unit_row(n, demand_variable(i), 1.0),
            ConstraintOp::Eq,
            consumer.demand,
        );
    }

    if options.supply_balance {
        let mut row = vec![-1.0; n];
        row[SOLAR] = 1.0;
        row[WIND] = 1.0;
        problem.add_constraint("supply_balance", row, ConstraintOp::Eq, 0.0);
    }

    problem.set_bounds(SOLAR, 0.0, solar_capacity);
    problem.set_bounds(WIND, 0.0, wind_capacity);

    problem
}

fn unit_row(n: usize, index: usize, value: f64) -> Vec<f64> {
    let mut row = vec![0.0; n];
    row[index] = value;
    row
}
