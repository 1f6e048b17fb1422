use renewalloc_solver::{SolutionStatus, Solver};
use serde::Serialize;
use thiserror::Error;

use crate::formulate::{demand_variable, formulate, FormulationOptions, SOLAR, WIND};
use crate::scenario::{Consumer, Scenario};

/// Surplus at or below this is reported as demand perfectly met.
///
/// A plain `surplus > 0` test would print float noise left by the solver as a
/// surplus, so this intentionally departs from an exact comparison with zero.
pub const SURPLUS_TOLERANCE: f64 = 1e-9;

/// Energy delivered to one consumer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerAllocation {
    pub name: String,
    pub demand: f64,
    pub allocated: f64,
}

/// Optimal split of solar and wind generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    /// Solar energy allocated (MW)
    pub solar: f64,
    /// Wind energy allocated (MW)
    pub wind: f64,
    /// Negated objective value
    pub total_cost: f64,
    /// One entry per consumer, in input order
    pub consumers: Vec<ConsumerAllocation>,
    /// Unallocated capacity: `(solar_capacity - solar) + (wind_capacity - wind)`
    pub surplus: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("no allocation satisfies all constraints")]
    Infeasible,
    #[error("allocation objective is unbounded")]
    Unbounded,
    #[error("solver error")]
    Solver,
}

impl Allocation {
    pub fn is_demand_met(&self) -> bool {
        self.surplus <= SURPLUS_TOLERANCE
    }

    pub fn total_allocated(&self) -> f64 {
        self.solar + self.wind
    }
}

/// Formulates and solves the allocation LP for the given capacities and consumers.
pub fn allocate(
    solar_capacity: f64,
    wind_capacity: f64,
    consumers: &[Consumer],
    options: FormulationOptions,
) -> Result<Allocation, AllocationError> {
    let problem = formulate(solar_capacity, wind_capacity, consumers, options);
    let solver = Solver::new();
    let solution = solver.solve(&problem);

    match solution.status {
        SolutionStatus::Optimal => {}
        SolutionStatus::Infeasible => return Err(AllocationError::Infeasible),
        SolutionStatus::Unbounded => return Err(AllocationError::Unbounded),
        SolutionStatus::Error => return Err(AllocationError::Solver),
    }

    let x = &solution.values;
    for v in problem.violations(x, solver.tolerance()) {
        log::debug!(
            "{} off by {} (required {}, got {})",
            v.constraint,
            v.violation_amount,
            v.required,
            v.actual
        );
    }

    let solar = x[SOLAR];
    let wind = x[WIND];
    let surplus = (solar_capacity - solar) + (wind_capacity - wind);

    let consumers = consumers
        .iter()
        .enumerate()
        .map(|(i, consumer)| ConsumerAllocation {
            name: consumer.name.clone(),
            demand: consumer.demand,
            allocated: x[demand_variable(i)],
        })
        .collect();

    log::info!(
        "allocated solar={} wind={} surplus={}",
        solar,
        wind,
        surplus
    );

    Ok(Allocation {
        solar,
        wind,
        total_cost: -solution.objective_value,
        consumers,
        surplus,
    })
}

impl Scenario {
    pub fn allocate(&self, options: FormulationOptions) -> Result<Allocation, AllocationError> {
        allocate(self.solar_capacity, self.wind_capacity, &self.consumers, options)
    }
}
