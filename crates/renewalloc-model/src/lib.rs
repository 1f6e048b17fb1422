pub mod allocation;
pub mod formulate;
pub mod report;
pub mod scenario;

pub use allocation::{allocate, Allocation, AllocationError, ConsumerAllocation};
pub use formulate::{formulate, FormulationOptions};
pub use scenario::{Consumer, Scenario, ScenarioError};

/// Allocates solar and wind capacity to `consumers` and prints the report to stdout.
pub fn optimize_renewable_energy(solar_capacity: f64, wind_capacity: f64, consumers: &[Consumer]) {
    let stdout = std::io::stdout();
    if let Err(e) = write_optimization(&mut stdout.lock(), solar_capacity, wind_capacity, consumers) {
        log::error!("cannot write report: {}", e);
    }
}

/// Same as [`optimize_renewable_energy`], writing the report to `out`.
pub fn write_optimization<W: std::io::Write>(
    out: &mut W,
    solar_capacity: f64,
    wind_capacity: f64,
    consumers: &[Consumer],
) -> std::io::Result<()> {
    let result = allocate(solar_capacity, wind_capacity, consumers, FormulationOptions::default());
    report::write_report(out, &result)
}
