use std::io::{self, Write};

use serde_json::{json, Value};

use crate::allocation::{Allocation, AllocationError};

/// Shortest round-trip form, keeping a trailing `.0` on whole numbers.
pub fn format_number(value: f64) -> String {
    // -0.0 shows up when an allocation of zero is negated
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:?}", value)
}

/// Writes the human-readable report for an allocation run.
pub fn write_report<W: Write>(out: &mut W, result: &Result<Allocation, AllocationError>) -> io::Result<()> {
    let allocation = match result {
        Ok(allocation) => allocation,
        Err(e) => {
            log::warn!("allocation failed: {}", e);
            return writeln!(out, "Optimization failed.");
        }
    };

    writeln!(out, "Optimal solar energy allocated: {} MW", format_number(allocation.solar))?;
    writeln!(out, "Optimal wind energy allocated: {} MW", format_number(allocation.wind))?;
    writeln!(out, "Total energy cost: {}", format_number(allocation.total_cost))?;

    for consumer in &allocation.consumers {
        writeln!(
            out,
            "Energy allocated to {}: {} MW",
            consumer.name,
            format_number(consumer.allocated)
        )?;
    }

    if allocation.is_demand_met() {
        writeln!(out, "Energy demand perfectly met.")
    } else {
        writeln!(out, "Energy surplus: {} MW", format_number(allocation.surplus))
    }
}

/// JSON rendering of an allocation run
pub fn to_json(result: &Result<Allocation, AllocationError>) -> Value {
    match result {
        Ok(allocation) => json!({
            "status": "optimal",
            "solar": allocation.solar,
            "wind": allocation.wind,
            "total_cost": allocation.total_cost,
            "consumers": allocation.consumers,
            "surplus": allocation.surplus,
            "demand_met": allocation.is_demand_met(),
        }),
        Err(e) => json!({
            "status": "failed",
            "reason": e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulate::FormulationOptions;
    use crate::scenario::Scenario;

    fn render(result: &Result<Allocation, AllocationError>) -> String {
        let mut out = Vec::new();
        write_report(&mut out, result).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn fixed_allocation(surplus: f64) -> Allocation {
        Allocation {
            solar: 0.0,
            wind: 150.0,
            total_cost: 22500.0,
            consumers: vec![
                crate::allocation::ConsumerAllocation {
                    name: "Consumer A".to_string(),
                    demand: 50.0,
                    allocated: 50.0,
                },
                crate::allocation::ConsumerAllocation {
                    name: "Consumer B".to_string(),
                    demand: 100.0,
                    allocated: 100.0,
                },
            ],
            surplus,
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100.0");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-0.0), "0.0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_report_with_surplus() {
        let text = render(&Ok(fixed_allocation(100.0)));

        assert_eq!(
            text,
            "Optimal solar energy allocated: 0.0 MW\n\
             Optimal wind energy allocated: 150.0 MW\n\
             Total energy cost: 22500.0\n\
             Energy allocated to Consumer A: 50.0 MW\n\
             Energy allocated to Consumer B: 100.0 MW\n\
             Energy surplus: 100.0 MW\n"
        );
    }

    #[test]
    fn test_report_demand_met() {
        let text = render(&Ok(fixed_allocation(0.0)));
        assert!(text.ends_with("Energy demand perfectly met.\n"));
        assert!(!text.contains("surplus"));
    }

    #[test]
    fn test_report_failure() {
        let text = render(&Err(AllocationError::Infeasible));
        assert_eq!(text, "Optimization failed.\n");
    }

    #[test]
    fn test_report_example_scenario() {
        let result = Scenario::example().allocate(FormulationOptions::default());

        assert_eq!(
            render(&result),
            "Optimal solar energy allocated: 100.0 MW\n\
             Optimal wind energy allocated: 150.0 MW\n\
             Total energy cost: 32500.0\n\
             Energy allocated to Consumer A: 50.0 MW\n\
             Energy allocated to Consumer B: 30.0 MW\n\
             Energy allocated to Consumer C: 70.0 MW\n\
             Energy demand perfectly met.\n"
        );
    }

    #[test]
    fn test_report_no_consumers() {
        let result = crate::allocate(100.0, 150.0, &[], FormulationOptions::default());

        assert_eq!(
            render(&result),
            "Optimal solar energy allocated: 100.0 MW\n\
             Optimal wind energy allocated: 150.0 MW\n\
             Total energy cost: 32500.0\n\
             Energy demand perfectly met.\n"
        );
    }

    #[test]
    fn test_report_balanced_example_scenario() {
        let text = render(&Scenario::example().allocate(FormulationOptions::balanced()));

        assert!(text.starts_with("Optimal solar energy allocated: 0.0 MW\n"));
        assert!(text.contains("Total energy cost: 22500.0\n"));
        assert!(text.ends_with("Energy surplus: 100.0 MW\n"));
    }

    #[test]
    fn test_json() {
        let value = to_json(&Ok(fixed_allocation(100.0)));
        assert_eq!(value["status"], "optimal");
        assert_eq!(value["consumers"][1]["name"], "Consumer B");
        assert_eq!(value["demand_met"], false);

        let value = to_json(&Err(AllocationError::Unbounded));
        assert_eq!(value["status"], "failed");
        assert_eq!(value["reason"], "allocation objective is unbounded");
    }
}
