use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An energy consumer with a fixed demand in megawatts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Consumer {
    pub name: String,
    pub demand: f64,
}

/// Inputs of one allocation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Solar generation capacity (MW)
    pub solar_capacity: f64,
    /// Wind generation capacity (MW)
    pub wind_capacity: f64,
    /// Consumers in LP variable order
    pub consumers: Vec<Consumer>,
}

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Consumer {
    pub fn new(name: impl Into<String>, demand: f64) -> Self {
        Self {
            name: name.into(),
            demand,
        }
    }
}

impl Scenario {
    pub fn new(solar_capacity: f64, wind_capacity: f64, consumers: Vec<Consumer>) -> Self {
        Self {
            solar_capacity,
            wind_capacity,
            consumers,
        }
    }

    /// 100 MW solar, 150 MW wind and three consumers drawing 50, 30 and 70 MW.
    pub fn example() -> Self {
        Self::new(
            100.0,
            150.0,
            vec![
                Consumer::new("Consumer A", 50.0),
                Consumer::new("Consumer B", 30.0),
                Consumer::new("Consumer C", 70.0),
            ],
        )
    }

    pub fn from_json_str(source: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("loaded scenario from {}", path.display());
        Self::from_json_str(&source)
    }

    pub fn total_demand(&self) -> f64 {
        self.consumers.iter().map(|c| c.demand).sum()
    }

    pub fn total_capacity(&self) -> f64 {
        self.solar_capacity + self.wind_capacity
    }

    /// Inputs that allocation accepts but that will fail or read oddly.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.solar_capacity < 0.0 {
            warnings.push(format!("solar capacity is negative ({})", self.solar_capacity));
        }
        if self.wind_capacity < 0.0 {
            warnings.push(format!("wind capacity is negative ({})", self.wind_capacity));
        }

        let mut seen = HashSet::new();
        for consumer in &self.consumers {
            if consumer.demand < 0.0 {
                warnings.push(format!("{} has negative demand ({})", consumer.name, consumer.demand));
            }
            if !seen.insert(consumer.name.as_str()) {
                warnings.push(format!("consumer name {} appears more than once", consumer.name));
            }
        }

        let demand = self.total_demand();
        let capacity = self.total_capacity();
        if demand > capacity {
            warnings.push(format!(
                "total demand {} exceeds total capacity {}",
                demand, capacity
            ));
        }

        warnings
    }
}
