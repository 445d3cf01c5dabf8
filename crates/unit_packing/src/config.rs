use crate::{
    catalog::UnitDefinition,
    constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_STEPS, DEFAULT_SELECTED_SOLUTION, DEFAULT_TOLERANCE},
    error::{PackingError, Result},
    solve::{PackingProblem, SearchLimits},
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Problem description as read from a TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub units: Vec<UnitDefinition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverConfig {
    /// Length of the segment to tile. Left optional so a missing value is
    /// reported by the solver, not by the parser.
    #[serde(default)]
    pub target_length: Option<f64>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub max_unique_widths: Option<usize>,
    #[serde(default = "default_selected_solution")]
    pub selected_solution: i64, // 1-based, clamped later
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            target_length: None,
            tolerance: DEFAULT_TOLERANCE,
            max_unique_widths: None,
            selected_solution: DEFAULT_SELECTED_SOLUTION,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_steps")]
    pub max_steps: Option<u64>,
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            max_depth: default_max_depth(),
            time_limit_ms: None,
        }
    }
}

impl LimitsConfig {
    pub fn to_search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_steps: self.max_steps,
            max_depth: self.max_depth,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
        }
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_selected_solution() -> i64 {
    DEFAULT_SELECTED_SOLUTION
}

fn default_max_steps() -> Option<u64> {
    Some(DEFAULT_MAX_STEPS)
}

fn default_max_depth() -> Option<usize> {
    Some(DEFAULT_MAX_DEPTH)
}

impl Config {
    /// Reads a TOML config file and validates it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PackingError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that can never run. Empty catalogs, zero widths and
    /// a missing target are left to the solver so they surface with their
    /// own error kinds.
    pub fn validate(&self) -> Result<()> {
        if self.solver.max_unique_widths == Some(0) {
            return Err(PackingError::Config(
                "max_unique_widths must be at least 1".to_string(),
            ));
        }

        if self.limits.max_steps == Some(0) {
            return Err(PackingError::Config(
                "limits.max_steps must be greater than 0".to_string(),
            ));
        }

        if self.limits.max_depth == Some(0) {
            return Err(PackingError::Config(
                "limits.max_depth must be greater than 0".to_string(),
            ));
        }

        if self.limits.time_limit_ms == Some(0) {
            return Err(PackingError::Config(
                "limits.time_limit_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn to_problem(&self) -> PackingProblem {
        PackingProblem {
            units: self.units.clone(),
            target_length: self.solver.target_length,
            tolerance: self.solver.tolerance,
            max_unique_widths: self.solver.max_unique_widths,
            limits: self.limits.to_search_limits(),
        }
    }
}
