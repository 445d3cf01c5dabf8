//! Packing pipeline: catalog → enumeration → canonical filter → ranking.

pub mod canonical;
pub mod enumerate;
pub mod rank;
pub mod select;

pub use canonical::{Candidate, Pattern, canonicalize};
pub use enumerate::{Combination, Enumeration, SearchLimits, SearchStats, find_width_combinations};
pub use rank::{RankedSolution, rank};
pub use select::{clamp_index, select_solution};

use crate::catalog::{Catalog, UnitDefinition};
use crate::constants::DEFAULT_TOLERANCE;
use crate::error::{PackingError, Result};

use log::{debug, info};

/// Everything the solver needs for one segment
#[derive(Debug, Clone, PartialEq)]
pub struct PackingProblem {
    pub units: Vec<UnitDefinition>,
    pub target_length: Option<f64>,
    pub tolerance: f64,
    /// Soft cap on distinct widths per solution; `None` uses the catalog size
    pub max_unique_widths: Option<usize>,
    pub limits: SearchLimits,
}

impl PackingProblem {
    pub fn new(units: Vec<UnitDefinition>, target_length: f64) -> Self {
        Self {
            units,
            target_length: Some(target_length),
            tolerance: DEFAULT_TOLERANCE,
            max_unique_widths: None,
            limits: SearchLimits::default(),
        }
    }

    pub fn from_widths(widths: &[f64], target_length: f64) -> Self {
        Self::new(
            widths.iter().copied().map(UnitDefinition::new).collect(),
            target_length,
        )
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_unique_widths(mut self, max: usize) -> Self {
        self.max_unique_widths = Some(max);
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Result of a successful solve. Never empty.
#[derive(Debug, Clone)]
pub struct PackingOutcome {
    pub catalog: Catalog,
    pub target_length: f64,
    pub tolerance: f64,
    pub solutions: Vec<RankedSolution>,
    pub stats: SearchStats,
}

impl PackingOutcome {
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    pub fn select(&self, requested: i64) -> Result<&RankedSolution> {
        select_solution(&self.solutions, requested)
    }

    pub fn best(&self) -> Option<&RankedSolution> {
        self.solutions.first()
    }
}

fn validate_lengths(problem: &PackingProblem) -> Result<f64> {
    let target = problem.target_length.ok_or(PackingError::MissingTarget)?;
    if !target.is_finite() || target <= 0.0 {
        return Err(PackingError::InvalidTarget { value: target });
    }
    if !problem.tolerance.is_finite() || problem.tolerance < 0.0 {
        return Err(PackingError::InvalidTolerance {
            value: problem.tolerance,
        });
    }
    Ok(target)
}

/// Runs the whole pipeline.
///
/// Validation stops at the first failing check, in this order: empty catalog,
/// invalid width, missing target, invalid target, invalid tolerance. Then the
/// search may fail on its limits, and finally an empty result is reported as
/// `NoSolutionFound`.
pub fn solve(problem: &PackingProblem) -> Result<PackingOutcome> {
    let catalog = Catalog::from_units(&problem.units)?;
    let target = validate_lengths(problem)?;
    let max_unique = problem.max_unique_widths.unwrap_or(catalog.width_count());

    debug!(
        "packing {} with widths [{}], tolerance {}, max unique widths {}",
        target,
        catalog
            .widths()
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        problem.tolerance,
        max_unique
    );

    let enumeration = find_width_combinations(
        &catalog.widths(),
        target,
        problem.tolerance,
        &problem.limits,
    )?;
    let candidates = canonicalize(&enumeration.combinations, max_unique);
    let solutions = rank(candidates);

    if solutions.is_empty() {
        return Err(PackingError::NoSolutionFound);
    }

    info!("Found {} packing solutions", solutions.len());

    Ok(PackingOutcome {
        catalog,
        target_length: target,
        tolerance: problem.tolerance,
        solutions,
        stats: enumeration.stats,
    })
}
