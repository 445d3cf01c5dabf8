pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod placement;
pub mod report;
pub mod solve;

pub use catalog::{Catalog, UnitDefinition, Width};
pub use config::Config;
pub use error::{BudgetLimit, PackingError, Result};
pub use placement::{PlacementPlan, Slot, SlotKind, plan_placement};
pub use report::{OutputFormat, write_report};
pub use solve::{
    PackingOutcome, PackingProblem, Pattern, RankedSolution, SearchLimits, select_solution, solve,
};
