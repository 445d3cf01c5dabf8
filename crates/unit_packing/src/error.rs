use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PackingError>;

/// Which search limit stopped the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLimit {
    Steps(u64),
    Depth(usize),
    Time(Duration),
}

impl std::fmt::Display for BudgetLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetLimit::Steps(n) => write!(f, "step budget of {n} exhausted"),
            BudgetLimit::Depth(n) => write!(f, "depth limit of {n} exceeded"),
            BudgetLimit::Time(d) => write!(f, "time limit of {} ms exceeded", d.as_millis()),
        }
    }
}

#[derive(Debug, Error)]
pub enum PackingError {
    #[error("No units provided. Please provide at least one unit.")]
    EmptyCatalog,

    #[error("Unit width {width} is invalid. Please provide a width greater than 0.")]
    InvalidWidth { width: f64 },

    #[error("No target length provided. Please define the segment length to pack.")]
    MissingTarget,

    #[error("Target length {value} is invalid. It must be a positive finite number.")]
    InvalidTarget { value: f64 },

    #[error("Tolerance {value} is invalid. It must be a non-negative finite number.")]
    InvalidTolerance { value: f64 },

    #[error("No solutions found. Try increasing your tolerance")]
    NoSolutionFound,

    #[error("Search aborted: {0}")]
    SearchBudgetExceeded(BudgetLimit),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
