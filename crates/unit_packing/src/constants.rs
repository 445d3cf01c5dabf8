/// Solver defaults
pub const DEFAULT_TOLERANCE: f64 = 0.0;
pub const DEFAULT_SELECTED_SOLUTION: i64 = 1; // 1-based

/// Search limits applied by the CLI when the config leaves them out
pub const DEFAULT_MAX_STEPS: u64 = 5_000_000;
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// The deadline is only polled every this many steps
pub const TIME_CHECK_INTERVAL: u64 = 1024;

/// Pattern text: "(w,c); (w,c)"
pub const PATTERN_SEPARATOR: &str = "; ";

/// Expected headers in CSV reports
pub const SOLUTION_NUMBER_HEADER: &str = "SolutionNumber";
pub const SOLUTION_PATTERN_HEADER: &str = "SolutionPattern";
pub const REMAINDER_HEADER: &str = "Remainder";
