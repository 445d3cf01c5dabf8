//! Depth-first enumeration of width combinations.
//!
//! The search walks the catalog with a per-branch start index so that every
//! produced sequence is non-decreasing in catalog order, i.e. combinations and
//! not permutations. A node whose remainder lands inside `[0, tolerance]` is
//! recorded and never extended further. Frames live on an explicit stack, so
//! deep searches (small widths against a long target) cannot overflow the
//! call stack; [`SearchLimits`] bounds the remaining cost.

use crate::catalog::Width;
use crate::constants::TIME_CHECK_INTERVAL;
use crate::error::{BudgetLimit, PackingError, Result};

use log::debug;
use std::time::{Duration, Instant};

/// Optional bounds on the enumeration. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of visited nodes
    pub max_steps: Option<u64>,
    /// Maximum number of widths in a combination that may still be extended
    pub max_depth: Option<usize>,
    /// Wall-clock budget for a single enumeration
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// An accepted width sequence and its leftover length
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub widths: Vec<Width>,
    pub remainder: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub steps: u64,
    pub accepted: usize,
    pub deepest: usize,
}

#[derive(Debug, Clone)]
pub struct Enumeration {
    /// Sorted by ascending remainder, ties in discovery order
    pub combinations: Vec<Combination>,
    pub stats: SearchStats,
}

enum Visit {
    Accept(f64),
    Prune,
    Expand,
}

fn visit(target: f64, tolerance: f64, sum: f64) -> Visit {
    let remainder = target - sum;
    if remainder >= 0.0 && remainder <= tolerance {
        Visit::Accept(remainder)
    } else if sum > target {
        Visit::Prune
    } else {
        Visit::Expand
    }
}

/// One expandable node: the next catalog index to try and the running sum.
struct Frame {
    next: usize,
    sum: f64,
}

struct Budget {
    limits: SearchLimits,
    started: Instant,
}

impl Budget {
    fn start(limits: &SearchLimits) -> Self {
        Self {
            limits: *limits,
            started: Instant::now(),
        }
    }

    fn check_steps(&self, steps: u64) -> Result<()> {
        if let Some(max) = self.limits.max_steps
            && steps > max
        {
            return Err(PackingError::SearchBudgetExceeded(BudgetLimit::Steps(max)));
        }
        if let Some(limit) = self.limits.time_limit
            && steps % TIME_CHECK_INTERVAL == 0
            && self.started.elapsed() > limit
        {
            return Err(PackingError::SearchBudgetExceeded(BudgetLimit::Time(limit)));
        }
        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        match self.limits.max_depth {
            Some(max) if depth >= max => {
                Err(PackingError::SearchBudgetExceeded(BudgetLimit::Depth(max)))
            }
            _ => Ok(()),
        }
    }
}

/// Enumerates every combination of `widths` whose sum leaves a remainder in
/// `[0, tolerance]` against `target`.
///
/// # Errors
/// `SearchBudgetExceeded` when any of `limits` is hit. No partial result is
/// returned in that case.
pub fn find_width_combinations(
    widths: &[Width],
    target: f64,
    tolerance: f64,
    limits: &SearchLimits,
) -> Result<Enumeration> {
    let budget = Budget::start(limits);
    let mut stats = SearchStats {
        steps: 1,
        ..SearchStats::default()
    };
    let mut accepted: Vec<Combination> = Vec::new();
    let mut path: Vec<Width> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    match visit(target, tolerance, 0.0) {
        Visit::Accept(remainder) => accepted.push(Combination {
            widths: Vec::new(),
            remainder,
        }),
        Visit::Prune => {}
        Visit::Expand => {
            budget.check_depth(0)?;
            stack.push(Frame { next: 0, sum: 0.0 });
        }
    }

    // invariant: path.len() + 1 == stack.len() while the stack is non-empty
    while let Some(frame) = stack.last_mut() {
        if frame.next >= widths.len() {
            stack.pop();
            // the root frame owns no width, popping an empty path is a no-op
            path.pop();
            continue;
        }

        let index = frame.next;
        frame.next += 1;
        let width = widths[index];
        let sum = frame.sum + width.value();

        path.push(width);
        stats.steps += 1;
        stats.deepest = stats.deepest.max(path.len());
        budget.check_steps(stats.steps)?;

        match visit(target, tolerance, sum) {
            Visit::Accept(remainder) => {
                accepted.push(Combination {
                    widths: path.clone(),
                    remainder,
                });
                path.pop();
            }
            Visit::Prune => {
                path.pop();
            }
            Visit::Expand => {
                budget.check_depth(path.len())?;
                // same start index: a width may repeat, earlier widths may not
                stack.push(Frame { next: index, sum });
            }
        }
    }

    // stable, so equal remainders keep discovery order
    accepted.sort_by(|a, b| a.remainder.total_cmp(&b.remainder));
    stats.accepted = accepted.len();

    debug!(
        "enumeration finished: {} steps, {} accepted, deepest combination {}",
        stats.steps, stats.accepted, stats.deepest
    );

    Ok(Enumeration {
        combinations: accepted,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(values: &[f64]) -> Vec<Width> {
        values.iter().copied().map(Width::new).collect()
    }

    fn values(combination: &Combination) -> Vec<f64> {
        combination.widths.iter().map(|w| w.value()).collect()
    }

    fn run(values: &[f64], target: f64, tolerance: f64) -> Vec<Combination> {
        find_width_combinations(&widths(values), target, tolerance, &SearchLimits::unbounded())
            .unwrap()
            .combinations
    }

    #[test]
    fn test_exact_fit_single_combination() {
        let found = run(&[3.0, 5.0], 13.0, 0.0);
        assert_eq!(found.len(), 1);
        assert_eq!(values(&found[0]), vec![3.0, 5.0, 5.0]);
        assert_eq!(found[0].remainder, 0.0);
    }

    #[test]
    fn test_no_combination_within_tolerance() {
        // 8 leaves 2, 12 overshoots
        let found = run(&[4.0], 10.0, 1.0);
        assert!(found.is_empty());
    }

    #[test]
    fn test_accept_and_stop_does_not_extend_accepted_node() {
        // [1] is already within tolerance, so [1, 1] must not be produced
        let found = run(&[1.0, 2.0], 2.0, 1.0);
        let seqs: Vec<Vec<f64>> = found.iter().map(values).collect();
        assert_eq!(seqs, vec![vec![2.0], vec![1.0]]);
        assert_eq!(found[0].remainder, 0.0);
        assert_eq!(found[1].remainder, 1.0);
    }

    #[test]
    fn test_sequences_are_non_decreasing_in_catalog_order() {
        let catalog = widths(&[2.0, 3.0, 7.0]);
        let found =
            find_width_combinations(&catalog, 20.0, 1.0, &SearchLimits::unbounded()).unwrap();
        assert!(!found.combinations.is_empty());
        for combination in &found.combinations {
            let positions: Vec<usize> = combination
                .widths
                .iter()
                .map(|w| catalog.iter().position(|c| c == w).unwrap())
                .collect();
            assert!(positions.windows(2).all(|p| p[0] <= p[1]));
            assert!(combination.remainder >= 0.0 && combination.remainder <= 1.0);
        }
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let found = run(&[2.0, 1.0], 2.0, 0.0);
        let seqs: Vec<Vec<f64>> = found.iter().map(values).collect();
        assert_eq!(seqs, vec![vec![2.0], vec![1.0, 1.0]]);

        let found = run(&[1.0, 2.0], 2.0, 0.0);
        let seqs: Vec<Vec<f64>> = found.iter().map(values).collect();
        assert_eq!(seqs, vec![vec![1.0, 1.0], vec![2.0]]);
    }

    #[test]
    fn test_sorted_by_remainder() {
        let found = run(&[3.0, 4.0], 11.0, 2.0);
        assert!(found.len() > 1);
        assert!(found.windows(2).all(|w| w[0].remainder <= w[1].remainder));
    }

    #[test]
    fn test_target_within_tolerance_accepts_empty_combination() {
        let found = run(&[5.0], 1.0, 2.0);
        assert_eq!(found.len(), 1);
        assert!(found[0].widths.is_empty());
        assert_eq!(found[0].remainder, 1.0);
    }

    #[test]
    fn test_step_budget_exceeded() {
        let limits = SearchLimits::unbounded().with_max_steps(100);
        let result = find_width_combinations(&widths(&[1.0, 2.0, 3.0]), 1000.0, 0.0, &limits);
        assert!(matches!(
            result,
            Err(PackingError::SearchBudgetExceeded(BudgetLimit::Steps(100)))
        ));
    }

    #[test]
    fn test_depth_limit_exceeded() {
        let limits = SearchLimits::unbounded().with_max_depth(10);
        let result = find_width_combinations(&widths(&[1.0]), 50.0, 0.0, &limits);
        assert!(matches!(
            result,
            Err(PackingError::SearchBudgetExceeded(BudgetLimit::Depth(10)))
        ));
    }

    #[test]
    fn test_time_limit_exceeded() {
        let limits = SearchLimits::unbounded().with_time_limit(Duration::ZERO);
        let result = find_width_combinations(&widths(&[1.0]), 5000.0, 0.0, &limits);
        assert!(matches!(
            result,
            Err(PackingError::SearchBudgetExceeded(BudgetLimit::Time(_)))
        ));
    }

    #[test]
    fn test_deep_search_runs_without_recursion() {
        let found = run(&[1.0], 50_000.0, 0.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].widths.len(), 50_000);
    }

    #[test]
    fn test_stats_are_reported() {
        let enumeration =
            find_width_combinations(&widths(&[3.0, 5.0]), 13.0, 0.0, &SearchLimits::unbounded())
                .unwrap();
        assert_eq!(enumeration.stats.accepted, 1);
        assert_eq!(enumeration.stats.deepest, 5);
        assert!(enumeration.stats.steps > 1);
    }
}
