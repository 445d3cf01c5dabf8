use crate::error::{PackingError, Result};
use crate::solve::rank::RankedSolution;

use log::warn;

/// Clamps a 1-based request into `[1, count]` and returns the 0-based index.
/// `None` when there is nothing to select.
pub fn clamp_index(requested: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = i64::try_from(count).unwrap_or(i64::MAX);
    let effective = requested.clamp(1, last);
    Some((effective - 1) as usize)
}

/// Picks the requested solution. Requests below 1 select the tightest fit,
/// requests past the end select the loosest one.
///
/// # Errors
/// `NoSolutionFound` if `solutions` is empty.
pub fn select_solution(solutions: &[RankedSolution], requested: i64) -> Result<&RankedSolution> {
    let index = clamp_index(requested, solutions.len()).ok_or(PackingError::NoSolutionFound)?;
    let chosen = &solutions[index];
    if chosen.id as i64 != requested {
        warn!(
            "Requested solution {} is out of range 1..={}, using solution {}",
            requested,
            solutions.len(),
            chosen.id
        );
    }
    Ok(chosen)
}
