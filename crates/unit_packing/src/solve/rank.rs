use crate::solve::canonical::{Candidate, Pattern};

use log::debug;
use std::collections::HashSet;

/// Final, numbered solution. Index 0 of a ranked list is the tightest fit.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSolution {
    /// 1-based, sequential in rank order
    pub id: usize,
    pub pattern: Pattern,
    /// target length − Σ(width × count)
    pub remainder: f64,
}

/// Drops repeated patterns and numbers the survivors.
///
/// `candidates` must already be sorted by ascending remainder; the first
/// occurrence of a pattern is therefore also its tightest one.
pub fn rank(candidates: Vec<Candidate>) -> Vec<RankedSolution> {
    let total = candidates.len();
    let mut seen: HashSet<Pattern> = HashSet::with_capacity(total);

    let ranked: Vec<RankedSolution> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.pattern.clone()))
        .enumerate()
        .map(|(i, c)| RankedSolution {
            id: i + 1,
            pattern: c.pattern,
            remainder: c.remainder,
        })
        .collect();

    debug!(
        "ranked {} solutions ({} duplicates removed)",
        ranked.len(),
        total - ranked.len()
    );
    ranked
}
