use crate::catalog::Width;
use crate::constants::PATTERN_SEPARATOR;
use crate::solve::enumerate::Combination;

use itertools::Itertools;
use log::debug;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A width -> count multiset.
///
/// `key` is sorted by ascending width and is the only thing equality and
/// hashing look at, so generation order never makes two patterns differ.
/// `entries` keeps the order widths were first seen in, which is catalog
/// order for search results; text and placement follow it.
#[derive(Debug, Clone)]
pub struct Pattern {
    key: Vec<(Width, usize)>,
    entries: Vec<(Width, usize)>,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Pattern {
    pub fn from_widths(widths: &[Width]) -> Self {
        let mut entries: Vec<(Width, usize)> = Vec::new();
        for &width in widths {
            match entries.iter_mut().find(|(w, _)| *w == width) {
                Some((_, count)) => *count += 1,
                None => entries.push((width, 1)),
            }
        }
        let key = entries.iter().copied().sorted().collect();
        Self { key, entries }
    }

    /// Builds a pattern from explicit (width, count) pairs. Zero counts are
    /// dropped and repeated widths are merged into their first position.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (f64, usize)>,
    {
        let widths: Vec<Width> = counts
            .into_iter()
            .flat_map(|(w, c)| std::iter::repeat_n(Width::new(w), c))
            .collect();
        Self::from_widths(&widths)
    }

    /// (width, count) pairs in first-seen order
    pub fn entries(&self) -> &[(Width, usize)] {
        &self.entries
    }

    pub fn count_of(&self, width: Width) -> usize {
        self.entries
            .iter()
            .find(|(w, _)| *w == width)
            .map_or(0, |&(_, c)| c)
    }

    pub fn distinct_widths(&self) -> usize {
        self.entries.len()
    }

    pub fn module_count(&self) -> usize {
        self.entries.iter().map(|&(_, c)| c).sum()
    }

    /// Σ width × count
    pub fn total_length(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(w, c)| w.value() * c as f64)
            .sum()
    }

    /// Every module in placement order: first-seen width order, each repeated `count` times.
    pub fn modules(&self) -> impl Iterator<Item = Width> + '_ {
        self.entries
            .iter()
            .flat_map(|&(w, c)| std::iter::repeat_n(w, c))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accepts up to `max_unique_widths + 1` distinct widths. The extra slot
    /// is intentional and matches the established behavior of the tool.
    pub fn within_unique_limit(&self, max_unique_widths: usize) -> bool {
        self.distinct_widths() <= max_unique_widths + 1
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .entries
            .iter()
            .map(|(w, c)| format!("({w},{c})"))
            .join(PATTERN_SEPARATOR);
        f.write_str(&text)
    }
}

/// A filtered, canonicalized candidate before deduplication
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub pattern: Pattern,
    pub remainder: f64,
}

/// Converts accepted combinations to patterns, dropping the ones that use too
/// many distinct widths. Input order is preserved.
pub fn canonicalize(combinations: &[Combination], max_unique_widths: usize) -> Vec<Candidate> {
    let candidates: Vec<Candidate> = combinations
        .iter()
        .map(|c| Candidate {
            pattern: Pattern::from_widths(&c.widths),
            remainder: c.remainder,
        })
        .filter(|c| c.pattern.within_unique_limit(max_unique_widths))
        .collect();

    debug!(
        "canonicalized {} combinations, {} rejected by the unique-width limit ({} + 1)",
        combinations.len(),
        combinations.len() - candidates.len(),
        max_unique_widths
    );

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(values: &[f64]) -> Vec<Width> {
        values.iter().copied().map(Width::new).collect()
    }

    #[test]
    fn test_pattern_groups_and_counts() {
        let pattern = Pattern::from_widths(&w(&[3.0, 5.0, 5.0]));
        assert_eq!(
            pattern.entries(),
            &[(Width::new(3.0), 1), (Width::new(5.0), 2)]
        );
        assert_eq!(pattern.distinct_widths(), 2);
        assert_eq!(pattern.module_count(), 3);
        assert_eq!(pattern.total_length(), 13.0);
        assert_eq!(pattern.count_of(Width::new(5.0)), 2);
        assert_eq!(pattern.count_of(Width::new(4.0)), 0);
    }

    #[test]
    fn test_pattern_equality_ignores_generation_order() {
        let a = Pattern::from_widths(&w(&[5.0, 3.0, 5.0]));
        let b = Pattern::from_widths(&w(&[3.0, 5.0, 5.0]));
        let c = Pattern::from_counts([(5.0, 2), (3.0, 1)]);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_ne!(a, Pattern::from_widths(&w(&[3.0, 3.0, 5.0])));
    }

    #[test]
    fn test_pattern_display() {
        let pattern = Pattern::from_widths(&w(&[2.5, 5.0, 5.0]));
        assert_eq!(pattern.to_string(), "(2.5,1); (5,2)");
        assert_eq!(Pattern::from_widths(&[]).to_string(), "");
    }

    #[test]
    fn test_modules_in_placement_order() {
        let pattern = Pattern::from_counts([(5.0, 2), (3.0, 1), (4.0, 0)]);
        let modules: Vec<f64> = pattern.modules().map(Width::value).collect();
        assert_eq!(modules, vec![5.0, 5.0, 3.0]);
    }

    #[test]
    fn test_first_seen_order_drives_text_not_equality() {
        let wide_first = Pattern::from_widths(&w(&[5.0, 5.0, 3.0]));
        let narrow_first = Pattern::from_widths(&w(&[3.0, 5.0, 5.0]));

        assert_eq!(wide_first.to_string(), "(5,2); (3,1)");
        assert_eq!(narrow_first.to_string(), "(3,1); (5,2)");
        assert_eq!(wide_first, narrow_first);

        let mut seen = std::collections::HashSet::new();
        assert!(seen.insert(wide_first));
        assert!(!seen.insert(narrow_first));
    }

    #[test]
    fn test_unique_limit_allows_one_extra_width() {
        let two = Pattern::from_widths(&w(&[2.0, 2.0, 3.0]));
        assert!(two.within_unique_limit(1));

        let three = Pattern::from_widths(&w(&[1.0, 2.0, 3.0]));
        assert!(!three.within_unique_limit(1));
        assert!(three.within_unique_limit(2));
    }

    #[test]
    fn test_canonicalize_filters_and_preserves_order() {
        let combinations = vec![
            Combination {
                widths: w(&[1.0, 2.0, 3.0]),
                remainder: 0.0,
            },
            Combination {
                widths: w(&[2.0, 2.0, 2.0]),
                remainder: 0.5,
            },
            Combination {
                widths: w(&[1.0, 1.0, 3.0]),
                remainder: 1.0,
            },
        ];

        let candidates = canonicalize(&combinations, 1);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].pattern.to_string(), "(2,3)");
        assert_eq!(candidates[0].remainder, 0.5);
        assert_eq!(candidates[1].pattern.to_string(), "(1,2); (3,1)");
    }
}
