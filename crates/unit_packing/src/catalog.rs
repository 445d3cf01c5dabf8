use crate::error::{PackingError, Result};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A module width. Totally ordered so it can key maps and sets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Width(f64);

impl Width {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Width {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Width {}

impl Hash for Width {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Width {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Width {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry as it appears in the input
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UnitDefinition {
    pub width: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl UnitDefinition {
    pub fn new(width: f64) -> Self {
        Self { width, name: None }
    }

    pub fn named(width: f64, name: impl Into<String>) -> Self {
        Self {
            width,
            name: Some(name.into()),
        }
    }
}

/// A distinct width and the name it was first given
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub width: Width,
    pub name: Option<String>,
}

/// Distinct widths available for packing, in first-occurrence order.
///
/// The order matters: the enumerator walks widths in this order, which fixes
/// the order in which equally tight solutions are reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Validates the units and collapses duplicate widths.
    ///
    /// # Errors
    /// - `EmptyCatalog` if `units` is empty
    /// - `InvalidWidth` for the first width that is zero, negative or not finite
    pub fn from_units(units: &[UnitDefinition]) -> Result<Self> {
        if units.is_empty() {
            return Err(PackingError::EmptyCatalog);
        }

        if let Some(bad) = units
            .iter()
            .find(|u| !u.width.is_finite() || u.width <= 0.0)
        {
            return Err(PackingError::InvalidWidth { width: bad.width });
        }

        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(units.len());
        for unit in units {
            let width = Width::new(unit.width);
            match entries.iter_mut().find(|e| e.width == width) {
                // first name wins, later duplicates may only fill a gap
                Some(existing) => {
                    if existing.name.is_none() {
                        existing.name = unit.name.clone();
                    }
                }
                None => entries.push(CatalogEntry {
                    width,
                    name: unit.name.clone(),
                }),
            }
        }

        Ok(Self { entries })
    }

    pub fn from_widths(widths: &[f64]) -> Result<Self> {
        let units: Vec<UnitDefinition> = widths.iter().copied().map(UnitDefinition::new).collect();
        Self::from_units(&units)
    }

    pub fn widths(&self) -> Vec<Width> {
        self.entries.iter().map(|e| e.width).collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of distinct widths. Never zero.
    pub fn width_count(&self) -> usize {
        self.entries.len()
    }

    pub fn name_of(&self, width: Width) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.width == width)
            .and_then(|e| e.name.as_deref())
    }
}
