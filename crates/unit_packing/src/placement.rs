use crate::catalog::Catalog;
use crate::solve::RankedSolution;

use serde::Serialize;

const REMAINDER_LABEL: &str = "Remainder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Module,
    Remainder,
}

/// One stretch of the baseline, measured from the segment start
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub index: usize,
    pub offset: f64,
    pub length: f64,
    pub kind: SlotKind,
    /// unit name when the catalog has one, otherwise the width itself
    pub label: String,
}

impl Slot {
    pub fn end(&self) -> f64 {
        self.offset + self.length
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementPlan {
    pub solution_id: usize,
    pub slots: Vec<Slot>,
}

impl PlacementPlan {
    /// Distance from the segment start to the end of the last slot
    pub fn extent(&self) -> f64 {
        self.slots.last().map_or(0.0, Slot::end)
    }

    pub fn module_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.kind == SlotKind::Module)
    }
}

/// Lays the selected pattern out along the baseline: one slot per module in
/// catalog order, then a trailing remainder slot if any length is left.
pub fn plan_placement(solution: &RankedSolution, catalog: &Catalog) -> PlacementPlan {
    let mut slots = Vec::with_capacity(solution.pattern.module_count() + 1);
    let mut offset = 0.0;

    for (index, width) in solution.pattern.modules().enumerate() {
        let label = catalog
            .name_of(width)
            .map_or_else(|| width.to_string(), str::to_string);
        slots.push(Slot {
            index,
            offset,
            length: width.value(),
            kind: SlotKind::Module,
            label,
        });
        offset += width.value();
    }

    if solution.remainder > 0.0 {
        slots.push(Slot {
            index: slots.len(),
            offset,
            length: solution.remainder,
            kind: SlotKind::Remainder,
            label: REMAINDER_LABEL.to_string(),
        });
    }

    PlacementPlan {
        solution_id: solution.id,
        slots,
    }
}
