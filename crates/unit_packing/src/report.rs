use crate::catalog::CatalogEntry;
use crate::constants::{REMAINDER_HEADER, SOLUTION_NUMBER_HEADER, SOLUTION_PATTERN_HEADER};
use crate::error::Result;
use crate::placement::{PlacementPlan, SlotKind};
use crate::solve::{PackingOutcome, RankedSolution};

use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use strum_macros::{Display, EnumString};

/// Output format of the solution report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// One line of the solution table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionRow {
    pub solution_number: usize,
    pub solution_pattern: String,
    pub remainder: f64,
}

impl From<&RankedSolution> for SolutionRow {
    fn from(solution: &RankedSolution) -> Self {
        Self {
            solution_number: solution.id,
            solution_pattern: solution.pattern.to_string(),
            remainder: solution.remainder,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    target_length: f64,
    tolerance: f64,
    units: &'a [CatalogEntry],
    number_of_solutions: usize,
    solutions: Vec<SolutionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<&'a PlacementPlan>,
}

/// Writes the ranked solutions, and the placement of the selected one when
/// given, in the requested format.
pub fn write_report<W: Write>(
    outcome: &PackingOutcome,
    selected: Option<&PlacementPlan>,
    format: OutputFormat,
    writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(outcome, selected, writer),
        OutputFormat::Csv => write_csv(outcome, writer),
        OutputFormat::Json => write_json(outcome, selected, writer),
    }
}

fn write_table<W: Write>(
    outcome: &PackingOutcome,
    selected: Option<&PlacementPlan>,
    mut writer: W,
) -> Result<()> {
    writeln!(
        writer,
        "{} solutions for length {} (tolerance {})",
        outcome.solution_count(),
        outcome.target_length,
        outcome.tolerance
    )?;
    writeln!(writer, "{:>4}  {:>10}  pattern", "#", "remainder")?;
    for solution in &outcome.solutions {
        let marker = match selected {
            Some(plan) if plan.solution_id == solution.id => '*',
            _ => ' ',
        };
        writeln!(
            writer,
            "{:>3}{}  {:>10.4}  {}",
            solution.id, marker, solution.remainder, solution.pattern
        )?;
    }

    if let Some(plan) = selected {
        writeln!(writer)?;
        writeln!(writer, "Placement of solution {}:", plan.solution_id)?;
        for slot in &plan.slots {
            let kind = match slot.kind {
                SlotKind::Module => "module",
                SlotKind::Remainder => "remainder",
            };
            writeln!(
                writer,
                "{:>4}  {:>10.4} .. {:<10.4}  {:<9}  {}",
                slot.index,
                slot.offset,
                slot.end(),
                kind,
                slot.label
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn write_csv<W: Write>(outcome: &PackingOutcome, writer: W) -> Result<()> {
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }

    let mut wtr = builder.from_writer(writer);
    wtr.write_record([SOLUTION_NUMBER_HEADER, SOLUTION_PATTERN_HEADER, REMAINDER_HEADER])?;
    for row in outcome.solutions.iter().map(SolutionRow::from) {
        let number = row.solution_number.to_string();
        let remainder = row.remainder.to_string();
        wtr.write_record([
            number.as_str(),
            row.solution_pattern.as_str(),
            remainder.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_json<W: Write>(
    outcome: &PackingOutcome,
    selected: Option<&PlacementPlan>,
    mut writer: W,
) -> Result<()> {
    let report = JsonReport {
        target_length: outcome.target_length,
        tolerance: outcome.tolerance,
        units: outcome.catalog.entries(),
        number_of_solutions: outcome.solution_count(),
        solutions: outcome.solutions.iter().map(SolutionRow::from).collect(),
        selected,
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    Ok(())
}
