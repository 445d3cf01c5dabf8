use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use std::path::PathBuf;

use unit_packing::{Config, OutputFormat, plan_placement, solve, write_report};

#[derive(Parser)]
#[command(author, version, about = "Pack a baseline segment with whole module widths", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: PathBuf,

    /// Override the segment length
    #[arg(short, long)]
    target: Option<f64>,

    /// Override the accepted leftover length
    #[arg(long)]
    tolerance: Option<f64>,

    /// Override the soft cap on distinct widths per solution
    #[arg(long)]
    max_unique_widths: Option<usize>,

    /// 1-based solution to lay out (clamped into range)
    #[arg(short, long, allow_negative_numbers = true)]
    select: Option<i64>,

    /// table | csv | json
    #[arg(short, long, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn run(args: &Args) -> Result<()> {
    let mut config = Config::load_from_file(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    info!("Loaded configuration: {}", args.config.display());

    if let Some(target) = args.target {
        config.solver.target_length = Some(target);
    }
    if let Some(tolerance) = args.tolerance {
        config.solver.tolerance = tolerance;
    }
    if let Some(max) = args.max_unique_widths {
        config.solver.max_unique_widths = Some(max);
    }
    if let Some(select) = args.select {
        config.solver.selected_solution = select;
    }
    // overrides go through the same checks as the file
    config.validate()?;
    debug!("{:#?}", config.solver);

    let outcome = solve(&config.to_problem())?;
    let selected = outcome.select(config.solver.selected_solution)?;
    info!(
        "Selected solution {} of {}: {} (remainder {})",
        selected.id,
        outcome.solution_count(),
        selected.pattern,
        selected.remainder
    );

    let plan = plan_placement(selected, &outcome.catalog);
    let stdout = std::io::stdout();
    write_report(&outcome, Some(&plan), args.format, stdout.lock())?;
    Ok(())
}

fn main() {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("Error: {e:#}");
        std::process::exit(1);
    }
}
