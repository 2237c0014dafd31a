use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use shift_planner::display::print_week_schedule;
use shift_planner::export::{write_assignments, write_report};
use shift_planner::parser::load_roster;
use shift_planner::schedule::ShiftAssigner;
use shift_planner::validation::audit;
use shift_planner::ScheduleConfig;

#[derive(Parser)]
#[command(
    name = "shift-planner",
    about = "Assigns employees to Morning, Afternoon and Evening shifts for a week",
    version
)]
struct Cli {
    /// Roster CSV: a Name column plus one preference column per day
    #[arg(short, long, default_value = "input.csv")]
    input: PathBuf,

    /// Where to write the per-employee schedule CSV
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// TOML file overriding days, shifts, caps, minimums and filler employees
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random source, for reproducible schedules
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the per-shift assignment table as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Skip the per-day console summary
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => ScheduleConfig::load(path)?,
        None => ScheduleConfig::default(),
    };

    println!("Loading roster from {}...", cli.input.display());
    let mut employees = load_roster(&cli.input, &config)?;
    println!(
        "Loaded {} employees ({} filler employees will be added)",
        employees.len(),
        config.filler_employees.len()
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let assigner = ShiftAssigner::new(config)?;
    let week = assigner.assign(&mut employees, &mut rng);

    if let Err(issues) = audit(&employees, &week, assigner.config()) {
        for issue in &issues {
            warn!(kind = ?issue.kind, "{}", issue.message);
        }
    }

    if !cli.quiet {
        print_week_schedule(&week, assigner.config());
    }

    write_assignments(&employees, assigner.config(), &cli.output)?;
    if let Some(report) = &cli.report {
        write_report(&week, assigner.config(), report)?;
        println!("Schedule report written to {}", report.display());
    }

    println!("✅ Final schedule written to {}", cli.output.display());
    Ok(())
}
