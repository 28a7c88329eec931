//! Holding Simulator CLI
//!
//! Command-line interface for running projections, growth sweeps and the
//! named scenario store.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use holding_simulator::{
    default_schedule, export, one_year_projection, IrrOutcome, JsonFileStore, ProjectionResult,
    Scenario, ScenarioRunner, ScenarioStore, SimulationParameters,
};

#[derive(Parser)]
#[command(name = "holding-simulator", version, about = "Multi-year projection engine for an investment holding")]
struct Cli {
    /// Directory for named scenarios
    #[arg(long, default_value = "scenarios", global = true)]
    store_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a projection and print the year table
    Run {
        #[command(flatten)]
        params: ParamArgs,

        /// Number of simulated years after year 0
        #[arg(long, default_value_t = 10)]
        years: u32,

        /// Load params and events from a saved scenario instead of flags
        #[arg(long)]
        scenario: Option<String>,

        /// Write the full CSV report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Sweep growth from 0% to 200% of break-even and report final values
    Sweep {
        #[command(flatten)]
        params: ParamArgs,

        #[arg(long, default_value_t = 10)]
        years: u32,

        /// Number of sweep intervals (points = steps + 1)
        #[arg(long, default_value_t = 20)]
        steps: u32,
    },

    /// Save the given parameters as a named scenario
    Save {
        name: String,

        #[command(flatten)]
        params: ParamArgs,

        #[arg(long, default_value_t = 10)]
        years: u32,
    },

    /// Print a saved scenario as JSON
    Load { name: String },

    /// List saved scenarios
    List,

    /// Delete a saved scenario
    Delete { name: String },
}

/// Run parameters as CLI flags. Currency amounts are in MSEK.
#[derive(Args)]
struct ParamArgs {
    #[arg(long, default_value_t = 50.0)]
    nav: f64,

    #[arg(long, default_value_t = 10.0)]
    market_value: f64,

    #[arg(long, default_value_t = 0.0)]
    cash: f64,

    /// Substance discount in percent
    #[arg(long, default_value_t = 60.0)]
    discount: f64,

    /// Simulated owner's stake in percent
    #[arg(long, default_value_t = 10.0)]
    ownership: f64,

    #[arg(long, default_value_t = 441_862)]
    shares: u64,

    /// Yearly capital raise
    #[arg(long, default_value_t = 5.0)]
    raise: f64,

    /// Yearly management cost
    #[arg(long, default_value_t = 5.0)]
    cost: f64,

    /// Yearly substance growth in percent
    #[arg(long, default_value_t = 20.0)]
    growth: f64,
}

impl ParamArgs {
    fn to_params(&self) -> SimulationParameters {
        SimulationParameters {
            initial_nav: self.nav,
            initial_market_value: self.market_value,
            initial_cash: self.cash,
            substance_discount_percent: self.discount,
            ownership_share_percent: self.ownership,
            initial_share_count: self.shares,
            default_raise_amount: self.raise,
            default_management_cost: self.cost,
            default_growth_percent: self.growth,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = JsonFileStore::new(&cli.store_dir);

    match cli.command {
        Command::Run {
            params,
            years,
            scenario,
            output,
        } => {
            let (params, events) = match scenario {
                Some(name) => {
                    let loaded = store
                        .load(&name)
                        .with_context(|| format!("loading scenario '{name}'"))?;
                    (loaded.params, loaded.events)
                }
                None => {
                    let params = params.to_params();
                    let events = default_schedule(&params, years);
                    (params, events)
                }
            };

            let result = ScenarioRunner::new(params).run(&events)?;
            print_run(&result);

            if let Some(path) = output {
                let file = File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                export::write_csv(&result, file)?;
                println!("\nFull report written to: {}", path.display());
            }
        }

        Command::Sweep { params, years, steps } => {
            let params = params.to_params();
            let break_even = one_year_projection(&params)?;
            println!(
                "Break-even growth: {:.2}% of substance per year",
                break_even.required_increase_percent
            );

            let points = ScenarioRunner::new(params).growth_sweep(years, steps)?;
            println!("{:>10} {:>10} {:>14} {:>10}", "Growth%", "xBreakEven", "FinalValue", "IRR");
            for point in &points {
                let last = point.result.snapshots.last();
                println!(
                    "{:>10.2} {:>10.2} {:>14.2} {:>10}",
                    point.growth_percent,
                    point.break_even_factor,
                    last.map(|s| s.attributable_share_value).unwrap_or(0.0),
                    fmt_irr(&point.result.irr),
                );
            }
        }

        Command::Save { name, params, years } => {
            let params = params.to_params();
            let events = default_schedule(&params, years);
            store.save(&name, &Scenario::new(params, events))?;
            println!("Saved scenario '{name}'");
        }

        Command::Load { name } => {
            let scenario = store.load(&name)?;
            println!("{}", serde_json::to_string_pretty(&scenario)?);
        }

        Command::List => {
            for name in store.list()? {
                println!("{name}");
            }
        }

        Command::Delete { name } => {
            store.delete(&name)?;
            println!("Deleted scenario '{name}'");
        }
    }

    Ok(())
}

fn print_run(result: &ProjectionResult) {
    println!(
        "{:>4} {:>17} {:>12} {:>10} {:>12} {:>12} {:>10} {:>12} {:>10}",
        "Year", "Phase", "Substance", "Cash", "MarketValue", "TotalShares", "Owner%", "OwnerValue", "Dilution%"
    );
    println!("{}", "-".repeat(110));
    for s in &result.snapshots {
        println!(
            "{:>4} {:>17} {:>12.2} {:>10.2} {:>12.2} {:>12} {:>10.4} {:>12.2} {:>10}",
            s.year,
            s.phase.as_str(),
            s.substance_value,
            s.cash,
            s.market_value,
            s.total_share_count,
            s.ownership_share_percent,
            s.attributable_share_value,
            s.dilution_percent
                .map(|d| format!("{d:.2}"))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    if let Some(halt) = &result.halt {
        println!("\n{halt}");
    }

    let summary = result.summary();
    println!("\nSimulated owner:");
    println!("  Entry value:     {:.2} MSEK", summary.owner.entry_value);
    println!("  Final ownership: {:.2}%", summary.owner.final_ownership_percent);
    println!("  Final value:     {:.2} MSEK", summary.owner.final_value);
    println!("  IRR:             {}", fmt_irr(&summary.owner.irr));

    if let Some(entrant) = &summary.entrant {
        println!("\nEntrant investor (year 0 raise):");
        println!("  Invested:        {:.2} MSEK", entrant.invested);
        println!("  Entry ownership: {:.2}%", entrant.ownership_after_entry_percent);
        println!("  Final ownership: {:.2}%", entrant.final_ownership_percent);
        println!("  Final value:     {:.2} MSEK", entrant.final_value);
        println!("  IRR:             {}", fmt_irr(&entrant.irr));
    }
}

fn fmt_irr(outcome: &IrrOutcome) -> String {
    match outcome {
        IrrOutcome::Rate(rate) => format!("{:.2}%", rate * 100.0),
        IrrOutcome::TotalLoss => "-100.00%".to_string(),
        IrrOutcome::NotConverged(_) => "n/a (not converged)".to_string(),
        IrrOutcome::Undefined => "n/a".to_string(),
    }
}
