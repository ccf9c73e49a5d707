mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::budget::DebtImpactArgs;
use commands::refinancing::{RateGuideArgs, RefinanceArgs};
use commands::snowball::SnowballArgs;

/// Household debt payoff projections
#[derive(Parser)]
#[command(
    name = "payoff",
    version,
    about = "Household debt payoff projections",
    long_about = "Project debt payoff timelines with decimal precision. Supports \
                  snowball payoff (smallest balance first) against a minimum-payment \
                  baseline, refinancing comparisons, and debt-to-income summaries \
                  over a household budget."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log simulation progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Snowball payoff projection compared with minimum payments only
    Snowball(SnowballArgs),
    /// Compare current debt terms against a refinancing offer
    Refinance(RefinanceArgs),
    /// Debt-to-income and interest cost summary over budget items
    DebtImpact(DebtImpactArgs),
    /// Typical refinancing rate band for a credit score
    RateGuide(RateGuideArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Snowball(args) => commands::snowball::run_snowball(args),
        Commands::Refinance(args) => commands::refinancing::run_refinance(args),
        Commands::DebtImpact(args) => commands::budget::run_debt_impact(args),
        Commands::RateGuide(args) => commands::refinancing::run_rate_guide(args),
        Commands::Version => {
            println!("payoff {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            log::debug!("writing {:?} output", cli.output);
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
