mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::balloon::BalloonArgs;
use commands::loan::{LoanArgs, ScheduleArgs};

/// Loan amortization and payoff calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Loan amortization and payoff calculations",
    long_about = "A CLI for loan calculations with decimal precision. Computes the \
                  standard amortizing monthly payment, simulates early payoff with \
                  extra payments, builds full repayment schedules, and prices \
                  balloon loans."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the monthly payment and payoff profile of a loan
    Loan(LoanArgs),
    /// Build the month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Calculate a balloon loan payment profile
    Balloon(BalloonArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Balloon(args) => commands::balloon::run_balloon(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
