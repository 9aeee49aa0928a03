use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loancalc_core::balloon::loan::{self, BalloonLoanInput};

use crate::input;

/// Arguments for the balloon loan calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BalloonArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 7 for 7%)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Amortization period in years used to size the monthly payment
    #[arg(long, alias = "amortization")]
    pub amortization_years: Option<Decimal>,

    /// Years until the remaining balance comes due
    #[arg(long, alias = "due")]
    pub balloon_due_years: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_balloon(args: BalloonArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let balloon_input: BalloonLoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BalloonLoanInput {
            principal: args.principal.ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args
                .annual_rate_pct
                .ok_or("--annual-rate-pct is required (or provide --input)")?,
            amortization_years: args
                .amortization_years
                .ok_or("--amortization-years is required (or provide --input)")?,
            balloon_due_years: args
                .balloon_due_years
                .ok_or("--balloon-due-years is required (or provide --input)")?,
        }
    };

    let result = loan::calculate_balloon_loan(&balloon_input)?;
    Ok(serde_json::to_value(result)?)
}
