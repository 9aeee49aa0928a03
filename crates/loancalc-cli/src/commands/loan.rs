use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loancalc_core::amortization::loan::{self, LoanInput};
use loancalc_core::amortization::schedule;

use crate::input;

/// Arguments for the loan payment calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 8.5 for 8.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Loan duration in years (fractional terms allowed)
    #[arg(long, alias = "years")]
    pub term_years: Option<Decimal>,

    /// Extra amount applied to principal each month
    #[arg(long, alias = "extra")]
    pub extra_payment: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the amortization schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 8.5 for 8.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Loan duration in years (fractional terms allowed)
    #[arg(long, alias = "years")]
    pub term_years: Option<Decimal>,

    /// Extra amount applied to principal each month
    #[arg(long, alias = "extra")]
    pub extra_payment: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan_input(
        args.input.as_deref(),
        args.principal,
        args.annual_rate_pct,
        args.term_years,
        args.extra_payment,
    )?;
    let result = loan::calculate_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan_input(
        args.input.as_deref(),
        args.principal,
        args.annual_rate_pct,
        args.term_years,
        args.extra_payment,
    )?;
    let result = schedule::build_schedule(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Resolve loan parameters with file input taking precedence over piped
/// stdin, which takes precedence over individual flags.
fn resolve_loan_input(
    input_path: Option<&str>,
    principal: Option<Decimal>,
    annual_rate_pct: Option<Decimal>,
    term_years: Option<Decimal>,
    extra_payment: Option<Decimal>,
) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(path) = input_path {
        return input::file::read_input(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(LoanInput {
        principal: principal.ok_or("--principal is required (or provide --input)")?,
        annual_rate_pct: annual_rate_pct
            .ok_or("--annual-rate-pct is required (or provide --input)")?,
        term_years: term_years.ok_or("--term-years is required (or provide --input)")?,
        extra_payment: extra_payment.unwrap_or(Decimal::ZERO),
    })
}
