//! Loan EMI analytics: level payment, aggregate totals, and accelerated
//! payoff when extra payments are applied to principal.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Loan parameters as collected by the calculator pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Loan amount.
    pub principal: Money,
    /// Nominal annual interest rate as a percentage (e.g. 8.5 for 8.5%).
    pub annual_rate_pct: Rate,
    /// Loan duration in years. Fractional terms are allowed.
    pub term_years: Years,
    /// Additional amount applied to principal each month.
    #[serde(default)]
    pub extra_payment: Money,
}

/// Derived loan figures for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOutput {
    /// Standard fully-amortizing monthly payment, ignoring extra payments.
    pub monthly_payment: Money,
    /// Sum of all payments actually made, including any acceleration.
    pub total_payment: Money,
    /// `total_payment - principal`.
    pub total_interest: Money,
    /// Months until the balance reaches zero.
    pub payoff_months: u32,
    /// Interest avoided through extra payments (0 without them).
    pub interest_saved: Money,
    /// Scheduled term minus actual payoff time (0 without extra payments).
    pub months_saved: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the monthly payment and payoff profile of an amortizing loan.
///
/// Payment: `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` at zero rate.
/// With an extra payment the payoff is simulated month by month: interest
/// accrues on the outstanding balance, the payment is applied interest
/// first, and the final payment is clamped to settle the balance exactly.
///
/// Inputs are coerced before use (absolute value; term at least one year);
/// a principal of zero after coercion fails with `InvalidInput` rather
/// than producing NaN-style garbage.
pub fn calculate_loan(input: &LoanInput) -> LoanCalcResult<ComputationOutput<LoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = sanitize(input, &mut warnings);
    validate(&loan)?;

    let n = payment::period_count(loan.term_years, "term_years")?;
    if n == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must cover at least one payment period".into(),
        });
    }

    let rate = payment::periodic_rate(loan.annual_rate_pct);
    let monthly_payment = payment::level_payment(loan.principal, rate, n)?;

    rate_plausibility_warnings(loan.annual_rate_pct, &mut warnings);
    if loan.extra_payment > monthly_payment {
        warnings.push(format!(
            "Extra payment of {} exceeds the scheduled payment of {}",
            loan.extra_payment, monthly_payment
        ));
    }

    // Baseline totals without extra payments. A zero-rate loan repays
    // exactly the principal; computing it as payment * n would leave
    // representation dust from the payment division.
    let baseline_total = if rate.is_zero() {
        loan.principal
    } else {
        monthly_payment
            .checked_mul(Decimal::from(n))
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "scheduled total payment".into(),
            })?
    };
    let baseline_interest = baseline_total - loan.principal;

    let output = if loan.extra_payment > Decimal::ZERO {
        let payoff = simulate_payoff(loan.principal, rate, monthly_payment, loan.extra_payment, n)?;
        let total_interest = payoff.total_payment - loan.principal;
        LoanOutput {
            monthly_payment,
            total_payment: payoff.total_payment,
            total_interest,
            payoff_months: payoff.months,
            interest_saved: baseline_interest - total_interest,
            months_saved: n - payoff.months,
        }
    } else {
        LoanOutput {
            monthly_payment,
            total_payment: baseline_total,
            total_interest: baseline_interest,
            payoff_months: n,
            interest_saved: Decimal::ZERO,
            months_saved: 0,
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization with extra-payment acceleration",
        &loan,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Coerce raw page inputs into usable values: negatives become absolute
/// values and the term is clamped to a minimum of one year.
pub(crate) fn sanitize(input: &LoanInput, warnings: &mut Vec<String>) -> LoanInput {
    let sanitized = LoanInput {
        principal: input.principal.abs(),
        annual_rate_pct: input.annual_rate_pct.abs(),
        term_years: input.term_years.abs().max(Decimal::ONE),
        extra_payment: input.extra_payment.abs(),
    };
    if sanitized != *input {
        warnings.push(
            "Inputs coerced: negative values replaced by absolute values and term clamped to at least 1 year"
                .into(),
        );
    }
    sanitized
}

pub(crate) fn validate(loan: &LoanInput) -> LoanCalcResult<()> {
    if loan.principal <= Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    Ok(())
}

pub(crate) fn rate_plausibility_warnings(annual_rate_pct: Rate, warnings: &mut Vec<String>) {
    if annual_rate_pct > dec!(30) {
        warnings.push(format!(
            "Annual rate of {annual_rate_pct}% is unusually high; verify the input"
        ));
    } else if annual_rate_pct > Decimal::ZERO && annual_rate_pct < Decimal::ONE {
        warnings.push(format!(
            "Annual rate of {annual_rate_pct}% is below 1%; confirm the rate is quoted as a percentage, not a fraction"
        ));
    }
}

struct PayoffSummary {
    months: u32,
    total_payment: Money,
}

/// Walk the schedule month by month applying `monthly_payment + extra`.
/// Interest accrues first; the final payment is clamped to `balance +
/// interest`, no later than month `n` (the contractual end of the loan).
fn simulate_payoff(
    principal: Money,
    rate: Rate,
    monthly_payment: Money,
    extra: Money,
    n: u32,
) -> LoanCalcResult<PayoffSummary> {
    let scheduled = monthly_payment
        .checked_add(extra)
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "scheduled payment".into(),
        })?;
    let mut balance = principal;
    let mut total_payment = Decimal::ZERO;
    let mut months = 0;

    for month in 1..=n {
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "accrued interest".into(),
            })?;
        let due = balance
            .checked_add(interest)
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "balance due".into(),
            })?;
        let paid = if month == n || scheduled >= due {
            due
        } else {
            scheduled
        };
        balance = due - paid;
        total_payment = total_payment
            .checked_add(paid)
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "accumulated payments".into(),
            })?;
        months = month;
        if balance <= Decimal::ZERO {
            break;
        }
    }

    Ok(PayoffSummary {
        months,
        total_payment,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
