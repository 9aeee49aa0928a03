//! Balloon loan analytics: payments sized on a long amortization
//! schedule with the remaining balance due as a lump sum at an earlier
//! maturity.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::loan::rate_plausibility_warnings;
use crate::error::LoanCalcError;
use crate::payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalloonLoanInput {
    /// Loan amount.
    pub principal: Money,
    /// Nominal annual interest rate as a percentage.
    pub annual_rate_pct: Rate,
    /// Amortization period used to size the monthly payment.
    pub amortization_years: Years,
    /// When the remaining balance comes due. Must be shorter than the
    /// amortization period.
    pub balloon_due_years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalloonLoanOutput {
    /// Payment sized as if the loan amortized over the full period.
    pub monthly_payment: Money,
    /// Balance outstanding when the loan matures.
    pub balloon_payment: Money,
    pub months_to_balloon: u32,
    /// Monthly payments made plus the balloon payment.
    pub total_payment: Money,
    /// `total_payment - principal`.
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the payment profile of a balloon loan.
///
/// The monthly payment uses the standard level-payment formula over the
/// amortization period; the balloon payment is the closed-form balance
/// outstanding after the payments made before maturity.
pub fn calculate_balloon_loan(
    input: &BalloonLoanInput,
) -> LoanCalcResult<ComputationOutput<BalloonLoanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = sanitize(input, &mut warnings);
    validate(&loan)?;

    let amort_n = payment::period_count(loan.amortization_years, "amortization_years")?;
    let due_n = payment::period_count(loan.balloon_due_years, "balloon_due_years")?;
    if amort_n == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "amortization_years".into(),
            reason: "Amortization period must cover at least one payment period".into(),
        });
    }
    if due_n == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "balloon_due_years".into(),
            reason: "Balloon maturity must cover at least one payment period".into(),
        });
    }
    if due_n >= amort_n {
        return Err(LoanCalcError::InvalidInput {
            field: "balloon_due_years".into(),
            reason: "Balloon maturity must fall before the end of the amortization period".into(),
        });
    }

    let rate = payment::periodic_rate(loan.annual_rate_pct);
    let monthly_payment = payment::level_payment(loan.principal, rate, amort_n)?;
    let balloon_payment =
        payment::outstanding_balance(loan.principal, rate, monthly_payment, due_n)?;
    rate_plausibility_warnings(loan.annual_rate_pct, &mut warnings);

    if balloon_payment > loan.principal * dec!(0.95) {
        warnings.push(
            "Balloon payment exceeds 95% of the principal; the loan barely amortizes before maturity"
                .into(),
        );
    }

    let total_payment = monthly_payment
        .checked_mul(Decimal::from(due_n))
        .and_then(|paid| paid.checked_add(balloon_payment))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "total payment through maturity".into(),
        })?;
    let output = BalloonLoanOutput {
        monthly_payment,
        balloon_payment,
        months_to_balloon: due_n,
        total_payment,
        total_interest: total_payment - loan.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level payment over the amortization period, closed-form balance at maturity",
        &loan,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn sanitize(input: &BalloonLoanInput, warnings: &mut Vec<String>) -> BalloonLoanInput {
    let sanitized = BalloonLoanInput {
        principal: input.principal.abs(),
        annual_rate_pct: input.annual_rate_pct.abs(),
        amortization_years: input.amortization_years.abs().max(Decimal::ONE),
        balloon_due_years: input.balloon_due_years.abs(),
    };
    if sanitized != *input {
        warnings.push(
            "Inputs coerced: negative values replaced by absolute values and amortization clamped to at least 1 year"
                .into(),
        );
    }
    sanitized
}

fn validate(loan: &BalloonLoanInput) -> LoanCalcResult<()> {
    if loan.principal <= Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
