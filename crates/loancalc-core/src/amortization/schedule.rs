//! Month-by-month amortization schedule for a level-payment loan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::loan::{rate_plausibility_warnings, sanitize, validate, LoanInput};
use crate::error::LoanCalcError;
use crate::payment;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub opening_balance: Money,
    /// Amount paid this month, including any extra payment.
    pub payment: Money,
    pub interest: Money,
    /// Principal retired this month.
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub rows: Vec<ScheduleRow>,
    /// Sum of the payment column.
    pub total_payment: Money,
    /// Sum of the interest column.
    pub total_interest: Money,
    /// Number of rows; the month the balance reaches zero.
    pub payoff_months: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full repayment schedule for a loan.
///
/// Each row applies the payment interest first and retires the remainder
/// of principal. The final payment is clamped so the closing balance of
/// the last row is exactly zero. With an extra payment the schedule is
/// shorter than the contractual term.
pub fn build_schedule(input: &LoanInput) -> LoanCalcResult<ComputationOutput<ScheduleOutput>> {
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

    let scheduled = monthly_payment
        .checked_add(loan.extra_payment)
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "scheduled payment".into(),
        })?;
    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = loan.principal;
    let mut total_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=n {
        let opening_balance = balance;
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

        rows.push(ScheduleRow {
            month,
            opening_balance,
            payment: paid,
            interest,
            principal: paid - interest,
            closing_balance: balance,
        });
        total_payment = total_payment
            .checked_add(paid)
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "accumulated payments".into(),
            })?;
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "accumulated interest".into(),
            })?;

        if balance <= Decimal::ZERO {
            break;
        }
    }

    let payoff_months = rows.len() as u32;
    let output = ScheduleOutput {
        rows,
        total_payment,
        total_interest,
        payoff_months,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Month-by-month amortization, interest accrued on the outstanding balance",
        &loan,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
