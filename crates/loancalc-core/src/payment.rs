use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, Rate, Years};
use crate::LoanCalcResult;

/// Payment periods per year. All loans amortize monthly.
pub const PERIODS_PER_YEAR: u32 = 12;

/// Longest supported term: 1,000 years of monthly periods. Bounds every
/// schedule walk and row allocation.
pub const MAX_PERIODS: u32 = 12_000;

const HUNDRED: Decimal = dec!(100);

/// Convert a nominal annual rate quoted as a percentage (8.5 = 8.5%) into
/// the monthly periodic rate used for amortization.
pub fn periodic_rate(annual_rate_pct: Rate) -> Rate {
    annual_rate_pct / HUNDRED / Decimal::from(PERIODS_PER_YEAR)
}

/// Number of monthly periods in a term, rounded to the nearest whole
/// period. Terms beyond `MAX_PERIODS` months are rejected; `field` names
/// the offending input in the error.
pub fn period_count(years: Years, field: &str) -> LoanCalcResult<u32> {
    let periods = years
        .checked_mul(Decimal::from(PERIODS_PER_YEAR))
        .map(|p| p.round())
        .and_then(|p| p.to_u32())
        .ok_or_else(|| LoanCalcError::InvalidInput {
            field: field.into(),
            reason: format!("Term of {years} years does not yield a usable period count"),
        })?;
    if periods > MAX_PERIODS {
        return Err(LoanCalcError::InvalidInput {
            field: field.into(),
            reason: format!("Term of {years} years exceeds the supported maximum of 1,000 years"),
        });
    }
    Ok(periods)
}

/// Compound growth factor (1 + r)^n.
///
/// Fails with `Overflow` when the factor exceeds the representable
/// decimal range (extreme rates or very long terms).
pub fn compound_factor(rate: Rate, periods: u32) -> LoanCalcResult<Decimal> {
    Decimal::ONE
        .checked_add(rate)
        .and_then(|base| base.checked_powi(periods as i64))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: format!("compound factor over {periods} periods"),
        })
}

/// Level payment that fully amortizes `principal` over `periods` at the
/// given periodic rate.
///
/// Zero-rate loans repay the principal in equal installments; otherwise the
/// standard fixed-payment formula applies:
/// `P * r * (1+r)^n / ((1+r)^n - 1)`.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> LoanCalcResult<Money> {
    if periods == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound_factor(rate, periods)?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "level payment annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "level payment".into(),
        })
}

/// Balance outstanding after `periods_paid` level payments of `payment`.
///
/// Closed form: `P * (1+r)^k - payment * ((1+r)^k - 1) / r`; at zero rate
/// the balance declines linearly. Clamped at zero so representation dust
/// never reports a negative balance.
pub fn outstanding_balance(
    principal: Money,
    rate: Rate,
    payment: Money,
    periods_paid: u32,
) -> LoanCalcResult<Money> {
    let balance = if rate.is_zero() {
        payment
            .checked_mul(Decimal::from(periods_paid))
            .map(|repaid| principal - repaid)
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "repaid principal".into(),
            })?
    } else {
        let factor = compound_factor(rate, periods_paid)?;
        principal
            .checked_mul(factor)
            .and_then(|grown| {
                payment
                    .checked_mul(factor - Decimal::ONE)
                    .and_then(|v| v.checked_div(rate))
                    .map(|repaid| grown - repaid)
            })
            .ok_or_else(|| LoanCalcError::Overflow {
                context: "outstanding balance".into(),
            })?
    };
    Ok(balance.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_periodic_rate_conversion() {
        // 8.5% annual => 0.0070833... monthly
        let r = periodic_rate(dec!(8.5));
        assert!((r - dec!(0.00708333333)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_period_count_whole_years() {
        assert_eq!(period_count(dec!(20), "term_years").unwrap(), 240);
        assert_eq!(period_count(dec!(1), "term_years").unwrap(), 12);
    }

    #[test]
    fn test_period_count_fractional_years() {
        // 2.5 years => 30 whole periods
        assert_eq!(period_count(dec!(2.5), "term_years").unwrap(), 30);
    }

    #[test]
    fn test_period_count_overflow_rejected() {
        assert!(period_count(dec!(1_000_000_000_000), "term_years").is_err());
    }

    #[test]
    fn test_period_count_beyond_maximum_rejected() {
        // The millennium boundary itself is accepted.
        assert_eq!(period_count(dec!(1000), "term_years").unwrap(), 12_000);

        let err = period_count(dec!(1001), "amortization_years").unwrap_err();
        match err {
            LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "amortization_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_compound_factor_overflow_typed() {
        assert_eq!(compound_factor(Decimal::ZERO, 12_000).unwrap(), Decimal::ONE);
        // 1.5^200 is far past the decimal range.
        assert!(matches!(
            compound_factor(dec!(0.5), 200).unwrap_err(),
            LoanCalcError::Overflow { .. }
        ));
    }

    #[test]
    fn test_level_payment_textbook() {
        // 100,000 at 1% monthly over 360 periods => 1,028.61 (standard
        // 30-year mortgage reference value)
        let pmt = level_payment(dec!(100_000), dec!(0.01), 360).unwrap();
        assert!(
            (pmt - dec!(1028.61)).abs() < dec!(0.01),
            "expected ~1028.61, got {pmt}"
        );
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let pmt = level_payment(dec!(120_000), Decimal::ZERO, 120).unwrap();
        assert_eq!(pmt, dec!(1000));
    }

    #[test]
    fn test_level_payment_zero_periods_rejected() {
        assert!(level_payment(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_level_payment_overflow_typed() {
        // 1000% annual: the compound factor alone exceeds the range.
        let r = periodic_rate(dec!(1000));
        assert!(matches!(
            level_payment(dec!(100_000), r, 120).unwrap_err(),
            LoanCalcError::Overflow { .. }
        ));
    }

    #[test]
    fn test_outstanding_balance_start_and_end() {
        let pmt = level_payment(dec!(100_000), dec!(0.01), 360).unwrap();
        // Nothing paid yet: full principal outstanding.
        assert_eq!(
            outstanding_balance(dec!(100_000), dec!(0.01), pmt, 0).unwrap(),
            dec!(100_000)
        );
        // After the full term the balance is repaid (dust clamps to zero).
        let end = outstanding_balance(dec!(100_000), dec!(0.01), pmt, 360).unwrap();
        assert!(end < dec!(0.01), "expected ~0, got {end}");
    }

    #[test]
    fn test_outstanding_balance_zero_rate_linear() {
        let balance = outstanding_balance(dec!(120_000), Decimal::ZERO, dec!(1000), 36).unwrap();
        assert_eq!(balance, dec!(84_000));
    }
}
