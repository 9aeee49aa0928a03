use loancalc_core::amortization::schedule;
use loancalc_core::balloon::loan::{calculate_balloon_loan, BalloonLoanInput};
use loancalc_core::LoanCalcError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_balloon_input() -> BalloonLoanInput {
    BalloonLoanInput {
        principal: dec!(500_000),
        annual_rate_pct: dec!(7),
        amortization_years: dec!(30),
        balloon_due_years: dec!(7),
    }
}

// ===========================================================================
// Balloon payment tests
// ===========================================================================

#[test]
fn test_balloon_commercial_mortgage_reference() {
    // 500,000 at 7% on a 30-year amortization, due in 7 years.
    // Payment = 3,326.51; roughly 456k still outstanding at maturity.
    let result = calculate_balloon_loan(&sample_balloon_input()).unwrap();
    let out = &result.result;

    assert!(
        (out.monthly_payment - dec!(3326.51)).abs() < dec!(0.01),
        "Expected payment ~3,326.51, got {}",
        out.monthly_payment
    );
    assert_eq!(out.months_to_balloon, 84);
    assert!(out.balloon_payment > dec!(440_000));
    assert!(out.balloon_payment < dec!(470_000));
    assert_eq!(out.total_interest, out.total_payment - dec!(500_000));
}

#[test]
fn test_balloon_zero_rate_exact() {
    // At 0% the balance declines linearly: 120,000 over 10 years pays
    // 1,000/month, so 84,000 remains after 3 years.
    let input = BalloonLoanInput {
        principal: dec!(120_000),
        annual_rate_pct: Decimal::ZERO,
        amortization_years: dec!(10),
        balloon_due_years: dec!(3),
    };
    let out = calculate_balloon_loan(&input).unwrap().result;

    assert_eq!(out.monthly_payment, dec!(1_000));
    assert_eq!(out.balloon_payment, dec!(84_000));
    assert_eq!(out.total_payment, dec!(120_000));
    assert_eq!(out.total_interest, Decimal::ZERO);
}

#[test]
fn test_balloon_matches_schedule_balance_at_maturity() {
    // The closed-form balance must agree with the simulated schedule.
    let balloon = calculate_balloon_loan(&sample_balloon_input()).unwrap().result;
    let sched = schedule::build_schedule(&loancalc_core::amortization::LoanInput {
        principal: dec!(500_000),
        annual_rate_pct: dec!(7),
        term_years: dec!(30),
        extra_payment: Decimal::ZERO,
    })
    .unwrap()
    .result;

    let at_maturity = &sched.rows[83];
    assert_eq!(at_maturity.month, 84);
    assert!(
        (balloon.balloon_payment - at_maturity.closing_balance).abs() < dec!(0.01),
        "Closed form {} vs schedule {}",
        balloon.balloon_payment,
        at_maturity.closing_balance
    );
}

#[test]
fn test_balloon_shrinks_with_later_maturity() {
    let mut previous = dec!(500_000);
    for due in [dec!(3), dec!(7), dec!(15), dec!(25)] {
        let mut input = sample_balloon_input();
        input.balloon_due_years = due;
        let out = calculate_balloon_loan(&input).unwrap().result;
        assert!(
            out.balloon_payment < previous,
            "Balloon at {due} years ({}) should be below {previous}",
            out.balloon_payment
        );
        previous = out.balloon_payment;
    }
}

// ===========================================================================
// Validation tests
// ===========================================================================

#[test]
fn test_balloon_maturity_at_amortization_end_rejected() {
    let mut input = sample_balloon_input();
    input.balloon_due_years = dec!(30);
    let err = calculate_balloon_loan(&input).unwrap_err();
    match err {
        LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "balloon_due_years"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_balloon_maturity_past_amortization_rejected() {
    let mut input = sample_balloon_input();
    input.balloon_due_years = dec!(40);
    assert!(calculate_balloon_loan(&input).is_err());
}

#[test]
fn test_balloon_zero_principal_rejected() {
    let mut input = sample_balloon_input();
    input.principal = Decimal::ZERO;
    assert!(calculate_balloon_loan(&input).is_err());
}

#[test]
fn test_balloon_negative_inputs_coerced() {
    let negated = BalloonLoanInput {
        principal: dec!(-500_000),
        annual_rate_pct: dec!(-7),
        amortization_years: dec!(-30),
        balloon_due_years: dec!(-7),
    };
    let coerced = calculate_balloon_loan(&negated).unwrap();
    let baseline = calculate_balloon_loan(&sample_balloon_input()).unwrap();

    assert_eq!(coerced.result, baseline.result);
    assert!(!coerced.warnings.is_empty());
}

#[test]
fn test_balloon_extreme_rate_returns_typed_error() {
    // Compounding 1000% over a 30-year amortization overflows; the
    // failure must surface as an Err, not a panic.
    let mut input = sample_balloon_input();
    input.annual_rate_pct = dec!(1_000);
    assert!(matches!(
        calculate_balloon_loan(&input).unwrap_err(),
        LoanCalcError::Overflow { .. }
    ));
}

#[test]
fn test_balloon_amortization_over_supported_maximum_rejected() {
    let mut input = sample_balloon_input();
    input.amortization_years = dec!(2_000);
    let err = calculate_balloon_loan(&input).unwrap_err();
    match err {
        LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "amortization_years"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}
