use npl_workout_core::dividend::{
    analyze_dividend, cap_applied_dividend, caps_from_sentinel, distributable_after_sale,
    distributable_after_senior, dividend_recoverable, DividendInput,
};
use npl_workout_core::recovery::{recovery_rate, risk_tier, RiskTier};
use npl_workout_core::senior_rights::{aggregate, SeniorRightsEntry, SeniorRightsInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn entry(dd: Decimal) -> SeniorRightsEntry {
    SeniorRightsEntry {
        dd_amount: dd,
        reflected_amount: None,
        note: None,
    }
}

// ===========================================================================
// Cap engine primitives
// ===========================================================================

#[test]
fn test_cap_engine_zero_floor() {
    assert_eq!(cap_applied_dividend(dec!(0), &[Some(dec!(1))]), dec!(0));
    assert_eq!(
        cap_applied_dividend(dec!(-250_000), &[Some(dec!(1))]),
        dec!(0)
    );
}

#[test]
fn test_all_unset_caps_pass_distributable_through() {
    let caps = caps_from_sentinel(&[dec!(0), dec!(0), dec!(0)]);
    assert_eq!(
        cap_applied_dividend(dec!(397_097_000), &caps),
        dec!(397_097_000)
    );
}

#[test]
fn test_single_positive_cap_is_min() {
    for x in [dec!(1), dec!(150_000_000), dec!(999_999_999)] {
        let expected = x.min(dec!(150_000_000));
        assert_eq!(cap_applied_dividend(x, &[Some(dec!(150_000_000))]), expected);
    }
}

#[test]
fn test_monotone_in_distributable_for_fixed_caps() {
    let caps = caps_from_sentinel(&[dec!(200_000), dec!(0), dec!(500_000)]);
    let inputs = [
        dec!(-10),
        dec!(0),
        dec!(100_000),
        dec!(200_000),
        dec!(300_000),
        dec!(1_000_000),
    ];
    let mut prev = Decimal::MIN;
    for d in inputs {
        let out = cap_applied_dividend(d, &caps);
        assert!(out >= prev, "not monotone at {d}");
        prev = out;
    }
}

// ===========================================================================
// End-to-end waterfall
// ===========================================================================

#[test]
fn test_waterfall_500m_reference_scenario() {
    // Winning bid 500M; fees from the sale commission table; 100M of
    // senior claims; only the loan cap (150M) is set.
    let input = DividendInput {
        winning_bid: dec!(500_000_000),
        auction_fees: None,
        senior_rights_total: dec!(100_000_000),
        loan_cap: Some(dec!(150_000_000)),
        secondary_loan_cap: None,
        mortgage_cap: None,
        prepaid_fee_recovery: dec!(0),
        reference_cap: None,
    };
    let out = analyze_dividend(&input).unwrap().result;

    assert_eq!(out.auction_fees, dec!(2_903_000));
    assert_eq!(out.distributable_after_sale, dec!(497_097_000));
    assert_eq!(out.distributable_after_senior, dec!(397_097_000));
    assert_eq!(out.cap_applied_dividend, dec!(150_000_000));
    assert_eq!(out.binding_cap.as_deref(), Some("loan_cap"));
    assert_eq!(out.dividend_recoverable, dec!(150_000_000));
    // Reference cap defaults to the loan cap, which the dividend hits
    assert_eq!(out.recovery_rate, dec!(100));
    assert_eq!(out.risk_tier, RiskTier::Low);
}

#[test]
fn test_waterfall_senior_claims_exceed_proceeds() {
    let input = DividendInput {
        winning_bid: dec!(100_000_000),
        auction_fees: Some(dec!(3_000_000)),
        senior_rights_total: dec!(200_000_000),
        loan_cap: Some(dec!(50_000_000)),
        secondary_loan_cap: None,
        mortgage_cap: None,
        prepaid_fee_recovery: dec!(1_500_000),
        reference_cap: None,
    };
    let envelope = analyze_dividend(&input).unwrap();
    let out = &envelope.result;

    assert_eq!(out.distributable_after_sale, dec!(97_000_000));
    // Goes negative and stays negative in the intermediate figure
    assert_eq!(out.distributable_after_senior, dec!(-103_000_000));
    assert_eq!(out.cap_applied_dividend, dec!(0));
    // Prepaid fee recovery survives even a zero dividend
    assert_eq!(out.dividend_recoverable, dec!(1_500_000));
    assert_eq!(out.recovery_rate, dec!(0));
    assert_eq!(out.risk_tier, RiskTier::High);
    assert!(!envelope.warnings.is_empty());
}

#[test]
fn test_waterfall_smallest_cap_binds() {
    let input = DividendInput {
        winning_bid: dec!(800_000_000),
        auction_fees: Some(dec!(10_000_000)),
        senior_rights_total: dec!(40_000_000),
        loan_cap: Some(dec!(600_000_000)),
        secondary_loan_cap: Some(dec!(450_000_000)),
        mortgage_cap: Some(dec!(520_000_000)),
        prepaid_fee_recovery: dec!(0),
        reference_cap: Some(dec!(600_000_000)),
    };
    let out = analyze_dividend(&input).unwrap().result;

    assert_eq!(out.distributable_after_senior, dec!(750_000_000));
    assert_eq!(out.cap_applied_dividend, dec!(450_000_000));
    assert_eq!(out.binding_cap.as_deref(), Some("secondary_loan_cap"));
    assert_eq!(out.recovery_rate, dec!(75));
    assert_eq!(out.risk_tier, RiskTier::Medium);
}

#[test]
fn test_waterfall_without_reference_cap_reads_full_recovery() {
    let input = DividendInput {
        winning_bid: dec!(300_000_000),
        auction_fees: Some(dec!(5_000_000)),
        senior_rights_total: dec!(0),
        loan_cap: None,
        secondary_loan_cap: None,
        mortgage_cap: None,
        prepaid_fee_recovery: dec!(0),
        reference_cap: None,
    };
    let out = analyze_dividend(&input).unwrap().result;
    assert_eq!(out.cap_applied_dividend, dec!(295_000_000));
    assert!(out.binding_cap.is_none());
    assert_eq!(out.recovery_rate, dec!(100));
}

// ===========================================================================
// Senior rights feeding the waterfall
// ===========================================================================

#[test]
fn test_senior_totals_flow_into_waterfall() {
    let rights = SeniorRightsInput {
        small_deposit: entry(dec!(55_000_000)),
        lease_deposit: entry(dec!(30_000_000)),
        wage_claim: entry(dec!(10_000_000)),
        current_tax: entry(dec!(4_000_000)),
        senior_tax: entry(dec!(1_000_000)),
        other: entry(dec!(0)),
    };
    let totals = aggregate(&rights).unwrap().result;
    assert_eq!(totals.total_reflected, dec!(100_000_000));

    let waterfall = analyze_dividend(&DividendInput {
        winning_bid: dec!(500_000_000),
        auction_fees: None,
        senior_rights_total: totals.total_reflected,
        loan_cap: Some(dec!(150_000_000)),
        secondary_loan_cap: None,
        mortgage_cap: None,
        prepaid_fee_recovery: dec!(0),
        reference_cap: None,
    })
    .unwrap()
    .result;
    assert_eq!(waterfall.cap_applied_dividend, dec!(150_000_000));
}

// ===========================================================================
// Recovery rate and tiers
// ===========================================================================

#[test]
fn test_recovery_rate_reference_cases() {
    let rate_zero = recovery_rate(dec!(0), dec!(100));
    assert_eq!(rate_zero, dec!(0));
    assert_eq!(risk_tier(rate_zero), RiskTier::High);

    let rate_ninety = recovery_rate(dec!(90), dec!(100));
    assert_eq!(rate_ninety, dec!(90));
    assert_eq!(risk_tier(rate_ninety), RiskTier::Low);
}

#[test]
fn test_primitive_chain_matches_pipeline() {
    let after_sale = distributable_after_sale(dec!(500_000_000), dec!(2_903_000));
    let after_senior = distributable_after_senior(after_sale, dec!(100_000_000));
    let dividend = cap_applied_dividend(after_senior, &[Some(dec!(150_000_000))]);
    let recoverable = dividend_recoverable(dividend, dec!(0));
    assert_eq!(recoverable, dec!(150_000_000));
}
