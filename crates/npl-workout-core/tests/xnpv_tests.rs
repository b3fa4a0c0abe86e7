use chrono::NaiveDate;
use npl_workout_core::types::CashFlow;
use npl_workout_core::xnpv::{
    analyze_cash_flows, sensitivity_analysis, xirr, xnpv, InvestmentOpinion, XnpvAnalysisInput,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn inflow(date: NaiveDate, amount: Decimal, scenario: u32) -> CashFlow {
    CashFlow {
        date,
        inflow: amount,
        outflow: dec!(0),
        category: None,
        scenario,
    }
}

fn outflow(date: NaiveDate, amount: Decimal, scenario: u32) -> CashFlow {
    CashFlow {
        date,
        inflow: dec!(0),
        outflow: amount,
        category: None,
        scenario,
    }
}

/// Standard purchase-then-recover shape used across the tests:
/// 1B out on day 0, 600M in on day 180, 600M in on day 365.
fn investment_shape() -> Vec<CashFlow> {
    vec![
        outflow(d(2025, 1, 1), dec!(1_000_000_000), 1),
        inflow(d(2025, 6, 30), dec!(600_000_000), 1),
        inflow(d(2026, 1, 1), dec!(600_000_000), 1),
    ]
}

#[test]
fn test_actual_365_discounting_reference_case() {
    // PV = -1B + 600M / 1.08^(180/365) + 600M / 1.08^(365/365)
    //    = -1B + 577,654,231 + 555,555,556 (to the nearest unit)
    let pv = xnpv(&investment_shape(), dec!(0.08), None).unwrap();
    let expected = dec!(133_209_787);
    assert!(
        (pv - expected).abs() < dec!(5_000),
        "expected ~{expected}, got {pv}"
    );
}

#[test]
fn test_zero_rate_is_plain_sum() {
    let pv = xnpv(&investment_shape(), dec!(0), None).unwrap();
    assert_eq!(pv, dec!(200_000_000));
}

#[test]
fn test_strictly_decreasing_in_rate_for_investment_shape() {
    let flows = investment_shape();
    let rates = [dec!(0.01), dec!(0.04), dec!(0.08), dec!(0.12), dec!(0.20)];
    let mut prev = Decimal::MAX;
    for rate in rates {
        let pv = xnpv(&flows, rate, None).unwrap();
        assert!(pv < prev, "xnpv not strictly decreasing at rate {rate}");
        prev = pv;
    }
}

#[test]
fn test_as_of_defaults_to_earliest_flow() {
    let flows = investment_shape();
    let explicit = xnpv(&flows, dec!(0.08), Some(d(2025, 1, 1))).unwrap();
    let defaulted = xnpv(&flows, dec!(0.08), None).unwrap();
    assert_eq!(explicit, defaulted);
}

#[test]
fn test_sensitivity_sweep_is_inclusive_and_scenario_scoped() {
    let mut flows = investment_shape();
    // Flows in another scenario must not leak into the sweep
    flows.push(inflow(d(2025, 3, 1), dec!(999_999_999), 2));

    let points = sensitivity_analysis(&flows, dec!(0.02), dec!(0.10), dec!(0.02), 1).unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0].rate, dec!(0.02));
    assert_eq!(points[4].rate, dec!(0.10));

    // Each point equals a direct evaluation over the scenario-1 flows
    let direct = xnpv(&investment_shape(), dec!(0.06), None).unwrap();
    assert_eq!(points[2].xnpv, direct);

    // Sweep over the decoy scenario sees only the single inflow
    let decoy = sensitivity_analysis(&flows, dec!(0.05), dec!(0.05), dec!(0.01), 2).unwrap();
    assert_eq!(decoy.len(), 1);
    assert_eq!(decoy[0].xnpv, dec!(999_999_999));
}

#[test]
fn test_xirr_one_year_round_trip() {
    let flows = vec![
        outflow(d(2025, 1, 1), dec!(1_000), 1),
        inflow(d(2026, 1, 1), dec!(1_100), 1),
    ];
    let rate = xirr(&flows, dec!(0.05)).unwrap();
    assert!((rate - dec!(0.10)).abs() < dec!(0.0001), "got {rate}");
}

#[test]
fn test_xirr_needs_two_flows() {
    let flows = vec![inflow(d(2025, 1, 1), dec!(1_000), 1)];
    assert!(xirr(&flows, dec!(0.1)).is_err());
}

#[test]
fn test_scenario_summary() {
    let input = XnpvAnalysisInput {
        cash_flows: investment_shape(),
        discount_rate: dec!(0.08),
        scenario: 1,
        as_of: None,
    };
    let out = analyze_cash_flows(&input).unwrap().result;

    assert_eq!(out.total_inflow, dec!(1_200_000_000));
    assert_eq!(out.total_outflow, dec!(1_000_000_000));
    assert_eq!(out.total_net, dec!(200_000_000));
    assert!(out.xnpv > dec!(0));
    assert!(out.xirr.is_some());
    // xnpv / |net| = ~133M / 200M > 0.1
    assert_eq!(out.opinion, InvestmentOpinion::Recommended);
}

#[test]
fn test_summary_flags_empty_scenario() {
    let input = XnpvAnalysisInput {
        cash_flows: investment_shape(),
        discount_rate: dec!(0.08),
        scenario: 7,
        as_of: None,
    };
    let envelope = analyze_cash_flows(&input).unwrap();
    assert!(!envelope.warnings.is_empty());
    assert_eq!(envelope.result.xnpv, dec!(0));
    assert_eq!(envelope.result.opinion, InvestmentOpinion::NotRecommended);
}
