//! XNPV engine: present value of irregularly dated recovery cash flows
//! under Actual/365 discounting, plus the discount-rate sensitivity
//! sweep and XIRR used on the comparison screen.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WorkoutError;
use crate::types::{with_metadata, CashFlow, ComputationOutput, Money, Rate};
use crate::WorkoutResult;

const DAYS_PER_YEAR: Decimal = dec!(365);
const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const MAX_XIRR_ITERATIONS: u32 = 100;

/// Present value of the flows at `annual_rate`, discounted on exact day
/// counts (Actual/365), rounded to 2 decimal places.
///
/// `as_of` defaults to the earliest flow date. Flows dated before
/// `as_of` get a negative exponent; the formula is applied uniformly,
/// they are not compounded separately. An empty flow list values to
/// zero.
pub fn xnpv(
    flows: &[CashFlow],
    annual_rate: Rate,
    as_of: Option<NaiveDate>,
) -> WorkoutResult<Money> {
    if annual_rate <= dec!(-1) {
        return Err(WorkoutError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }
    if flows.is_empty() {
        return Ok(Decimal::ZERO);
    }

    // Earliest flow date anchors the valuation unless the caller pins it.
    let base_date = match as_of {
        Some(d) => d,
        None => flows.iter().map(|f| f.date).min().ok_or_else(|| {
            WorkoutError::InsufficientData("XNPV requires at least one cash flow".into())
        })?,
    };

    let one_plus_r = Decimal::ONE + annual_rate;
    let mut pv = Decimal::ZERO;

    for flow in flows {
        let days = (flow.date - base_date).num_days();
        let years = Decimal::from(days) / DAYS_PER_YEAR;
        let discount = one_plus_r.powd(years);
        if discount.is_zero() {
            return Err(WorkoutError::DivisionByZero {
                context: format!("XNPV discount factor at {}", flow.date),
            });
        }
        pv += flow.net() / discount;
    }

    Ok(pv.round_dp(2))
}

/// One point of the discount-rate sensitivity sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub rate: Rate,
    pub xnpv: Money,
}

/// Sweep XNPV across discount rates from `rate_low` to `rate_high`
/// inclusive in `rate_step` increments, over the flows tagged with
/// `scenario`.
///
/// Every point is an independent pure evaluation over the same
/// immutable snapshot, so callers may freely offload the sweep without
/// stale-state hazards.
pub fn sensitivity_analysis(
    flows: &[CashFlow],
    rate_low: Rate,
    rate_high: Rate,
    rate_step: Rate,
    scenario: u32,
) -> WorkoutResult<Vec<SensitivityPoint>> {
    if rate_step <= Decimal::ZERO {
        return Err(WorkoutError::InvalidInput {
            field: "rate_step".into(),
            reason: "Sensitivity step must be positive".into(),
        });
    }

    let scoped: Vec<CashFlow> = flows
        .iter()
        .filter(|f| f.scenario == scenario)
        .cloned()
        .collect();

    let mut points = Vec::new();
    let mut rate = rate_low;
    while rate <= rate_high {
        points.push(SensitivityPoint {
            rate,
            xnpv: xnpv(&scoped, rate, None)?,
        });
        rate += rate_step;
    }

    Ok(points)
}

/// XIRR via Newton-Raphson over the same Actual/365 discounting.
pub fn xirr(flows: &[CashFlow], guess: Rate) -> WorkoutResult<Rate> {
    if flows.len() < 2 {
        return Err(WorkoutError::InsufficientData(
            "XIRR requires at least 2 cash flows".into(),
        ));
    }

    let base_date = flows.iter().map(|f| f.date).min().ok_or_else(|| {
        WorkoutError::InsufficientData("XIRR requires at least 2 cash flows".into())
    })?;
    let mut rate = guess;

    for i in 0..MAX_XIRR_ITERATIONS {
        let mut npv_val = Decimal::ZERO;
        let mut dnpv = Decimal::ZERO;
        let one_plus_r = Decimal::ONE + rate;

        if one_plus_r <= Decimal::ZERO {
            return Err(WorkoutError::ConvergenceFailure {
                function: "XIRR".into(),
                iterations: i,
                last_delta: npv_val,
            });
        }

        for flow in flows {
            let days = (flow.date - base_date).num_days();
            let years = Decimal::from(days) / DAYS_PER_YEAR;
            let discount = one_plus_r.powd(years);
            if discount.is_zero() {
                continue;
            }
            npv_val += flow.net() / discount;
            dnpv -= years * flow.net() / (one_plus_r * discount);
        }

        if npv_val.abs() < CONVERGENCE_THRESHOLD {
            return Ok(rate);
        }

        if dnpv.is_zero() {
            return Err(WorkoutError::ConvergenceFailure {
                function: "XIRR".into(),
                iterations: i,
                last_delta: npv_val,
            });
        }

        rate -= npv_val / dnpv;

        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(100.0) {
            rate = dec!(100.0);
        }
    }

    Err(WorkoutError::ConvergenceFailure {
        function: "XIRR".into(),
        iterations: MAX_XIRR_ITERATIONS,
        last_delta: Decimal::ZERO,
    })
}

/// Qualitative opinion tag shown next to a scenario's XNPV figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentOpinion {
    Recommended,
    Considerable,
    InsufficientReturn,
    NotRecommended,
}

/// Input for the per-scenario cash-flow summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XnpvAnalysisInput {
    pub cash_flows: Vec<CashFlow>,
    /// Annual discount rate (0.08 = 8%)
    pub discount_rate: Rate,
    #[serde(default = "default_analysis_scenario")]
    pub scenario: u32,
    /// Valuation date; defaults to the earliest in-scenario flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

fn default_analysis_scenario() -> u32 {
    1
}

/// Per-scenario cash-flow summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XnpvSummary {
    pub scenario: u32,
    pub total_inflow: Money,
    pub total_outflow: Money,
    pub total_net: Money,
    pub xnpv: Money,
    /// XIRR when it exists and converges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xirr: Option<Rate>,
    pub opinion: InvestmentOpinion,
}

/// Summarise one scenario's projected flows: totals, XNPV, XIRR and the
/// qualitative opinion tag.
pub fn analyze_cash_flows(
    input: &XnpvAnalysisInput,
) -> WorkoutResult<ComputationOutput<XnpvSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let scoped: Vec<CashFlow> = input
        .cash_flows
        .iter()
        .filter(|f| f.scenario == input.scenario)
        .cloned()
        .collect();

    if scoped.is_empty() {
        warnings.push(format!(
            "No cash flows tagged with scenario {}",
            input.scenario
        ));
    }

    let total_inflow: Money = scoped.iter().map(|f| f.inflow).sum();
    let total_outflow: Money = scoped.iter().map(|f| f.outflow).sum();
    let total_net = total_inflow - total_outflow;

    let pv = xnpv(&scoped, input.discount_rate, input.as_of)?;

    let irr = if scoped.len() >= 2 {
        match xirr(&scoped, dec!(0.1)) {
            Ok(rate) => Some(rate.round_dp(6)),
            Err(_) => {
                warnings.push("XIRR did not converge for this flow set".into());
                None
            }
        }
    } else {
        None
    };

    let opinion = derive_opinion(pv, total_net);

    let output = XnpvSummary {
        scenario: input.scenario,
        total_inflow,
        total_outflow,
        total_net,
        xnpv: pv,
        xirr: irr,
        opinion,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "XNPV scenario summary (Actual/365)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn derive_opinion(pv: Money, total_net: Money) -> InvestmentOpinion {
    if pv > Decimal::ZERO && total_net > Decimal::ZERO {
        if pv / total_net.abs() > dec!(0.1) {
            InvestmentOpinion::Recommended
        } else {
            InvestmentOpinion::Considerable
        }
    } else if pv <= Decimal::ZERO && total_net > Decimal::ZERO {
        InvestmentOpinion::InsufficientReturn
    } else {
        InvestmentOpinion::NotRecommended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(date: NaiveDate, inflow: Decimal, outflow: Decimal) -> CashFlow {
        CashFlow {
            date,
            inflow,
            outflow,
            category: None,
            scenario: 1,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_single_flow_at_valuation_date_is_undiscounted() {
        let flows = vec![flow(d(2025, 6, 1), dec!(500_000), dec!(0))];
        let pv = xnpv(&flows, dec!(0.08), Some(d(2025, 6, 1))).unwrap();
        assert_eq!(pv, dec!(500_000));
    }

    #[test]
    fn test_empty_flows_value_to_zero() {
        assert_eq!(xnpv(&[], dec!(0.08), None).unwrap(), dec!(0));
    }

    #[test]
    fn test_rate_below_negative_one_rejected() {
        let flows = vec![flow(d(2025, 1, 1), dec!(100), dec!(0))];
        assert!(xnpv(&flows, dec!(-1), None).is_err());
    }

    #[test]
    fn test_flow_before_as_of_still_discounts() {
        // One year before the valuation date at 10%: 100 * 1.1
        let flows = vec![flow(d(2024, 1, 1), dec!(100), dec!(0))];
        let pv = xnpv(&flows, dec!(0.1), Some(d(2024, 12, 31))).unwrap();
        assert!(pv > dec!(109) && pv < dec!(111), "got {pv}");
    }

    #[test]
    fn test_sensitivity_step_must_be_positive() {
        assert!(sensitivity_analysis(&[], dec!(0.01), dec!(0.1), dec!(0), 1).is_err());
    }
}
