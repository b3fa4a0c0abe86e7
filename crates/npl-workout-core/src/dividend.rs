//! Dividend cap engine: walks a winning bid down through auction costs
//! and senior-rights deductions, then applies whichever of the loan,
//! secondary-loan and mortgage caps binds first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::fees::sale_fee;
use crate::recovery::{recovery_rate, risk_tier, RiskTier};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::WorkoutResult;

/// Proceeds left after deducting auction costs from the winning bid.
pub fn distributable_after_sale(winning_bid: Money, fees: Money) -> Money {
    winning_bid - fees
}

/// Proceeds left after senior-priority claims. May go negative when the
/// senior stack exceeds the sale proceeds; the capping step floors the
/// dividend at zero, not this figure.
pub fn distributable_after_senior(after_sale: Money, senior_total: Money) -> Money {
    after_sale - senior_total
}

/// Apply the binding cap to a distributable amount.
///
/// A cap participates only when it is `Some` and strictly positive.
/// The legacy records use 0 as "no cap set", so an explicit `Some(0)`
/// is likewise treated as unset; a literal zero cap would silently
/// zero out every dividend downstream. Use [`caps_from_sentinel`] when
/// converting legacy zero-sentinel fields.
pub fn cap_applied_dividend(after_senior: Money, caps: &[Option<Money>]) -> Money {
    if after_senior <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let binding = caps
        .iter()
        .copied()
        .filter_map(|c| c.filter(|v| *v > Decimal::ZERO))
        .min();
    match binding {
        Some(cap) => after_senior.min(cap),
        None => after_senior,
    }
}

/// Map legacy zero-sentinel cap fields into explicit options.
pub fn caps_from_sentinel(raw: &[Money]) -> Vec<Option<Money>> {
    raw.iter()
        .map(|&c| if c > Decimal::ZERO { Some(c) } else { None })
        .collect()
}

/// Total recoverable through the dividend: the capped dividend plus any
/// prepaid-fee recovery. Straight addition; the cap is not re-checked.
pub fn dividend_recoverable(cap_applied: Money, prepaid_fee_recovery: Money) -> Money {
    cap_applied + prepaid_fee_recovery
}

/// Input snapshot for a full dividend analysis.
///
/// Field mutations in the surrounding application should rebuild this
/// snapshot and re-run [`analyze_dividend`]; the pipeline replaces the
/// property-changed cascades that recomputed these figures in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendInput {
    /// Expected or realised winning bid
    pub winning_bid: Money,
    /// Auction costs; when absent the sale commission schedule is applied
    /// to the winning bid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auction_fees: Option<Money>,
    /// Senior-rights deduction total (reflected amounts)
    #[serde(default)]
    pub senior_rights_total: Money,
    /// Loan cap from the credit-guarantee / subrogation limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_cap: Option<Money>,
    /// Secondary loan cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_loan_cap: Option<Money>,
    /// Mortgage (registered maximum) cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortgage_cap: Option<Money>,
    /// Fees already advanced by the lender and recovered on distribution
    #[serde(default)]
    pub prepaid_fee_recovery: Money,
    /// Cap used as denominator for the recovery rate; defaults to the
    /// loan cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_cap: Option<Money>,
}

/// Output of the dividend analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendOutput {
    /// Auction fees actually deducted
    pub auction_fees: Money,
    pub distributable_after_sale: Money,
    pub distributable_after_senior: Money,
    pub cap_applied_dividend: Money,
    /// Which cap bound the dividend, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_cap: Option<String>,
    pub dividend_recoverable: Money,
    /// Recovery rate, 0–100
    pub recovery_rate: Rate,
    pub risk_tier: RiskTier,
}

/// Run the full dividend pipeline for one sale scenario.
pub fn analyze_dividend(
    input: &DividendInput,
) -> WorkoutResult<ComputationOutput<DividendOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let auction_fees = input
        .auction_fees
        .unwrap_or_else(|| sale_fee(input.winning_bid));

    let after_sale = distributable_after_sale(input.winning_bid, auction_fees);
    let after_senior = distributable_after_senior(after_sale, input.senior_rights_total);

    if after_senior <= Decimal::ZERO {
        warnings.push(format!(
            "Senior claims of {} absorb the full sale proceeds; dividend is zero",
            input.senior_rights_total
        ));
    }

    let caps = [input.loan_cap, input.secondary_loan_cap, input.mortgage_cap];
    let dividend = cap_applied_dividend(after_senior, &caps);
    let binding_cap = identify_binding_cap(after_senior, input, dividend);

    let recoverable = dividend_recoverable(dividend, input.prepaid_fee_recovery);

    let reference_cap = input
        .reference_cap
        .or(input.loan_cap)
        .unwrap_or(Decimal::ZERO);
    let rate = recovery_rate(dividend, reference_cap);
    let tier = risk_tier(rate);

    let output = DividendOutput {
        auction_fees,
        distributable_after_sale: after_sale,
        distributable_after_senior: after_senior,
        cap_applied_dividend: dividend,
        binding_cap,
        dividend_recoverable: recoverable,
        recovery_rate: rate,
        risk_tier: tier,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Cap-applied dividend waterfall",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Name the cap that produced the final dividend, for display.
fn identify_binding_cap(
    after_senior: Money,
    input: &DividendInput,
    dividend: Money,
) -> Option<String> {
    if after_senior <= Decimal::ZERO || dividend == after_senior {
        return None;
    }
    let named: [(&str, Option<Money>); 3] = [
        ("loan_cap", input.loan_cap),
        ("secondary_loan_cap", input.secondary_loan_cap),
        ("mortgage_cap", input.mortgage_cap),
    ];
    named
        .iter()
        .find(|(_, c)| matches!(c, Some(v) if *v == dividend))
        .map(|(name, _)| name.to_string())
}
