//! Statutory fee schedules applied when a collateral property is sold
//! at court auction or public sale: the marginal sale-commission table,
//! the flat appraisal-fee table, registration/education taxes and the
//! per-scenario fee breakdown that feeds the dividend engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::WorkoutResult;

/// Sale-commission brackets: (upper bound, bracket floor, base fee,
/// marginal rate on the excess above the floor). The table is continuous
/// at every boundary; amounts at a boundary belong to the lower bracket
/// via the `<=` chain.
const SALE_FEE_BRACKETS: [(Decimal, Decimal, Decimal, Decimal); 7] = [
    (dec!(100_000), dec!(0), dec!(7_000), dec!(0)),
    (dec!(1_000_000), dec!(100_000), dec!(7_000), dec!(0.04)),
    (dec!(10_000_000), dec!(1_000_000), dec!(43_000), dec!(0.02)),
    (dec!(100_000_000), dec!(10_000_000), dec!(223_000), dec!(0.012)),
    (dec!(300_000_000), dec!(100_000_000), dec!(1_303_000), dec!(0.005)),
    (dec!(500_000_000), dec!(300_000_000), dec!(2_303_000), dec!(0.003)),
    (dec!(1_000_000_000), dec!(500_000_000), dec!(2_903_000), dec!(0.002)),
];

/// Top bracket: everything above 1,000,000,000 clamps in here.
const SALE_FEE_TOP: (Decimal, Decimal, Decimal) =
    (dec!(1_000_000_000), dec!(3_903_000), dec!(0.001));

/// Appraisal-fee brackets: (upper bound, base fee, survey supplement,
/// tax component). Unlike the sale commission this schedule is flat per
/// bracket: the external fee regulation publishes fixed three-part
/// sums, not a marginal formula.
const APPRAISAL_FEE_BRACKETS: [(Decimal, Decimal, Decimal, Decimal); 6] = [
    (dec!(197_727_272), dec!(290_000), dec!(48_000), dec!(33_800)),
    (dec!(200_000_000), dec!(10_610_000), dec!(48_000), dec!(1_065_800)),
    (dec!(500_000_000), dec!(10_610_000), dec!(88_000), dec!(1_069_800)),
    (dec!(1_000_000_000), dec!(8_782_000), dec!(88_000), dec!(887_000)),
    (dec!(5_000_000_000), dec!(7_908_000), dec!(88_000), dec!(799_600)),
    (dec!(10_000_000_000), dec!(7_354_000), dec!(88_000), dec!(744_200)),
];

const APPRAISAL_FEE_TOP: (Decimal, Decimal, Decimal) =
    (dec!(7_200_000), dec!(88_000), dec!(728_800));

/// Registration licence tax on a secured claim amount.
const REGISTRATION_TAX_RATE: Decimal = dec!(0.002);
/// Local education surtax levied alongside the registration tax.
const EDUCATION_TAX_RATE: Decimal = dec!(0.0002);

/// OnBid platform commission on a public-sale price.
const ONBID_FEE_RATE: Decimal = dec!(0.001);
/// Disposal commission on a realised sale price.
const DISPOSAL_FEE_RATE: Decimal = dec!(0.01);

/// Court sale commission for a winning-bid amount.
///
/// Marginal bracket table: base fee plus a rate on the excess over the
/// bracket floor. Non-positive amounts owe nothing.
pub fn sale_fee(amount: Money) -> Money {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    for (ceiling, floor, base, rate) in SALE_FEE_BRACKETS {
        if amount <= ceiling {
            return base + (amount - floor) * rate;
        }
    }
    let (floor, base, rate) = SALE_FEE_TOP;
    base + (amount - floor) * rate
}

/// Appraisal fee for an appraised collateral value.
///
/// Flat per-bracket sums of three schedule components; evaluated as a
/// `<=` chain from the smallest bracket up, clamping into the top
/// bracket beyond 10 billion.
pub fn appraisal_fee(amount: Money) -> Money {
    for (ceiling, base, survey, tax) in APPRAISAL_FEE_BRACKETS {
        if amount <= ceiling {
            return base + survey + tax;
        }
    }
    let (base, survey, tax) = APPRAISAL_FEE_TOP;
    base + survey + tax
}

/// Registration licence tax plus local education surtax on a claim amount.
pub fn registration_fee(claim_amount: Money) -> Money {
    claim_amount * REGISTRATION_TAX_RATE + claim_amount * EDUCATION_TAX_RATE
}

/// OnBid platform commission for a public-sale price.
pub fn onbid_fee(sale_price: Money) -> Money {
    if sale_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    sale_price * ONBID_FEE_RATE
}

/// Disposal commission for a realised sale price.
pub fn disposal_fee(sale_price: Money) -> Money {
    if sale_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    sale_price * DISPOSAL_FEE_RATE
}

/// Per-scenario cost breakdown deducted from sale proceeds before any
/// distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFeeBreakdown {
    pub newspaper_fee: Money,
    pub survey_fee: Money,
    pub sale_fee: Money,
    pub appraisal_fee: Money,
    pub delivery_fee: Money,
    pub registration_fee: Money,
    pub other_cost: Money,
    /// Contingency loading applied on top of the fixed fees (0.1 = 10%)
    pub additional_cost_rate: Rate,
}

impl ScenarioFeeBreakdown {
    /// Sum of the seven fixed fee positions, before the contingency loading.
    pub fn total(&self) -> Money {
        self.newspaper_fee
            + self.survey_fee
            + self.sale_fee
            + self.appraisal_fee
            + self.delivery_fee
            + self.registration_fee
            + self.other_cost
    }

    /// Total grossed up by the additional-cost rate.
    pub fn total_with_additional(&self) -> Money {
        self.total() * (Decimal::ONE + self.additional_cost_rate)
    }
}

/// Input for assembling a scenario fee breakdown. The table-driven
/// positions (sale, appraisal, registration) are computed from the
/// amounts below; the remaining positions are taken as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBreakdownInput {
    /// Expected winning bid, basis for the sale commission
    pub winning_bid: Money,
    /// Appraised value; when absent the winning bid is used as basis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appraisal_value: Option<Money>,
    /// Secured claim amount, basis for registration/education taxes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_amount: Option<Money>,
    #[serde(default)]
    pub newspaper_fee: Money,
    #[serde(default)]
    pub survey_fee: Money,
    #[serde(default)]
    pub delivery_fee: Money,
    #[serde(default)]
    pub other_cost: Money,
    #[serde(default)]
    pub additional_cost_rate: Rate,
}

/// Output of the fee-breakdown assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBreakdownOutput {
    pub breakdown: ScenarioFeeBreakdown,
    /// Sum of the fixed fee positions
    pub total: Money,
    /// Total grossed up by the additional-cost rate
    pub total_with_additional: Money,
}

/// Assemble the full scenario fee breakdown from a winning bid and the
/// manually entered cost positions.
pub fn compute_fee_breakdown(
    input: &FeeBreakdownInput,
) -> WorkoutResult<ComputationOutput<FeeBreakdownOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.winning_bid <= Decimal::ZERO {
        warnings.push(format!(
            "Winning bid {} is not positive; table-driven fees are zero",
            input.winning_bid
        ));
    }
    if input.additional_cost_rate > dec!(0.5) {
        warnings.push(format!(
            "Additional-cost rate {} exceeds 50%; verify input",
            input.additional_cost_rate
        ));
    }

    let appraisal_basis = input.appraisal_value.unwrap_or(input.winning_bid);
    let breakdown = ScenarioFeeBreakdown {
        newspaper_fee: input.newspaper_fee,
        survey_fee: input.survey_fee,
        sale_fee: sale_fee(input.winning_bid),
        appraisal_fee: if appraisal_basis > Decimal::ZERO {
            appraisal_fee(appraisal_basis)
        } else {
            Decimal::ZERO
        },
        delivery_fee: input.delivery_fee,
        registration_fee: input
            .claim_amount
            .map(registration_fee)
            .unwrap_or(Decimal::ZERO),
        other_cost: input.other_cost,
        additional_cost_rate: input.additional_cost_rate,
    };

    let output = FeeBreakdownOutput {
        total: breakdown.total(),
        total_with_additional: breakdown.total_with_additional(),
        breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scenario fee breakdown from statutory schedules",
        input,
        warnings,
        elapsed,
        output,
    ))
}
