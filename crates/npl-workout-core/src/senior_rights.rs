//! Senior-priority claim aggregation. Claims that rank ahead of the
//! loan (protected deposits, wages, taxes) are summed into a single
//! deduction that the dividend engine subtracts from sale proceeds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money};
use crate::WorkoutResult;

/// One senior-rights category as carried on the rights-analysis sheet.
///
/// `dd_amount` is the as-reported figure from due diligence;
/// `reflected_amount` is the evaluator's manual override. Both are kept,
/// but only the effective (reflected-or-DD) amount feeds the total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeniorRightsEntry {
    #[serde(default)]
    pub dd_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflected_amount: Option<Money>,
    /// Evaluator's reason for an override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SeniorRightsEntry {
    pub fn effective(&self) -> Money {
        self.reflected_amount.unwrap_or(self.dd_amount)
    }
}

/// The six senior-priority deduction categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeniorRightsInput {
    /// Protected small-lessee deposit
    #[serde(default)]
    pub small_deposit: SeniorRightsEntry,
    /// Senior lease deposit
    #[serde(default)]
    pub lease_deposit: SeniorRightsEntry,
    /// Senior wage claims
    #[serde(default)]
    pub wage_claim: SeniorRightsEntry,
    /// Taxes levied on the property itself
    #[serde(default)]
    pub current_tax: SeniorRightsEntry,
    /// Other senior tax claims
    #[serde(default)]
    pub senior_tax: SeniorRightsEntry,
    /// Anything else ranking ahead of the loan
    #[serde(default)]
    pub other: SeniorRightsEntry,
}

/// Aggregated senior-rights figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeniorRightsTotals {
    /// Effective amount per category, in input order
    pub effective_amounts: Vec<CategoryAmount>,
    /// Sum of as-reported DD amounts
    pub total_dd: Money,
    /// Sum of effective amounts, the figure the dividend engine deducts
    pub total_reflected: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub dd_amount: Money,
    pub effective_amount: Money,
}

/// Sum the senior-rights categories.
///
/// A plain sum: no deduplication, no ordering, and negative inputs are
/// passed through as entered.
pub fn aggregate(
    input: &SeniorRightsInput,
) -> WorkoutResult<ComputationOutput<SeniorRightsTotals>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let categories: [(&str, &SeniorRightsEntry); 6] = [
        ("small_deposit", &input.small_deposit),
        ("lease_deposit", &input.lease_deposit),
        ("wage_claim", &input.wage_claim),
        ("current_tax", &input.current_tax),
        ("senior_tax", &input.senior_tax),
        ("other", &input.other),
    ];

    let mut total_dd = Decimal::ZERO;
    let mut total_reflected = Decimal::ZERO;
    let mut effective_amounts = Vec::with_capacity(categories.len());

    for (name, entry) in categories {
        let effective = entry.effective();
        if effective < Decimal::ZERO {
            warnings.push(format!("Category '{name}' has a negative amount {effective}"));
        }
        total_dd += entry.dd_amount;
        total_reflected += effective;
        effective_amounts.push(CategoryAmount {
            category: name.to_string(),
            dd_amount: entry.dd_amount,
            effective_amount: effective,
        });
    }

    let output = SeniorRightsTotals {
        effective_amounts,
        total_dd,
        total_reflected,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Senior-rights priority deduction total",
        input,
        warnings,
        elapsed,
        output,
    ))
}
