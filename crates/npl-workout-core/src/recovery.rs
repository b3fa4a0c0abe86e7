//! Recovery-rate evaluation: expresses the cap-applied dividend as a
//! percentage of a reference cap and maps it onto a qualitative risk
//! tier for display.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Money, Rate};

const LOW_RISK_THRESHOLD: Decimal = dec!(80);
const MEDIUM_RISK_THRESHOLD: Decimal = dec!(50);

/// Qualitative risk tier derived from a recovery-rate percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// Recovery rate as a 0–100 percentage, rounded to 2 decimal places.
///
/// A reference cap that is zero or negative means "no cap set"; by
/// convention that reads as full recovery (100), never as an error.
pub fn recovery_rate(cap_applied_dividend: Money, reference_cap: Money) -> Rate {
    if reference_cap <= Decimal::ZERO {
        return dec!(100);
    }
    (cap_applied_dividend / reference_cap * dec!(100)).round_dp(2)
}

/// Threshold lookup from recovery rate to risk tier. Fixed thresholds,
/// no hysteresis across recalculations.
pub fn risk_tier(rate: Rate) -> RiskTier {
    if rate >= LOW_RISK_THRESHOLD {
        RiskTier::Low
    } else if rate >= MEDIUM_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}
