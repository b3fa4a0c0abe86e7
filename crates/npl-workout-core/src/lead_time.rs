//! Auction-round lead-time schedule: projected sale dates and the
//! minimum-bid decay across successive failed rounds.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::WorkoutResult;

const DEFAULT_ROUND_COUNT: u32 = 22;

fn default_round_count() -> u32 {
    DEFAULT_ROUND_COUNT
}

/// Input for generating a lead-time schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadTimeInput {
    /// Date of the first scheduled round
    pub start_date: NaiveDate,
    /// Appraisal / initial minimum-bid value for round 1
    pub base_bid_value: Money,
    /// Per-round minimum-bid discount (0.2 = 20% per failed round)
    pub discount_rate: Rate,
    /// Nominal lead time between rounds, in days
    pub lead_time_days: i64,
    /// Number of rounds to project
    #[serde(default = "default_round_count")]
    pub round_count: u32,
}

/// One projected auction round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadTimeEntry {
    /// Round number, 1-based
    pub round: u32,
    pub date: NaiveDate,
    pub minimum_bid: Money,
}

/// Generate the full lead-time schedule for the given inputs.
///
/// Round i is dated `start + floor((i - 1) * lead_time_days * 7 / 11)`
/// days; the week-fraction spacing is carried over verbatim from the
/// observed schedule generator and has no documented business rationale.
/// The minimum bid decays geometrically:
/// `base * (1 - discount_rate)^(i - 1)`.
///
/// The schedule is always regenerated in full; callers replace any
/// previously held sequence rather than patching it.
pub fn generate(input: &LeadTimeInput) -> WorkoutResult<ComputationOutput<Vec<LeadTimeEntry>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.discount_rate < Decimal::ZERO || input.discount_rate >= Decimal::ONE {
        warnings.push(format!(
            "Discount rate {} outside [0, 1); minimum bids will not decay sensibly",
            input.discount_rate
        ));
    }
    if input.lead_time_days <= 0 {
        warnings.push(format!(
            "Lead time of {} days collapses all rounds onto the start date",
            input.lead_time_days
        ));
    }
    if input.base_bid_value <= Decimal::ZERO {
        warnings.push(format!(
            "Base bid value {} is not positive",
            input.base_bid_value
        ));
    }

    let decay = Decimal::ONE - input.discount_rate;
    let mut entries: Vec<LeadTimeEntry> = Vec::with_capacity(input.round_count as usize);

    for i in 1..=input.round_count {
        let offset_days = (i as i64 - 1) * input.lead_time_days * 7 / 11;
        let date = input.start_date + Duration::days(offset_days);
        let minimum_bid = input.base_bid_value * decay.powi(i as i64 - 1);
        entries.push(LeadTimeEntry {
            round: i,
            date,
            minimum_bid,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Lead-time schedule with geometric minimum-bid decay",
        input,
        warnings,
        elapsed,
        entries,
    ))
}
