use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use npl_workout_core::lead_time::{self, LeadTimeInput};

use crate::input;

/// Arguments for generating the auction-round lead-time schedule
#[derive(Args)]
pub struct LeadTimeArgs {
    /// Date of the first round (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Appraisal / initial minimum-bid value for round 1
    #[arg(long)]
    pub base_bid_value: Option<Decimal>,

    /// Per-round minimum-bid discount (0.2 = 20%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Nominal lead time between rounds, in days
    #[arg(long)]
    pub lead_time_days: Option<i64>,

    /// Number of rounds to project
    #[arg(long, default_value = "22")]
    pub rounds: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_lead_time(args: LeadTimeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: LeadTimeInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LeadTimeInput {
            start_date: args
                .start_date
                .ok_or("--start-date is required (or provide --input)")?,
            base_bid_value: args
                .base_bid_value
                .ok_or("--base-bid-value is required (or provide --input)")?,
            discount_rate: args
                .discount_rate
                .ok_or("--discount-rate is required (or provide --input)")?,
            lead_time_days: args
                .lead_time_days
                .ok_or("--lead-time-days is required (or provide --input)")?,
            round_count: args.rounds,
        }
    };

    let result = lead_time::generate(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}
