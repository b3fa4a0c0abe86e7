use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use npl_workout_core::fees::{self, FeeBreakdownInput};

use crate::input;

/// Arguments for the court sale commission lookup
#[derive(Args)]
pub struct SaleFeeArgs {
    /// Winning-bid amount the commission is charged on
    #[arg(long)]
    pub amount: Decimal,
}

/// Arguments for the appraisal fee lookup
#[derive(Args)]
pub struct AppraisalFeeArgs {
    /// Appraised collateral value
    #[arg(long)]
    pub amount: Decimal,
}

/// Arguments for the registration tax calculation
#[derive(Args)]
pub struct RegistrationFeeArgs {
    /// Secured claim amount the taxes are levied on
    #[arg(long)]
    pub claim_amount: Decimal,
}

/// Arguments for assembling the scenario fee breakdown
#[derive(Args)]
pub struct FeeBreakdownArgs {
    /// Expected winning bid
    #[arg(long)]
    pub winning_bid: Option<Decimal>,

    /// Appraised value; defaults to the winning bid
    #[arg(long)]
    pub appraisal_value: Option<Decimal>,

    /// Secured claim amount for the registration taxes
    #[arg(long)]
    pub claim_amount: Option<Decimal>,

    /// Newspaper announcement cost
    #[arg(long, default_value_t = dec!(0))]
    pub newspaper_fee: Decimal,

    /// On-site survey cost
    #[arg(long, default_value_t = dec!(0))]
    pub survey_fee: Decimal,

    /// Delivery / eviction cost
    #[arg(long, default_value_t = dec!(0))]
    pub delivery_fee: Decimal,

    /// Other fixed costs
    #[arg(long, default_value_t = dec!(0))]
    pub other_cost: Decimal,

    /// Contingency loading on the fixed fees (0.1 = 10%)
    #[arg(long, default_value_t = dec!(0))]
    pub additional_cost_rate: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sale_fee(args: SaleFeeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fee = fees::sale_fee(args.amount);
    Ok(json!({
        "amount": args.amount.to_string(),
        "sale_fee": fee.to_string(),
    }))
}

pub fn run_appraisal_fee(args: AppraisalFeeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fee = fees::appraisal_fee(args.amount);
    Ok(json!({
        "amount": args.amount.to_string(),
        "appraisal_fee": fee.to_string(),
    }))
}

pub fn run_registration_fee(args: RegistrationFeeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fee = fees::registration_fee(args.claim_amount);
    Ok(json!({
        "claim_amount": args.claim_amount.to_string(),
        "registration_fee": fee.to_string(),
    }))
}

pub fn run_fee_breakdown(args: FeeBreakdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let breakdown_input: FeeBreakdownInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FeeBreakdownInput {
            winning_bid: args
                .winning_bid
                .ok_or("--winning-bid is required (or provide --input)")?,
            appraisal_value: args.appraisal_value,
            claim_amount: args.claim_amount,
            newspaper_fee: args.newspaper_fee,
            survey_fee: args.survey_fee,
            delivery_fee: args.delivery_fee,
            other_cost: args.other_cost,
            additional_cost_rate: args.additional_cost_rate,
        }
    };

    let result = fees::compute_fee_breakdown(&breakdown_input)?;
    Ok(serde_json::to_value(result)?)
}
