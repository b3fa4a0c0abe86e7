use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use npl_workout_core::senior_rights::{self, SeniorRightsEntry, SeniorRightsInput};

use crate::input;

/// Arguments for aggregating senior-priority deductions.
///
/// Flags cover the common case of one DD amount per category; overrides
/// and notes need the JSON input form.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SeniorRightsArgs {
    /// Protected small-lessee deposit
    #[arg(long)]
    pub small_deposit: Option<Decimal>,

    /// Senior lease deposit
    #[arg(long)]
    pub lease_deposit: Option<Decimal>,

    /// Senior wage claims
    #[arg(long)]
    pub wage_claim: Option<Decimal>,

    /// Taxes levied on the property itself
    #[arg(long)]
    pub current_tax: Option<Decimal>,

    /// Other senior tax claims
    #[arg(long)]
    pub senior_tax: Option<Decimal>,

    /// Anything else ranking ahead of the loan
    #[arg(long)]
    pub other: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn entry_from_flag(amount: Option<Decimal>) -> SeniorRightsEntry {
    SeniorRightsEntry {
        dd_amount: amount.unwrap_or(Decimal::ZERO),
        reflected_amount: None,
        note: None,
    }
}

pub fn run_senior_rights(args: SeniorRightsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rights_input: SeniorRightsInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SeniorRightsInput {
            small_deposit: entry_from_flag(args.small_deposit),
            lease_deposit: entry_from_flag(args.lease_deposit),
            wage_claim: entry_from_flag(args.wage_claim),
            current_tax: entry_from_flag(args.current_tax),
            senior_tax: entry_from_flag(args.senior_tax),
            other: entry_from_flag(args.other),
        }
    };

    let result = senior_rights::aggregate(&rights_input)?;
    Ok(serde_json::to_value(result)?)
}
