use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{json, Value};

use npl_workout_core::types::CashFlow;
use npl_workout_core::xnpv::{self, XnpvAnalysisInput};

use crate::input;

/// Arguments for the per-scenario XNPV summary.
///
/// Cash flows are structured data and always come from a JSON file or
/// piped stdin; the flags adjust the valuation parameters.
#[derive(Args)]
pub struct XnpvArgs {
    /// Path to JSON input file with cash flows and parameters
    #[arg(long)]
    pub input: Option<String>,

    /// Annual discount rate (0.08 = 8%); overrides the file value
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Scenario whose flows are summarised; overrides the file value
    #[arg(long)]
    pub scenario: Option<u32>,

    /// Valuation date (YYYY-MM-DD); defaults to the earliest flow
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// Arguments for the discount-rate sensitivity sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON input file with cash flows
    #[arg(long)]
    pub input: Option<String>,

    /// Lowest discount rate in the sweep
    #[arg(long, default_value_t = dec!(0.02))]
    pub rate_low: Decimal,

    /// Highest discount rate in the sweep (inclusive)
    #[arg(long, default_value_t = dec!(0.15))]
    pub rate_high: Decimal,

    /// Sweep increment
    #[arg(long, default_value_t = dec!(0.01))]
    pub rate_step: Decimal,

    /// Scenario whose flows are swept
    #[arg(long, default_value = "1")]
    pub scenario: u32,
}

#[derive(Deserialize)]
struct CashFlowFile {
    cash_flows: Vec<CashFlow>,
}

pub fn run_xnpv(args: XnpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut analysis_input: XnpvAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("cash flows are required: provide --input or pipe JSON on stdin".into());
    };

    if let Some(rate) = args.discount_rate {
        analysis_input.discount_rate = rate;
    }
    if let Some(scenario) = args.scenario {
        analysis_input.scenario = scenario;
    }
    if args.as_of.is_some() {
        analysis_input.as_of = args.as_of;
    }

    let result = xnpv::analyze_cash_flows(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let file: CashFlowFile = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("cash flows are required: provide --input or pipe JSON on stdin".into());
    };

    let points = xnpv::sensitivity_analysis(
        &file.cash_flows,
        args.rate_low,
        args.rate_high,
        args.rate_step,
        args.scenario,
    )?;

    Ok(json!({
        "scenario": args.scenario,
        "points": points,
    }))
}
