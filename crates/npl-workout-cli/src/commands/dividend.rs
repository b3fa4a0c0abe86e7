use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use npl_workout_core::dividend::{self, DividendInput};

use crate::input;

/// Arguments for the cap-applied dividend waterfall
#[derive(Args)]
pub struct DividendArgs {
    /// Expected or realised winning bid
    #[arg(long)]
    pub winning_bid: Option<Decimal>,

    /// Auction costs; defaults to the sale commission on the winning bid
    #[arg(long)]
    pub auction_fees: Option<Decimal>,

    /// Senior-rights deduction total
    #[arg(long)]
    pub senior_rights_total: Option<Decimal>,

    /// Loan cap (credit-guarantee / subrogation limit)
    #[arg(long)]
    pub loan_cap: Option<Decimal>,

    /// Secondary loan cap
    #[arg(long)]
    pub secondary_loan_cap: Option<Decimal>,

    /// Mortgage (registered maximum) cap
    #[arg(long)]
    pub mortgage_cap: Option<Decimal>,

    /// Fees already advanced and recovered on distribution
    #[arg(long)]
    pub prepaid_fee_recovery: Option<Decimal>,

    /// Denominator for the recovery rate; defaults to the loan cap
    #[arg(long)]
    pub reference_cap: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_dividend(args: DividendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dividend_input: DividendInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DividendInput {
            winning_bid: args
                .winning_bid
                .ok_or("--winning-bid is required (or provide --input)")?,
            auction_fees: args.auction_fees,
            senior_rights_total: args.senior_rights_total.unwrap_or(Decimal::ZERO),
            loan_cap: args.loan_cap,
            secondary_loan_cap: args.secondary_loan_cap,
            mortgage_cap: args.mortgage_cap,
            prepaid_fee_recovery: args.prepaid_fee_recovery.unwrap_or(Decimal::ZERO),
            reference_cap: args.reference_cap,
        }
    };

    let result = dividend::analyze_dividend(&dividend_input)?;
    Ok(serde_json::to_value(result)?)
}
