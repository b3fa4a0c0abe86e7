mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::dividend::DividendArgs;
use commands::fees::{AppraisalFeeArgs, FeeBreakdownArgs, RegistrationFeeArgs, SaleFeeArgs};
use commands::lead_time::LeadTimeArgs;
use commands::rights::SeniorRightsArgs;
use commands::xnpv::{SensitivityArgs, XnpvArgs};

/// NPL workout recovery and dividend calculations
#[derive(Parser)]
#[command(
    name = "nplw",
    version,
    about = "NPL workout recovery and dividend calculations",
    long_about = "A CLI for the calculations behind non-performing-loan workout: \
                  statutory auction fee schedules, lead-time schedules, senior-rights \
                  aggregation, cap-applied dividends, recovery rates and XNPV of \
                  projected recovery cash flows. All arithmetic is decimal-precise."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Court sale commission for a winning-bid amount
    SaleFee(SaleFeeArgs),
    /// Appraisal fee for an appraised collateral value
    AppraisalFee(AppraisalFeeArgs),
    /// Registration licence tax plus education surtax on a claim
    RegistrationFee(RegistrationFeeArgs),
    /// Assemble the full per-scenario fee breakdown
    FeeBreakdown(FeeBreakdownArgs),
    /// Generate the auction-round lead-time schedule
    LeadTime(LeadTimeArgs),
    /// Aggregate senior-priority deductions
    SeniorRights(SeniorRightsArgs),
    /// Run the cap-applied dividend waterfall
    Dividend(DividendArgs),
    /// XNPV summary of projected recovery cash flows
    Xnpv(XnpvArgs),
    /// Discount-rate sensitivity sweep
    Sensitivity(SensitivityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::SaleFee(args) => commands::fees::run_sale_fee(args),
        Commands::AppraisalFee(args) => commands::fees::run_appraisal_fee(args),
        Commands::RegistrationFee(args) => commands::fees::run_registration_fee(args),
        Commands::FeeBreakdown(args) => commands::fees::run_fee_breakdown(args),
        Commands::LeadTime(args) => commands::lead_time::run_lead_time(args),
        Commands::SeniorRights(args) => commands::rights::run_senior_rights(args),
        Commands::Dividend(args) => commands::dividend::run_dividend(args),
        Commands::Xnpv(args) => commands::xnpv::run_xnpv(args),
        Commands::Sensitivity(args) => commands::xnpv::run_sensitivity(args),
        Commands::Version => {
            println!("nplw {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
