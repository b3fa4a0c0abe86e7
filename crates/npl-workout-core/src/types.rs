use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Recovery rates are the one
/// exception and are expressed 0–100.
pub type Rate = Decimal;

/// A single dated cash flow in a recovery projection.
///
/// Inflow and outflow are tracked separately because upstream records
/// keep both columns; the engine only ever discounts the net.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub inflow: Money,
    pub outflow: Money,
    /// Free-form category tag carried through from the source record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Evaluation scenario this flow belongs to (1-based)
    #[serde(default = "default_scenario")]
    pub scenario: u32,
}

fn default_scenario() -> u32 {
    1
}

impl CashFlow {
    pub fn net(&self) -> Money {
        self.inflow - self.outflow
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
