use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in whatever unit the caller picked (euros, cents).
/// Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed on a percent scale (3.5 = 3.5%). Never as fractions.
pub type Percent = Decimal;

/// Title used for projects and reports saved without a name.
pub const UNNAMED_PROJECT: &str = "Projet Sans Nom";

/// Legal rental category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalType {
    /// Unfurnished letting (location nue)
    #[serde(alias = "NU")]
    Bare,
    /// Furnished letting by a non-professional landlord (LMNP)
    #[default]
    #[serde(alias = "LMNP")]
    Furnished,
}

/// Rental income tax regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Flat allowance on gross rent (micro-foncier / micro-BIC)
    #[serde(alias = "MICRO")]
    Micro,
    /// Itemised actual expenses (régime réel)
    #[default]
    #[serde(alias = "REAL")]
    Real,
}

impl std::fmt::Display for RentalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RentalType::Bare => write!(f, "NU"),
            RentalType::Furnished => write!(f, "LMNP"),
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxRegime::Micro => write!(f, "MICRO"),
            TaxRegime::Real => write!(f, "REAL"),
        }
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
