pub mod profile;
pub mod profitability;
pub mod project;
pub mod quick;
pub mod report;
pub mod schedule;

use clap::Args;
use rust_decimal::Decimal;
use uuid::Uuid;

use rentaloc_core::{InvestmentInput, RentalType, TaxRegime};

use crate::input;
use crate::storage::DataDir;

/// Where an investment record comes from, plus field overrides.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Path to JSON input file (overrides project and profile defaults)
    #[arg(long)]
    pub input: Option<String>,

    /// Id of a saved project to load
    #[arg(long)]
    pub project: Option<Uuid>,

    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual nominal loan rate, in percent
    #[arg(long)]
    pub loan_rate: Option<Decimal>,

    /// Loan duration in years
    #[arg(long)]
    pub loan_duration_years: Option<u32>,

    /// Rental type
    #[arg(long, value_enum)]
    pub rental_type: Option<RentalTypeArg>,

    /// Tax regime
    #[arg(long, value_enum)]
    pub tax_regime: Option<TaxRegimeArg>,

    /// Marginal income tax rate, in percent
    #[arg(long)]
    pub tmi: Option<Decimal>,

    /// Personal cash invested
    #[arg(long, alias = "apport")]
    pub personal_cash: Option<Decimal>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum RentalTypeArg {
    /// Unfurnished (NU)
    Bare,
    /// Furnished (LMNP)
    Furnished,
}

impl From<RentalTypeArg> for RentalType {
    fn from(arg: RentalTypeArg) -> Self {
        match arg {
            RentalTypeArg::Bare => RentalType::Bare,
            RentalTypeArg::Furnished => RentalType::Furnished,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum TaxRegimeArg {
    /// Flat allowance (micro)
    Micro,
    /// Actual expenses (réel)
    Real,
}

impl From<TaxRegimeArg> for TaxRegime {
    fn from(arg: TaxRegimeArg) -> Self {
        match arg {
            TaxRegimeArg::Micro => TaxRegime::Micro,
            TaxRegimeArg::Real => TaxRegime::Real,
        }
    }
}

/// A resolved record and, when it came from a saved project, its name.
pub struct ResolvedInput {
    pub input: InvestmentInput,
    pub project_name: Option<String>,
}

/// Resolve the investment record: input file, then piped stdin, then a
/// saved project, then the profile defaults. Flag overrides apply last.
pub fn resolve_input(
    args: &InputArgs,
    data: &DataDir,
) -> Result<ResolvedInput, Box<dyn std::error::Error>> {
    let piped = if args.input.is_none() {
        input::stdin::read_stdin()?
    } else {
        None
    };
    resolve_with(args, data, piped)
}

fn resolve_with(
    args: &InputArgs,
    data: &DataDir,
    piped: Option<InvestmentInput>,
) -> Result<ResolvedInput, Box<dyn std::error::Error>> {
    let mut resolved = if let Some(ref path) = args.input {
        ResolvedInput {
            input: input::file::read_json(path)?,
            project_name: None,
        }
    } else if let Some(record) = piped {
        ResolvedInput {
            input: record,
            project_name: None,
        }
    } else if let Some(id) = args.project {
        let book = data.load_projects()?;
        let project = book.get_or_err(id)?;
        log::info!("loaded project '{}' ({})", project.project_name, id);
        ResolvedInput {
            input: project.input.clone(),
            project_name: Some(project.project_name.clone()),
        }
    } else {
        let profile = data.load_profile()?;
        log::info!("no input given, starting from profile defaults");
        ResolvedInput {
            input: InvestmentInput::from_profile(&profile),
            project_name: None,
        }
    };

    apply_overrides(&mut resolved.input, args);
    Ok(resolved)
}

fn apply_overrides(input: &mut InvestmentInput, args: &InputArgs) {
    if let Some(v) = args.purchase_price {
        input.purchase_price = v;
    }
    if let Some(v) = args.monthly_rent {
        input.monthly_rent = v;
    }
    if let Some(v) = args.loan_amount {
        input.loan_amount = v;
    }
    if let Some(v) = args.loan_rate {
        input.loan_rate = v;
    }
    if let Some(v) = args.loan_duration_years {
        input.loan_duration_years = v;
    }
    if let Some(v) = args.rental_type {
        input.rental_type = v.into();
    }
    if let Some(v) = args.tax_regime {
        input.tax_regime = v.into();
    }
    if let Some(v) = args.tmi {
        input.tmi = v;
    }
    if let Some(v) = args.personal_cash {
        input.personal_cash_invested = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let mut input = InvestmentInput::from_profile(&Default::default());
        let args = InputArgs {
            monthly_rent: Some(dec!(950)),
            rental_type: Some(RentalTypeArg::Bare),
            ..Default::default()
        };
        apply_overrides(&mut input, &args);
        assert_eq!(input.monthly_rent, dec!(950));
        assert_eq!(input.rental_type, RentalType::Bare);
        assert_eq!(input.purchase_price, dec!(100000));
    }

    #[test]
    fn test_saved_project_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let mut book = rentaloc_core::projects::ProjectBook::new();
        let mut saved_input = InvestmentInput::default();
        saved_input.purchase_price = dec!(210000);
        let id = book.save(None, Some("Maison"), saved_input, chrono::Utc::now()).id;
        data.save_projects(&book).unwrap();

        let args = InputArgs {
            project: Some(id),
            ..Default::default()
        };
        let resolved = resolve_with(&args, &data, None).unwrap();
        assert_eq!(resolved.input.purchase_price, dec!(210000));
        assert_eq!(resolved.project_name.as_deref(), Some("Maison"));
    }

    #[test]
    fn test_profile_defaults_when_nothing_given() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let args = InputArgs {
            tmi: Some(dec!(11)),
            ..Default::default()
        };
        let resolved = resolve_with(&args, &data, None).unwrap();
        assert_eq!(resolved.input.loan_duration_years, 20);
        assert_eq!(resolved.input.tmi, dec!(11));
        assert!(resolved.project_name.is_none());
    }
}
