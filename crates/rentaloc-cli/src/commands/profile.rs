use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value;

use rentaloc_core::profile::UserProfile;

use super::{RentalTypeArg, TaxRegimeArg};
use crate::storage::DataDir;

/// Investor profile commands
#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Print the stored profile (defaults when none was saved)
    Show,
    /// Update profile fields and save
    Set(ProfileSetArgs),
    /// Restore the default profile
    Reset,
}

#[derive(Args, Default)]
pub struct ProfileSetArgs {
    /// Marginal income tax rate, in percent
    #[arg(long)]
    pub tmi: Option<Decimal>,

    #[arg(long, value_enum)]
    pub tax_regime: Option<TaxRegimeArg>,

    #[arg(long, value_enum)]
    pub rental_type: Option<RentalTypeArg>,

    /// Default annual loan rate, in percent
    #[arg(long)]
    pub loan_rate: Option<Decimal>,

    /// Default loan duration in years
    #[arg(long)]
    pub loan_duration: Option<u32>,

    /// Default borrower insurance rate, in percent
    #[arg(long)]
    pub loan_insurance: Option<Decimal>,

    /// Default notary fees rate, in percent
    #[arg(long)]
    pub notary_rate: Option<Decimal>,

    /// Default annual PNO insurance premium
    #[arg(long)]
    pub pno_cost: Option<Decimal>,
}

pub fn run_profile(args: ProfileArgs, data: &DataDir) -> Result<Value, Box<dyn std::error::Error>> {
    let profile = match args.command {
        ProfileCommand::Show => data.load_profile()?,
        ProfileCommand::Set(set) => {
            let mut profile = data.load_profile()?;
            apply(&mut profile, &set);
            data.save_profile(&profile)?;
            profile
        }
        ProfileCommand::Reset => {
            let profile = UserProfile::default();
            data.save_profile(&profile)?;
            profile
        }
    };
    Ok(serde_json::to_value(profile)?)
}

fn apply(profile: &mut UserProfile, set: &ProfileSetArgs) {
    if let Some(v) = set.tmi {
        profile.tmi = v;
    }
    if let Some(v) = set.tax_regime {
        profile.tax_regime = v.into();
    }
    if let Some(v) = set.rental_type {
        profile.rental_type = v.into();
    }
    if let Some(v) = set.loan_rate {
        profile.default_loan_rate = v;
    }
    if let Some(v) = set.loan_duration {
        profile.default_loan_duration = v;
    }
    if let Some(v) = set.loan_insurance {
        profile.default_loan_insurance = v;
    }
    if let Some(v) = set.notary_rate {
        profile.default_notary_rate = v;
    }
    if let Some(v) = set.pno_cost {
        profile.default_pno_cost = v;
    }
}
