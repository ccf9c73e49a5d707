use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use debt_payoff_core::refinancing::{self, DebtType, RefinancingInput};

use crate::input;

/// Arguments for the refinancing comparison
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RefinanceArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Current outstanding balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Current monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Current annual rate in percent (e.g. 18 for 18%)
    #[arg(long)]
    pub current_rate: Option<Decimal>,

    /// Proposed annual rate in percent
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// Proposed term in months (default 60)
    #[arg(long)]
    pub term: Option<u32>,
}

/// Arguments for the refinancing rate guide
#[derive(Args)]
pub struct RateGuideArgs {
    /// Credit score (300-850)
    #[arg(long)]
    pub credit_score: u32,

    /// Kind of debt being refinanced
    #[arg(long, value_enum, default_value = "credit-card")]
    pub debt_type: DebtTypeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DebtTypeArg {
    CreditCard,
    PersonalLoan,
    AutoLoan,
    Mortgage,
}

impl From<DebtTypeArg> for DebtType {
    fn from(arg: DebtTypeArg) -> Self {
        match arg {
            DebtTypeArg::CreditCard => DebtType::CreditCard,
            DebtTypeArg::PersonalLoan => DebtType::PersonalLoan,
            DebtTypeArg::AutoLoan => DebtType::AutoLoan,
            DebtTypeArg::Mortgage => DebtType::Mortgage,
        }
    }
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinancingInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RefinancingInput {
            current_balance: args.balance
                .ok_or("--balance is required (or provide --input)")?,
            current_monthly_payment: args.payment
                .ok_or("--payment is required (or provide --input)")?,
            current_annual_rate_percent: args.current_rate,
            new_annual_rate_percent: args.new_rate
                .ok_or("--new-rate is required (or provide --input)")?,
            new_term_months: args.term,
        }
    };

    let result = refinancing::analyze_refinancing(&refi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rate_guide(args: RateGuideArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let band = refinancing::estimated_rate_range(args.credit_score, args.debt_type.into())?;
    Ok(serde_json::json!({ "result": band }))
}
