use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use debt_payoff_core::budget::BudgetSnowballInput;
use debt_payoff_core::snowball::{
    self, DebtRecord, ExtraPaymentFrequency, PaymentPolicy, SnowballInput,
};

use crate::input;

/// Arguments for the snowball payoff projection
#[derive(Args)]
pub struct SnowballArgs {
    /// Path to JSON/YAML input file (debts + policy)
    #[arg(long)]
    pub input: Option<String>,

    /// Treat the input as raw budget items rather than debts
    #[arg(long)]
    pub from_budget: bool,

    /// Debt as id:balance:minimum[:rate_percent] (repeatable)
    #[arg(long = "debt")]
    pub debts: Vec<String>,

    /// Extra payment on top of the minimums
    #[arg(long, allow_negative_numbers = true)]
    pub extra: Option<Decimal>,

    /// The extra payment is a yearly amount (spread over 12 months)
    #[arg(long)]
    pub yearly: bool,

    /// Accrue monthly interest on each debt's rate
    #[arg(long)]
    pub accrue_interest: bool,

    /// First month of the projection (YYYY-MM-DD) for payoff dates
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_snowball(args: SnowballArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut snowball_input: SnowballInput = if let Some(ref path) = args.input {
        if args.from_budget {
            input::file::read_input::<BudgetSnowballInput>(path)?.into_snowball_input()?
        } else {
            input::file::read_input(path)?
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        if args.from_budget {
            serde_json::from_value::<BudgetSnowballInput>(data)?.into_snowball_input()?
        } else {
            serde_json::from_value(data)?
        }
    } else {
        if args.debts.is_empty() {
            return Err("--debt is required (or provide --input)".into());
        }
        let debts = args
            .debts
            .iter()
            .map(|raw| parse_debt(raw))
            .collect::<Result<Vec<_>, _>>()?;
        SnowballInput {
            debts,
            policy: PaymentPolicy::default(),
            start_date: None,
        }
    };

    // Flags override whatever the file or stdin supplied.
    if let Some(extra) = args.extra {
        snowball_input.policy.extra_payment = extra;
    }
    if args.yearly {
        snowball_input.policy.frequency = ExtraPaymentFrequency::Yearly;
    }
    if args.accrue_interest {
        snowball_input.policy.accrue_interest = true;
    }
    if args.start_date.is_some() {
        snowball_input.start_date = args.start_date;
    }

    let result = snowball::analyze_snowball(&snowball_input)?;
    Ok(serde_json::to_value(result)?)
}

fn parse_debt(raw: &str) -> Result<DebtRecord, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!(
            "Debt must be id:balance:minimum[:rate_percent], got '{}'",
            raw
        )
        .into());
    }
    Ok(DebtRecord {
        id: parts[0].to_string(),
        name: parts[0].to_string(),
        balance: parts[1].parse()?,
        minimum_payment: parts[2].parse()?,
        interest_rate_percent: parts.get(3).map(|r| r.parse::<Decimal>()).transpose()?,
    })
}
