use clap::Args;
use serde_json::Value;

use debt_payoff_core::budget::{self, BudgetItem};

use crate::input;

/// Arguments for the debt impact summary
#[derive(Args)]
pub struct DebtImpactArgs {
    /// Path to JSON/YAML file holding an array of budget items
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_debt_impact(args: DebtImpactArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let items: Vec<BudgetItem> = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for debt impact analysis".into());
    };

    let result = budget::analyze_debt_impact(&items)?;
    let totals = budget::budget_totals(&items);

    let mut value = serde_json::to_value(result)?;
    if let Some(map) = value.as_object_mut() {
        map.insert("budget_totals".into(), serde_json::to_value(totals)?);
    }
    Ok(value)
}
