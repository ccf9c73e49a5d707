use napi::Result as NapiResult;
use napi_derive::napi;

use debt_payoff_core::budget::{self, BudgetItem};
use debt_payoff_core::refinancing::{self, DebtType};
use debt_payoff_core::snowball::{self, DebtRecord, SimulationOptions};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Snowball
// ---------------------------------------------------------------------------

#[napi]
pub fn snowball_analysis(input_json: String) -> NapiResult<String> {
    let input: snowball::SnowballInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = snowball::analyze_snowball(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct SimulateBindingInput {
    debts: Vec<DebtRecord>,
    #[serde(default)]
    extra_monthly_payment: rust_decimal::Decimal,
    #[serde(flatten)]
    options: SimulationOptions,
}

/// Bare projection without the envelope, for recomputing on every slider move.
#[napi]
pub fn simulate_payoff(input_json: String) -> NapiResult<String> {
    let input: SimulateBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = snowball::simulate_with_options(
        &input.debts,
        input.extra_monthly_payment,
        &input.options,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Refinancing
// ---------------------------------------------------------------------------

#[napi]
pub fn refinancing_analysis(input_json: String) -> NapiResult<String> {
    let input: refinancing::RefinancingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = refinancing::analyze_refinancing(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn estimated_rate_range(credit_score: u32, debt_type: String) -> NapiResult<String> {
    let debt_type: DebtType =
        serde_json::from_value(serde_json::Value::String(debt_type)).map_err(to_napi_error)?;
    let band = refinancing::estimated_rate_range(credit_score, debt_type).map_err(to_napi_error)?;
    serde_json::to_string(&band).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[napi]
pub fn debt_impact(input_json: String) -> NapiResult<String> {
    let items: Vec<BudgetItem> = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = budget::analyze_debt_impact(&items).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
