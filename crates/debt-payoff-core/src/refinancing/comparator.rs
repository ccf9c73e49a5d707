use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{amortized_payment, monthly_interest, PAYOFF_HORIZON_MONTHS, PAYOFF_TOLERANCE};
use crate::{DebtPayoffError, DebtPayoffResult, types::*};

const DEFAULT_NEW_TERM_MONTHS: Months = 60;
const SIGNIFICANT_SAVINGS: Money = dec!(1000);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinancingInput {
    pub current_balance: Money,
    pub current_monthly_payment: Money,
    /// Treated as 0% when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_annual_rate_percent: Option<Percent>,
    pub new_annual_rate_percent: Percent,
    /// Defaults to 60 months.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_term_months: Option<Months>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinancingScenario {
    pub current_monthly_payment: Money,
    pub new_monthly_payment: Money,
    pub current_total_interest: Money,
    pub new_total_interest: Money,
    pub interest_savings: Money,
    pub monthly_savings: Money,
    pub total_savings: Money,
    /// Simulated from the current terms.
    pub current_payoff_months: Months,
    /// The proposed term, taken as given.
    pub new_payoff_months: Months,
    pub time_saved_months: i64,
    /// False when the current payment never retires the balance within the
    /// payoff horizon; current-path figures then stop at the horizon.
    pub current_path_converged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinancingInsights {
    pub lowers_monthly_payment: bool,
    pub significant_savings: bool,
    pub pays_off_faster: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinancingAnalysis {
    #[serde(flatten)]
    pub scenario: RefinancingScenario,
    pub insights: RefinancingInsights,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare keeping a debt on its current terms against refinancing it at
/// `new_annual_rate_percent` over `new_term_months`.
pub fn compare_refinancing(
    current_balance: Money,
    current_monthly_payment: Money,
    current_annual_rate_percent: Percent,
    new_annual_rate_percent: Percent,
    new_term_months: Months,
) -> DebtPayoffResult<RefinancingScenario> {
    validate_terms(
        current_balance,
        current_monthly_payment,
        current_annual_rate_percent,
        new_annual_rate_percent,
        new_term_months,
    )?;

    let current = project_current_path(
        current_balance,
        current_monthly_payment,
        current_annual_rate_percent,
    )?;

    let mut new_monthly_payment =
        amortized_payment(current_balance, new_annual_rate_percent, new_term_months)?;
    if new_monthly_payment < Decimal::ZERO {
        warn!("refinancing: amortized payment {new_monthly_payment} clamped to zero");
        new_monthly_payment = Decimal::ZERO;
    }

    let overflow = |what: &str| {
        DebtPayoffError::FinancialImpossibility(format!("refinancing {what} overflows"))
    };
    let new_total_paid = new_monthly_payment
        .checked_mul(Decimal::from(new_term_months))
        .ok_or_else(|| overflow("new total paid"))?;
    let current_total_paid = current_monthly_payment
        .checked_mul(Decimal::from(current.months))
        .ok_or_else(|| overflow("current total paid"))?;

    let new_total_interest = new_total_paid - current_balance;
    let interest_savings = current
        .total_interest
        .checked_sub(new_total_interest)
        .ok_or_else(|| overflow("interest savings"))?;
    let monthly_savings = current_monthly_payment - new_monthly_payment;
    let total_savings = (current_total_paid - new_total_paid)
        .checked_add(interest_savings)
        .ok_or_else(|| overflow("total savings"))?;
    let time_saved_months = i64::from(current.months) - i64::from(new_term_months);

    debug!(
        "refinancing: current {} months / {} interest, new {} per month over {} months",
        current.months, current.total_interest, new_monthly_payment, new_term_months
    );

    Ok(RefinancingScenario {
        current_monthly_payment,
        new_monthly_payment,
        current_total_interest: current.total_interest,
        new_total_interest,
        interest_savings,
        monthly_savings,
        total_savings,
        current_payoff_months: current.months,
        new_payoff_months: new_term_months,
        time_saved_months,
        current_path_converged: current.converged,
    })
}

/// Envelope-producing wrapper around [`compare_refinancing`] with defaults
/// applied and the headline insights flagged.
pub fn analyze_refinancing(
    input: &RefinancingInput,
) -> DebtPayoffResult<ComputationOutput<RefinancingAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let current_rate = input.current_annual_rate_percent.unwrap_or(Decimal::ZERO);
    let new_term = input.new_term_months.unwrap_or(DEFAULT_NEW_TERM_MONTHS);

    let scenario = compare_refinancing(
        input.current_balance,
        input.current_monthly_payment,
        current_rate,
        input.new_annual_rate_percent,
        new_term,
    )?;

    if !scenario.current_path_converged {
        warnings.push(format!(
            "Current payment does not pay off the balance within {PAYOFF_HORIZON_MONTHS} months; current-path totals are truncated."
        ));
    }
    if scenario.monthly_savings <= Decimal::ZERO {
        warnings.push("Refinancing does not lower the monthly payment.".into());
    }

    let insights = RefinancingInsights {
        lowers_monthly_payment: scenario.monthly_savings > Decimal::ZERO,
        significant_savings: scenario.total_savings > SIGNIFICANT_SAVINGS,
        pays_off_faster: scenario.time_saved_months > 0,
    };

    let assumptions = serde_json::json!({
        "current_annual_rate_percent": current_rate.to_string(),
        "new_term_months": new_term,
        "payoff_horizon_months": PAYOFF_HORIZON_MONTHS,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinancing comparison (simulated current path vs level amortization)",
        &assumptions,
        warnings,
        elapsed,
        RefinancingAnalysis { scenario, insights },
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct CurrentPath {
    months: Months,
    total_interest: Money,
    converged: bool,
}

/// Month by month: accrue interest, then pay up to the current payment.
fn project_current_path(
    balance: Money,
    payment: Money,
    annual_rate_percent: Percent,
) -> DebtPayoffResult<CurrentPath> {
    let mut balance = balance;
    let mut months: Months = 0;
    let mut total_interest = Decimal::ZERO;

    while balance > PAYOFF_TOLERANCE && months < PAYOFF_HORIZON_MONTHS {
        months += 1;
        let interest = monthly_interest(balance, annual_rate_percent)?;
        let overflow = || {
            DebtPayoffError::FinancialImpossibility(format!(
                "current balance overflows in month {months}"
            ))
        };
        total_interest = total_interest.checked_add(interest).ok_or_else(overflow)?;
        balance = balance.checked_add(interest).ok_or_else(overflow)?;
        balance -= payment.min(balance);
    }

    let converged = balance <= PAYOFF_TOLERANCE;
    if !converged {
        warn!("refinancing: current path still owes {balance} after {months} months");
    }

    Ok(CurrentPath {
        months,
        total_interest,
        converged,
    })
}

fn validate_terms(
    balance: Money,
    payment: Money,
    current_rate: Percent,
    new_rate: Percent,
    new_term_months: Months,
) -> DebtPayoffResult<()> {
    if balance <= Decimal::ZERO {
        return Err(DebtPayoffError::InvalidInput {
            field: "current_balance".into(),
            reason: "Balance must be positive to refinance.".into(),
        });
    }
    if payment < Decimal::ZERO {
        return Err(DebtPayoffError::InvalidInput {
            field: "current_monthly_payment".into(),
            reason: "Monthly payment cannot be negative.".into(),
        });
    }
    if current_rate < Decimal::ZERO {
        return Err(DebtPayoffError::InvalidInput {
            field: "current_annual_rate_percent".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }
    if new_rate < Decimal::ZERO {
        return Err(DebtPayoffError::InvalidInput {
            field: "new_annual_rate_percent".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }
    if new_term_months == 0 {
        return Err(DebtPayoffError::InvalidInput {
            field: "new_term_months".into(),
            reason: "New term must be at least one month.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
