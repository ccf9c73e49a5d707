use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::items::{validate_items, BudgetItem};
use crate::time_value::{monthly_interest, share_percent};
use crate::{DebtPayoffResult, types::*};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Debt-to-income risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtSeverity {
    Low,
    Moderate,
    High,
    Critical,
}

impl DebtSeverity {
    pub fn from_debt_to_income(ratio_percent: Decimal) -> Self {
        if ratio_percent >= dec!(40) {
            DebtSeverity::Critical
        } else if ratio_percent >= dec!(30) {
            DebtSeverity::High
        } else if ratio_percent >= dec!(20) {
            DebtSeverity::Moderate
        } else {
            DebtSeverity::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtImpact {
    pub debt_count: usize,
    pub total_monthly_income: Money,
    pub total_debt_payments: Money,
    pub total_debt_balance: Money,
    pub monthly_interest: Money,
    pub annual_interest: Money,
    /// Payments plus this month's interest.
    pub monthly_debt_cost: Money,
    pub debt_to_income_percent: Decimal,
    /// Monthly interest as a share of the outstanding balance.
    pub interest_percent_of_balance: Decimal,
    pub available_after_debt: Money,
    pub severity: DebtSeverity,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// How much of the household's monthly income its debts consume.
pub fn analyze_debt_impact(
    items: &[BudgetItem],
) -> DebtPayoffResult<ComputationOutput<DebtImpact>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_items(items)?;

    let total_monthly_income: Money = items
        .iter()
        .filter(|i| i.is_income)
        .map(BudgetItem::monthly_amount)
        .sum();

    let debts: Vec<&BudgetItem> = items.iter().filter(|i| i.is_open_debt()).collect();

    let total_debt_payments: Money = debts.iter().map(|d| d.amount).sum();
    let total_debt_balance: Money = debts
        .iter()
        .map(|d| d.outstanding_balance.unwrap_or(Decimal::ZERO))
        .sum();

    let mut monthly_interest_total = Decimal::ZERO;
    for debt in &debts {
        if let (Some(balance), Some(rate)) = (debt.outstanding_balance, debt.interest_rate) {
            monthly_interest_total += monthly_interest(balance, rate)?;
        }
    }

    if debts.is_empty() {
        warnings.push("No open debts in the budget.".into());
    }
    if total_monthly_income.is_zero() && !debts.is_empty() {
        warnings.push("No income recorded; debt-to-income ratio reported as 0.".into());
    }
    let missing_rates = debts.iter().filter(|d| d.interest_rate.is_none()).count();
    if missing_rates > 0 {
        warnings.push(format!(
            "{missing_rates} debt(s) have no interest rate and add no interest cost."
        ));
    }

    let monthly_debt_cost = total_debt_payments + monthly_interest_total;
    let debt_to_income_percent = share_percent(total_debt_payments, total_monthly_income);

    let output = DebtImpact {
        debt_count: debts.len(),
        total_monthly_income,
        total_debt_payments,
        total_debt_balance,
        monthly_interest: monthly_interest_total,
        annual_interest: monthly_interest_total * dec!(12),
        monthly_debt_cost,
        debt_to_income_percent,
        interest_percent_of_balance: share_percent(monthly_interest_total, total_debt_balance),
        available_after_debt: total_monthly_income - monthly_debt_cost,
        severity: DebtSeverity::from_debt_to_income(debt_to_income_percent),
    };

    let assumptions = serde_json::json!({
        "income_normalisation": {
            "weekly": "4.33",
            "biweekly": "2.17",
            "monthly": "1",
            "yearly": "1/12",
        },
        "severity_thresholds_percent": { "moderate": 20, "high": 30, "critical": 40 },
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Debt impact (debt-to-income and monthly interest cost)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
