use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::simulator::{simulate_with_options, DebtRecord, ProjectionResult, SimulationOptions};
use crate::time_value::{add_months, share_percent, PAYOFF_HORIZON_MONTHS};
use crate::{DebtPayoffError, DebtPayoffResult, types::*};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// How the caller quoted the extra payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraPaymentFrequency {
    #[default]
    Monthly,
    /// Spread evenly over twelve months.
    Yearly,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentPolicy {
    #[serde(default)]
    pub extra_payment: Money,
    #[serde(default)]
    pub frequency: ExtraPaymentFrequency,
    #[serde(default)]
    pub accrue_interest: bool,
}

impl PaymentPolicy {
    /// Extra payment expressed per month.
    pub fn monthly_extra(&self) -> Money {
        match self.frequency {
            ExtraPaymentFrequency::Monthly => self.extra_payment,
            ExtraPaymentFrequency::Yearly => self.extra_payment / dec!(12),
        }
    }

    fn options(&self) -> SimulationOptions {
        SimulationOptions {
            accrue_interest: self.accrue_interest,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnowballInput {
    pub debts: Vec<DebtRecord>,
    #[serde(default)]
    pub policy: PaymentPolicy,
    /// Anchor for projected payoff dates. No dates are produced without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Scenario run alongside the minimum-payments-only baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub scenario: ProjectionResult,
    pub baseline: ProjectionResult,
    /// Negative only when the scenario is somehow slower than the baseline.
    pub months_saved: i64,
    pub money_saved: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtBreakdown {
    /// 1-based position in the payoff order.
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub balance: Money,
    pub minimum_payment: Money,
    pub share_of_total_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnowballAnalysis {
    pub total_debt: Money,
    pub total_minimum_payments: Money,
    pub extra_monthly_payment: Money,
    pub scenario: ProjectionResult,
    pub baseline: ProjectionResult,
    pub months_saved: i64,
    pub money_saved: Money,
    pub payoff_date: Option<NaiveDate>,
    pub baseline_payoff_date: Option<NaiveDate>,
    pub debt_breakdown: Vec<DebtBreakdown>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the extra-payment scenario and the zero-extra baseline over the same
/// debts and report what the extra payment buys.
pub fn compare_to_baseline(
    debts: &[DebtRecord],
    extra_monthly_payment: Money,
    options: &SimulationOptions,
) -> DebtPayoffResult<BaselineComparison> {
    let scenario = simulate_with_options(debts, extra_monthly_payment, options)?;
    let baseline = simulate_with_options(debts, Decimal::ZERO, options)?;

    let months_saved = i64::from(baseline.months_to_payoff) - i64::from(scenario.months_to_payoff);
    let money_saved = baseline.total_paid - scenario.total_paid;

    Ok(BaselineComparison {
        scenario,
        baseline,
        months_saved,
        money_saved,
    })
}

/// Full snowball analysis: totals, per-debt breakdown, scenario vs baseline
/// and projected payoff dates.
pub fn analyze_snowball(
    input: &SnowballInput,
) -> DebtPayoffResult<ComputationOutput<SnowballAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.policy.extra_payment < Decimal::ZERO {
        return Err(DebtPayoffError::InvalidInput {
            field: "policy.extra_payment".into(),
            reason: "Extra payment cannot be negative.".into(),
        });
    }

    let extra_monthly = input.policy.monthly_extra();
    let comparison = compare_to_baseline(&input.debts, extra_monthly, &input.policy.options())?;

    let total_debt: Money = input.debts.iter().map(|d| d.balance).sum();
    let total_minimum_payments: Money = input.debts.iter().map(|d| d.minimum_payment).sum();

    if input.debts.is_empty() || total_debt.is_zero() {
        warnings.push("No outstanding debt to pay off.".into());
    } else if (total_minimum_payments + extra_monthly).is_zero() {
        warnings.push("Monthly payment pool is zero; balances never decrease.".into());
    }
    if !comparison.scenario.converged {
        warnings.push(format!(
            "Debts are not paid off within {PAYOFF_HORIZON_MONTHS} months at the chosen payment."
        ));
    }
    if !comparison.baseline.converged {
        warnings.push(format!(
            "Minimum payments alone do not pay off the debts within {PAYOFF_HORIZON_MONTHS} months."
        ));
    }

    let payoff_date = projected_date(input.start_date, &comparison.scenario)?;
    let baseline_payoff_date = projected_date(input.start_date, &comparison.baseline)?;

    let debt_breakdown = build_breakdown(&input.debts, &comparison.scenario.payoff_order, total_debt);

    let output = SnowballAnalysis {
        total_debt,
        total_minimum_payments,
        extra_monthly_payment: extra_monthly,
        scenario: comparison.scenario,
        baseline: comparison.baseline,
        months_saved: comparison.months_saved,
        money_saved: comparison.money_saved,
        payoff_date,
        baseline_payoff_date,
        debt_breakdown,
    };

    let methodology = if input.policy.accrue_interest {
        "Debt Snowball (smallest balance first, fixed payment pool, monthly interest accrual)"
    } else {
        "Debt Snowball (smallest balance first, fixed payment pool, principal only)"
    };
    let assumptions = serde_json::json!({
        "extra_payment": input.policy.extra_payment.to_string(),
        "extra_payment_frequency": input.policy.frequency,
        "accrue_interest": input.policy.accrue_interest,
        "payoff_horizon_months": PAYOFF_HORIZON_MONTHS,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, &assumptions, warnings, elapsed, output))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Dates are only projected for runs that actually pay off.
fn projected_date(
    start_date: Option<NaiveDate>,
    projection: &ProjectionResult,
) -> DebtPayoffResult<Option<NaiveDate>> {
    match start_date {
        Some(start) if projection.converged => add_months(start, projection.months_to_payoff).map(Some),
        _ => Ok(None),
    }
}

fn build_breakdown(debts: &[DebtRecord], order: &[String], total_debt: Money) -> Vec<DebtBreakdown> {
    let mut remaining: Vec<&DebtRecord> = debts.iter().collect();
    let mut breakdown = Vec::with_capacity(debts.len());

    for id in order {
        let Some(pos) = remaining.iter().position(|d| &d.id == id) else {
            continue;
        };
        let debt = remaining.remove(pos);
        breakdown.push(DebtBreakdown {
            rank: breakdown.len() + 1,
            id: debt.id.clone(),
            name: debt.name.clone(),
            balance: debt.balance,
            minimum_payment: debt.minimum_payment,
            share_of_total_percent: share_percent(debt.balance, total_debt),
        });
    }

    breakdown
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn debt(id: &str, balance: Money, minimum_payment: Money) -> DebtRecord {
        DebtRecord {
            id: id.into(),
            name: id.to_uppercase(),
            balance,
            minimum_payment,
            interest_rate_percent: None,
        }
    }

    fn base_input() -> SnowballInput {
        SnowballInput {
            debts: vec![debt("car", dec!(1_500), dec!(75)), debt("card", dec!(500), dec!(50))],
            policy: PaymentPolicy {
                extra_payment: dec!(125),
                frequency: ExtraPaymentFrequency::Monthly,
                accrue_interest: false,
            },
            start_date: NaiveDate::from_ymd_opt(2025, 1, 15),
        }
    }

    #[test]
    fn test_yearly_extra_spread_monthly() {
        let policy = PaymentPolicy {
            extra_payment: dec!(1_200),
            frequency: ExtraPaymentFrequency::Yearly,
            accrue_interest: false,
        };
        assert_eq!(policy.monthly_extra(), dec!(100));
    }

    #[test]
    fn test_compare_to_baseline_savings() {
        let input = base_input();
        let cmp = compare_to_baseline(&input.debts, dec!(125), &SimulationOptions::default()).unwrap();
        assert_eq!(cmp.baseline.months_to_payoff, 16);
        assert_eq!(cmp.scenario.months_to_payoff, 8);
        assert_eq!(cmp.months_saved, 8);
        // Principal only: both runs pay exactly the principal
        assert_eq!(cmp.money_saved, Decimal::ZERO);
    }

    #[test]
    fn test_analysis_totals_and_dates() {
        let result = analyze_snowball(&base_input()).unwrap();
        let out = &result.result;
        assert_eq!(out.total_debt, dec!(2_000));
        assert_eq!(out.total_minimum_payments, dec!(125));
        assert_eq!(out.payoff_date, NaiveDate::from_ymd_opt(2025, 9, 15));
        assert_eq!(out.baseline_payoff_date, NaiveDate::from_ymd_opt(2026, 5, 15));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_breakdown_in_snowball_order() {
        let result = analyze_snowball(&base_input()).unwrap();
        let breakdown = &result.result.debt_breakdown;
        assert_eq!(breakdown[0].id, "card");
        assert_eq!(breakdown[0].rank, 1);
        assert_eq!(breakdown[0].share_of_total_percent, dec!(25));
        assert_eq!(breakdown[1].id, "car");
        assert_eq!(breakdown[1].share_of_total_percent, dec!(75));
    }

    #[test]
    fn test_no_debt_warns() {
        let input = SnowballInput {
            debts: vec![],
            policy: PaymentPolicy::default(),
            start_date: None,
        };
        let result = analyze_snowball(&input).unwrap();
        assert_eq!(result.result.scenario.months_to_payoff, 0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_non_convergence_reported_without_date() {
        let input = SnowballInput {
            debts: vec![debt("a", dec!(100), Decimal::ZERO)],
            policy: PaymentPolicy::default(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        };
        let result = analyze_snowball(&input).unwrap();
        assert!(!result.result.scenario.converged);
        assert_eq!(result.result.payoff_date, None);
        assert!(result.warnings.iter().any(|w| w.contains("600")));
    }

    #[test]
    fn test_negative_policy_extra_rejected() {
        let mut input = base_input();
        input.policy.extra_payment = dec!(-1);
        let err = analyze_snowball(&input).unwrap_err();
        match err {
            DebtPayoffError::InvalidInput { field, .. } => assert_eq!(field, "policy.extra_payment"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_methodology_names_interest_mode() {
        let mut input = base_input();
        input.policy.accrue_interest = true;
        let result = analyze_snowball(&input).unwrap();
        assert!(result.methodology.contains("interest accrual"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
    }
}
