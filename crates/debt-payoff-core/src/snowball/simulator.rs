use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{monthly_interest, PAYOFF_HORIZON_MONTHS, PAYOFF_TOLERANCE};
use crate::{DebtPayoffError, DebtPayoffResult, types::*};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// One debt as supplied by the caller. Never mutated by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub balance: Money,
    pub minimum_payment: Money,
    /// Annual percentage rate. Only read when interest accrual is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate_percent: Option<Percent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Accrue monthly interest on each open debt before payments are applied.
    /// Off by default: the snowball projection has always been principal-only.
    #[serde(default)]
    pub accrue_interest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    pub month: Months,
    /// Sum of all balances after this month's payments.
    pub remaining_balance: Money,
    /// Total paid across all debts this month.
    pub payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Month in which the last balance reached zero, or the horizon when
    /// `converged` is false.
    pub months_to_payoff: Months,
    pub total_paid: Money,
    pub total_interest: Money,
    pub converged: bool,
    /// Debt ids in the order they are targeted.
    pub payoff_order: Vec<String>,
    pub timeline: Vec<MonthSnapshot>,
}

impl ProjectionResult {
    fn empty() -> Self {
        ProjectionResult {
            months_to_payoff: 0,
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            converged: true,
            payoff_order: Vec::new(),
            timeline: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project a snowball payoff: minimums plus `extra_monthly_payment`, pooled
/// and applied to the smallest balance first. Pass zero extra for the
/// minimum-payments baseline.
pub fn simulate(
    debts: &[DebtRecord],
    extra_monthly_payment: Money,
) -> DebtPayoffResult<ProjectionResult> {
    simulate_with_options(debts, extra_monthly_payment, &SimulationOptions::default())
}

/// Same as [`simulate`] with explicit options.
///
/// The debt order is fixed by balance at the start and the monthly pool is the
/// sum of every minimum plus the extra payment. Neither is
/// re-derived as debts retire, so a retired debt's minimum rolls into the next
/// target automatically.
pub fn simulate_with_options(
    debts: &[DebtRecord],
    extra_monthly_payment: Money,
    options: &SimulationOptions,
) -> DebtPayoffResult<ProjectionResult> {
    validate_debts(debts)?;
    if extra_monthly_payment < Decimal::ZERO {
        return Err(DebtPayoffError::InvalidInput {
            field: "extra_monthly_payment".into(),
            reason: "Extra payment cannot be negative.".into(),
        });
    }

    if debts.is_empty() {
        return Ok(ProjectionResult::empty());
    }

    let mut ledger: Vec<DebtRecord> = debts
        .iter()
        .map(|d| {
            let mut debt = d.clone();
            if debt.balance <= PAYOFF_TOLERANCE {
                debt.balance = Decimal::ZERO;
            }
            debt
        })
        .collect();
    // Vec::sort_by is stable: equal balances keep the caller's order.
    ledger.sort_by(|a, b| a.balance.cmp(&b.balance));

    let payoff_order: Vec<String> = ledger.iter().map(|d| d.id.clone()).collect();
    let total_minimum_payments: Money = ledger.iter().map(|d| d.minimum_payment).sum();
    let monthly_pool = total_minimum_payments + extra_monthly_payment;

    debug!(
        "snowball: {} debts, monthly pool {} (minimums {} + extra {}), accrue_interest={}",
        ledger.len(),
        monthly_pool,
        total_minimum_payments,
        extra_monthly_payment,
        options.accrue_interest
    );

    let mut timeline: Vec<MonthSnapshot> = Vec::new();
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut month: Months = 0;

    while has_open_balance(&ledger) && month < PAYOFF_HORIZON_MONTHS {
        month += 1;
        let mut available = monthly_pool;
        let mut month_payment = Decimal::ZERO;

        for debt in ledger.iter_mut() {
            if debt.balance <= Decimal::ZERO {
                continue;
            }

            if options.accrue_interest {
                let rate = debt.interest_rate_percent.unwrap_or(Decimal::ZERO);
                let interest = monthly_interest(debt.balance, rate)?;
                debt.balance = debt.balance.checked_add(interest).ok_or_else(|| {
                    DebtPayoffError::FinancialImpossibility(format!(
                        "balance of debt '{}' overflows in month {month}",
                        debt.id
                    ))
                })?;
                total_interest += interest;
            }

            let payment = available.min(debt.balance);
            debt.balance -= payment;
            available -= payment;
            total_paid += payment;
            month_payment += payment;

            if debt.balance <= PAYOFF_TOLERANCE {
                debt.balance = Decimal::ZERO;
            }
        }

        timeline.push(MonthSnapshot {
            month,
            remaining_balance: ledger.iter().map(|d| d.balance).sum(),
            payment: month_payment,
        });
    }

    let converged = !has_open_balance(&ledger);
    if converged {
        debug!("snowball: paid off in {month} months, total paid {total_paid}");
    } else {
        warn!(
            "snowball: balances remain after {PAYOFF_HORIZON_MONTHS} months with a monthly pool of {monthly_pool}"
        );
    }

    Ok(ProjectionResult {
        months_to_payoff: month,
        total_paid,
        total_interest,
        converged,
        payoff_order,
        timeline,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn has_open_balance(ledger: &[DebtRecord]) -> bool {
    ledger.iter().any(|d| d.balance > PAYOFF_TOLERANCE)
}

fn validate_debts(debts: &[DebtRecord]) -> DebtPayoffResult<()> {
    for debt in debts {
        if debt.balance < Decimal::ZERO {
            return Err(DebtPayoffError::InvalidInput {
                field: format!("debts[{}].balance", debt.id),
                reason: "Balance cannot be negative.".into(),
            });
        }
        if debt.minimum_payment < Decimal::ZERO {
            return Err(DebtPayoffError::InvalidInput {
                field: format!("debts[{}].minimum_payment", debt.id),
                reason: "Minimum payment cannot be negative.".into(),
            });
        }
        if let Some(rate) = debt.interest_rate_percent {
            if rate < Decimal::ZERO {
                return Err(DebtPayoffError::InvalidInput {
                    field: format!("debts[{}].interest_rate_percent", debt.id),
                    reason: "Interest rate cannot be negative.".into(),
                });
            }
        }
    }
    Ok(())
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
            name: format!("Debt {id}"),
            balance,
            minimum_payment,
            interest_rate_percent: None,
        }
    }

    fn two_debts() -> Vec<DebtRecord> {
        vec![debt("b", dec!(1_500), dec!(75)), debt("a", dec!(500), dec!(50))]
    }

    #[test]
    fn test_empty_debts_is_terminal() {
        let result = simulate(&[], dec!(100)).unwrap();
        assert_eq!(result.months_to_payoff, 0);
        assert_eq!(result.total_paid, Decimal::ZERO);
        assert!(result.timeline.is_empty());
        assert!(result.converged);
    }

    #[test]
    fn test_smallest_balance_targeted_first() {
        let result = simulate(&two_debts(), Decimal::ZERO).unwrap();
        assert_eq!(result.payoff_order, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_smallest_debt_absorbs_whole_pool() {
        let result = simulate(&two_debts(), Decimal::ZERO).unwrap();
        // Pool = 125; A (500) takes it all for 4 months
        let first = &result.timeline[0];
        assert_eq!(first.payment, dec!(125));
        assert_eq!(first.remaining_balance, dec!(1_875));
        assert_eq!(result.timeline[3].remaining_balance, dec!(1_500));
    }

    #[test]
    fn test_two_debt_trace_months() {
        let result = simulate(&two_debts(), Decimal::ZERO).unwrap();
        // 2,000 / 125 = 16 months
        assert_eq!(result.months_to_payoff, 16);
        assert_eq!(result.timeline.len(), 16);
        assert_eq!(result.total_paid, dec!(2_000));
        assert_eq!(result.total_interest, Decimal::ZERO);
        assert!(result.converged);
    }

    #[test]
    fn test_partial_final_month() {
        let debts = vec![debt("a", dec!(260), dec!(100))];
        let result = simulate(&debts, Decimal::ZERO).unwrap();
        assert_eq!(result.months_to_payoff, 3);
        assert_eq!(result.timeline[2].payment, dec!(60));
        assert_eq!(result.timeline[2].remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_extra_payment_shortens_payoff() {
        let baseline = simulate(&two_debts(), Decimal::ZERO).unwrap();
        let faster = simulate(&two_debts(), dec!(125)).unwrap();
        assert_eq!(faster.months_to_payoff, 8);
        assert!(faster.months_to_payoff < baseline.months_to_payoff);
    }

    #[test]
    fn test_zero_balance_debt_contributes_nothing() {
        let debts = vec![debt("done", Decimal::ZERO, dec!(40)), debt("a", dec!(100), dec!(10))];
        let result = simulate(&debts, Decimal::ZERO).unwrap();
        // Pool still includes the retired debt's minimum: 50 per month
        assert_eq!(result.months_to_payoff, 2);
        assert_eq!(result.total_paid, dec!(100));
    }

    #[test]
    fn test_horizon_cap_without_payments() {
        let debts = vec![debt("a", dec!(100), Decimal::ZERO)];
        let result = simulate(&debts, Decimal::ZERO).unwrap();
        assert_eq!(result.months_to_payoff, PAYOFF_HORIZON_MONTHS);
        assert_eq!(result.timeline.len(), PAYOFF_HORIZON_MONTHS as usize);
        assert!(!result.converged);
    }

    #[test]
    fn test_sub_cent_remainder_snaps_to_zero() {
        let debts = vec![debt("a", dec!(100.005), dec!(100))];
        let result = simulate(&debts, Decimal::ZERO).unwrap();
        assert_eq!(result.months_to_payoff, 1);
        assert_eq!(result.timeline[0].remaining_balance, Decimal::ZERO);
        assert_eq!(result.total_paid, dec!(100));
    }

    #[test]
    fn test_interest_ignored_by_default() {
        let mut debts = two_debts();
        debts[0].interest_rate_percent = Some(dec!(24));
        let result = simulate(&debts, Decimal::ZERO).unwrap();
        assert_eq!(result.total_interest, Decimal::ZERO);
        assert_eq!(result.months_to_payoff, 16);
    }

    #[test]
    fn test_interest_accrual_option() {
        let debts = vec![DebtRecord {
            interest_rate_percent: Some(dec!(12)),
            ..debt("a", dec!(1_000), dec!(100))
        }];
        let options = SimulationOptions { accrue_interest: true };
        let result = simulate_with_options(&debts, Decimal::ZERO, &options).unwrap();
        // First month: 1% of 1,000 accrues before the payment
        assert_eq!(result.timeline[0].remaining_balance, dec!(910));
        assert!(result.total_interest > Decimal::ZERO);
        assert_eq!(result.total_paid, dec!(1_000) + result.total_interest);
        assert_eq!(result.months_to_payoff, 11);
    }

    #[test]
    fn test_negative_balance_rejected() {
        let debts = vec![debt("a", dec!(-1), dec!(10))];
        let err = simulate(&debts, Decimal::ZERO).unwrap_err();
        match err {
            DebtPayoffError::InvalidInput { field, .. } => assert_eq!(field, "debts[a].balance"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_extra_rejected() {
        let err = simulate(&two_debts(), dec!(-5)).unwrap_err();
        assert!(matches!(err, DebtPayoffError::InvalidInput { .. }));
    }

    #[test]
    fn test_identical_inputs_identical_results() {
        let a = simulate(&two_debts(), dec!(33.33)).unwrap();
        let b = simulate(&two_debts(), dec!(33.33)).unwrap();
        assert_eq!(a, b);
    }
}
