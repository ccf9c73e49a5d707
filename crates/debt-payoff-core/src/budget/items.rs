use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::snowball::{DebtRecord, PaymentPolicy, SnowballInput};
use crate::{DebtPayoffError, DebtPayoffResult, types::*};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
    OneTime,
}

impl Recurrence {
    /// Multiplier that turns one occurrence into a monthly amount.
    pub fn monthly_factor(self) -> Decimal {
        match self {
            // 52 weeks / 12, not the single occurrence a weekly row holds
            Recurrence::Weekly => dec!(4.33),
            Recurrence::Biweekly => dec!(2.17),
            Recurrence::Monthly | Recurrence::OneTime => Decimal::ONE,
            Recurrence::Yearly => Decimal::ONE / dec!(12),
        }
    }
}

/// A budget row as stored by the household app. Income and bills share the
/// shape; debts additionally carry an outstanding balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Per-occurrence amount; for debts, the minimum payment.
    pub amount: Money,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub is_income: bool,
    #[serde(default)]
    pub is_debt: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outstanding_balance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Percent>,
}

impl BudgetItem {
    /// Amount normalised to a monthly figure by recurrence (absent = monthly).
    pub fn monthly_amount(&self) -> Money {
        let factor = self
            .recurrence
            .map(Recurrence::monthly_factor)
            .unwrap_or(Decimal::ONE);
        self.amount * factor
    }

    /// Non-income debt rows that still owe something.
    pub fn is_open_debt(&self) -> bool {
        !self.is_income
            && self.is_debt
            && self.outstanding_balance.is_some_and(|b| b > Decimal::ZERO)
    }

    fn display_name(&self) -> String {
        if self.description.trim().is_empty() {
            self.category.clone()
        } else {
            self.description.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetTotals {
    pub total_amount: Money,
    pub paid_amount: Money,
    pub unpaid_amount: Money,
    pub income_items: usize,
    pub expense_items: usize,
}

/// Snowball request expressed over raw budget rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSnowballInput {
    pub budget_items: Vec<BudgetItem>,
    #[serde(default)]
    pub policy: PaymentPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl BudgetSnowballInput {
    pub fn into_snowball_input(self) -> DebtPayoffResult<SnowballInput> {
        Ok(SnowballInput {
            debts: debts_from_budget_items(&self.budget_items)?,
            policy: self.policy,
            start_date: self.start_date,
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Pull the open debts out of a budget: minimum payment is the row amount,
/// the label falls back to the category when the description is blank.
pub fn debts_from_budget_items(items: &[BudgetItem]) -> DebtPayoffResult<Vec<DebtRecord>> {
    validate_items(items)?;
    Ok(items
        .iter()
        .filter(|item| item.is_open_debt())
        .map(|item| DebtRecord {
            id: item.id.clone(),
            name: item.display_name(),
            balance: item.outstanding_balance.unwrap_or(Decimal::ZERO),
            minimum_payment: item.amount,
            interest_rate_percent: item.interest_rate,
        })
        .collect())
}

/// Raw (non-normalised) totals across every row, split by paid flag.
pub fn budget_totals(items: &[BudgetItem]) -> BudgetTotals {
    let total_amount: Money = items.iter().map(|i| i.amount).sum();
    let paid_amount: Money = items.iter().filter(|i| i.paid).map(|i| i.amount).sum();
    let income_items = items.iter().filter(|i| i.is_income).count();

    BudgetTotals {
        total_amount,
        paid_amount,
        unpaid_amount: total_amount - paid_amount,
        income_items,
        expense_items: items.len() - income_items,
    }
}

pub(crate) fn validate_items(items: &[BudgetItem]) -> DebtPayoffResult<()> {
    for item in items {
        if item.amount < Decimal::ZERO {
            return Err(DebtPayoffError::InvalidInput {
                field: format!("budget_items[{}].amount", item.id),
                reason: "Amount cannot be negative.".into(),
            });
        }
        if item.outstanding_balance.is_some_and(|b| b < Decimal::ZERO) {
            return Err(DebtPayoffError::InvalidInput {
                field: format!("budget_items[{}].outstanding_balance", item.id),
                reason: "Outstanding balance cannot be negative.".into(),
            });
        }
        if item.interest_rate.is_some_and(|r| r < Decimal::ZERO) {
            return Err(DebtPayoffError::InvalidInput {
                field: format!("budget_items[{}].interest_rate", item.id),
                reason: "Interest rate cannot be negative.".into(),
            });
        }
    }
    Ok(())
}
