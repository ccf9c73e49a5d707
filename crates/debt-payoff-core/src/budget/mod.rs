//! Budget rows as the household app stores them, and the summaries derived
//! from them.

pub mod impact;
pub mod items;

pub use impact::{analyze_debt_impact, DebtImpact, DebtSeverity};
pub use items::{
    budget_totals, debts_from_budget_items, BudgetItem, BudgetSnowballInput, BudgetTotals,
    Recurrence,
};
