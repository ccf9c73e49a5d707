//! Snowball payoff projection: smallest balance first, one pooled payment.

pub mod analysis;
pub mod simulator;

pub use analysis::{
    analyze_snowball, compare_to_baseline, BaselineComparison, DebtBreakdown,
    ExtraPaymentFrequency, PaymentPolicy, SnowballAnalysis, SnowballInput,
};
pub use simulator::{
    simulate, simulate_with_options, DebtRecord, MonthSnapshot, ProjectionResult,
    SimulationOptions,
};
