pub mod comparator;
pub mod rate_guidance;

pub use comparator::{
    analyze_refinancing, compare_refinancing, RefinancingAnalysis, RefinancingInput,
    RefinancingInsights, RefinancingScenario,
};
pub use rate_guidance::{estimated_rate_range, DebtType, RateBand};
