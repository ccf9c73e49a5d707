pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "snowball")]
pub mod snowball;

#[cfg(feature = "refinancing")]
pub mod refinancing;

#[cfg(feature = "budget")]
pub mod budget;

pub use error::DebtPayoffError;
pub use types::*;

/// Standard result type for all debt-payoff operations
pub type DebtPayoffResult<T> = Result<T, DebtPayoffError>;
