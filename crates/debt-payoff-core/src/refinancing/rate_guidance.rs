use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{DebtPayoffError, DebtPayoffResult, types::*};

const MIN_CREDIT_SCORE: u32 = 300;
const MAX_CREDIT_SCORE: u32 = 850;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    #[default]
    CreditCard,
    PersonalLoan,
    AutoLoan,
    Mortgage,
}

/// Typical new-rate band a borrower can expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub label: String,
    pub min_percent: Percent,
    /// `None` for the open-ended bottom tier.
    pub max_percent: Option<Percent>,
}

/// Rough refinancing rate band by credit score tier. Revolving credit is
/// priced well above secured and installment lending.
pub fn estimated_rate_range(credit_score: u32, debt_type: DebtType) -> DebtPayoffResult<RateBand> {
    if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&credit_score) {
        return Err(DebtPayoffError::InvalidInput {
            field: "credit_score".into(),
            reason: format!("Credit score must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}."),
        });
    }

    let (min, max) = match (debt_type, credit_score) {
        (DebtType::CreditCard, s) if s >= 750 => (dec!(12), Some(dec!(18))),
        (DebtType::CreditCard, s) if s >= 700 => (dec!(18), Some(dec!(24))),
        (DebtType::CreditCard, s) if s >= 650 => (dec!(24), Some(dec!(29))),
        (DebtType::CreditCard, _) => (dec!(29), None),
        (_, s) if s >= 750 => (dec!(4), Some(dec!(6))),
        (_, s) if s >= 700 => (dec!(6), Some(dec!(8))),
        (_, s) if s >= 650 => (dec!(8), Some(dec!(12))),
        _ => (dec!(12), None),
    };

    Ok(RateBand {
        label: band_label(min, max),
        min_percent: min,
        max_percent: max,
    })
}

fn band_label(min: Decimal, max: Option<Decimal>) -> String {
    match max {
        Some(max) => format!("{min}-{max}%"),
        None => format!("{min}%+"),
    }
}
