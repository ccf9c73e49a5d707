use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::DebtPayoffError;
use crate::types::{Money, Months, Percent};
use crate::DebtPayoffResult;

/// Longest projection the engine will run before reporting non-convergence
/// (50 years of monthly periods).
pub const PAYOFF_HORIZON_MONTHS: Months = 600;

/// Balances at or below one cent are treated as retired.
pub const PAYOFF_TOLERANCE: Money = dec!(0.01);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert an annual percentage (18 = 18%) into a monthly decimal rate.
pub fn monthly_rate(annual_percent: Percent) -> Decimal {
    annual_percent / dec!(100) / MONTHS_PER_YEAR
}

/// One month of simple interest on `balance` at `annual_percent`.
pub fn monthly_interest(balance: Money, annual_percent: Percent) -> DebtPayoffResult<Money> {
    if annual_percent.is_zero() || balance <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    balance
        .checked_mul(monthly_rate(annual_percent))
        .ok_or_else(|| {
            DebtPayoffError::FinancialImpossibility(format!(
                "monthly interest on {balance} at {annual_percent}% overflows"
            ))
        })
}

/// Level monthly payment that retires `principal` over `term_months` at
/// `annual_percent`. A zero rate degenerates to straight-line repayment.
pub fn amortized_payment(
    principal: Money,
    annual_percent: Percent,
    term_months: Months,
) -> DebtPayoffResult<Money> {
    if term_months == 0 {
        return Err(DebtPayoffError::InvalidInput {
            field: "term_months".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let n = Decimal::from(term_months);
    let r = monthly_rate(annual_percent);
    if r.is_zero() {
        return Ok(principal / n);
    }

    let factor = (Decimal::ONE + r)
        .checked_powi(i64::from(term_months))
        .ok_or_else(|| {
            DebtPayoffError::FinancialImpossibility(format!(
                "compounding factor over {term_months} months overflows"
            ))
        })?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(DebtPayoffError::DivisionByZero {
            context: "amortized payment annuity factor".into(),
        });
    }

    r.checked_mul(factor)
        .and_then(|x| x.checked_mul(principal))
        .and_then(|x| x.checked_div(denominator))
        .ok_or_else(|| {
            DebtPayoffError::FinancialImpossibility(format!(
                "payment on {principal} at {annual_percent}% over {term_months} months overflows"
            ))
        })
}

/// Calendar date `months` after `start`, clamped to month end.
pub fn add_months(start: NaiveDate, months: Months) -> DebtPayoffResult<NaiveDate> {
    start
        .checked_add_months(chrono::Months::new(months))
        .ok_or_else(|| DebtPayoffError::DateError(format!("{start} + {months} months is out of range")))
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
pub fn share_percent(part: Money, whole: Money) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * dec!(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amortized_payment_standard_loan() {
        let result = amortized_payment(dec!(10_000), dec!(8), 48).unwrap();
        // 10,000 at 8% over 48 months ≈ 244.13
        assert!((result - dec!(244.13)).abs() < dec!(0.01), "got {result}");
    }

    #[test]
    fn test_amortized_payment_zero_rate() {
        let result = amortized_payment(dec!(1_200), Decimal::ZERO, 12).unwrap();
        assert_eq!(result, dec!(100));
    }

    #[test]
    fn test_amortized_payment_zero_term_rejected() {
        let err = amortized_payment(dec!(1_000), dec!(5), 0).unwrap_err();
        match err {
            DebtPayoffError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_amortized_payment_overflow_is_error() {
        // (1 + 1/12)^800 fits a Decimal, the payment on 10,000 does not
        let err = amortized_payment(dec!(10_000), dec!(100), 800).unwrap_err();
        assert!(matches!(err, DebtPayoffError::FinancialImpossibility(_)), "got {err:?}");
    }

    #[test]
    fn test_monthly_interest() {
        // 18% / 12 = 1.5% per month
        assert_eq!(monthly_interest(dec!(10_000), dec!(18)).unwrap(), dec!(150));
        assert_eq!(monthly_interest(dec!(10_000), Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(monthly_interest(Decimal::ZERO, dec!(18)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let result = add_months(start, 1).unwrap();
        assert_eq!(result, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_share_percent() {
        assert_eq!(share_percent(dec!(25), dec!(200)), dec!(12.5));
        assert_eq!(share_percent(dec!(25), Decimal::ZERO), Decimal::ZERO);
    }
}
