use debt_payoff_core::snowball::{self, DebtRecord, PaymentPolicy, SnowballInput};
use debt_payoff_core::time_value::PAYOFF_HORIZON_MONTHS;
use debt_payoff_core::DebtPayoffError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn debt(id: &str, balance: Decimal, minimum_payment: Decimal) -> DebtRecord {
    DebtRecord {
        id: id.into(),
        name: id.into(),
        balance,
        minimum_payment,
        interest_rate_percent: None,
    }
}

fn household_debts() -> Vec<DebtRecord> {
    // Typical mix: store card, credit card, car loan, student loan
    vec![
        debt("student", dec!(18_250.40), dec!(190)),
        debt("store", dec!(640.15), dec!(25)),
        debt("car", dec!(9_875.00), dec!(310)),
        debt("visa", dec!(3_210.77), dec!(95)),
    ]
}

// ===========================================================================
// Snowball simulation
// ===========================================================================

#[test]
fn test_baseline_retires_every_balance() {
    let result = snowball::simulate(&household_debts(), Decimal::ZERO).unwrap();
    assert!(result.months_to_payoff >= 1);
    assert!(result.converged);
    let last = result.timeline.last().unwrap();
    assert_eq!(last.remaining_balance, Decimal::ZERO);
    assert_eq!(result.timeline.len(), result.months_to_payoff as usize);
}

#[test]
fn test_total_paid_reconciles_with_principal() {
    let debts = household_debts();
    let principal: Decimal = debts.iter().map(|d| d.balance).sum();
    let result = snowball::simulate(&debts, dec!(150)).unwrap();
    assert_eq!(result.total_paid, principal);
    assert_eq!(result.total_interest, Decimal::ZERO);
}

#[test]
fn test_more_extra_never_slower() {
    let debts = household_debts();
    let mut previous = u32::MAX;
    for extra in [dec!(0), dec!(25), dec!(100), dec!(250), dec!(1_000), dec!(50_000)] {
        let months = snowball::simulate(&debts, extra).unwrap().months_to_payoff;
        assert!(months <= previous, "extra {extra} took {months} > {previous}");
        previous = months;
    }
    // Enough extra to clear everything at once
    assert_eq!(previous, 1);
}

#[test]
fn test_order_fixed_by_starting_balance() {
    let result = snowball::simulate(&household_debts(), Decimal::ZERO).unwrap();
    assert_eq!(result.payoff_order, vec!["store", "visa", "car", "student"]);
}

#[test]
fn test_equal_balances_keep_input_order() {
    let debts = vec![
        debt("second", dec!(300), dec!(10)),
        debt("first", dec!(300), dec!(10)),
    ];
    let result = snowball::simulate(&debts, Decimal::ZERO).unwrap();
    assert_eq!(result.payoff_order, vec!["second", "first"]);
}

#[test]
fn test_two_debt_reference_trace() {
    let debts = vec![debt("b", dec!(1_500), dec!(75)), debt("a", dec!(500), dec!(50))];
    let result = snowball::simulate(&debts, Decimal::ZERO).unwrap();

    let balances: Vec<Decimal> = result.timeline.iter().take(5).map(|m| m.remaining_balance).collect();
    assert_eq!(
        balances,
        vec![dec!(1_875), dec!(1_750), dec!(1_625), dec!(1_500), dec!(1_375)]
    );
    assert_eq!(result.months_to_payoff, 16);
}

#[test]
fn test_zero_pool_does_not_converge() {
    let debts = vec![debt("a", dec!(50), Decimal::ZERO)];
    let result = snowball::simulate(&debts, Decimal::ZERO).unwrap();
    assert_eq!(result.months_to_payoff, PAYOFF_HORIZON_MONTHS);
    assert!(!result.converged);
    assert_eq!(result.timeline.last().unwrap().remaining_balance, dec!(50));
}

#[test]
fn test_negative_minimum_rejected() {
    let debts = vec![debt("a", dec!(50), dec!(-5))];
    let err = snowball::simulate(&debts, Decimal::ZERO).unwrap_err();
    match err {
        DebtPayoffError::InvalidInput { field, .. } => assert_eq!(field, "debts[a].minimum_payment"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

// ===========================================================================
// Snowball analysis
// ===========================================================================

#[test]
fn test_analysis_from_json() {
    let json = r#"{
        "debts": [
            {"id": "card", "name": "Visa", "balance": "500", "minimum_payment": "50"},
            {"id": "car", "name": "Car", "balance": "1500", "minimum_payment": "75"}
        ],
        "policy": {"extra_payment": "1500", "frequency": "yearly"},
        "start_date": "2025-03-01"
    }"#;
    let input: SnowballInput = serde_json::from_str(json).unwrap();
    let result = snowball::analyze_snowball(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.extra_monthly_payment, dec!(125));
    assert_eq!(out.scenario.months_to_payoff, 8);
    assert_eq!(out.baseline.months_to_payoff, 16);
    assert_eq!(out.months_saved, 8);
    assert_eq!(out.payoff_date.unwrap().to_string(), "2025-11-01");
}

#[test]
fn test_analysis_with_interest_saves_money() {
    let mut debts = household_debts();
    for d in debts.iter_mut() {
        d.interest_rate_percent = Some(dec!(12));
    }
    let input = SnowballInput {
        debts,
        policy: PaymentPolicy {
            extra_payment: dec!(200),
            accrue_interest: true,
            ..PaymentPolicy::default()
        },
        start_date: None,
    };
    let result = snowball::analyze_snowball(&input).unwrap();
    let out = &result.result;
    assert!(out.scenario.total_interest > Decimal::ZERO);
    assert!(out.baseline.total_interest > out.scenario.total_interest);
    assert!(out.money_saved > Decimal::ZERO);
    assert!(out.months_saved > 0);
}
