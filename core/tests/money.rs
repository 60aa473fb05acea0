//! Money: guarded spending and earnings bookkeeping.

use hotel_core::{engine::HotelEngine, state::StateValue};

fn build() -> HotelEngine {
    HotelEngine::build_test(7).expect("build test engine")
}

#[test]
fn spend_succeeds_only_when_balance_covers_it() {
    let mut engine = build();

    assert!(engine.spend_money(10_000), "spending the exact balance is allowed");
    assert_eq!(engine.money(), 0);

    assert!(!engine.spend_money(1));
    assert_eq!(engine.money(), 0, "failed spend leaves money unchanged");
}

#[test]
fn spend_decreases_by_exact_amount() {
    let mut engine = build();
    for amount in [1, 250, 4_000] {
        let before = engine.money();
        assert!(engine.spend_money(amount));
        assert_eq!(engine.money(), before - amount);
    }
}

#[test]
fn spend_is_refused_while_in_debt() {
    let mut engine = build();
    engine.set_value(StateValue::Money(-50));
    assert!(!engine.spend_money(0), "0 > -50 is still more than the balance");
    assert_eq!(engine.money(), -50);
}

#[test]
fn only_positive_amounts_count_as_earnings() {
    let mut engine = build();

    engine.add_money(500);
    engine.add_money(-200);

    let data = engine.get_data();
    assert_eq!(data.money, 10_300);
    assert_eq!(data.total_earnings, 500);
}

#[test]
fn huge_credits_saturate_instead_of_overflowing() {
    let mut engine = build();

    engine.add_money(i64::MAX - 10_000);
    engine.add_money(1);
    let data = engine.get_data();
    assert_eq!(data.money, i64::MAX, "balance pins at the top of the range");
    assert_eq!(data.total_earnings, i64::MAX - 10_000 + 1);

    engine.add_money(i64::MAX);
    assert_eq!(engine.get_data().total_earnings, i64::MAX);
}

#[test]
fn negative_spend_of_minimum_value_saturates() {
    let mut engine = build();
    assert!(engine.spend_money(i64::MIN), "any balance covers a negative amount");
    assert_eq!(engine.money(), i64::MAX);
}
