//! Satisfaction and reputation recomputation.

use hotel_core::{
    engine::HotelEngine,
    state::{Guest, Services, StateValue},
};

fn build() -> HotelEngine {
    HotelEngine::build_test(31).expect("build test engine")
}

fn only_wifi() -> Services {
    Services { cafe: false, gym: false, wifi: true, cleaning: false }
}

#[test]
fn satisfaction_is_zero_without_guests() {
    let mut engine = build();
    engine.set_value(StateValue::Satisfaction(77));
    engine.update_satisfaction();
    assert_eq!(engine.satisfaction(), 0);
}

#[test]
fn satisfaction_is_rounded_mean() {
    let mut engine = build();
    assert!(engine.add_guest(Guest::new(1, 70.0, 3)));
    assert!(engine.add_guest(Guest::new(2, 71.0, 3)));
    engine.update_satisfaction();
    assert_eq!(engine.satisfaction(), 71, "70.5 rounds up");

    engine.update_satisfaction();
    assert_eq!(engine.satisfaction(), 71, "recomputation is idempotent");
}

#[test]
fn neutral_satisfaction_with_wifi_adds_two() {
    let mut engine = build();
    engine.set_value(StateValue::Reputation(50.0));
    engine.set_value(StateValue::Satisfaction(50));
    engine.set_value(StateValue::Services(only_wifi()));

    engine.update_reputation();
    assert_eq!(engine.reputation(), 52.0);
}

#[test]
fn reputation_is_incremental() {
    let mut engine = build();
    engine.set_value(StateValue::Satisfaction(50));
    engine.set_value(StateValue::Services(only_wifi()));

    engine.update_reputation();
    engine.update_reputation();
    assert_eq!(engine.reputation(), 54.0, "each call builds on the previous score");
}

#[test]
fn reputation_is_clamped() {
    let mut engine = build();
    engine.set_value(StateValue::Reputation(99.0));
    engine.set_value(StateValue::Satisfaction(100));
    engine.set_value(StateValue::Services(Services { cafe: true, gym: true, wifi: true, cleaning: true }));
    engine.update_reputation();
    assert_eq!(engine.reputation(), 100.0);

    engine.set_value(StateValue::Reputation(1.0));
    engine.set_value(StateValue::Satisfaction(0));
    engine.set_value(StateValue::Services(Services { cafe: false, gym: false, wifi: false, cleaning: false }));
    engine.update_reputation();
    assert_eq!(engine.reputation(), 0.0);
}

#[test]
fn low_satisfaction_drags_reputation_down() {
    let mut engine = build();
    engine.set_value(StateValue::Satisfaction(20));
    engine.set_value(StateValue::Services(only_wifi()));
    engine.update_reputation();
    // 50 + (20 - 50) * 0.1 + 2
    assert!((engine.reputation() - 49.0).abs() < 1e-9, "got {}", engine.reputation());
}
