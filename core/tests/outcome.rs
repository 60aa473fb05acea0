//! Win/loss conditions and their events.

use hotel_core::{
    engine::HotelEngine,
    event::HotelEvent,
    snapshot::GameOutcome,
    state::StateValue,
};

fn build() -> HotelEngine {
    HotelEngine::build_test(51).expect("build test engine")
}

#[test]
fn game_over_boundary_is_strict() {
    let mut engine = build();
    engine.set_value(StateValue::Money(-1_000));
    assert!(!engine.is_game_over());

    engine.set_value(StateValue::Money(-1_001));
    assert!(engine.is_game_over());
    assert_eq!(engine.outcome(), GameOutcome::Lost);
}

#[test]
fn winning_needs_both_reputation_and_money() {
    let mut engine = build();
    engine.set_value(StateValue::Money(99_999));
    engine.set_value(StateValue::Reputation(94.0));
    assert!(!engine.is_game_won());

    engine.set_value(StateValue::Reputation(95.0));
    assert!(!engine.is_game_won(), "reputation alone is not enough");

    engine.set_value(StateValue::Money(100_000));
    assert!(engine.is_game_won());
    assert_eq!(engine.outcome(), GameOutcome::Won);

    engine.set_value(StateValue::Reputation(94.9));
    assert!(!engine.is_game_won(), "money alone is not enough");
}

#[test]
fn game_over_event_fires_once() {
    let mut engine = build();
    engine.set_value(StateValue::Money(-900));
    engine.take_events();

    engine.next_day();
    let first = engine.take_events();
    assert!(first.iter().any(|e| matches!(e, HotelEvent::GameOver { .. })));

    engine.next_day();
    let second = engine.take_events();
    assert!(!second.iter().any(|e| matches!(e, HotelEvent::GameOver { .. })));
}

#[test]
fn statistics_reflect_state() {
    let mut engine = build();
    engine.build_room(hotel_core::state::RoomType::Double).expect("room");
    engine.check_in_guest().expect("guest");
    engine.unlock_achievement("opening_day");
    engine.next_day();

    let stats = engine.get_statistics();
    let data = engine.get_data();
    assert_eq!(stats.total_guests, 1);
    assert_eq!(stats.total_earnings, 50);
    assert_eq!(stats.days_played, 2);
    assert_eq!(stats.rooms_owned, 1);
    assert_eq!(stats.occupied_rooms, 1);
    assert_eq!(stats.current_guests, 1);
    assert_eq!(stats.daily_expenses, 225);
    assert_eq!(stats.achievements_unlocked, 1);
    assert_eq!(stats.average_satisfaction, data.satisfaction);
    assert_eq!(stats.reputation, data.reputation);
    assert_eq!(engine.get_data(), data, "statistics must not mutate");
}
