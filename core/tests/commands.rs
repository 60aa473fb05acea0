//! Management operations and player-command dispatch.

use hotel_core::{
    clock::SimSpeed,
    command::PlayerCommand,
    engine::HotelEngine,
    state::{StateKey, StatePatch, StateValue},
};

fn build() -> HotelEngine {
    HotelEngine::build_test(61).expect("build test engine")
}

#[test]
fn toggle_service_flips_known_names_only() {
    let mut engine = build();
    assert!(engine.toggle_service("cafe"));
    assert!(engine.get_data().services.cafe);
    assert!(engine.toggle_service("cafe"));
    assert!(!engine.get_data().services.cafe);

    let before = engine.get_data();
    assert!(!engine.toggle_service("spa"));
    assert!(!engine.toggle_service("Cafe"), "names are case sensitive");
    assert_eq!(engine.get_data(), before);
}

#[test]
fn set_price_clamps_and_rejects_unknown_keys() {
    let mut engine = build();
    assert!(engine.set_price("luxuryRoom", 300));
    assert_eq!(engine.get_data().prices.luxury_room, 300);

    assert!(engine.set_price("singleRoom", -20));
    assert_eq!(engine.get_data().prices.single_room, 0);

    let before = engine.get_data();
    assert!(!engine.set_price("penthouse", 999));
    assert!(!engine.set_price("single", 999), "price keys, not room type names");
    assert_eq!(engine.get_data(), before);
}

#[test]
fn set_price_reprices_existing_rooms() {
    let mut engine = build();
    let room = engine
        .build_room(hotel_core::state::RoomType::Double)
        .expect("room");
    assert_eq!(room.price, 80);

    assert!(engine.set_price("doubleRoom", 120));
    assert_eq!(engine.get_data().rooms[0].price, 120);
}

#[test]
fn achievements_unlock_once() {
    let mut engine = build();
    assert!(engine.unlock_achievement("first_guest"));
    assert!(!engine.unlock_achievement("first_guest"));
    assert_eq!(engine.get_data().achievements, vec!["first_guest".to_string()]);
}

#[test]
fn snapshots_are_independent_copies() {
    let mut engine = build();
    let mut copy = engine.get_data();
    copy.money = 1;
    copy.rooms.clear();
    copy.hotel_name.push_str(" (edited)");

    assert_eq!(engine.money(), 10_000);
    assert_eq!(engine.get_data().hotel_name, "New Hotel");

    engine.next_day();
    assert_eq!(copy.day, 1, "earlier snapshot does not follow the live state");
}

#[test]
fn set_data_replaces_fields_wholesale() {
    let mut engine = build();
    let patch: StatePatch = serde_json::from_str(
        r#"{ "hotelName": "Seaside", "expenses": { "utilities": 10, "cleaning": 0, "maintenance": 0 } }"#,
    )
    .expect("patch");
    engine.set_data(patch);

    let data = engine.get_data();
    assert_eq!(data.hotel_name, "Seaside");
    assert_eq!(data.expenses.daily_total(), 10);
    assert_eq!(data.money, 10_000, "absent fields untouched");
}

#[test]
fn single_field_access_by_name() {
    let mut engine = build();
    let key: StateKey = "hotelName".parse().expect("known key");
    assert_eq!(engine.get_value(key), StateValue::HotelName("New Hotel".into()));

    engine.set_value(StateValue::Day(30));
    assert_eq!(engine.get_value(StateKey::Day), StateValue::Day(30));
    assert!("hotel_level".parse::<StateKey>().is_err());
}

#[test]
fn commands_dispatch_to_operations() {
    let mut engine = build();

    assert!(engine.apply(PlayerCommand::BuildRoom { room_type: "double".into() }));
    assert!(!engine.apply(PlayerCommand::BuildRoom { room_type: "suite".into() }));
    assert!(engine.apply(PlayerCommand::CheckInGuest));
    assert!(!engine.apply(PlayerCommand::CheckOutGuest { guest_id: 999 }));
    assert!(engine.apply(PlayerCommand::ToggleService { service: "gym".into() }));
    assert!(engine.apply(PlayerCommand::SetSpeed { speed: SimSpeed::Fastest }));
    assert!(engine.apply(PlayerCommand::NextDay));

    let data = engine.get_data();
    assert_eq!(data.rooms.len(), 1);
    assert_eq!(data.guest_count, 1);
    assert!(data.services.gym);
    assert_eq!(data.day, 2);
    assert_eq!(engine.clock.speed, SimSpeed::Fastest);
}

#[test]
fn commands_parse_from_json() {
    let cmd: PlayerCommand =
        serde_json::from_str(r#"{ "cmd": "set_price", "room_type": "singleRoom", "price": 65 }"#)
            .expect("parse");
    assert_eq!(
        cmd,
        PlayerCommand::SetPrice { room_type: "singleRoom".into(), price: 65 }
    );

    let save: PlayerCommand = serde_json::from_str(r#"{ "cmd": "save_game" }"#).expect("parse");
    assert_eq!(save, PlayerCommand::SaveGame { slot: None });
}

#[test]
fn save_and_load_commands_default_to_autosave() {
    let mut engine = build();
    engine.set_value(StateValue::Money(4_242));
    assert!(engine.apply(PlayerCommand::SaveGame { slot: None }));
    assert!(engine.apply(PlayerCommand::NewGame));
    assert_eq!(engine.money(), 10_000);

    assert!(engine.apply(PlayerCommand::LoadGame { slot: None }));
    assert_eq!(engine.money(), 4_242);

    let names: Vec<String> = engine.get_save_slots().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["autosave"]);
    assert!(engine.apply(PlayerCommand::DeleteSaveSlot { slot: "autosave".into() }));
    assert!(engine.get_save_slots().is_empty());
}
