//! Rooms: capacity bookkeeping and construction.

use hotel_core::{
    engine::HotelEngine,
    event::HotelEvent,
    state::{Room, RoomType},
};

fn build() -> HotelEngine {
    HotelEngine::build_test(11).expect("build test engine")
}

fn room(id: u32, capacity: u32) -> Room {
    Room {
        id,
        x: 0,
        y: 0,
        width: 4,
        height: 3,
        room_type: RoomType::Double,
        occupied: false,
        price: 80,
        capacity,
        guest_id: None,
    }
}

#[test]
fn add_then_remove_restores_capacity() {
    let mut engine = build();
    let before = engine.max_guests();

    engine.add_room(room(40, 3));
    assert_eq!(engine.max_guests(), before + 3);

    assert!(engine.remove_room(40));
    assert_eq!(engine.max_guests(), before);
    assert!(engine.get_data().rooms.is_empty());
}

#[test]
fn removing_unknown_room_fails() {
    let mut engine = build();
    engine.add_room(room(1, 2));
    assert!(!engine.remove_room(2));
    assert_eq!(engine.max_guests(), 7);
}

#[test]
fn rooms_keep_creation_order() {
    let mut engine = build();
    for id in [5, 3, 9] {
        engine.add_room(room(id, 1));
    }
    let ids: Vec<u32> = engine.get_data().rooms.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![5, 3, 9]);
}

#[test]
fn build_room_charges_cost_and_lays_out_rows_of_three() {
    let mut engine = build();
    engine.take_events();

    let rooms: Vec<Room> = (0..4)
        .map(|_| engine.build_room(RoomType::Single).expect("affordable"))
        .collect();

    assert_eq!(engine.money(), 10_000 - 4 * 1_000);
    assert_eq!(engine.max_guests(), 5 + 4);

    let positions: Vec<(i32, i32)> = rooms.iter().map(|r| (r.x, r.y)).collect();
    assert_eq!(positions, vec![(2, 2), (8, 2), (14, 2), (2, 6)]);
    let ids: Vec<u32> = rooms.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let built = engine
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, HotelEvent::RoomBuilt { .. }))
        .count();
    assert_eq!(built, 4);
}

#[test]
fn build_room_is_refused_when_unaffordable() {
    let mut engine = build();
    for _ in 0..10 {
        engine.build_room(RoomType::Single).expect("affordable");
    }
    assert_eq!(engine.money(), 0);

    let before = engine.get_data();
    assert!(engine.build_room(RoomType::Luxury).is_none());
    assert_eq!(engine.get_data(), before);
}

#[test]
fn build_room_uses_type_capacity_and_price() {
    let mut engine = build();
    let luxury = engine.build_room(RoomType::Luxury).expect("room");
    assert_eq!(luxury.capacity, 2);
    assert_eq!(luxury.price, 150);
    assert_eq!((luxury.width, luxury.height), (5, 4));
}

#[test]
fn removing_occupied_room_detaches_guest() {
    let mut engine = build();
    let built = engine.build_room(RoomType::Single).expect("room");
    let guest = engine.check_in_guest().expect("guest");

    assert!(engine.remove_room(built.id));

    let data = engine.get_data();
    let kept = data.guests.iter().find(|g| g.id == guest.id).expect("guest stays");
    assert_eq!(kept.room_id, None);
    assert_eq!(data.guest_count, 1);
}

#[test]
fn removed_room_ids_are_not_reissued() {
    let mut engine = build();
    engine.build_room(RoomType::Single).expect("room");
    let last = engine.build_room(RoomType::Single).expect("room");
    assert!(engine.remove_room(last.id));

    let next = engine.build_room(RoomType::Single).expect("room");
    assert!(next.id > last.id, "room {} reused after removal", next.id);
}

#[test]
fn huge_capacity_saturates_max_guests() {
    let mut engine = build();
    engine.add_room(room(1, u32::MAX));
    assert_eq!(engine.max_guests(), u32::MAX);
}
