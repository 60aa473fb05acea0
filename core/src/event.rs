//! Events raised by the engine.
//!
//! The engine queues an event for every notable state change; hosts drain
//! the queue with `HotelEngine::take_events()` to drive notifications and
//! logs. Events are never read back by the engine itself.

use crate::{
    state::RoomType,
    types::{Day, GuestId, Money, RoomId},
};
use serde::{Deserialize, Serialize};

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HotelEvent {
    DayAdvanced {
        day: Day,
        expenses_paid: Money,
        money: Money,
        departures: u32,
    },
    GuestCheckedIn {
        day: Day,
        guest_id: GuestId,
        room_id: RoomId,
        name: String,
    },
    GuestCheckedOut {
        day: Day,
        guest_id: GuestId,
        room_id: Option<RoomId>,
        bill: Money,
    },
    GuestDeparted {
        day: Day,
        guest_id: GuestId,
    },
    RoomBuilt {
        day: Day,
        room_id: RoomId,
        room_type: RoomType,
        cost: Money,
    },
    AchievementUnlocked {
        day: Day,
        achievement_id: String,
    },
    GameOver {
        day: Day,
        money: Money,
    },
    GameWon {
        day: Day,
        money: Money,
        reputation: f64,
    },
}

impl HotelEvent {
    /// Stable string name of the variant, for logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            HotelEvent::DayAdvanced { .. }         => "day_advanced",
            HotelEvent::GuestCheckedIn { .. }      => "guest_checked_in",
            HotelEvent::GuestCheckedOut { .. }     => "guest_checked_out",
            HotelEvent::GuestDeparted { .. }       => "guest_departed",
            HotelEvent::RoomBuilt { .. }           => "room_built",
            HotelEvent::AchievementUnlocked { .. } => "achievement_unlocked",
            HotelEvent::GameOver { .. }            => "game_over",
            HotelEvent::GameWon { .. }             => "game_won",
        }
    }
}
