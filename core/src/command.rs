use crate::{
    clock::SimSpeed,
    types::{GuestId, Money, RoomId},
};
use serde::{Deserialize, Serialize};

/// All player-issued commands. `HotelEngine::apply` dispatches each one
/// to the matching engine operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
    SetSpeed { speed: SimSpeed },
    NextDay,

    // ── Rooms and guests ──────────────────────────
    /// `room_type` is one of `single`, `double`, `luxury`.
    BuildRoom { room_type: String },
    RemoveRoom { room_id: RoomId },
    CheckInGuest,
    CheckOutGuest { guest_id: GuestId },

    // ── Management ────────────────────────────────
    ToggleService { service: String },
    /// `room_type` is a price key: `singleRoom`, `doubleRoom`, `luxuryRoom`.
    SetPrice { room_type: String, price: Money },
    UnlockAchievement { achievement_id: String },

    // ── Persistence ───────────────────────────────
    SaveGame { slot: Option<String> },
    LoadGame { slot: Option<String> },
    DeleteSaveSlot { slot: String },
    NewGame,
}
