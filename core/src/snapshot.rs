//! Save-file records and the read-only views built from the state.
//!
//! A save is stored as `{ "timestamp": <epoch ms>, "data": <HotelState> }`.
//! Loading reads `data` as a `StatePatch` so fields missing from an older
//! save are backfilled from the new-game template.

use crate::{
    state::{HotelState, StatePatch},
    types::{Day, Money},
};
use serde::{Deserialize, Serialize};

/// Prefix shared by every save key in the store.
pub const SAVE_KEY_PREFIX: &str = "hotel_manager_save_";

pub const DEFAULT_SLOT: &str = "autosave";

pub fn slot_key(slot: &str) -> String {
    format!("{SAVE_KEY_PREFIX}{slot}")
}

/// What gets written for a save.
#[derive(Debug, Serialize)]
pub struct SaveRecord<'a> {
    pub timestamp: i64,
    pub data: &'a HotelState,
}

/// What gets read back from a save.
#[derive(Debug, Deserialize)]
pub struct StoredSave {
    pub timestamp: i64,
    pub data: StatePatch,
}

/// One entry of the save-slot listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveSlotSummary {
    pub name: String,
    pub timestamp: i64,
    pub hotel_name: String,
    pub day: Day,
    pub money: Money,
}

/// Derived, read-only view over the current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_guests: u64,
    pub total_earnings: Money,
    pub average_satisfaction: u32,
    pub reputation: f64,
    pub days_played: Day,
    pub rooms_owned: usize,
    pub occupied_rooms: usize,
    pub current_guests: u32,
    pub daily_expenses: Money,
    pub achievements_unlocked: usize,
}

impl Statistics {
    pub fn from_state(state: &HotelState) -> Self {
        Self {
            total_guests: state.total_guests,
            total_earnings: state.total_earnings,
            average_satisfaction: state.satisfaction,
            reputation: state.reputation,
            days_played: state.day,
            rooms_owned: state.rooms.len(),
            occupied_rooms: state.occupied_rooms(),
            current_guests: state.guest_count,
            daily_expenses: state.expenses.daily_total(),
            achievements_unlocked: state.achievements.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    Won,
    Lost,
}
