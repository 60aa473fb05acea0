//! The hotel's authoritative state schema.
//!
//! Everything the engine owns lives in `HotelState`. Field names serialize
//! in camelCase so a save file reads `hotelName`, `maxGuests`, `singleRoom`
//! and so on.
//!
//! Merges (`set_data`, load-onto-defaults) go through `StatePatch`, a fixed
//! field-by-field schema: a key that is not a field of `HotelState` can
//! never end up in the state.

use crate::{
    config::ServiceBonuses,
    error::HotelError,
    types::{Day, GuestId, Money, RoomId},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, str::FromStr};

// ── Room types and services ────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Luxury,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Single, RoomType::Double, RoomType::Luxury];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Luxury => "luxury",
        }
    }

    /// Key of this room type in the price table.
    pub fn price_key(&self) -> &'static str {
        match self {
            Self::Single => "singleRoom",
            Self::Double => "doubleRoom",
            Self::Luxury => "luxuryRoom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn from_price_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.price_key() == key)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Cafe,
    Gym,
    Wifi,
    Cleaning,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::Cafe,
        ServiceKind::Gym,
        ServiceKind::Wifi,
        ServiceKind::Cleaning,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Gym => "gym",
            Self::Wifi => "wifi",
            Self::Cleaning => "cleaning",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

// ── Entities ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub occupied: bool,
    pub price: Money,
    pub capacity: u32,
    #[serde(default)]
    pub guest_id: Option<GuestId>,
}

impl Room {
    /// Tile coordinates of the room centre.
    pub fn centre(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: GuestId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub satisfaction: f64,
    /// Remaining nights. The guest leaves when this reaches zero.
    pub stay_duration: i32,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub character_id: u32,
    #[serde(default)]
    pub check_in_day: Day,
}

impl Guest {
    /// A guest with no room, name or sprite. Used by callers that only
    /// care about the satisfaction/stay bookkeeping.
    pub fn new(id: GuestId, satisfaction: f64, stay_duration: i32) -> Self {
        Self {
            id,
            name: String::new(),
            x: 0.0,
            y: 0.0,
            satisfaction,
            stay_duration,
            room_id: None,
            character_id: 0,
            check_in_day: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub wage: Money,
}

// ── Fixed-key tables ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Services {
    pub cafe: bool,
    pub gym: bool,
    pub wifi: bool,
    pub cleaning: bool,
}

impl Services {
    pub fn is_enabled(&self, kind: ServiceKind) -> bool {
        match kind {
            ServiceKind::Cafe => self.cafe,
            ServiceKind::Gym => self.gym,
            ServiceKind::Wifi => self.wifi,
            ServiceKind::Cleaning => self.cleaning,
        }
    }

    /// Flip one service. Returns the new setting.
    pub fn toggle(&mut self, kind: ServiceKind) -> bool {
        let flag = match kind {
            ServiceKind::Cafe => &mut self.cafe,
            ServiceKind::Gym => &mut self.gym,
            ServiceKind::Wifi => &mut self.wifi,
            ServiceKind::Cleaning => &mut self.cleaning,
        };
        *flag = !*flag;
        *flag
    }

    /// Sum of the bonuses of every enabled service.
    pub fn bonus(&self, bonuses: &ServiceBonuses) -> f64 {
        ServiceKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .map(|kind| bonuses.for_service(kind))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prices {
    pub single_room: Money,
    pub double_room: Money,
    pub luxury_room: Money,
}

impl Prices {
    pub fn get(&self, room_type: RoomType) -> Money {
        match room_type {
            RoomType::Single => self.single_room,
            RoomType::Double => self.double_room,
            RoomType::Luxury => self.luxury_room,
        }
    }

    pub fn set(&mut self, room_type: RoomType, price: Money) {
        match room_type {
            RoomType::Single => self.single_room = price,
            RoomType::Double => self.double_room = price,
            RoomType::Luxury => self.luxury_room = price,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expenses {
    pub utilities: Money,
    pub cleaning: Money,
    pub maintenance: Money,
}

impl Expenses {
    pub fn daily_total(&self) -> Money {
        self.utilities
            .saturating_add(self.cleaning)
            .saturating_add(self.maintenance)
    }
}

// ── The aggregate ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelState {
    pub money: Money,
    pub hotel_level: u32,
    pub guest_count: u32,
    pub max_guests: u32,
    pub satisfaction: u32,
    pub day: Day,
    pub hotel_name: String,
    pub rooms: Vec<Room>,
    pub guests: Vec<Guest>,
    pub staff: Vec<Staff>,
    pub services: Services,
    pub prices: Prices,
    pub expenses: Expenses,
    pub reputation: f64,
    pub total_guests: u64,
    pub total_earnings: Money,
    pub achievements: Vec<String>,
}

impl Default for HotelState {
    /// The new-game template.
    fn default() -> Self {
        Self {
            money: 10_000,
            hotel_level: 1,
            guest_count: 0,
            max_guests: 5,
            satisfaction: 0,
            day: 1,
            hotel_name: "New Hotel".into(),
            rooms: Vec::new(),
            guests: Vec::new(),
            staff: Vec::new(),
            services: Services {
                cafe: false,
                gym: false,
                wifi: true,
                cleaning: true,
            },
            prices: Prices {
                single_room: 50,
                double_room: 80,
                luxury_room: 150,
            },
            expenses: Expenses {
                utilities: 100,
                cleaning: 50,
                maintenance: 75,
            },
            reputation: 50.0,
            total_guests: 0,
            total_earnings: 0,
            achievements: Vec::new(),
        }
    }
}

impl HotelState {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn guest(&self, id: GuestId) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == id)
    }

    /// First unoccupied room in creation order.
    pub fn vacant_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| !r.occupied)
    }

    pub fn occupied_rooms(&self) -> usize {
        self.rooms.iter().filter(|r| r.occupied).count()
    }

    pub fn next_room_id(&self) -> RoomId {
        self.rooms.iter().map(|r| r.id).max().unwrap_or(0).saturating_add(1)
    }

    /// Guest ids are never reissued: `total_guests` counts every guest
    /// ever admitted, so it stays ahead of departed ids.
    pub fn next_guest_id(&self) -> GuestId {
        let live = self.guests.iter().map(|g| g.id).max().unwrap_or(0);
        let admitted = GuestId::try_from(self.total_guests).unwrap_or(GuestId::MAX);
        live.max(admitted).saturating_add(1)
    }

    /// Copy of a single top-level field.
    pub fn value(&self, key: StateKey) -> StateValue {
        match key {
            StateKey::Money => StateValue::Money(self.money),
            StateKey::HotelLevel => StateValue::HotelLevel(self.hotel_level),
            StateKey::GuestCount => StateValue::GuestCount(self.guest_count),
            StateKey::MaxGuests => StateValue::MaxGuests(self.max_guests),
            StateKey::Satisfaction => StateValue::Satisfaction(self.satisfaction),
            StateKey::Day => StateValue::Day(self.day),
            StateKey::HotelName => StateValue::HotelName(self.hotel_name.clone()),
            StateKey::Rooms => StateValue::Rooms(self.rooms.clone()),
            StateKey::Guests => StateValue::Guests(self.guests.clone()),
            StateKey::Staff => StateValue::Staff(self.staff.clone()),
            StateKey::Services => StateValue::Services(self.services),
            StateKey::Prices => StateValue::Prices(self.prices),
            StateKey::Expenses => StateValue::Expenses(self.expenses),
            StateKey::Reputation => StateValue::Reputation(self.reputation),
            StateKey::TotalGuests => StateValue::TotalGuests(self.total_guests),
            StateKey::TotalEarnings => StateValue::TotalEarnings(self.total_earnings),
            StateKey::Achievements => StateValue::Achievements(self.achievements.clone()),
        }
    }
}

// ── Single-field access ────────────────────────────────────────────

/// Names of the top-level fields of `HotelState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Money,
    HotelLevel,
    GuestCount,
    MaxGuests,
    Satisfaction,
    Day,
    HotelName,
    Rooms,
    Guests,
    Staff,
    Services,
    Prices,
    Expenses,
    Reputation,
    TotalGuests,
    TotalEarnings,
    Achievements,
}

impl StateKey {
    pub const ALL: [StateKey; 17] = [
        StateKey::Money,
        StateKey::HotelLevel,
        StateKey::GuestCount,
        StateKey::MaxGuests,
        StateKey::Satisfaction,
        StateKey::Day,
        StateKey::HotelName,
        StateKey::Rooms,
        StateKey::Guests,
        StateKey::Staff,
        StateKey::Services,
        StateKey::Prices,
        StateKey::Expenses,
        StateKey::Reputation,
        StateKey::TotalGuests,
        StateKey::TotalEarnings,
        StateKey::Achievements,
    ];

    /// The serialized (camelCase) field name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::HotelLevel => "hotelLevel",
            Self::GuestCount => "guestCount",
            Self::MaxGuests => "maxGuests",
            Self::Satisfaction => "satisfaction",
            Self::Day => "day",
            Self::HotelName => "hotelName",
            Self::Rooms => "rooms",
            Self::Guests => "guests",
            Self::Staff => "staff",
            Self::Services => "services",
            Self::Prices => "prices",
            Self::Expenses => "expenses",
            Self::Reputation => "reputation",
            Self::TotalGuests => "totalGuests",
            Self::TotalEarnings => "totalEarnings",
            Self::Achievements => "achievements",
        }
    }
}

impl FromStr for StateKey {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| HotelError::UnknownStateKey { key: s.to_string() })
    }
}

/// A typed value for one top-level field.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StateValue {
    Money(Money),
    HotelLevel(u32),
    GuestCount(u32),
    MaxGuests(u32),
    Satisfaction(u32),
    Day(Day),
    HotelName(String),
    Rooms(Vec<Room>),
    Guests(Vec<Guest>),
    Staff(Vec<Staff>),
    Services(Services),
    Prices(Prices),
    Expenses(Expenses),
    Reputation(f64),
    TotalGuests(u64),
    TotalEarnings(Money),
    Achievements(Vec<String>),
}

impl StateValue {
    pub fn key(&self) -> StateKey {
        match self {
            Self::Money(_) => StateKey::Money,
            Self::HotelLevel(_) => StateKey::HotelLevel,
            Self::GuestCount(_) => StateKey::GuestCount,
            Self::MaxGuests(_) => StateKey::MaxGuests,
            Self::Satisfaction(_) => StateKey::Satisfaction,
            Self::Day(_) => StateKey::Day,
            Self::HotelName(_) => StateKey::HotelName,
            Self::Rooms(_) => StateKey::Rooms,
            Self::Guests(_) => StateKey::Guests,
            Self::Staff(_) => StateKey::Staff,
            Self::Services(_) => StateKey::Services,
            Self::Prices(_) => StateKey::Prices,
            Self::Expenses(_) => StateKey::Expenses,
            Self::Reputation(_) => StateKey::Reputation,
            Self::TotalGuests(_) => StateKey::TotalGuests,
            Self::TotalEarnings(_) => StateKey::TotalEarnings,
            Self::Achievements(_) => StateKey::Achievements,
        }
    }
}

// ── Shallow merge ──────────────────────────────────────────────────

/// A partial `HotelState`. Every present field replaces the current
/// field wholesale; nested tables are not merged.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StatePatch {
    pub money: Option<Money>,
    pub hotel_level: Option<u32>,
    pub guest_count: Option<u32>,
    pub max_guests: Option<u32>,
    pub satisfaction: Option<u32>,
    pub day: Option<Day>,
    pub hotel_name: Option<String>,
    pub rooms: Option<Vec<Room>>,
    pub guests: Option<Vec<Guest>>,
    pub staff: Option<Vec<Staff>>,
    pub services: Option<Services>,
    pub prices: Option<Prices>,
    pub expenses: Option<Expenses>,
    pub reputation: Option<f64>,
    pub total_guests: Option<u64>,
    pub total_earnings: Option<Money>,
    pub achievements: Option<Vec<String>>,
}

impl StatePatch {
    pub fn apply_to(self, state: &mut HotelState) {
        if let Some(v) = self.money { state.money = v; }
        if let Some(v) = self.hotel_level { state.hotel_level = v; }
        if let Some(v) = self.guest_count { state.guest_count = v; }
        if let Some(v) = self.max_guests { state.max_guests = v; }
        if let Some(v) = self.satisfaction { state.satisfaction = v; }
        if let Some(v) = self.day { state.day = v; }
        if let Some(v) = self.hotel_name { state.hotel_name = v; }
        if let Some(v) = self.rooms { state.rooms = v; }
        if let Some(v) = self.guests { state.guests = v; }
        if let Some(v) = self.staff { state.staff = v; }
        if let Some(v) = self.services { state.services = v; }
        if let Some(v) = self.prices { state.prices = v; }
        if let Some(v) = self.expenses { state.expenses = v; }
        if let Some(v) = self.reputation { state.reputation = v; }
        if let Some(v) = self.total_guests { state.total_guests = v; }
        if let Some(v) = self.total_earnings { state.total_earnings = v; }
        if let Some(v) = self.achievements { state.achievements = v; }
    }

    /// Merge this patch onto the new-game template. Repeated achievement
    /// ids from a hand-edited save collapse to their first occurrence.
    pub fn onto_defaults(self) -> HotelState {
        let mut state = HotelState::default();
        self.apply_to(&mut state);
        let mut seen = HashSet::new();
        state.achievements.retain(|id| seen.insert(id.clone()));
        state
    }
}

impl From<StateValue> for StatePatch {
    fn from(value: StateValue) -> Self {
        let mut patch = StatePatch::default();
        match value {
            StateValue::Money(v) => patch.money = Some(v),
            StateValue::HotelLevel(v) => patch.hotel_level = Some(v),
            StateValue::GuestCount(v) => patch.guest_count = Some(v),
            StateValue::MaxGuests(v) => patch.max_guests = Some(v),
            StateValue::Satisfaction(v) => patch.satisfaction = Some(v),
            StateValue::Day(v) => patch.day = Some(v),
            StateValue::HotelName(v) => patch.hotel_name = Some(v),
            StateValue::Rooms(v) => patch.rooms = Some(v),
            StateValue::Guests(v) => patch.guests = Some(v),
            StateValue::Staff(v) => patch.staff = Some(v),
            StateValue::Services(v) => patch.services = Some(v),
            StateValue::Prices(v) => patch.prices = Some(v),
            StateValue::Expenses(v) => patch.expenses = Some(v),
            StateValue::Reputation(v) => patch.reputation = Some(v),
            StateValue::TotalGuests(v) => patch.total_guests = Some(v),
            StateValue::TotalEarnings(v) => patch.total_earnings = Some(v),
            StateValue::Achievements(v) => patch.achievements = Some(v),
        }
        patch
    }
}
