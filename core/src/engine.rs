//! The simulation state engine: the heart of Hotel Manager.
//!
//! `HotelEngine` is the sole owner of `HotelState`. Reads hand out copies;
//! writes go through the named operations below, each of which leaves the
//! state consistent when it returns:
//!   - `guest_count == guests.len()`
//!   - `guest_count <= max_guests` at check-in time
//!   - `satisfaction` and `reputation` change only through
//!     `update_satisfaction` / `update_reputation`
//!   - `achievements` holds no duplicates
//!
//! DAY ORDER (fixed, never reordered):
//!   1. day += 1
//!   2. pay daily expenses (unconditional, may go into debt)
//!   3. shorten every stay, check out expired guests
//!   4. recompute satisfaction, then reputation
//!
//! Fallible persistence calls have `try_*` variants returning
//! `HotelResult`; the plain variants log the error and return `false`.

use crate::{
    clock::SimClock,
    command::PlayerCommand,
    config::HotelConfig,
    error::{HotelError, HotelResult},
    event::HotelEvent,
    name_generator::NameGenerator,
    rng::{HotelRng, RngStream},
    snapshot::{
        slot_key, GameOutcome, SaveRecord, SaveSlotSummary, Statistics, StoredSave,
        DEFAULT_SLOT, SAVE_KEY_PREFIX,
    },
    state::{Guest, HotelState, Room, RoomType, ServiceKind, StateKey, StatePatch, StateValue},
    store::SaveStore,
    types::{Day, GuestId, Money, RoomId},
};

pub struct HotelEngine {
    pub clock: SimClock,
    config:    HotelConfig,
    state:     HotelState,
    arrivals:  HotelRng,
    names:     HotelRng,
    store:     SaveStore,
    events:    Vec<HotelEvent>,
    reported_outcome: GameOutcome,
    /// Highest room id handed out this session; removed rooms keep theirs.
    last_room_id: RoomId,
}

impl HotelEngine {
    pub fn new(config: HotelConfig, seed: u64, store: SaveStore) -> Self {
        Self {
            clock:    SimClock::new(config.ticks_per_day),
            arrivals: HotelRng::new(seed, RngStream::Arrivals),
            names:    HotelRng::new(seed, RngStream::Names),
            state:    HotelState::default(),
            events:   Vec::new(),
            reported_outcome: GameOutcome::InProgress,
            last_room_id: 0,
            config,
            store,
        }
    }

    /// Engine over a fresh in-memory save store with the default config.
    pub fn build_test(seed: u64) -> HotelResult<Self> {
        let store = SaveStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(HotelConfig::default(), seed, store))
    }

    pub fn config(&self) -> &HotelConfig {
        &self.config
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    // ── Whole-state and single-field access ───────────────────────

    /// Shallow merge: every field present in `patch` replaces the current
    /// field wholesale. No validation; the caller keeps the state consistent.
    pub fn set_data(&mut self, patch: StatePatch) {
        patch.apply_to(&mut self.state);
    }

    /// Independent copy of the full state.
    pub fn get_data(&self) -> HotelState {
        self.state.clone()
    }

    pub fn set_value(&mut self, value: StateValue) {
        self.set_data(StatePatch::from(value));
    }

    pub fn get_value(&self, key: StateKey) -> StateValue {
        self.state.value(key)
    }

    pub fn money(&self) -> Money {
        self.state.money
    }

    pub fn day(&self) -> Day {
        self.state.day
    }

    pub fn guest_count(&self) -> u32 {
        self.state.guest_count
    }

    pub fn max_guests(&self) -> u32 {
        self.state.max_guests
    }

    pub fn satisfaction(&self) -> u32 {
        self.state.satisfaction
    }

    pub fn reputation(&self) -> f64 {
        self.state.reputation
    }

    // ── Money ─────────────────────────────────────────────────────

    /// Credit `amount`. Only positive amounts count toward total earnings.
    pub fn add_money(&mut self, amount: Money) {
        self.state.money = self.state.money.saturating_add(amount);
        self.state.total_earnings = self.state.total_earnings.saturating_add(amount.max(0));
    }

    /// Debit `amount` if the balance covers it.
    pub fn spend_money(&mut self, amount: Money) -> bool {
        if self.state.money >= amount {
            self.state.money = self.state.money.saturating_sub(amount);
            return true;
        }
        false
    }

    // ── Guests ────────────────────────────────────────────────────

    pub fn add_guest(&mut self, guest: Guest) -> bool {
        if self.state.guest_count >= self.state.max_guests {
            return false;
        }
        self.state.guests.push(guest);
        self.state.guest_count += 1;
        self.state.total_guests = self.state.total_guests.saturating_add(1);
        true
    }

    /// Remove the first guest with `guest_id` and free the room they held.
    pub fn remove_guest(&mut self, guest_id: GuestId) -> bool {
        let Some(index) = self.state.guests.iter().position(|g| g.id == guest_id) else {
            return false;
        };
        let guest = self.state.guests.remove(index);
        self.state.guest_count = self.state.guest_count.saturating_sub(1);

        if let Some(room_id) = guest.room_id {
            if let Some(room) = self.state.rooms.iter_mut().find(|r| r.id == room_id) {
                room.occupied = false;
                room.guest_id = None;
            }
        }
        true
    }

    /// Generate a walk-in guest and put them in the first vacant room.
    /// Fails when the hotel is at capacity or every room is taken.
    pub fn check_in_guest(&mut self) -> Option<Guest> {
        if self.state.guest_count >= self.state.max_guests {
            log::debug!("check-in refused: hotel full ({})", self.state.max_guests);
            return None;
        }
        let room = self.state.vacant_room()?.clone();

        let g = self.config.guests;
        let satisfaction = self.arrivals.range_inclusive(g.min_satisfaction, g.max_satisfaction);
        let stay = self.arrivals.range_inclusive(g.min_stay_days, g.max_stay_days);
        let character_id = self.arrivals.range_inclusive(1, g.character_sprites);
        let (x, y) = room.centre();

        let guest = Guest {
            id: self.state.next_guest_id(),
            name: NameGenerator::generate_full_name(&mut self.names),
            x,
            y,
            satisfaction: satisfaction as f64,
            stay_duration: stay as i32,
            room_id: Some(room.id),
            character_id,
            check_in_day: self.state.day,
        };
        if !self.add_guest(guest.clone()) {
            return None;
        }
        if let Some(r) = self.state.rooms.iter_mut().find(|r| r.id == room.id) {
            r.occupied = true;
            r.guest_id = Some(guest.id);
        }
        self.add_money(self.config.check_in_fee);

        log::debug!(
            "day={} {} checked into room {} for {} nights",
            self.state.day, guest.name, room.id, guest.stay_duration
        );
        self.events.push(HotelEvent::GuestCheckedIn {
            day: self.state.day,
            guest_id: guest.id,
            room_id: room.id,
            name: guest.name.clone(),
        });
        Some(guest)
    }

    /// Bill the guest for the nights stayed (at least one) at their room's
    /// rate, then remove them. Returns the bill.
    pub fn check_out_guest(&mut self, guest_id: GuestId) -> Option<Money> {
        let guest = self.state.guest(guest_id)?.clone();
        let nights = self.state.day.saturating_sub(guest.check_in_day).max(1) as Money;
        let rate = guest
            .room_id
            .and_then(|id| self.state.room(id))
            .map(|r| r.price)
            .unwrap_or(0);
        let bill = rate.saturating_mul(nights);

        self.remove_guest(guest_id);
        self.add_money(bill);

        self.events.push(HotelEvent::GuestCheckedOut {
            day: self.state.day,
            guest_id,
            room_id: guest.room_id,
            bill,
        });
        Some(bill)
    }

    // ── Rooms ─────────────────────────────────────────────────────

    /// Add a room; its capacity is added to `max_guests`.
    pub fn add_room(&mut self, room: Room) {
        self.last_room_id = self.last_room_id.max(room.id);
        self.state.max_guests = self.state.max_guests.saturating_add(room.capacity);
        self.state.rooms.push(room);
    }

    /// Remove a room and its capacity. A guest staying there keeps their
    /// booking but loses the room reference.
    pub fn remove_room(&mut self, room_id: RoomId) -> bool {
        let Some(index) = self.state.rooms.iter().position(|r| r.id == room_id) else {
            return false;
        };
        let room = self.state.rooms.remove(index);
        self.state.max_guests = self.state.max_guests.saturating_sub(room.capacity);

        for guest in self.state.guests.iter_mut().filter(|g| g.room_id == Some(room_id)) {
            guest.room_id = None;
        }
        true
    }

    /// Buy a new room of `room_type` at the configured build cost.
    /// Rooms are laid out three per row in creation order.
    pub fn build_room(&mut self, room_type: RoomType) -> Option<Room> {
        let cost = self.config.room_build_cost;
        if !self.spend_money(cost) {
            log::debug!("cannot afford a {} room: {} < {cost}", room_type.name(), self.state.money);
            return None;
        }

        let spec = self.config.rooms.spec(room_type);
        let n = self.state.rooms.len() as i32;
        let room = Room {
            id: self.state.next_room_id().max(self.last_room_id.saturating_add(1)),
            x: 2 + (n % 3) * 6,
            y: 2 + (n / 3) * 4,
            width: spec.width,
            height: spec.height,
            room_type,
            occupied: false,
            price: self.state.prices.get(room_type),
            capacity: spec.capacity,
            guest_id: None,
        };
        self.add_room(room.clone());

        self.events.push(HotelEvent::RoomBuilt {
            day: self.state.day,
            room_id: room.id,
            room_type,
            cost,
        });
        Some(room)
    }

    // ── Derived scores ────────────────────────────────────────────

    /// Mean guest satisfaction, rounded; 0 with no guests.
    pub fn update_satisfaction(&mut self) {
        if self.state.guests.is_empty() {
            self.state.satisfaction = 0;
            return;
        }
        let total: f64 = self.state.guests.iter().map(|g| g.satisfaction).sum();
        let mean = total / self.state.guests.len() as f64;
        self.state.satisfaction = mean.round().clamp(0.0, 100.0) as u32;
    }

    /// Incremental: moves the previous reputation by the satisfaction
    /// deviation from 50 plus the bonus of every enabled service.
    pub fn update_reputation(&mut self) {
        let satisfaction_term =
            (self.state.satisfaction as f64 - 50.0) * self.config.satisfaction_weight;
        let service_bonus = self.state.services.bonus(&self.config.service_bonuses);
        self.state.reputation =
            (self.state.reputation + satisfaction_term + service_bonus).clamp(0.0, 100.0);
    }

    // ── Time ──────────────────────────────────────────────────────

    pub fn next_day(&mut self) {
        self.state.day = self.state.day.saturating_add(1);

        // Forced expenses skip the spend_money guard: the hotel pays its
        // bills even into debt.
        let expenses = self.state.expenses.daily_total();
        self.state.money = self.state.money.saturating_sub(expenses);

        let departures = self.expire_stays();

        self.update_satisfaction();
        self.update_reputation();

        log::info!(
            "day={} money={} guests={}/{} satisfaction={} reputation={:.1}",
            self.state.day,
            self.state.money,
            self.state.guest_count,
            self.state.max_guests,
            self.state.satisfaction,
            self.state.reputation
        );
        self.events.push(HotelEvent::DayAdvanced {
            day: self.state.day,
            expenses_paid: expenses,
            money: self.state.money,
            departures,
        });
        self.report_outcome();
    }

    /// Shorten every stay by one night and remove the guests whose stay is
    /// over. Ids are collected first, then removed.
    fn expire_stays(&mut self) -> u32 {
        for guest in &mut self.state.guests {
            guest.stay_duration = guest.stay_duration.saturating_sub(1);
        }
        let leaving: Vec<GuestId> = self
            .state
            .guests
            .iter()
            .filter(|g| g.stay_duration <= 0)
            .map(|g| g.id)
            .collect();

        for guest_id in &leaving {
            if self.remove_guest(*guest_id) {
                self.events.push(HotelEvent::GuestDeparted {
                    day: self.state.day,
                    guest_id: *guest_id,
                });
            }
        }
        leaving.len() as u32
    }

    /// One host update tick. Runs `next_day` when the clock crosses a day
    /// boundary and returns every event raised since the last drain.
    pub fn tick(&mut self) -> Vec<HotelEvent> {
        if self.clock.advance() {
            self.next_day();
        }
        self.take_events()
    }

    pub fn take_events(&mut self) -> Vec<HotelEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Management ────────────────────────────────────────────────

    pub fn toggle_service(&mut self, name: &str) -> bool {
        let Some(kind) = ServiceKind::from_name(name) else {
            log::warn!("Unknown service: {name}");
            return false;
        };
        let enabled = self.state.services.toggle(kind);
        log::debug!("service {} -> {}", kind.name(), if enabled { "on" } else { "off" });
        true
    }

    /// Set the nightly rate for a price key (`singleRoom`, `doubleRoom`,
    /// `luxuryRoom`), clamped at zero. Existing rooms of that type are
    /// re-priced too.
    pub fn set_price(&mut self, room_type: &str, price: Money) -> bool {
        let Some(kind) = RoomType::from_price_key(room_type) else {
            log::warn!("Unknown room type: {room_type}");
            return false;
        };
        let price = price.max(0);
        self.state.prices.set(kind, price);
        for room in self.state.rooms.iter_mut().filter(|r| r.room_type == kind) {
            room.price = price;
        }
        true
    }

    pub fn unlock_achievement(&mut self, achievement_id: &str) -> bool {
        if self.state.achievements.iter().any(|a| a == achievement_id) {
            return false;
        }
        self.state.achievements.push(achievement_id.to_string());
        log::info!("Achievement unlocked: {achievement_id}");
        self.events.push(HotelEvent::AchievementUnlocked {
            day: self.state.day,
            achievement_id: achievement_id.to_string(),
        });
        true
    }

    // ── Persistence ───────────────────────────────────────────────

    pub fn save_game(&self, slot: &str) -> bool {
        self.save_game_at(slot, chrono::Utc::now().timestamp_millis())
    }

    /// Save with a caller-supplied timestamp (epoch milliseconds).
    pub fn save_game_at(&self, slot: &str, timestamp: i64) -> bool {
        match self.try_save_game(slot, timestamp) {
            Ok(()) => {
                log::info!("Game saved: {slot}");
                true
            }
            Err(e) => {
                log::error!("Saving slot '{slot}' failed: {e}");
                false
            }
        }
    }

    pub fn try_save_game(&self, slot: &str, timestamp: i64) -> HotelResult<()> {
        let record = SaveRecord { timestamp, data: &self.state };
        let json = serde_json::to_string(&record)?;
        self.store.put(&slot_key(slot), &json, timestamp)
    }

    /// Replace the current state with the save in `slot`. Leaves the
    /// current state untouched if the slot is missing or unreadable.
    pub fn load_game(&mut self, slot: &str) -> bool {
        match self.try_load_game(slot) {
            Ok(()) => {
                log::info!("Game loaded: {slot}");
                true
            }
            Err(HotelError::SlotNotFound { .. }) => {
                log::info!("No save in slot '{slot}'");
                false
            }
            Err(e) => {
                log::error!("Loading slot '{slot}' failed: {e}");
                false
            }
        }
    }

    pub fn try_load_game(&mut self, slot: &str) -> HotelResult<()> {
        let raw = self
            .store
            .get(&slot_key(slot))?
            .ok_or_else(|| HotelError::SlotNotFound { slot: slot.to_string() })?;
        let stored: StoredSave = serde_json::from_str(&raw)?;

        self.state = stored.data.onto_defaults();
        self.last_room_id = 0;
        self.clock.reset_day();
        self.reported_outcome = self.outcome();
        Ok(())
    }

    pub fn new_game(&mut self) {
        self.state = HotelState::default();
        self.last_room_id = 0;
        self.clock = SimClock::new(self.config.ticks_per_day);
        self.events.clear();
        self.reported_outcome = GameOutcome::InProgress;
        log::info!("New game started");
    }

    /// Every save slot, newest first. Unreadable slots are skipped.
    pub fn get_save_slots(&self) -> Vec<SaveSlotSummary> {
        let entries = match self.store.entries_with_prefix(SAVE_KEY_PREFIX) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Listing save slots failed: {e}");
                return Vec::new();
            }
        };

        let mut slots: Vec<SaveSlotSummary> = entries
            .into_iter()
            .filter_map(|(key, value)| {
                let name = key.strip_prefix(SAVE_KEY_PREFIX)?.to_string();
                match serde_json::from_str::<StoredSave>(&value) {
                    Ok(stored) => {
                        let data = stored.data.onto_defaults();
                        Some(SaveSlotSummary {
                            name,
                            timestamp: stored.timestamp,
                            hotel_name: data.hotel_name,
                            day: data.day,
                            money: data.money,
                        })
                    }
                    Err(e) => {
                        log::warn!("Skipping corrupt save slot '{name}': {e}");
                        None
                    }
                }
            })
            .collect();

        slots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        slots
    }

    /// Delete a save slot. Deleting a slot that does not exist succeeds.
    pub fn delete_save_slot(&self, slot: &str) -> bool {
        match self.store.remove(&slot_key(slot)) {
            Ok(existed) => {
                if existed {
                    log::info!("Save slot deleted: {slot}");
                } else {
                    log::debug!("Save slot '{slot}' was already absent");
                }
                true
            }
            Err(e) => {
                log::error!("Deleting slot '{slot}' failed: {e}");
                false
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────

    pub fn get_statistics(&self) -> Statistics {
        Statistics::from_state(&self.state)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.money < self.config.outcome.debt_floor
    }

    pub fn is_game_won(&self) -> bool {
        let o = &self.config.outcome;
        self.state.reputation >= o.win_reputation && self.state.money >= o.win_money
    }

    /// Loss is checked first.
    pub fn outcome(&self) -> GameOutcome {
        if self.is_game_over() {
            GameOutcome::Lost
        } else if self.is_game_won() {
            GameOutcome::Won
        } else {
            GameOutcome::InProgress
        }
    }

    /// Queue an event the first time the outcome changes.
    fn report_outcome(&mut self) {
        let outcome = self.outcome();
        if outcome == self.reported_outcome {
            return;
        }
        self.reported_outcome = outcome;
        match outcome {
            GameOutcome::Lost => {
                log::warn!("day={} game over: money {}", self.state.day, self.state.money);
                self.events.push(HotelEvent::GameOver {
                    day: self.state.day,
                    money: self.state.money,
                });
            }
            GameOutcome::Won => {
                log::info!("day={} hotel won", self.state.day);
                self.events.push(HotelEvent::GameWon {
                    day: self.state.day,
                    money: self.state.money,
                    reputation: self.state.reputation,
                });
            }
            GameOutcome::InProgress => {}
        }
    }

    // ── Commands ──────────────────────────────────────────────────

    /// Dispatch a player command. Returns the operation's success flag.
    pub fn apply(&mut self, command: PlayerCommand) -> bool {
        match command {
            PlayerCommand::Pause => {
                self.clock.pause();
                true
            }
            PlayerCommand::Resume => {
                self.clock.resume();
                true
            }
            PlayerCommand::SetSpeed { speed } => {
                self.clock.set_speed(speed);
                true
            }
            PlayerCommand::NextDay => {
                self.next_day();
                self.clock.reset_day();
                true
            }
            PlayerCommand::BuildRoom { room_type } => match RoomType::from_name(&room_type) {
                Some(kind) => self.build_room(kind).is_some(),
                None => {
                    log::warn!("Unknown room type: {room_type}");
                    false
                }
            },
            PlayerCommand::RemoveRoom { room_id } => self.remove_room(room_id),
            PlayerCommand::CheckInGuest => self.check_in_guest().is_some(),
            PlayerCommand::CheckOutGuest { guest_id } => self.check_out_guest(guest_id).is_some(),
            PlayerCommand::ToggleService { service } => self.toggle_service(&service),
            PlayerCommand::SetPrice { room_type, price } => self.set_price(&room_type, price),
            PlayerCommand::UnlockAchievement { achievement_id } => {
                self.unlock_achievement(&achievement_id)
            }
            PlayerCommand::SaveGame { slot } => {
                self.save_game(slot.as_deref().unwrap_or(DEFAULT_SLOT))
            }
            PlayerCommand::LoadGame { slot } => {
                self.load_game(slot.as_deref().unwrap_or(DEFAULT_SLOT))
            }
            PlayerCommand::DeleteSaveSlot { slot } => self.delete_save_slot(&slot),
            PlayerCommand::NewGame => {
                self.new_game();
                true
            }
        }
    }
}
