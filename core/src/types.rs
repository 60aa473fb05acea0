//! Shared primitive types used across the entire simulation.

/// One in-game day. Day 1 is the first day of a new game.
pub type Day = u32;

/// Identifier of a room, unique within the hotel's room list.
pub type RoomId = u32;

/// Identifier of a guest, unique within the current guest list.
pub type GuestId = u32;

/// Money in whole currency units. Negative means debt.
pub type Money = i64;

/// A host update tick.
pub type Tick = u64;
