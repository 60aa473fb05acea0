//! Host-tick clock. Owns tick count, speed control, pause, and the
//! progress toward the next in-game day.

use crate::types::Tick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub current_tick: Tick,
    pub speed:        SimSpeed,
    pub paused:       bool,
    pub ticks_per_day: u32,
    day_progress:     u32,
}

impl SimClock {
    pub fn new(ticks_per_day: u32) -> Self {
        Self {
            current_tick: 0,
            speed: SimSpeed::Normal,
            paused: false,
            ticks_per_day: ticks_per_day.max(1),
            day_progress: 0,
        }
    }

    /// Advance one host tick. Returns true when this tick completes a day.
    /// Does nothing while paused.
    pub fn advance(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.current_tick += 1;
        self.day_progress += self.speed.multiplier();
        if self.day_progress >= self.ticks_per_day {
            self.day_progress -= self.ticks_per_day;
            return true;
        }
        false
    }

    /// Fraction of the current day already elapsed, in [0, 1).
    pub fn day_fraction(&self) -> f64 {
        self.day_progress as f64 / self.ticks_per_day as f64
    }

    /// Start the day over, e.g. after a forced day advance.
    pub fn reset_day(&mut self) {
        self.day_progress = 0;
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    pub fn set_speed(&mut self, speed: SimSpeed) {
        self.speed = speed;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimSpeed {
    Normal,   // 1 day per ticks_per_day host ticks
    Fast,     // 2x
    Fastest,  // 4x
}

impl SimSpeed {
    pub fn multiplier(&self) -> u32 {
        match self {
            SimSpeed::Normal  => 1,
            SimSpeed::Fast    => 2,
            SimSpeed::Fastest => 4,
        }
    }
}
