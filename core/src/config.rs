use crate::{
    state::{RoomType, ServiceKind},
    types::Money,
};
use serde::{Deserialize, Serialize};

/// Footprint and guest capacity of one room type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomSpec {
    pub capacity: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomCatalog {
    pub single: RoomSpec,
    pub double: RoomSpec,
    pub luxury: RoomSpec,
}

impl RoomCatalog {
    pub fn spec(&self, room_type: RoomType) -> RoomSpec {
        match room_type {
            RoomType::Single => self.single,
            RoomType::Double => self.double,
            RoomType::Luxury => self.luxury,
        }
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self {
            single: RoomSpec { capacity: 1, width: 4, height: 3 },
            double: RoomSpec { capacity: 2, width: 4, height: 3 },
            luxury: RoomSpec { capacity: 2, width: 5, height: 4 },
        }
    }
}

/// Ranges used when a walk-in guest is generated. Both ranges are inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GuestGenerationConfig {
    pub min_satisfaction: u32,
    pub max_satisfaction: u32,
    /// Nights booked.
    pub min_stay_days: u32,
    pub max_stay_days: u32,
    /// Number of premade character sprites to pick from.
    pub character_sprites: u32,
}

impl Default for GuestGenerationConfig {
    fn default() -> Self {
        Self {
            min_satisfaction: 75,
            max_satisfaction: 99,
            min_stay_days: 3,
            max_stay_days: 8,
            character_sprites: 20,
        }
    }
}

/// Daily reputation bonus granted by each enabled service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ServiceBonuses {
    pub cafe: f64,
    pub gym: f64,
    pub wifi: f64,
    pub cleaning: f64,
}

impl ServiceBonuses {
    pub fn for_service(&self, kind: ServiceKind) -> f64 {
        match kind {
            ServiceKind::Cafe => self.cafe,
            ServiceKind::Gym => self.gym,
            ServiceKind::Wifi => self.wifi,
            ServiceKind::Cleaning => self.cleaning,
        }
    }
}

impl Default for ServiceBonuses {
    fn default() -> Self {
        Self { cafe: 5.0, gym: 5.0, wifi: 2.0, cleaning: 3.0 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OutcomeConfig {
    /// The game is lost once money drops strictly below this.
    pub debt_floor: Money,
    pub win_reputation: f64,
    pub win_money: Money,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            debt_floor: -1_000,
            win_reputation: 95.0,
            win_money: 100_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HotelConfig {
    /// Host ticks per in-game day at normal speed (60 ticks/s × 10 s).
    pub ticks_per_day: u32,
    pub room_build_cost: Money,
    pub check_in_fee: Money,
    pub rooms: RoomCatalog,
    pub guests: GuestGenerationConfig,
    pub service_bonuses: ServiceBonuses,
    /// Weight of (satisfaction − 50) in the daily reputation update.
    pub satisfaction_weight: f64,
    pub outcome: OutcomeConfig,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            ticks_per_day: 600,
            room_build_cost: 1_000,
            check_in_fee: 50,
            rooms: RoomCatalog::default(),
            guests: GuestGenerationConfig::default(),
            service_bonuses: ServiceBonuses::default(),
            satisfaction_weight: 0.1,
            outcome: OutcomeConfig::default(),
        }
    }
}

impl HotelConfig {
    /// Load from a JSON file. Sections missing from the file keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: HotelConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ticks_per_day == 0 {
            anyhow::bail!("ticks_per_day must be > 0");
        }
        let g = &self.guests;
        if g.min_satisfaction > g.max_satisfaction || g.max_satisfaction > 100 {
            anyhow::bail!(
                "guest satisfaction range [{}, {}] must lie within [0, 100]",
                g.min_satisfaction,
                g.max_satisfaction
            );
        }
        if g.min_stay_days == 0 || g.min_stay_days > g.max_stay_days {
            anyhow::bail!(
                "guest stay range [{}, {}] is empty or starts at zero",
                g.min_stay_days,
                g.max_stay_days
            );
        }
        if g.character_sprites == 0 {
            anyhow::bail!("character_sprites must be > 0");
        }
        Ok(())
    }
}
