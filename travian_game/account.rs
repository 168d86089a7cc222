use serde::{Deserialize, Serialize};

/// Server-wide and player-wide values that do not belong to any single
/// village.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub server_speed: f64,
    pub when_beginners_protection_expires_secs: Option<i64>,
    pub culture_points: Option<u32>,
    pub village_slots: Option<u32>,
    pub production_boost_active: ProductionBoostFlags,
}

/// The four per-resource "watch an ad to boost production" flags; a
/// strategy schedules `IncreaseProductionByWatchingCommercialsJob` whenever
/// not all four are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionBoostFlags {
    pub lumber: bool,
    pub clay: bool,
    pub iron: bool,
    pub crop: bool,
}

impl ProductionBoostFlags {
    pub fn all_active(&self) -> bool {
        self.lumber && self.clay && self.iron && self.crop
    }
}

impl Default for Account {
    fn default() -> Self {
        Self {
            server_speed: 1.0,
            when_beginners_protection_expires_secs: None,
            culture_points: None,
            village_slots: None,
            production_boost_active: ProductionBoostFlags::default(),
        }
    }
}
