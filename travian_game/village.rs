use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use travian_types::{buildings::BuildingName, tribe::Tribe, units::UnitName, ResourceKind, Resources};

use crate::building_queue::BuildingQueue;

/// One of the (typically 18) resource fields surrounding a village.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourcePit {
    pub id: u8,
    pub kind: ResourceKind,
    pub level: u8,
}

/// One of the (up to 20) center/military/special buildings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VillageBuilding {
    pub id: u8,
    pub kind: BuildingName,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionRates {
    pub lumber: f64,
    pub clay: f64,
    pub iron: f64,
    pub crop: f64,
    pub free_crop_hourly: f64,
}

impl ProductionRates {
    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Lumber => self.lumber,
            ResourceKind::Clay => self.clay,
            ResourceKind::Iron => self.iron,
            ResourceKind::Crop => self.crop,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Village {
    pub id: u32,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub tribe: Tribe,

    pub resources: Resources,
    pub free_crop: f64,

    pub warehouse_capacity: f64,
    pub granary_capacity: f64,

    pub production: ProductionRates,

    pub pits: Vec<ResourcePit>,
    pub buildings: Vec<VillageBuilding>,
    pub building_queue: BuildingQueue,

    pub is_upgraded_to_city: bool,
    pub is_permanent_capital: bool,
    pub has_quest_master_reward: bool,
    pub is_under_attack: bool,
    pub incoming_attack_count: u32,
    pub next_attack_seconds: Option<u32>,

    pub troops: HashMap<UnitName, u32>,
    pub last_train_time: Option<DateTime<Utc>>,
}

impl Village {
    /// Center/military/special building slot ids; 1..=18 are resource pits.
    pub const CENTER_SLOT_RANGE: std::ops::RangeInclusive<u8> = 19..=40;

    /// Lowest unoccupied center slot id, for `BuildNewJob` placement.
    pub fn free_center_slot_id(&self) -> Option<u8> {
        Self::CENTER_SLOT_RANGE.find(|id| !self.buildings.iter().any(|b| b.id == *id))
    }

    /// §3.3 invariant: the ceiling a resource pit can be upgraded to, driven
    /// by whether the village has become a city or a permanent capital.
    pub fn max_pit_level(&self) -> u8 {
        if self.is_permanent_capital {
            20
        } else if self.is_upgraded_to_city {
            12
        } else {
            10
        }
    }

    pub fn building_level(&self, kind: BuildingName) -> u8 {
        self.buildings
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.level)
            .max()
            .unwrap_or(0)
    }

    pub fn main_building_level(&self) -> u8 {
        self.building_level(BuildingName::MainBuilding)
    }

    pub fn has_building(&self, kind: BuildingName) -> bool {
        self.buildings.iter().any(|b| b.kind == kind)
    }

    /// Pits not yet at the village's current max level, in ascending slot-id
    /// order (stable tie-break for "lowest-level pit" selection).
    pub fn upgradable_pits(&self) -> Vec<&ResourcePit> {
        let max = self.max_pit_level();
        let mut out: Vec<&ResourcePit> = self.pits.iter().filter(|p| p.level < max).collect();
        out.sort_by_key(|p| (p.level, p.id));
        out
    }

    pub fn pits_of_kind(&self, kind: ResourceKind) -> Vec<&ResourcePit> {
        self.upgradable_pits()
            .into_iter()
            .filter(|p| p.kind == kind)
            .collect()
    }

    pub fn free_crop_ratio(&self) -> f64 {
        if self.production.crop <= 0.0 {
            f64::INFINITY
        } else {
            self.free_crop / self.production.crop
        }
    }

    /// Hours until a capacity fills given its current stock and hourly
    /// production; `None` when production is non-positive (never fills).
    pub fn hours_to_fill(&self, capacity: f64, stock: f64, hourly_production: f64) -> Option<f64> {
        if hourly_production <= 0.0 {
            None
        } else {
            Some(((capacity - stock).max(0.0)) / hourly_production)
        }
    }

    pub fn warehouse_hours_to_fill(&self) -> Option<f64> {
        let stock = self.resources.lumber.max(self.resources.clay).max(self.resources.iron);
        let production = self
            .production
            .lumber
            .max(self.production.clay)
            .max(self.production.iron);
        self.hours_to_fill(self.warehouse_capacity, stock, production)
    }

    pub fn granary_hours_to_fill(&self) -> Option<f64> {
        self.hours_to_fill(self.granary_capacity, self.free_crop, self.production.crop)
    }

    pub fn settler_count(&self) -> u32 {
        self.troops.get(&UnitName::Settlers).copied().unwrap_or(0)
    }

    pub fn has_military_building(&self) -> bool {
        self.has_building(BuildingName::Barracks)
            || self.has_building(BuildingName::Stable)
            || self.has_building(BuildingName::Workshop)
    }

    pub fn train_cooldown_elapsed(&self, now: DateTime<Utc>) -> bool {
        match self.last_train_time {
            None => true,
            Some(last) => (now - last).num_seconds() >= 15 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pit(id: u8, kind: ResourceKind, level: u8) -> ResourcePit {
        ResourcePit { id, kind, level }
    }

    fn bare_village() -> Village {
        Village {
            id: 1,
            name: "Test".into(),
            x: 0,
            y: 0,
            tribe: Tribe::Gauls,
            resources: Resources::ZERO,
            free_crop: 0.0,
            warehouse_capacity: 1000.0,
            granary_capacity: 1000.0,
            production: ProductionRates::default(),
            pits: vec![],
            buildings: vec![],
            building_queue: BuildingQueue::new(Tribe::Gauls),
            is_upgraded_to_city: false,
            is_permanent_capital: false,
            has_quest_master_reward: false,
            is_under_attack: false,
            incoming_attack_count: 0,
            next_attack_seconds: None,
            troops: HashMap::new(),
            last_train_time: None,
        }
    }

    #[test]
    fn max_pit_level_follows_capital_and_city_flags() {
        let mut v = bare_village();
        assert_eq!(v.max_pit_level(), 10);
        v.is_upgraded_to_city = true;
        assert_eq!(v.max_pit_level(), 12);
        v.is_permanent_capital = true;
        assert_eq!(v.max_pit_level(), 20);
    }

    #[test]
    fn upgradable_pits_sorted_by_level_then_id() {
        let mut v = bare_village();
        v.pits = vec![
            pit(2, ResourceKind::Clay, 5),
            pit(1, ResourceKind::Lumber, 5),
            pit(3, ResourceKind::Iron, 1),
        ];
        let order: Vec<u8> = v.upgradable_pits().into_iter().map(|p| p.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn zero_production_means_never_fills() {
        let v = bare_village();
        assert_eq!(v.warehouse_hours_to_fill(), None);
    }

    #[test]
    fn settler_count_reads_the_settlers_entry() {
        let mut v = bare_village();
        assert_eq!(v.settler_count(), 0);
        v.troops.insert(UnitName::Settlers, 3);
        v.troops.insert(UnitName::Phalanx, 50);
        assert_eq!(v.settler_count(), 3);
    }
}
