use serde::{Deserialize, Serialize};
use travian_types::{ResourceKind, Resources};

use crate::{account::Account, hero::HeroInfo, village::Village};

/// Top-level aggregate of one planning pass. Constructed fresh every pass;
/// only the scheduler queue and inter-pass freezes outlive it (§3.4, §9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub account: Account,
    pub villages: Vec<Village>,
    pub hero: HeroInfo,
}

impl GameState {
    /// Sum of every village's stocks plus the hero's inventory.
    pub fn global_resources(&self) -> Resources {
        self.villages
            .iter()
            .fold(self.hero.inventory, |acc, v| acc + v.resources)
    }

    /// Projects `global_resources` forward by `hours` of combined hourly
    /// production and returns the kind with the smallest resulting amount.
    pub fn global_lowest_resource_in(&self, hours: f64) -> ResourceKind {
        let hourly = self.villages.iter().fold(Resources::ZERO, |acc, v| {
            acc + Resources::new(
                v.production.lumber,
                v.production.clay,
                v.production.iron,
                v.production.crop,
            )
        });
        let projected = self.global_resources() + hourly * hours;
        projected.min_type()
    }

    /// §4.4 step 1: whether the dispersion across kinds is wide enough to
    /// name a global priority kind. `None` means "no global preference".
    pub fn global_priority_kind(&self) -> Option<ResourceKind> {
        let r = self.global_resources();
        let max = r.lumber.max(r.clay).max(r.iron).max(r.crop);
        if max <= 0.0 {
            return None;
        }
        let min = r.lumber.min(r.clay).min(r.iron).min(r.crop);
        if (max - min) / max < 0.1 {
            None
        } else {
            Some(r.min_type())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use travian_types::tribe::Tribe;

    use crate::{building_queue::BuildingQueue, village::ProductionRates};

    fn village_with(resources: Resources) -> Village {
        Village {
            id: 1,
            name: "V".into(),
            x: 0,
            y: 0,
            tribe: Tribe::Gauls,
            resources,
            free_crop: 0.0,
            warehouse_capacity: 10_000.0,
            granary_capacity: 10_000.0,
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
    fn even_distribution_has_no_global_preference() {
        let state = GameState {
            account: Account::default(),
            villages: vec![village_with(Resources::new(100.0, 100.0, 100.0, 100.0))],
            hero: HeroInfo::default(),
        };
        assert_eq!(state.global_priority_kind(), None);
    }

    #[test]
    fn skewed_distribution_names_the_scarcest_kind() {
        let state = GameState {
            account: Account::default(),
            villages: vec![village_with(Resources::new(1000.0, 10.0, 1000.0, 1000.0))],
            hero: HeroInfo::default(),
        };
        assert_eq!(state.global_priority_kind(), Some(ResourceKind::Clay));
    }
}
