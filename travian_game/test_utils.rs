use std::collections::HashMap;

use chrono::Utc;

use travian_types::tribe::Tribe;

use crate::{
    account::Account,
    building_queue::BuildingQueue,
    game_state::GameState,
    hero::HeroInfo,
    village::{ProductionRates, Village},
};

#[derive(Default, Clone)]
pub struct VillageFactoryOptions {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub tribe: Option<Tribe>,
    pub resources: Option<travian_types::Resources>,
    pub production: Option<ProductionRates>,
    pub is_upgraded_to_city: Option<bool>,
    pub is_permanent_capital: Option<bool>,
}

pub fn village_factory(options: VillageFactoryOptions) -> Village {
    let tribe = options.tribe.unwrap_or(Tribe::Gauls);
    Village {
        id: options.id.unwrap_or(1),
        name: options.name.unwrap_or_else(|| "Factory Village".to_string()),
        x: 0,
        y: 0,
        tribe,
        resources: options.resources.unwrap_or(travian_types::Resources::ZERO),
        free_crop: 0.0,
        warehouse_capacity: 800.0,
        granary_capacity: 800.0,
        production: options.production.unwrap_or_default(),
        pits: vec![],
        buildings: vec![],
        building_queue: BuildingQueue::new(tribe),
        is_upgraded_to_city: options.is_upgraded_to_city.unwrap_or(false),
        is_permanent_capital: options.is_permanent_capital.unwrap_or(false),
        has_quest_master_reward: false,
        is_under_attack: false,
        incoming_attack_count: 0,
        next_attack_seconds: None,
        troops: HashMap::new(),
        last_train_time: None,
    }
}

#[derive(Default, Clone)]
pub struct GameStateFactoryOptions {
    pub account: Option<Account>,
    pub villages: Option<Vec<Village>>,
    pub hero: Option<HeroInfo>,
}

pub fn game_state_factory(options: GameStateFactoryOptions) -> GameState {
    GameState {
        account: options.account.unwrap_or_default(),
        villages: options
            .villages
            .unwrap_or_else(|| vec![village_factory(Default::default())]),
        hero: options.hero.unwrap_or_default(),
    }
}

#[derive(Default, Clone)]
pub struct HeroInfoFactoryOptions {
    pub health: Option<u16>,
    pub inventory: Option<travian_types::Resources>,
    pub points_available: Option<u32>,
}

pub fn hero_info_factory(options: HeroInfoFactoryOptions) -> HeroInfo {
    HeroInfo {
        health: options.health.unwrap_or(100),
        experience: 0,
        adventures: 0,
        is_available: true,
        points_available: options.points_available.unwrap_or(0),
        inventory: options.inventory.unwrap_or(travian_types::Resources::ZERO),
        has_daily_quest_indicator: false,
        reserved: travian_types::Resources::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn village_factory_defaults_to_gauls() {
        let v = village_factory(Default::default());
        assert_eq!(v.tribe, Tribe::Gauls);
        assert_eq!(v.id, 1);
    }

    #[test]
    fn game_state_factory_seeds_one_village_by_default() {
        let state = game_state_factory(Default::default());
        assert_eq!(state.villages.len(), 1);
        assert_eq!(state.hero.health, 0);
    }

    #[test]
    fn hero_info_factory_defaults_to_available() {
        let hero = hero_info_factory(Default::default());
        assert!(hero.is_available);
        assert_eq!(hero.health, 100);
    }

    #[test]
    fn now_helper_is_monotonic_enough_for_scheduling() {
        let a = Utc::now();
        let b = Utc::now();
        assert!(b >= a);
    }
}
