use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use travian_types::{tribe::Tribe, units::UnitName, ScanError};

use crate::{
    account::Account,
    building_queue::BuildingQueue,
    hero::HeroInfo,
    village::{ProductionRates, ResourcePit, VillageBuilding},
};

/// The identity row scraped from the village list dropdown: enough to
/// address a village before its detail pages have been fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillageIdentity {
    pub id: u32,
    pub name: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockBar {
    pub lumber: f64,
    pub clay: f64,
    pub iron: f64,
    pub crop: f64,
    pub free_crop: f64,
    pub warehouse_capacity: f64,
    pub granary_capacity: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomingAttacks {
    pub count: u32,
    pub next_attack_seconds: Option<u32>,
}

/// Pure HTML-to-domain-value transforms (§6.1). Every method takes already
/// fetched markup and returns typed data or a [`ScanError`]; none of them
/// touch the network themselves, that's the [`crate::driver::Driver`]'s job.
pub trait Scanner: Send + Sync {
    fn scan_village_list(&self, dorf1_html: &str) -> Result<Vec<VillageIdentity>, ScanError>;
    fn scan_account_info(&self, dorf1_html: &str) -> Result<Account, ScanError>;
    fn scan_stock_bar(&self, html: &str) -> Result<StockBar, ScanError>;
    fn scan_production(&self, html: &str) -> Result<ProductionRates, ScanError>;
    fn scan_resource_fields(&self, html: &str) -> Result<Vec<ResourcePit>, ScanError>;
    fn scan_village_center(&self, html: &str) -> Result<Vec<VillageBuilding>, ScanError>;
    fn scan_building_queue(
        &self,
        html: &str,
        tribe: Tribe,
    ) -> Result<BuildingQueue, ScanError>;
    fn scan_hero_info(
        &self,
        hero_attrs_html: &str,
        inventory_html: &str,
    ) -> Result<HeroInfo, ScanError>;
    fn scan_troops(&self, html: &str) -> Result<HashMap<UnitName, u32>, ScanError>;
    fn is_reward_available(&self, html: &str) -> bool;
    fn is_daily_quest_indicator(&self, nav_fragment: &str) -> bool;
    fn scan_advertise_remaining_time(&self, iframe_html: &str) -> Result<u32, ScanError>;
    fn scan_incoming_attacks(&self, movements_html: &str) -> Result<IncomingAttacks, ScanError>;
    fn identify_tribe(&self, dorf2_html: &str) -> Result<Tribe, ScanError>;
}

/// Canned `Scanner` returning pre-configured values regardless of the HTML
/// it is handed. Parsing a real Travian page is out of scope for this
/// repository; this fake is what the agent's dry-run mode and this crate's
/// own tests observe instead of a browser session.
#[derive(Debug, Clone, Default)]
pub struct FakeScanner {
    pub villages: Vec<VillageIdentity>,
    pub account: Account,
    pub stock_bar: StockBar,
    pub production: ProductionRates,
    pub resource_fields: Vec<ResourcePit>,
    pub village_center: Vec<VillageBuilding>,
    pub tribe: Tribe,
    pub hero: HeroInfo,
    pub troops: HashMap<UnitName, u32>,
    pub reward_available: bool,
    pub daily_quest_indicator: bool,
    pub advertise_remaining_seconds: u32,
    pub incoming_attacks: IncomingAttacks,
}

impl Default for StockBar {
    fn default() -> Self {
        Self {
            lumber: 0.0,
            clay: 0.0,
            iron: 0.0,
            crop: 0.0,
            free_crop: 0.0,
            warehouse_capacity: 800.0,
            granary_capacity: 800.0,
        }
    }
}

impl Scanner for FakeScanner {
    fn scan_village_list(&self, _dorf1_html: &str) -> Result<Vec<VillageIdentity>, ScanError> {
        Ok(self.villages.clone())
    }

    fn scan_account_info(&self, _dorf1_html: &str) -> Result<Account, ScanError> {
        Ok(self.account.clone())
    }

    fn scan_stock_bar(&self, _html: &str) -> Result<StockBar, ScanError> {
        Ok(self.stock_bar)
    }

    fn scan_production(&self, _html: &str) -> Result<ProductionRates, ScanError> {
        Ok(self.production)
    }

    fn scan_resource_fields(&self, _html: &str) -> Result<Vec<ResourcePit>, ScanError> {
        Ok(self.resource_fields.clone())
    }

    fn scan_village_center(&self, _html: &str) -> Result<Vec<VillageBuilding>, ScanError> {
        Ok(self.village_center.clone())
    }

    fn scan_building_queue(&self, _html: &str, tribe: Tribe) -> Result<BuildingQueue, ScanError> {
        Ok(BuildingQueue::new(tribe))
    }

    fn scan_hero_info(
        &self,
        _hero_attrs_html: &str,
        _inventory_html: &str,
    ) -> Result<HeroInfo, ScanError> {
        Ok(self.hero.clone())
    }

    fn scan_troops(&self, _html: &str) -> Result<HashMap<UnitName, u32>, ScanError> {
        Ok(self.troops.clone())
    }

    fn is_reward_available(&self, _html: &str) -> bool {
        self.reward_available
    }

    fn is_daily_quest_indicator(&self, _nav_fragment: &str) -> bool {
        self.daily_quest_indicator
    }

    fn scan_advertise_remaining_time(&self, _iframe_html: &str) -> Result<u32, ScanError> {
        Ok(self.advertise_remaining_seconds)
    }

    fn scan_incoming_attacks(&self, _movements_html: &str) -> Result<IncomingAttacks, ScanError> {
        Ok(self.incoming_attacks)
    }

    fn identify_tribe(&self, _dorf2_html: &str) -> Result<Tribe, ScanError> {
        Ok(self.tribe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_scanner_returns_what_it_was_given() {
        let mut scanner = FakeScanner::default();
        scanner.tribe = Tribe::Huns;
        scanner.reward_available = true;
        assert_eq!(scanner.identify_tribe("<html/>").unwrap(), Tribe::Huns);
        assert!(scanner.is_reward_available("<html/>"));
    }

    #[test]
    fn building_queue_scan_matches_requested_tribe() {
        let scanner = FakeScanner::default();
        let q = scanner.scan_building_queue("<html/>", Tribe::Romans).unwrap();
        assert!(q.parallel_building_allowed());
    }
}
