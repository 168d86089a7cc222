use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use travian_types::{buildings::BuildingName, tribe::Tribe, units::UnitName, ResourceKind, Resources};

use crate::{
    account::ProductionBoostFlags,
    building_queue::QueueKey,
    calculator::TravianCalculator,
    game_state::GameState,
    hero::HeroInfo,
    job::{Job, JobKind},
    village::{ResourcePit, Village},
};

/// Coarse bucket of account progress, used to gate military planning until
/// the economy is established (§4.4.1).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DevelopmentStage {
    Early,
    Mid,
    Advanced,
}

/// Aggregate troop counts across every village, used by the settler and
/// training heuristics so they don't starve the defense (§4.4.1).
#[derive(Debug, Clone, Default)]
pub struct TroopStatistics {
    pub total_troops: u32,
    pub per_kind: HashMap<UnitName, u32>,
}

/// Ambient thresholds a strategy needs but which don't belong to game state
/// itself — sourced from the agent's configuration surface (§6.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub minimal_hero_health: u16,
    pub minimum_storage_capacity_hours: f64,
    pub daily_quest_threshold: u32,
    /// Absolute point targets for fighting_strength, off_bonus, def_bonus,
    /// production_points, applied in that order before the ratio phase.
    pub attributes_steps: [u32; 4],
    /// Target proportions for the same four attributes, used once the step
    /// targets are satisfied.
    pub attributes_ratio: [f64; 4],
    /// Hours charged to kinds with zero production, so a shortage that can
    /// never close doesn't delay scheduling forever.
    pub infeasible_delay_ceiling_hours: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            minimal_hero_health: 30,
            minimum_storage_capacity_hours: 6.0,
            daily_quest_threshold: 100,
            attributes_steps: [0, 0, 0, 0],
            attributes_ratio: [0.25, 0.25, 0.25, 0.25],
            infeasible_delay_ceiling_hours: 24.0,
        }
    }
}

/// A policy that turns one pass's `GameState` into a prioritized list of
/// jobs (§4.4). The helper methods are shared read-only arithmetic every
/// concrete policy can draw on without recomputing it (§4.4.1).
pub trait Strategy: Send + Sync {
    fn plan(
        &self,
        state: &mut GameState,
        calculator: &TravianCalculator,
        config: &StrategyConfig,
        now: DateTime<Utc>,
    ) -> Vec<Job>;

    /// Buckets the account by average building+pit level across villages.
    fn classify_development_stage(&self, state: &GameState) -> DevelopmentStage {
        let mut total = 0u32;
        let mut count = 0u32;
        for village in &state.villages {
            for building in &village.buildings {
                total += building.level as u32;
                count += 1;
            }
            for pit in &village.pits {
                total += pit.level as u32;
                count += 1;
            }
        }
        let average = if count == 0 { 0.0 } else { total as f64 / count as f64 };
        if average < 10.0 {
            DevelopmentStage::Early
        } else if average < 20.0 {
            DevelopmentStage::Mid
        } else {
            DevelopmentStage::Advanced
        }
    }

    /// Next military building worth upgrading, preferring whichever of
    /// Barracks/Stable/Workshop doesn't exist yet, then the lowest level
    /// among the ones that do. `None` during `Early`.
    fn military_building_priority(
        &self,
        village: &Village,
        stage: DevelopmentStage,
    ) -> Option<BuildingName> {
        if stage == DevelopmentStage::Early {
            return None;
        }
        const PRIORITY: [BuildingName; 3] = [
            BuildingName::Barracks,
            BuildingName::Stable,
            BuildingName::Workshop,
        ];
        PRIORITY
            .into_iter()
            .find(|b| !village.has_building(*b))
            .or_else(|| {
                PRIORITY
                    .into_iter()
                    .min_by_key(|b| (village.building_level(*b), *b as usize))
            })
    }

    /// Merchant trips a pending trade volume needs, at a flat per-merchant
    /// carry capacity (unit/merchant cost tables are out of scope here).
    fn estimate_merchant_needs(&self, _village: &Village, pending_trade_volume: f64) -> u32 {
        const MERCHANT_CAPACITY: f64 = 500.0;
        (pending_trade_volume / MERCHANT_CAPACITY).ceil().max(0.0) as u32
    }

    /// Minimum Marketplace level this village's current merchant demand
    /// needs, or `None` if the existing level already covers it.
    fn estimate_marketplace_requirement(&self, village: &Village) -> Option<u8> {
        if !village.has_building(BuildingName::Marketplace) {
            return Some(1);
        }
        let level = village.building_level(BuildingName::Marketplace);
        if level < 5 {
            Some(level + 1)
        } else {
            None
        }
    }

    /// Minimum Residence/Palace level needed to support the settler
    /// emigration threshold, or `None` if one is already built.
    fn estimate_residence_requirement(&self, village: &Village) -> Option<u8> {
        let has_settler_building = village.has_building(BuildingName::Residence)
            || village.has_building(BuildingName::Palace);
        if has_settler_building {
            None
        } else {
            Some(10)
        }
    }

    fn aggregate_troop_statistics(&self, villages: &[Village]) -> TroopStatistics {
        let mut stats = TroopStatistics::default();
        for village in villages {
            for (unit, count) in &village.troops {
                *stats.per_kind.entry(*unit).or_insert(0) += count;
                stats.total_troops += count;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Copy)]
enum BuildPlanItem {
    Upgrade {
        building: BuildingName,
        slot_id: u8,
        target_level: u8,
    },
    New {
        building: BuildingName,
        slot_id: u8,
    },
}

impl BuildPlanItem {
    fn building(&self) -> BuildingName {
        match self {
            BuildPlanItem::Upgrade { building, .. } | BuildPlanItem::New { building, .. } => {
                *building
            }
        }
    }

    fn parts(self) -> (BuildingName, u8, u8, bool) {
        match self {
            BuildPlanItem::Upgrade {
                building,
                slot_id,
                target_level,
            } => (building, slot_id, target_level, false),
            BuildPlanItem::New { building, slot_id } => (building, slot_id, 1, true),
        }
    }
}

fn building_for_pit_kind(kind: ResourceKind) -> BuildingName {
    match kind {
        ResourceKind::Lumber => BuildingName::Woodcutter,
        ResourceKind::Clay => BuildingName::ClayPit,
        ResourceKind::Iron => BuildingName::IronMine,
        ResourceKind::Crop => BuildingName::Cropland,
    }
}

fn upgrade_pit(pit: &ResourcePit) -> BuildPlanItem {
    BuildPlanItem::Upgrade {
        building: building_for_pit_kind(pit.kind),
        slot_id: pit.id,
        target_level: pit.level + 1,
    }
}

fn starvation_item(village: &Village) -> Option<BuildPlanItem> {
    if village.free_crop_ratio() >= 0.1 {
        return None;
    }
    village.pits_of_kind(ResourceKind::Crop).first().map(|p| upgrade_pit(p))
}

fn warehouse_hourly(village: &Village) -> f64 {
    village
        .production
        .lumber
        .max(village.production.clay)
        .max(village.production.iron)
}

fn storage_ratio(capacity: f64, hourly: f64) -> f64 {
    if hourly <= 0.0 {
        f64::INFINITY
    } else {
        capacity / (24.0 * hourly)
    }
}

fn storage_guard_item(village: &Village, threshold_hours: f64) -> Option<BuildPlanItem> {
    let candidates = [
        (
            BuildingName::Warehouse,
            village.warehouse_hours_to_fill(),
            storage_ratio(village.warehouse_capacity, warehouse_hourly(village)),
        ),
        (
            BuildingName::Granary,
            village.granary_hours_to_fill(),
            storage_ratio(village.granary_capacity, village.production.crop),
        ),
    ];

    let chosen = candidates
        .into_iter()
        .filter_map(|(b, hours, ratio)| hours.filter(|h| *h <= threshold_hours).map(|h| (b, h, ratio)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then(a.2.partial_cmp(&b.2).unwrap()))
        .map(|(b, _, _)| b)?;

    if village.has_building(chosen) {
        Some(BuildPlanItem::Upgrade {
            building: chosen,
            slot_id: village
                .buildings
                .iter()
                .find(|b| b.kind == chosen)
                .expect("has_building confirmed presence")
                .id,
            target_level: village.building_level(chosen) + 1,
        })
    } else {
        village
            .free_center_slot_id()
            .map(|slot_id| BuildPlanItem::New {
                building: chosen,
                slot_id,
            })
    }
}

fn economy_growth_item(village: &Village, global_priority: Option<ResourceKind>) -> Option<BuildPlanItem> {
    if let Some(kind) = global_priority {
        if let Some(pit) = village.pits_of_kind(kind).first() {
            return Some(upgrade_pit(pit));
        }
    }
    village.upgradable_pits().first().map(|p| upgrade_pit(p))
}

/// Runs the starvation/storage/economy cascade and returns the first item
/// whose implied queue slot is actually free. For non-parallel tribes both
/// queue keys fold onto the same slot, so at most one candidate ever
/// qualifies; for parallel tribes this naturally lets a second call pick up
/// whichever slot the first call left free.
fn plan_build_like(
    village: &Village,
    global_priority: Option<ResourceKind>,
    config: &StrategyConfig,
    now: DateTime<Utc>,
) -> Option<BuildPlanItem> {
    let candidates = [
        starvation_item(village),
        storage_guard_item(village, config.minimum_storage_capacity_hours),
        economy_growth_item(village, global_priority),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|item| village.building_queue.can_build(QueueKey::for_building(item.building()), now))
}

fn schedule_build_like(
    village: &mut Village,
    item: BuildPlanItem,
    calculator: &TravianCalculator,
    config: &StrategyConfig,
    server_speed: f64,
    hero: &mut HeroInfo,
    now: DateTime<Utc>,
) -> Job {
    let (building, slot_id, target_level, is_new) = item.parts();
    let cost = calculator.cost(building, target_level, village.main_building_level(), server_speed);
    let shortage = cost.resources.saturating_sub(&village.resources);
    let response = hero.send_request(shortage);
    let remaining = shortage.saturating_sub(&response.provided);

    let scheduled_time = if remaining == Resources::ZERO {
        now
    } else {
        let mut delay_hours: f64 = 0.0;
        for kind in ResourceKind::ALL {
            let rem = remaining.get(kind);
            if rem <= 0.0 {
                continue;
            }
            let hourly = village.production.get(kind);
            let kind_delay = if hourly <= 0.0 {
                config.infeasible_delay_ceiling_hours
            } else {
                rem / hourly
            };
            delay_hours = delay_hours.max(kind_delay);
        }
        now + Duration::seconds((delay_hours * 3600.0).ceil() as i64)
    };

    let key = QueueKey::for_building(building);
    let freeze_until = scheduled_time + Duration::seconds(cost.seconds as i64);

    let kind = if is_new {
        JobKind::BuildNewJob {
            village_id: village.id,
            slot_id,
            building,
            support: response.provided,
            freeze_until,
            freeze_key: key,
        }
    } else {
        JobKind::BuildJob {
            village_id: village.id,
            slot_id,
            building,
            target_level,
            support: response.provided,
            freeze_until,
            freeze_key: key,
        }
    };

    let job = Job::new(scheduled_time, cost.seconds, kind);
    village.building_queue.freeze_until(freeze_until, key, Some(job.job_id));
    job
}

fn train_job(village: &Village, now: DateTime<Utc>) -> Job {
    let troop_type = UnitName::base_infantry_for(village.tribe);
    let building_id = [
        BuildingName::Barracks,
        BuildingName::Stable,
        BuildingName::Workshop,
    ]
    .into_iter()
    .find_map(|b| {
        village
            .buildings
            .iter()
            .find(|vb| vb.kind == b)
            .map(|vb| vb.id as u32)
    })
    .unwrap_or(0);
    let quantity = village.resources.affordable_count(&troop_type.base_cost());
    Job::new(
        now,
        0,
        JobKind::TrainJob {
            village_id: village.id,
            building_id,
            troop_type,
            quantity,
        },
    )
}

fn allocate_points(total_points: u32, config: &StrategyConfig) -> [u32; 4] {
    let mut allocations = [0u32; 4];
    let mut remaining = total_points;

    for i in 0..4 {
        if remaining == 0 {
            break;
        }
        let give = config.attributes_steps[i].min(remaining);
        allocations[i] += give;
        remaining -= give;
    }

    while remaining > 0 {
        let current_total: u32 = allocations.iter().sum();
        let mut best_index = 0;
        let mut best_deficit = f64::MIN;
        for (i, allocated) in allocations.iter().enumerate() {
            let deficit = config.attributes_ratio[i] * (current_total as f64 + 1.0) - *allocated as f64;
            if deficit > best_deficit {
                best_deficit = deficit;
                best_index = i;
            }
        }
        allocations[best_index] += 1;
        remaining -= 1;
    }

    allocations
}

fn missing_boost_kinds(flags: &ProductionBoostFlags) -> Vec<ResourceKind> {
    let mut out = Vec::new();
    if !flags.lumber {
        out.push(ResourceKind::Lumber);
    }
    if !flags.clay {
        out.push(ResourceKind::Clay);
    }
    if !flags.iron {
        out.push(ResourceKind::Iron);
    }
    if !flags.crop {
        out.push(ResourceKind::Crop);
    }
    out
}

/// The shipped policy (§4.4.2): implements §4.4's numbered algorithm
/// exactly, plus a per-village questmaster sweep and a once-per-pass hero
/// plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedEconomicGrowth;

impl Strategy for BalancedEconomicGrowth {
    fn plan(
        &self,
        state: &mut GameState,
        calculator: &TravianCalculator,
        config: &StrategyConfig,
        now: DateTime<Utc>,
    ) -> Vec<Job> {
        let mut jobs = Vec::new();
        let global_priority = state.global_priority_kind();
        let server_speed = state.account.server_speed;
        let mut hero = state.hero.clone();

        for village in state.villages.iter_mut() {
            if !village.building_queue.can_build_inside(now)
                && !village.building_queue.can_build_outside(now)
            {
                continue;
            }

            if village.settler_count() >= 3 {
                jobs.push(Job::new(
                    now,
                    0,
                    JobKind::FoundNewVillageJob {
                        village_id: village.id,
                        village_name: village.name.clone(),
                    },
                ));
            }

            let mut planned_any_build = false;

            if let Some(item) = plan_build_like(village, global_priority, config, now) {
                jobs.push(schedule_build_like(
                    village,
                    item,
                    calculator,
                    config,
                    server_speed,
                    &mut hero,
                    now,
                ));
                planned_any_build = true;
            }

            if village.building_queue.parallel_building_allowed() {
                if let Some(item) = plan_build_like(village, global_priority, config, now) {
                    jobs.push(schedule_build_like(
                        village,
                        item,
                        calculator,
                        config,
                        server_speed,
                        &mut hero,
                        now,
                    ));
                    planned_any_build = true;
                }
            }

            if !planned_any_build
                && village.has_military_building()
                && village.train_cooldown_elapsed(now)
            {
                jobs.push(train_job(village, now));
            }
        }

        if state.hero.can_go_on_adventure() && state.hero.health >= config.minimal_hero_health {
            let village_id = state.villages.first().map(|v| v.id).unwrap_or(0);
            jobs.push(Job::new(now, 0, JobKind::HeroAdventureJob { village_id }));
        }
        if state.hero.points_available > 0 {
            jobs.push(Job::new(
                now,
                0,
                JobKind::AllocateAttributesJob {
                    allocations: allocate_points(state.hero.points_available, config),
                },
            ));
        }
        if state.hero.has_daily_quest_indicator {
            jobs.push(Job::new(
                now,
                0,
                JobKind::CollectDailyQuestsJob {
                    daily_quest_threshold: config.daily_quest_threshold,
                },
            ));
        }

        for village in &state.villages {
            if village.has_quest_master_reward {
                jobs.push(Job::new(
                    now,
                    0,
                    JobKind::CollectQuestmasterJob {
                        village_id: village.id,
                    },
                ));
            }
        }

        if !state.account.production_boost_active.all_active() {
            let eligible = missing_boost_kinds(&state.account.production_boost_active);
            jobs.push(Job::new(
                now,
                0,
                JobKind::IncreaseProductionByWatchingCommercialsJob {
                    eligible_kinds: eligible,
                },
            ));
        }

        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{account::Account, building_queue::BuildingQueue, village::ProductionRates};

    fn village(tribe: Tribe) -> Village {
        Village {
            id: 1,
            name: "Capital".into(),
            x: 0,
            y: 0,
            tribe,
            resources: Resources::new(1000.0, 1000.0, 1000.0, 1000.0),
            free_crop: 500.0,
            warehouse_capacity: 5000.0,
            granary_capacity: 5000.0,
            production: ProductionRates {
                lumber: 50.0,
                clay: 50.0,
                iron: 50.0,
                crop: 50.0,
                free_crop_hourly: 50.0,
            },
            pits: vec![
                ResourcePit { id: 1, kind: ResourceKind::Lumber, level: 3 },
                ResourcePit { id: 2, kind: ResourceKind::Clay, level: 3 },
            ],
            buildings: vec![],
            building_queue: BuildingQueue::new(tribe),
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
    fn settler_emigration_overrides_economy() {
        let mut v = village(Tribe::Gauls);
        v.troops.insert(UnitName::Settlers, 3);
        let mut state = GameState {
            account: Account::default(),
            villages: vec![v],
            hero: HeroInfo::default(),
        };
        let jobs = BalancedEconomicGrowth.plan(
            &mut state,
            &TravianCalculator,
            &StrategyConfig::default(),
            Utc::now(),
        );
        assert!(jobs.iter().any(|j| matches!(j.kind, JobKind::FoundNewVillageJob { .. })));
    }

    #[test]
    fn starvation_guard_targets_a_crop_pit() {
        let mut v = village(Tribe::Gauls);
        v.pits.push(ResourcePit { id: 3, kind: ResourceKind::Crop, level: 2 });
        v.free_crop = 1.0;
        v.production.crop = 50.0;
        let mut state = GameState {
            account: Account::default(),
            villages: vec![v],
            hero: HeroInfo::default(),
        };
        let jobs = BalancedEconomicGrowth.plan(
            &mut state,
            &TravianCalculator,
            &StrategyConfig::default(),
            Utc::now(),
        );
        assert!(jobs.iter().any(|j| matches!(
            &j.kind,
            JobKind::BuildJob { building: BuildingName::Cropland, .. }
        )));
    }

    #[test]
    fn parallel_tribe_can_plan_both_slots_in_one_pass() {
        let mut v = village(Tribe::Romans);
        v.pits.push(ResourcePit { id: 3, kind: ResourceKind::Iron, level: 1 });
        let mut state = GameState {
            account: Account::default(),
            villages: vec![v],
            hero: HeroInfo::default(),
        };
        let jobs = BalancedEconomicGrowth.plan(
            &mut state,
            &TravianCalculator,
            &StrategyConfig::default(),
            Utc::now(),
        );
        let build_jobs = jobs
            .iter()
            .filter(|j| matches!(j.kind, JobKind::BuildJob { .. } | JobKind::BuildNewJob { .. }))
            .count();
        assert!(build_jobs >= 1);
    }

    #[test]
    fn allocate_points_respects_step_targets_before_ratio() {
        let mut config = StrategyConfig::default();
        config.attributes_steps = [5, 0, 0, 0];
        let allocations = allocate_points(5, &config);
        assert_eq!(allocations[0], 5);
    }

    #[test]
    fn allocate_points_never_loses_a_point() {
        let config = StrategyConfig::default();
        let allocations = allocate_points(17, &config);
        assert_eq!(allocations.iter().sum::<u32>(), 17);
    }

    #[test]
    fn development_stage_advances_with_average_level() {
        let strategy = BalancedEconomicGrowth;
        let mut v = village(Tribe::Gauls);
        v.buildings = vec![];
        let state = GameState {
            account: Account::default(),
            villages: vec![v],
            hero: HeroInfo::default(),
        };
        assert_eq!(strategy.classify_development_stage(&state), DevelopmentStage::Early);
    }
}
