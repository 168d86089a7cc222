use std::collections::HashMap;

use chrono::Utc;

use travian_game::{
    driver::{FakeDriver, RecordedCall},
    job::{Job, JobKind},
    scanner::FakeScanner,
    village::ProductionRates,
    village::ResourcePit,
    village::VillageBuilding,
    BalancedEconomicGrowth, BuildingQueue, GameState, HeroInfo, QueueKey, Strategy, StrategyConfig,
    TravianCalculator, Village,
};
use travian_types::{buildings::BuildingName, tribe::Tribe, ResourceKind, Resources};

fn bare_village(tribe: Tribe) -> Village {
    Village {
        id: 1,
        name: "Capital".into(),
        x: 0,
        y: 0,
        tribe,
        resources: Resources::ZERO,
        free_crop: 0.0,
        warehouse_capacity: 800.0,
        granary_capacity: 800.0,
        production: ProductionRates::default(),
        pits: vec![],
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

fn state_with(village: Village) -> GameState {
    GameState {
        account: Default::default(),
        villages: vec![village],
        hero: HeroInfo::default(),
    }
}

/// Seed scenario 1: a near-empty warehouse under heavy lumber production
/// gets exactly one upgrade job, due immediately.
#[test]
fn storage_guard_fires_on_a_near_full_warehouse() {
    let mut v = bare_village(Tribe::Gauls);
    v.warehouse_capacity = 1000.0;
    v.production.lumber = 10_000.0;
    v.production.clay = 10.0;
    v.production.iron = 10.0;
    v.resources = Resources::new(900.0, 0.0, 0.0, 0.0);
    v.buildings.push(VillageBuilding { id: 20, kind: BuildingName::Warehouse, level: 3 });
    let mut state = state_with(v);

    let now = Utc::now();
    let jobs = BalancedEconomicGrowth.plan(&mut state, &TravianCalculator, &StrategyConfig::default(), now);

    let build_jobs: Vec<_> = jobs
        .iter()
        .filter(|j| matches!(j.kind, JobKind::BuildJob { building: BuildingName::Warehouse, .. }))
        .collect();
    assert_eq!(build_jobs.len(), 1, "expected exactly one Warehouse job, got {jobs:?}");
    match &build_jobs[0].kind {
        JobKind::BuildJob { target_level, .. } => assert_eq!(*target_level, 4),
        _ => unreachable!(),
    }
}

/// Seed scenario 2: when both warehouse and granary are due at the same
/// number of hours, the one with the lower fill ratio (closer to bursting
/// relative to its own capacity) wins.
#[test]
fn storage_guard_tie_break_prefers_the_tighter_ratio() {
    let mut v = bare_village(Tribe::Gauls);
    v.warehouse_capacity = 1440.0;
    v.granary_capacity = 960.0;
    v.production.lumber = 100.0;
    v.production.clay = 100.0;
    v.production.iron = 100.0;
    v.production.crop = 100.0;
    v.resources = Resources::new(1340.0, 1340.0, 1340.0, 0.0);
    v.free_crop = 860.0;
    v.buildings.push(VillageBuilding { id: 20, kind: BuildingName::Warehouse, level: 1 });
    v.buildings.push(VillageBuilding { id: 21, kind: BuildingName::Granary, level: 1 });
    let mut state = state_with(v);

    let jobs = BalancedEconomicGrowth.plan(
        &mut state,
        &TravianCalculator,
        &StrategyConfig::default(),
        Utc::now(),
    );

    let chosen = jobs
        .iter()
        .find(|j| matches!(j.kind, JobKind::BuildJob { .. }))
        .expect("a build job should have been planned");
    match &chosen.kind {
        JobKind::BuildJob { building, .. } => assert_eq!(*building, BuildingName::Granary),
        _ => unreachable!(),
    }
}

/// Seed scenario 3: without hero support, a job whose cost the village can't
/// yet afford is scheduled for later and freezes its slot until then.
#[test]
fn insufficient_resources_delay_the_build_and_freeze_the_slot() {
    let mut v = bare_village(Tribe::Gauls);
    v.pits.push(ResourcePit { id: 1, kind: ResourceKind::Lumber, level: 1 });
    v.production = ProductionRates {
        lumber: 5.0,
        clay: 5.0,
        iron: 5.0,
        crop: 5.0,
        free_crop_hourly: 5.0,
    };
    v.resources = Resources::ZERO;
    v.free_crop = 100.0;
    let now = Utc::now();
    let mut state = state_with(v);

    let jobs = BalancedEconomicGrowth.plan(&mut state, &TravianCalculator, &StrategyConfig::default(), now);
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];
    assert!(job.scheduled_time > now, "an unaffordable build must not be scheduled immediately");

    let village = &state.villages[0];
    assert!(!village.building_queue.can_build(QueueKey::Outside, now));
}

/// Seed scenario 4: when the hero's inventory fully covers the shortage,
/// the job is due immediately and carries the shortage as `support`.
#[test]
fn hero_support_covering_the_shortage_schedules_immediately() {
    let mut v = bare_village(Tribe::Gauls);
    v.pits.push(ResourcePit { id: 1, kind: ResourceKind::Lumber, level: 1 });
    v.production = ProductionRates {
        lumber: 5.0,
        clay: 5.0,
        iron: 5.0,
        crop: 5.0,
        free_crop_hourly: 5.0,
    };
    v.resources = Resources::ZERO;
    v.free_crop = 100.0;
    let now = Utc::now();
    let mut state = state_with(v);
    state.hero.inventory = Resources::new(100_000.0, 100_000.0, 100_000.0, 100_000.0);

    let jobs = BalancedEconomicGrowth.plan(&mut state, &TravianCalculator, &StrategyConfig::default(), now);
    assert_eq!(jobs.len(), 1);
    match &jobs[0].kind {
        JobKind::BuildJob { support, .. } => assert_ne!(*support, Resources::ZERO),
        other => panic!("expected a BuildJob, got {other:?}"),
    }
    assert!((jobs[0].scheduled_time - now).num_seconds().abs() < 2);
}

/// Seed scenario 5: Romans can plan both the inside and outside slot in the
/// same pass, each tagged with its own queue key.
#[test]
fn romans_plan_inside_and_outside_in_one_pass() {
    let mut v = bare_village(Tribe::Romans);
    v.warehouse_capacity = 100.0;
    v.production.lumber = 10_000.0;
    v.resources = Resources::new(90.0, 0.0, 0.0, 0.0);
    v.buildings.push(VillageBuilding { id: 20, kind: BuildingName::Warehouse, level: 1 });
    v.pits.push(ResourcePit { id: 1, kind: ResourceKind::Iron, level: 1 });
    let mut state = state_with(v);

    let jobs = BalancedEconomicGrowth.plan(
        &mut state,
        &TravianCalculator,
        &StrategyConfig::default(),
        Utc::now(),
    );

    let build_jobs: Vec<_> = jobs
        .iter()
        .filter(|j| matches!(j.kind, JobKind::BuildJob { .. } | JobKind::BuildNewJob { .. }))
        .collect();
    assert_eq!(build_jobs.len(), 2, "Romans should claim both slots: {jobs:?}");

    let keys: Vec<QueueKey> = build_jobs
        .iter()
        .map(|j| match &j.kind {
            JobKind::BuildJob { freeze_key, .. } | JobKind::BuildNewJob { freeze_key, .. } => *freeze_key,
            _ => unreachable!(),
        })
        .collect();
    assert!(keys.contains(&QueueKey::Inside));
    assert!(keys.contains(&QueueKey::Outside));
}

/// Building costs must be monotone non-decreasing in level, regardless of
/// which building or tribe the plan picked (§8 invariant 4).
#[test]
fn building_cost_never_decreases_with_level() {
    let calculator = TravianCalculator;
    for building in [
        BuildingName::Warehouse,
        BuildingName::Granary,
        BuildingName::Woodcutter,
        BuildingName::MainBuilding,
    ] {
        let mut previous = 0.0;
        for level in 1..=10u8 {
            let cost = calculator.cost(building, level, 5, 1.0);
            assert!(
                cost.total_sum >= previous,
                "{building:?} level {level} costs less than the previous level"
            );
            previous = cost.total_sum;
        }
    }
}

/// Seed scenario 8: the quest dialog is only collected once the achieved
/// points reach the configured threshold; short of it, the dialog is closed
/// without clicking "collect all".
#[tokio::test]
async fn daily_quest_threshold_gates_the_collect_click() {
    let scanner = FakeScanner::default();
    let job = Job::new(
        Utc::now(),
        0,
        JobKind::CollectDailyQuestsJob { daily_quest_threshold: 50 },
    );

    let mut below = HashMap::new();
    below.insert("span.achievedPoints".to_string(), "49".to_string());
    let driver = FakeDriver { text_content: below, ..Default::default() };
    let result = job.execute(&driver, &scanner).await;
    assert!(!result, "49 achieved points must not trigger a collect at threshold 50");
    assert!(driver.calls().contains(&RecordedCall::Click("button.closeDialog".to_string())));
    assert!(!driver.calls().contains(&RecordedCall::Click("button.collectAll".to_string())));

    let mut at_threshold = HashMap::new();
    at_threshold.insert("span.achievedPoints".to_string(), "50".to_string());
    let driver = FakeDriver { text_content: at_threshold, ..Default::default() };
    let result = job.execute(&driver, &scanner).await;
    assert!(result, "50 achieved points must trigger a collect at threshold 50");
    assert!(driver.calls().contains(&RecordedCall::Click("button.collectAll".to_string())));
}
