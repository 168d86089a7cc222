use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::{
    account::Account,
    calculator::TravianCalculator,
    driver::Driver,
    game_state::GameState,
    hero::HeroInfo,
    job::JobStatus,
    scanner::Scanner,
    scheduler::ScheduledJobQueue,
    strategy::{Strategy, StrategyConfig},
    village::{ProductionRates, Village},
};

/// Assembles a fresh `GameState` from whatever HTML the driver currently
/// serves (§6.1 + §4.7's `scanner.scan(driver)` step). Reconciles each
/// village's building queue against `previous` so in-flight freezes survive.
pub async fn scan_game_state(
    driver: &dyn Driver,
    scanner: &dyn Scanner,
    previous: Option<&GameState>,
    now: DateTime<Utc>,
) -> Result<GameState, ()> {
    let dorf1_html = driver.get_html("dorf1").await.map_err(|_| ())?;
    let identities = scanner.scan_village_list(&dorf1_html).map_err(|_| ())?;
    let account = scanner.scan_account_info(&dorf1_html).unwrap_or(Account::default());

    let mut villages = Vec::with_capacity(identities.len());
    for identity in identities {
        let (dorf1, dorf2) = driver
            .get_village_inner_html(identity.id)
            .await
            .unwrap_or_default();

        let stock = scanner
            .scan_stock_bar(&dorf1)
            .map(|s| (s.lumber, s.clay, s.iron, s.crop, s.free_crop, s.warehouse_capacity, s.granary_capacity))
            .unwrap_or((0.0, 0.0, 0.0, 0.0, 0.0, 800.0, 800.0));
        let production = scanner
            .scan_production(&dorf1)
            .unwrap_or(ProductionRates::default());
        let pits = scanner.scan_resource_fields(&dorf1).unwrap_or_default();
        let buildings = scanner.scan_village_center(&dorf2).unwrap_or_default();
        let tribe = scanner.identify_tribe(&dorf2).unwrap_or_default();
        let observed_queue = scanner
            .scan_building_queue(&dorf2, tribe)
            .unwrap_or_else(|_| crate::building_queue::BuildingQueue::new(tribe));
        let troops = scanner.scan_troops(&dorf2).unwrap_or_default();
        let incoming = scanner.scan_incoming_attacks(&dorf1).unwrap_or_default();

        let mut building_queue = observed_queue;
        if let Some(prev_state) = previous {
            if let Some(prev_village) = prev_state.villages.iter().find(|v| v.id == identity.id) {
                let mut carried = prev_village.building_queue.clone();
                carried.reconcile_with_observed(building_queue, now);
                building_queue = carried;
            }
        }

        villages.push(Village {
            id: identity.id,
            name: identity.name,
            x: identity.x,
            y: identity.y,
            tribe,
            resources: travian_types::Resources::new(stock.0, stock.1, stock.2, stock.3),
            free_crop: stock.4,
            warehouse_capacity: stock.5,
            granary_capacity: stock.6,
            production,
            pits,
            buildings,
            building_queue,
            is_upgraded_to_city: previous
                .and_then(|p| p.villages.iter().find(|v| v.id == identity.id))
                .map(|v| v.is_upgraded_to_city)
                .unwrap_or(false),
            is_permanent_capital: previous
                .and_then(|p| p.villages.iter().find(|v| v.id == identity.id))
                .map(|v| v.is_permanent_capital)
                .unwrap_or(false),
            has_quest_master_reward: scanner.is_reward_available(&dorf2),
            is_under_attack: incoming.count > 0,
            incoming_attack_count: incoming.count,
            next_attack_seconds: incoming.next_attack_seconds,
            troops,
            last_train_time: previous
                .and_then(|p| p.villages.iter().find(|v| v.id == identity.id))
                .and_then(|v| v.last_train_time),
        });
    }

    let hero_attrs = driver.get_html("hero/attributes").await.unwrap_or_default();
    let hero_inventory = driver.get_html("hero/inventory").await.unwrap_or_default();
    let hero = scanner
        .scan_hero_info(&hero_attrs, &hero_inventory)
        .unwrap_or(HeroInfo::default());

    Ok(GameState {
        account,
        villages,
        hero,
    })
}

/// Single-threaded cooperative loop (§4.7): scan, plan, merge, drain due
/// jobs, sleep until the next one is due or a poll ceiling elapses.
pub struct Executor {
    driver: Arc<dyn Driver>,
    scanner: Arc<dyn Scanner>,
    strategy: Arc<dyn Strategy>,
    calculator: TravianCalculator,
    config: StrategyConfig,
    scheduler: ScheduledJobQueue,
    state: Option<GameState>,
    max_poll_interval: Duration,
}

impl Executor {
    pub fn new(
        driver: Arc<dyn Driver>,
        scanner: Arc<dyn Scanner>,
        strategy: Arc<dyn Strategy>,
        config: StrategyConfig,
        max_poll_interval: Duration,
    ) -> Self {
        Self {
            driver,
            scanner,
            strategy,
            calculator: TravianCalculator,
            config,
            scheduler: ScheduledJobQueue::new(),
            state: None,
            max_poll_interval,
        }
    }

    /// Runs exactly one scan→plan→merge→drain pass and returns the delay
    /// the caller should sleep before calling this again.
    pub async fn run_once(&mut self, now: DateTime<Utc>) -> Duration {
        let mut state = match scan_game_state(
            self.driver.as_ref(),
            self.scanner.as_ref(),
            self.state.as_ref(),
            now,
        )
        .await
        {
            Ok(state) => state,
            Err(()) => {
                warn!("scan failed this pass, skipping planning");
                self.state.take().unwrap_or(GameState {
                    account: Account::default(),
                    villages: vec![],
                    hero: HeroInfo::default(),
                })
            }
        };

        let new_jobs = self
            .strategy
            .plan(&mut state, &self.calculator, &self.config, now);
        for job in new_jobs {
            if let Some((village_id, key)) = job.freeze_target() {
                let frozen_elsewhere = state
                    .villages
                    .iter()
                    .find(|v| v.id == village_id)
                    .is_some_and(|v| !v.building_queue.can_build(key, now));
                if frozen_elsewhere && job.status == JobStatus::Pending {
                    info!(village_id, "skipping job, slot already frozen in observed state");
                    continue;
                }
            }
            self.scheduler.push(job);
        }

        self.state = Some(state);

        // Drop stale PENDING jobs before draining due ones: a job whose TTL
        // has already lapsed should expire rather than run hours late.
        for mut job in self.scheduler.drain_expired(now, crate::scheduler::default_ttl()) {
            job.status = JobStatus::Expired;
            warn!(job_id = %job.job_id, "job expired before it became due");
            if let Some((village_id, key)) = job.freeze_target() {
                if let Some(state) = self.state.as_mut() {
                    if let Some(village) = state.villages.iter_mut().find(|v| v.id == village_id) {
                        village.building_queue.unfreeze(key);
                    }
                }
            }
        }

        while let Some(mut job) = self.scheduler.pop_due(now) {
            job.status = JobStatus::Running;
            let ok = job.execute(self.driver.as_ref(), self.scanner.as_ref()).await;
            job.status = if ok {
                JobStatus::Completed
            } else {
                JobStatus::Terminated
            };
            if ok {
                info!(job_id = %job.job_id, "{}", job.success_message);
            } else {
                warn!(job_id = %job.job_id, "{}", job.failure_message);
                if let Some((village_id, key)) = job.freeze_target() {
                    if let Some(state) = self.state.as_mut() {
                        if let Some(village) = state.villages.iter_mut().find(|v| v.id == village_id) {
                            village.building_queue.unfreeze(key);
                        }
                    }
                }
            }
        }

        match self.scheduler.peek_next_time() {
            Some(next) if next - now < self.max_poll_interval => (next - now).max(Duration::zero()),
            _ => self.max_poll_interval,
        }
    }

    pub fn pending_job_count(&self) -> usize {
        self.scheduler.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        driver::FakeDriver, job::{Job, JobKind}, scanner::FakeScanner, strategy::BalancedEconomicGrowth,
    };

    #[tokio::test]
    async fn run_once_completes_without_villages() {
        let mut executor = Executor::new(
            Arc::new(FakeDriver::default()),
            Arc::new(FakeScanner::default()),
            Arc::new(BalancedEconomicGrowth),
            StrategyConfig::default(),
            Duration::seconds(60),
        );
        let delay = executor.run_once(Utc::now()).await;
        assert!(delay <= Duration::seconds(60));
        assert_eq!(executor.pending_job_count(), 0);
    }

    #[tokio::test]
    async fn run_once_schedules_production_boost_by_default() {
        let mut executor = Executor::new(
            Arc::new(FakeDriver::default()),
            Arc::new(FakeScanner {
                villages: vec![crate::scanner::VillageIdentity {
                    id: 1,
                    name: "Capital".into(),
                    x: 0,
                    y: 0,
                }],
                ..Default::default()
            }),
            Arc::new(BalancedEconomicGrowth),
            StrategyConfig::default(),
            Duration::seconds(60),
        );
        executor.run_once(Utc::now()).await;
        // The production-boost job and any hero jobs run to completion
        // immediately against the fake driver, so nothing should remain
        // queued afterward.
        assert_eq!(executor.pending_job_count(), 0);
    }

    #[tokio::test]
    async fn run_once_expires_a_job_stuck_pending_past_its_ttl() {
        let mut executor = Executor::new(
            Arc::new(FakeDriver::default()),
            Arc::new(FakeScanner::default()),
            Arc::new(BalancedEconomicGrowth),
            StrategyConfig::default(),
            Duration::seconds(60),
        );
        let now = Utc::now();
        executor.scheduler.push(Job::new(
            now - Duration::hours(2),
            0,
            JobKind::CollectDailyQuestsJob { daily_quest_threshold: 50 },
        ));
        assert_eq!(executor.pending_job_count(), 1);

        executor.run_once(now).await;
        assert_eq!(
            executor.pending_job_count(),
            0,
            "a job two hours past its TTL must be expired, not executed late"
        );
    }
}
