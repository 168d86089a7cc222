use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use travian_types::{buildings::BuildingName, units::UnitName, ResourceKind, Resources};
use uuid::Uuid;

use crate::{building_queue::QueueKey, calculator::parse_duration, driver::Driver, scanner::Scanner};

/// Lifecycle of a single scheduled job (§3.3).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Terminated,
    Expired,
}

/// Index into `AllocateAttributesJob::allocations`, in the declared
/// attribute order used for both `attributesSteps` and `attributesRatio`.
pub const FIGHTING_STRENGTH: usize = 0;
pub const OFF_BONUS: usize = 1;
pub const DEF_BONUS: usize = 2;
pub const PRODUCTION_POINTS: usize = 3;

/// The nine actions a planning pass can schedule (§4.5). Each variant
/// carries exactly the data its `execute` needs; nothing here reaches back
/// into `GameState` once scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobKind {
    BuildJob {
        village_id: u32,
        slot_id: u8,
        building: BuildingName,
        target_level: u8,
        /// Resources the hero agreed to transfer in before building, if any.
        support: Resources,
        freeze_until: DateTime<Utc>,
        freeze_key: QueueKey,
    },
    BuildNewJob {
        village_id: u32,
        slot_id: u8,
        building: BuildingName,
        support: Resources,
        freeze_until: DateTime<Utc>,
        freeze_key: QueueKey,
    },
    TrainJob {
        village_id: u32,
        building_id: u32,
        troop_type: UnitName,
        quantity: u32,
    },
    HeroAdventureJob {
        village_id: u32,
    },
    AllocateAttributesJob {
        allocations: [u32; 4],
    },
    CollectDailyQuestsJob {
        daily_quest_threshold: u32,
    },
    CollectQuestmasterJob {
        village_id: u32,
    },
    FoundNewVillageJob {
        village_id: u32,
        village_name: String,
    },
    IncreaseProductionByWatchingCommercialsJob {
        eligible_kinds: Vec<ResourceKind>,
    },
}

/// A scheduled unit of work: the common header plus one [`JobKind`] payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    pub status: JobStatus,
    pub duration_seconds: u32,
    pub success_message: String,
    pub failure_message: String,
    pub kind: JobKind,
}

impl Job {
    pub fn new(scheduled_time: DateTime<Utc>, duration_seconds: u32, kind: JobKind) -> Self {
        let (success_message, failure_message) = default_messages(&kind);
        Self {
            job_id: Uuid::new_v4(),
            scheduled_time,
            status: JobStatus::Pending,
            duration_seconds,
            success_message,
            failure_message,
            kind,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == JobStatus::Pending && self.scheduled_time <= now
    }

    /// The village queue slot this job claims, for un-freezing on failure.
    /// Jobs that don't target a building slot have none.
    pub fn freeze_target(&self) -> Option<(u32, QueueKey)> {
        match &self.kind {
            JobKind::BuildJob {
                village_id,
                freeze_key,
                ..
            }
            | JobKind::BuildNewJob {
                village_id,
                freeze_key,
                ..
            } => Some((*village_id, *freeze_key)),
            _ => None,
        }
    }

    /// Runs this job's contract against `driver`/`scanner`, returning
    /// whether it succeeded. A `false` return means a transient failure
    /// (§7); the caller decides whether to reschedule or unfreeze.
    pub async fn execute(&self, driver: &dyn Driver, scanner: &dyn Scanner) -> bool {
        match &self.kind {
            JobKind::BuildJob {
                village_id,
                slot_id,
                support,
                ..
            } => execute_build(driver, scanner, *village_id, *slot_id, *support).await,
            JobKind::BuildNewJob {
                village_id,
                slot_id,
                support,
                ..
            } => execute_build_new(driver, *village_id, *slot_id, *support).await,
            JobKind::TrainJob {
                village_id,
                building_id,
                troop_type,
                quantity,
            } => {
                driver.navigate_to_village(*village_id).await.is_ok()
                    && driver
                        .train_troops(*village_id, *building_id, *troop_type, *quantity)
                        .await
                        .unwrap_or(false)
            }
            JobKind::HeroAdventureJob { village_id } => {
                execute_hero_adventure(driver, scanner, *village_id).await
            }
            JobKind::AllocateAttributesJob { allocations } => {
                execute_allocate_attributes(driver, allocations).await
            }
            JobKind::CollectDailyQuestsJob {
                daily_quest_threshold,
            } => execute_collect_daily_quests(driver, *daily_quest_threshold).await,
            JobKind::CollectQuestmasterJob { village_id } => {
                execute_collect_questmaster(driver, *village_id).await
            }
            JobKind::FoundNewVillageJob { village_id, .. } => {
                execute_found_new_village(driver, *village_id).await
            }
            JobKind::IncreaseProductionByWatchingCommercialsJob { eligible_kinds } => {
                execute_production_boost(driver, scanner, eligible_kinds).await
            }
        }
    }
}

fn default_messages(kind: &JobKind) -> (String, String) {
    match kind {
        JobKind::BuildJob { building, .. } | JobKind::BuildNewJob { building, .. } => (
            format!("upgraded {building}"),
            format!("could not upgrade {building}"),
        ),
        JobKind::TrainJob {
            troop_type,
            quantity,
            ..
        } => (
            format!("queued {quantity} {troop_type}"),
            format!("could not queue {troop_type}"),
        ),
        JobKind::HeroAdventureJob { .. } => (
            "hero sent on adventure".to_string(),
            "hero could not start an adventure".to_string(),
        ),
        JobKind::AllocateAttributesJob { .. } => (
            "allocated hero points".to_string(),
            "could not allocate hero points".to_string(),
        ),
        JobKind::CollectDailyQuestsJob { .. } => (
            "collected daily quest rewards".to_string(),
            "could not collect daily quest rewards".to_string(),
        ),
        JobKind::CollectQuestmasterJob { .. } => (
            "collected questmaster reward".to_string(),
            "could not collect questmaster reward".to_string(),
        ),
        JobKind::FoundNewVillageJob { village_name, .. } => (
            format!("founded a new village from {village_name}"),
            format!("could not found a new village from {village_name}"),
        ),
        JobKind::IncreaseProductionByWatchingCommercialsJob { .. } => (
            "watched ads to boost production".to_string(),
            "could not watch ads to boost production".to_string(),
        ),
    }
}

const CONTRACT_DOM_SELECTOR: &str = "div.build";
const NORMAL_DURATION_SELECTOR: &str = "span.normal .value";
const ACCELERATED_DURATION_SELECTOR: &str = "span.accelerated .value";
const GREEN_BUILD_BUTTON: &str = "button.section1.green";

async fn execute_build(
    driver: &dyn Driver,
    scanner: &dyn Scanner,
    village_id: u32,
    slot_id: u8,
    support: Resources,
) -> bool {
    if support != Resources::ZERO && driver.transfer_resources_from_hero(support).await.is_err() {
        return false;
    }
    if driver.navigate_to_village(village_id).await.is_err() {
        return false;
    }
    if driver.click_nth("a.buildingSlot", slot_id as usize).await.is_err() {
        return false;
    }
    if !driver
        .wait_for_selector(CONTRACT_DOM_SELECTOR, 3000)
        .await
        .unwrap_or(false)
    {
        return false;
    }

    let normal = driver
        .get_text_content(NORMAL_DURATION_SELECTOR)
        .await
        .ok()
        .and_then(|s| parse_duration(&s));
    let accelerated = driver
        .get_text_content(ACCELERATED_DURATION_SELECTOR)
        .await
        .ok()
        .and_then(|s| parse_duration(&s));

    if let (Some(normal), Some(accelerated)) = (normal, accelerated) {
        if normal > accelerated {
            let delta = normal - accelerated;
            if watch_commercial(driver, scanner, delta).await {
                return true;
            }
        }
    }

    driver.click(GREEN_BUILD_BUTTON).await.unwrap_or(false)
}

async fn execute_build_new(
    driver: &dyn Driver,
    village_id: u32,
    slot_id: u8,
    support: Resources,
) -> bool {
    if support != Resources::ZERO && driver.transfer_resources_from_hero(support).await.is_err() {
        return false;
    }
    if driver.navigate_to_village(village_id).await.is_err() {
        return false;
    }
    if driver.click_nth("a.buildingSlot", slot_id as usize).await.is_err() {
        return false;
    }
    driver
        .click_first(&["button.contract.gidSpecific", "button.contract"])
        .await
        .unwrap_or(false)
}

const EXPLORE_SELECTOR: &str = "button.explore";
const CONTINUE_SELECTORS: &[&str] = &["button.continueAdventure", "a.continue", "button.ok"];

async fn execute_hero_adventure(driver: &dyn Driver, scanner: &dyn Scanner, village_id: u32) -> bool {
    if driver.navigate_to_village(village_id).await.is_err() {
        return false;
    }
    if driver.navigate("/hero/adventures").await.is_err() {
        return false;
    }
    if driver.is_visible("button.bonusVideo").await.unwrap_or(false) {
        watch_commercial(driver, scanner, 30).await;
    }
    if !driver.click(EXPLORE_SELECTOR).await.unwrap_or(false) {
        return false;
    }
    driver.wait_for_load_state(5000).await.ok();
    let advanced = driver.click_first(CONTINUE_SELECTORS).await.unwrap_or(false);
    if advanced && driver.is_visible("button.bonusVideo").await.unwrap_or(false) {
        watch_commercial(driver, scanner, 30).await;
    }
    advanced
}

const PLUS_BUTTON_SELECTOR: &str = "button.attributePlus";
const SAVE_ATTRIBUTES_SELECTOR: &str = "button.saveAttributes";

async fn execute_allocate_attributes(driver: &dyn Driver, allocations: &[u32; 4]) -> bool {
    if driver.navigate("/hero").await.is_err() {
        return false;
    }
    for (index, points) in allocations.iter().enumerate() {
        for _ in 0..*points {
            if driver.click_nth(PLUS_BUTTON_SELECTOR, index).await.is_err() {
                return false;
            }
        }
    }
    driver.click(SAVE_ATTRIBUTES_SELECTOR).await.unwrap_or(false)
}

async fn execute_collect_daily_quests(driver: &dyn Driver, daily_quest_threshold: u32) -> bool {
    if driver.click("a.dailyQuests").await.is_err() {
        return false;
    }
    let achieved = driver
        .get_text_content("span.achievedPoints")
        .await
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok());
    match achieved {
        Some(points) if points >= daily_quest_threshold => {
            driver.click("button.collectAll").await.unwrap_or(false)
        }
        _ => {
            driver.click("button.closeDialog").await.ok();
            false
        }
    }
}

async fn execute_collect_questmaster(driver: &dyn Driver, village_id: u32) -> bool {
    if driver.navigate_to_village(village_id).await.is_err() {
        return false;
    }
    if driver.click("a.questmaster").await.is_err() {
        return false;
    }
    let mut collected_any = false;
    for tab in ["a.tabDailyQuests", "a.tabGeneralTasks"] {
        driver.click(tab).await.ok();
        loop {
            let collected = driver.click_all(&["button.collect"]).await.unwrap_or(0);
            collected_any = collected_any || collected > 0;
            if driver.is_visible("button.forward:disabled").await.unwrap_or(true) {
                break;
            }
            if driver.click("button.forward").await.is_err() {
                break;
            }
        }
    }
    driver.click("button.closeDialog").await.ok();
    collected_any
}

async fn execute_found_new_village(driver: &dyn Driver, village_id: u32) -> bool {
    if driver.navigate_to_village(village_id).await.is_err() {
        return false;
    }
    if driver.click("a.openMap").await.is_err() {
        return false;
    }
    let target = match driver.find_abandoned_valley().await {
        Ok(coords) => coords,
        Err(_) => return false,
    };
    if driver
        .navigate(&format!("/karte.php?x={}&y={}", target.0, target.1))
        .await
        .is_err()
    {
        return false;
    }
    if driver.select_option("select.tribe", "3").await.is_err() {
        return false;
    }
    driver.click("button.submit").await.unwrap_or(false)
}

async fn execute_production_boost(
    driver: &dyn Driver,
    scanner: &dyn Scanner,
    eligible_kinds: &[ResourceKind],
) -> bool {
    if driver.navigate("/dorf1.php").await.is_err() {
        return false;
    }
    if !driver
        .click("button.productionBoost")
        .await
        .unwrap_or(false)
    {
        return false;
    }
    let mut any_ok = false;
    for _ in eligible_kinds {
        any_ok = watch_commercial(driver, scanner, 30).await || any_ok;
    }
    any_ok
}

/// Shared across any job that needs to sit through a video ad (§4.5's
/// shared subroutine): click, confirm, wait for the video area, read the
/// remaining-time counter, and cancel if it would exceed `budget_seconds`.
async fn watch_commercial(driver: &dyn Driver, scanner: &dyn Scanner, budget_seconds: u32) -> bool {
    if !driver.click("button.watchAd").await.unwrap_or(false) {
        return false;
    }
    if !driver.click("button.confirmVideo").await.unwrap_or(false) {
        return false;
    }
    if !driver
        .wait_for_selector("#videoArea", 5000)
        .await
        .unwrap_or(false)
    {
        return false;
    }
    let remaining = match driver.get_page_source("#videoArea iframe").await {
        Ok(html) => scanner.scan_advertise_remaining_time(&html).unwrap_or(0),
        Err(_) => return false,
    };
    if remaining > budget_seconds {
        driver.click("button.cancelVideo").await.ok();
        false
    } else {
        driver.sleep(remaining as u64).await;
        true
    }
}
