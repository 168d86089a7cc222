use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use travian_types::{buildings::BuildingName, tribe::Tribe, GameError};

/// Which of a village's two concurrency-relevant slots a building targets.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum QueueKey {
    Inside,
    Outside,
}

impl QueueKey {
    /// Resource pits (slots 1..18) build outside; everything else builds
    /// inside the village center.
    pub fn for_building(name: BuildingName) -> QueueKey {
        if name.is_resource_pit() {
            QueueKey::Outside
        } else {
            QueueKey::Inside
        }
    }
}

/// A planned or observed construction in progress on one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingJob {
    pub building: BuildingName,
    pub target_level: u8,
    pub time_remaining_seconds: u32,
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Slot {
    job: Option<BuildingJob>,
    freeze_until: Option<DateTime<Utc>>,
    freeze_job_id: Option<Uuid>,
}

impl Slot {
    fn is_busy(&self, now: DateTime<Utc>) -> bool {
        self.job.is_some() || self.freeze_until.is_some_and(|until| until > now)
    }

    fn clear_stale_freeze(&mut self, now: DateTime<Utc>) {
        if self.job.is_none() && self.freeze_until.is_some_and(|until| until <= now) {
            self.freeze_until = None;
            self.freeze_job_id = None;
        }
    }
}

/// Tribe-aware concurrency model for a village's construction slots. Romans
/// and Huns keep two fully independent slots (center / resource field);
/// every other tribe shares a single slot between the two queue keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingQueue {
    tribe: Tribe,
    center: Slot,
    resource_field: Slot,
}

impl BuildingQueue {
    pub fn new(tribe: Tribe) -> Self {
        Self {
            tribe,
            center: Slot::default(),
            resource_field: Slot::default(),
        }
    }

    pub fn parallel_building_allowed(&self) -> bool {
        self.tribe.parallel_building_allowed()
    }

    /// The slot a given queue key resolves to. Non-parallel tribes fold
    /// both keys onto the center slot, which is the single shared slot.
    fn slot(&self, key: QueueKey) -> &Slot {
        if self.parallel_building_allowed() {
            match key {
                QueueKey::Inside => &self.center,
                QueueKey::Outside => &self.resource_field,
            }
        } else {
            &self.center
        }
    }

    fn slot_mut(&mut self, key: QueueKey) -> &mut Slot {
        if self.parallel_building_allowed() {
            match key {
                QueueKey::Inside => &mut self.center,
                QueueKey::Outside => &mut self.resource_field,
            }
        } else {
            &mut self.center
        }
    }

    pub fn can_build_inside(&self, now: DateTime<Utc>) -> bool {
        !self.slot(QueueKey::Inside).is_busy(now)
    }

    pub fn can_build_outside(&self, now: DateTime<Utc>) -> bool {
        !self.slot(QueueKey::Outside).is_busy(now)
    }

    pub fn can_build(&self, key: QueueKey, now: DateTime<Utc>) -> bool {
        match key {
            QueueKey::Inside => self.can_build_inside(now),
            QueueKey::Outside => self.can_build_outside(now),
        }
    }

    pub fn is_empty(&self, now: DateTime<Utc>) -> bool {
        self.can_build_inside(now) && self.can_build_outside(now)
    }

    /// Places a job into the slot implied by its building kind.
    pub fn add_job(&mut self, job: BuildingJob, now: DateTime<Utc>) -> Result<(), GameError> {
        let key = QueueKey::for_building(job.building);
        if self.slot(key).is_busy(now) {
            return Err(GameError::NoFoundationSlotsAvailable);
        }
        let slot = self.slot_mut(key);
        slot.job = Some(job);
        slot.freeze_until = None;
        slot.freeze_job_id = None;
        Ok(())
    }

    /// Marks a slot as claimed by a planned-but-not-yet-observed job so the
    /// next planning pass does not duplicate it.
    pub fn freeze_until(&mut self, until: DateTime<Utc>, key: QueueKey, job_id: Option<Uuid>) {
        let slot = self.slot_mut(key);
        slot.freeze_until = Some(until);
        slot.freeze_job_id = job_id;
    }

    /// Releases a slot's freeze, e.g. after its job terminates without
    /// confirmation from the driver.
    pub fn unfreeze(&mut self, key: QueueKey) {
        let slot = self.slot_mut(key);
        slot.freeze_until = None;
        slot.freeze_job_id = None;
        slot.job = None;
    }

    /// Drops freezes whose deadline has already passed without an observed
    /// job taking their place.
    pub fn clear_stale_freezes(&mut self, now: DateTime<Utc>) {
        self.center.clear_stale_freeze(now);
        self.resource_field.clear_stale_freeze(now);
    }

    /// Replaces observed slot contents (from a fresh scan) while preserving
    /// freezes whose deadline is still in the future — those represent jobs
    /// the scan has not caught up with yet.
    pub fn reconcile_with_observed(&mut self, observed: BuildingQueue, now: DateTime<Utc>) {
        let keep_center_freeze = self.center.freeze_until.filter(|u| *u > now);
        let keep_resource_freeze = self.resource_field.freeze_until.filter(|u| *u > now);
        let keep_center_job_id = self.center.freeze_job_id;
        let keep_resource_job_id = self.resource_field.freeze_job_id;

        self.tribe = observed.tribe;
        self.center = observed.center;
        self.resource_field = observed.resource_field;

        if self.center.job.is_none() {
            if let Some(until) = keep_center_freeze {
                self.center.freeze_until = Some(until);
                self.center.freeze_job_id = keep_center_job_id;
            }
        }
        if self.resource_field.job.is_none() {
            if let Some(until) = keep_resource_freeze {
                self.resource_field.freeze_until = Some(until);
                self.resource_field.freeze_job_id = keep_resource_job_id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job(building: BuildingName) -> BuildingJob {
        BuildingJob {
            building,
            target_level: 1,
            time_remaining_seconds: 60,
            job_id: None,
        }
    }

    #[test]
    fn romans_build_inside_and_outside_at_once() {
        let now = Utc::now();
        let mut q = BuildingQueue::new(Tribe::Romans);
        q.add_job(job(BuildingName::Warehouse), now).unwrap();
        assert!(!q.can_build_inside(now));
        assert!(q.can_build_outside(now));
        q.add_job(job(BuildingName::Woodcutter), now).unwrap();
        assert!(!q.can_build_outside(now));
    }

    #[test]
    fn huns_also_build_in_parallel() {
        let now = Utc::now();
        let q = BuildingQueue::new(Tribe::Huns);
        assert!(q.parallel_building_allowed());
    }

    #[test]
    fn gauls_share_a_single_slot() {
        let now = Utc::now();
        let mut q = BuildingQueue::new(Tribe::Gauls);
        q.add_job(job(BuildingName::Warehouse), now).unwrap();
        assert!(!q.can_build_inside(now));
        assert!(!q.can_build_outside(now), "shared slot blocks both keys");
    }

    #[test]
    fn stale_freeze_is_cleared() {
        let now = Utc::now();
        let mut q = BuildingQueue::new(Tribe::Gauls);
        q.freeze_until(now - Duration::seconds(1), QueueKey::Inside, None);
        assert!(!q.can_build_inside(now));
        q.clear_stale_freezes(now);
        assert!(q.can_build_inside(now));
    }

    #[test]
    fn future_freeze_survives_reconciliation() {
        let now = Utc::now();
        let mut q = BuildingQueue::new(Tribe::Romans);
        let until = now + Duration::seconds(3600);
        q.freeze_until(until, QueueKey::Inside, None);

        let observed = BuildingQueue::new(Tribe::Romans);
        q.reconcile_with_observed(observed, now);

        assert!(!q.can_build_inside(now), "future freeze must survive");
    }
}
