use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::{DateTime, Duration, Utc};

use crate::job::Job;

/// Default per-job TTL (§4.7): a job that stays PENDING past
/// `scheduled_time + this` is dropped as EXPIRED rather than run late.
pub fn default_ttl() -> Duration {
    Duration::hours(1)
}

/// Min-heap entry ordered by `(scheduled_time, insertion_sequence)`: earlier
/// times pop first, and among equal times, earlier insertions pop first
/// (stable FIFO tie-break, ported from the original `heapq`-based queue).
struct Entry {
    scheduled_time: DateTime<Utc>,
    sequence: u64,
    job: Job,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.scheduled_time == other.scheduled_time && self.sequence == other.sequence
    }
}
impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest time out first.
        other
            .scheduled_time
            .cmp(&self.scheduled_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of not-yet-run jobs, ordered for cheapest "give me
/// everything due by now" access (§4.6).
#[derive(Default)]
pub struct ScheduledJobQueue {
    heap: BinaryHeap<Entry>,
    next_sequence: u64,
}

impl ScheduledJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, job: Job) {
        let entry = Entry {
            scheduled_time: job.scheduled_time,
            sequence: self.next_sequence,
            job,
        };
        self.next_sequence += 1;
        self.heap.push(entry);
    }

    pub fn peek_next_time(&self) -> Option<DateTime<Utc>> {
        self.heap.peek().map(|e| e.scheduled_time)
    }

    /// Pops the earliest job whose `scheduled_time` is at or before `now`,
    /// if any.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<Job> {
        if self.heap.peek().is_some_and(|e| e.scheduled_time <= now) {
            self.heap.pop().map(|e| e.job)
        } else {
            None
        }
    }

    /// Removes every queued job whose TTL has elapsed (`scheduled_time + ttl
    /// <= now`), returning them so the caller can mark them EXPIRED and
    /// unfreeze their village slot. Every job still in the queue is PENDING
    /// by construction (`pop_due` removes jobs on execution), so no status
    /// check is needed here.
    pub fn drain_expired(&mut self, now: DateTime<Utc>, ttl: Duration) -> Vec<Job> {
        let mut expired = Vec::new();
        let mut keep = BinaryHeap::new();
        for entry in self.heap.drain() {
            if entry.scheduled_time + ttl <= now {
                expired.push(entry.job);
            } else {
                keep.push(entry);
            }
        }
        self.heap = keep;
        expired
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobKind;
    use chrono::Duration;

    fn job_at(time: DateTime<Utc>) -> Job {
        Job::new(
            time,
            0,
            JobKind::CollectDailyQuestsJob { daily_quest_threshold: 50 },
        )
    }

    #[test]
    fn pops_in_scheduled_order() {
        let now = Utc::now();
        let mut q = ScheduledJobQueue::new();
        q.push(job_at(now + Duration::seconds(30)));
        q.push(job_at(now - Duration::seconds(30)));
        q.push(job_at(now));

        let first = q.pop_due(now + Duration::seconds(1)).unwrap();
        let second = q.pop_due(now + Duration::seconds(1)).unwrap();
        assert!(first.scheduled_time <= second.scheduled_time);
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(now + Duration::seconds(1)).is_none());
    }

    #[test]
    fn equal_times_preserve_insertion_order() {
        let now = Utc::now();
        let mut q = ScheduledJobQueue::new();
        let a = job_at(now);
        let b = job_at(now);
        let a_id = a.job_id;
        let b_id = b.job_id;
        q.push(a);
        q.push(b);
        assert_eq!(q.pop_due(now).unwrap().job_id, a_id);
        assert_eq!(q.pop_due(now).unwrap().job_id, b_id);
    }

    #[test]
    fn peek_next_time_does_not_remove() {
        let now = Utc::now();
        let mut q = ScheduledJobQueue::new();
        q.push(job_at(now));
        assert_eq!(q.peek_next_time(), Some(now));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn drain_expired_removes_only_stale_jobs() {
        let now = Utc::now();
        let mut q = ScheduledJobQueue::new();
        let stale = job_at(now - Duration::hours(2));
        let stale_id = stale.job_id;
        let fresh = job_at(now - Duration::minutes(5));
        let fresh_id = fresh.job_id;
        q.push(stale);
        q.push(fresh);

        let expired = q.drain_expired(now, Duration::hours(1));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].job_id, stale_id);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due(now).unwrap().job_id, fresh_id);
    }
}
