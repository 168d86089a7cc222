use serde::{Deserialize, Serialize};
use travian_types::Resources;

/// Outcome of a single `HeroInfo::send_request` call.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Accepted,
    PartiallyAccepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub status: ReservationStatus,
    pub provided: Resources,
}

/// Hero state for one planning pass. `reserved` tracks how much of the
/// inventory has already been committed to jobs planned earlier in the same
/// pass; it is never persisted across passes since each pass owns a fresh
/// `HeroInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroInfo {
    pub health: u16,
    pub experience: u32,
    pub adventures: u32,
    pub is_available: bool,
    pub points_available: u32,
    pub inventory: Resources,
    pub has_daily_quest_indicator: bool,
    pub reserved: Resources,
}

impl HeroInfo {
    pub fn can_go_on_adventure(&self) -> bool {
        self.is_available && self.adventures > 0 && self.health > 20
    }

    fn available(&self) -> Resources {
        self.inventory.saturating_sub(&self.reserved)
    }

    /// Reserves as much of `request` as the hero's unreserved inventory can
    /// cover. Both the fully- and partially-accepted branches mutate
    /// `reserved` symmetrically, so repeated calls within a pass only ever
    /// grow it (§8 invariant 6) regardless of which branch fired.
    pub fn send_request(&mut self, request: Resources) -> ReservationResponse {
        if request == Resources::ZERO {
            return ReservationResponse {
                status: ReservationStatus::Rejected,
                provided: Resources::ZERO,
            };
        }

        let available = self.available();

        if available.fits(&request) {
            self.reserved = self.reserved + request;
            return ReservationResponse {
                status: ReservationStatus::Accepted,
                provided: request,
            };
        }

        if available.is_disjoint(&request) {
            return ReservationResponse {
                status: ReservationStatus::Rejected,
                provided: Resources::ZERO,
            };
        }

        let provided = available.provide_up_to(&request);
        self.reserved = self.reserved + provided;
        ReservationResponse {
            status: ReservationStatus::PartiallyAccepted,
            provided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_request_is_rejected_without_mutation() {
        let mut hero = HeroInfo {
            inventory: Resources::new(100.0, 100.0, 100.0, 100.0),
            ..Default::default()
        };
        let resp = hero.send_request(Resources::ZERO);
        assert_eq!(resp.status, ReservationStatus::Rejected);
        assert_eq!(hero.reserved, Resources::ZERO);
    }

    #[test]
    fn full_acceptance_reserves_the_request() {
        let mut hero = HeroInfo {
            inventory: Resources::new(100.0, 100.0, 100.0, 100.0),
            ..Default::default()
        };
        let resp = hero.send_request(Resources::new(10.0, 0.0, 0.0, 0.0));
        assert_eq!(resp.status, ReservationStatus::Accepted);
        assert_eq!(hero.reserved, Resources::new(10.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn disjoint_request_is_rejected() {
        let mut hero = HeroInfo {
            inventory: Resources::new(0.0, 0.0, 100.0, 0.0),
            ..Default::default()
        };
        let resp = hero.send_request(Resources::new(10.0, 5.0, 0.0, 0.0));
        assert_eq!(resp.status, ReservationStatus::Rejected);
        assert_eq!(hero.reserved, Resources::ZERO);
    }

    #[test]
    fn partial_acceptance_still_reserves_what_it_can() {
        let mut hero = HeroInfo {
            inventory: Resources::new(5.0, 100.0, 0.0, 0.0),
            ..Default::default()
        };
        let resp = hero.send_request(Resources::new(10.0, 10.0, 0.0, 0.0));
        assert_eq!(resp.status, ReservationStatus::PartiallyAccepted);
        assert_eq!(resp.provided, Resources::new(5.0, 10.0, 0.0, 0.0));
        assert_eq!(hero.reserved, Resources::new(5.0, 10.0, 0.0, 0.0));
    }

    #[test]
    fn reservations_never_exceed_inventory_and_only_grow() {
        let mut hero = HeroInfo {
            inventory: Resources::new(10.0, 10.0, 10.0, 10.0),
            ..Default::default()
        };
        hero.send_request(Resources::new(5.0, 0.0, 0.0, 0.0));
        let before = hero.reserved;
        hero.send_request(Resources::new(5.0, 0.0, 0.0, 0.0));
        assert!(hero.reserved.fits(&before));
        assert!(hero.inventory.fits(&hero.reserved));
    }
}
