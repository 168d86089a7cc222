use serde::{Deserialize, Serialize};
use travian_types::{buildings::BuildingName, Resources};

const WONDER_OF_THE_WORLD_CAP: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingCost {
    pub resources: Resources,
    pub total_sum: f64,
    pub seconds: u32,
    pub formatted: String,
}

/// Rounds `v` to the nearest multiple of `n`, matching the source
/// balancing data's `round_mul`.
fn round_to_nearest(v: f64, n: f64) -> f64 {
    (v / n).round() * n
}

/// The main-building time factor: `mb_level == 0` is special-cased to 5.0
/// (building with no Main Building yet is slower), otherwise a smoothly
/// decreasing exponential.
fn main_building_factor(mb_level: u8) -> f64 {
    if mb_level == 0 {
        5.0
    } else {
        0.964_f64.powi(mb_level as i32 - 1)
    }
}

/// Pure function: `(buildingKind, targetLevel, mainBuildingLevel, serverSpeed)
/// -> Cost{resources, seconds}` (§4.2). Declared once; never recomputed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravianCalculator;

impl TravianCalculator {
    /// Resource cost at `level`, rounded to the nearest 5; level 0 is free.
    pub fn cost_at_level(&self, building: BuildingName, level: u8) -> Resources {
        if level == 0 {
            return Resources::ZERO;
        }
        let data = building.static_data();
        let mult = data.growth_k.powi(level as i32 - 1);
        let (a, b, c, d) = data.base_cost;
        let mut cost = Resources::new(
            round_to_nearest(a * mult, 5.0),
            round_to_nearest(b * mult, 5.0),
            round_to_nearest(c * mult, 5.0),
            round_to_nearest(d * mult, 5.0),
        );

        if building == BuildingName::WonderOfTheWorld {
            let cap = Resources::new(
                WONDER_OF_THE_WORLD_CAP,
                WONDER_OF_THE_WORLD_CAP,
                WONDER_OF_THE_WORLD_CAP,
                WONDER_OF_THE_WORLD_CAP,
            );
            cost = cost.min(&cap);
        }

        cost
    }

    /// Construction time in seconds at `level`, given the village's current
    /// Main Building level and server speed. The Main Building upgrading
    /// itself references its own target level minus one rather than the
    /// village's (stale, pre-upgrade) Main Building level.
    pub fn time_at_level(
        &self,
        building: BuildingName,
        level: u8,
        village_mb_level: u8,
        server_speed: f64,
    ) -> u32 {
        if level == 0 {
            return 0;
        }
        let base = building.static_data().time.value_at(level);
        let factor = if building == BuildingName::MainBuilding {
            if level == 1 {
                1.25
            } else {
                main_building_factor(level - 1)
            }
        } else {
            main_building_factor(village_mb_level)
        };

        (base * factor / server_speed).round().max(0.0) as u32
    }

    pub fn cost(
        &self,
        building: BuildingName,
        level: u8,
        village_mb_level: u8,
        server_speed: f64,
    ) -> BuildingCost {
        let resources = self.cost_at_level(building, level);
        let seconds = self.time_at_level(building, level, village_mb_level, server_speed);
        BuildingCost {
            resources,
            total_sum: resources.total(),
            seconds,
            formatted: format_duration(seconds),
        }
    }
}

pub fn format_duration(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses a scraped `"HH:MM:SS"` duration string back to seconds. Returns
/// `None` on anything that doesn't match the three-part numeric shape.
pub fn parse_duration(text: &str) -> Option<u32> {
    let mut parts = text.trim().splitn(3, ':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    let seconds: u32 = parts.next()?.trim().parse().ok()?;
    Some(hours * 3600 + minutes * 60 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_is_free_and_instant() {
        let calc = TravianCalculator;
        assert_eq!(
            calc.cost_at_level(BuildingName::Warehouse, 0),
            Resources::ZERO
        );
        assert_eq!(calc.time_at_level(BuildingName::Warehouse, 0, 5, 1.0), 0);
    }

    #[test]
    fn cost_is_monotone_non_decreasing_in_level() {
        let calc = TravianCalculator;
        for building in [
            BuildingName::Woodcutter,
            BuildingName::Warehouse,
            BuildingName::MainBuilding,
            BuildingName::WonderOfTheWorld,
        ] {
            let max_level = building.max_level();
            let mut prev = 0.0;
            for level in 1..=max_level {
                let cost = calc.cost_at_level(building, level).total();
                assert!(
                    cost >= prev,
                    "{building:?} cost decreased at level {level}: {prev} -> {cost}"
                );
                prev = cost;
            }
        }
    }

    #[test]
    fn wonder_of_the_world_caps_each_component() {
        let calc = TravianCalculator;
        let cost = calc.cost_at_level(BuildingName::WonderOfTheWorld, 100);
        assert!(cost.lumber <= 1_000_000.0);
        assert!(cost.clay <= 1_000_000.0);
        assert!(cost.iron <= 1_000_000.0);
        assert!(cost.crop <= 1_000_000.0);
    }

    #[test]
    fn main_building_self_upgrade_uses_target_level_minus_one() {
        let calc = TravianCalculator;
        // village_mb_level is irrelevant for MainBuilding's own upgrade.
        let t1 = calc.time_at_level(BuildingName::MainBuilding, 1, 99, 1.0);
        let t2 = calc.time_at_level(BuildingName::MainBuilding, 2, 99, 1.0);
        assert!(t1 > 0);
        assert!(t2 > 0);
    }

    #[test]
    fn zero_main_building_level_is_the_slowest() {
        let calc = TravianCalculator;
        let slow = calc.time_at_level(BuildingName::Warehouse, 5, 0, 1.0);
        let fast = calc.time_at_level(BuildingName::Warehouse, 5, 10, 1.0);
        assert!(slow > fast);
    }

    #[test]
    fn formats_as_hh_mm_ss() {
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(59), "00:00:59");
    }

    #[test]
    fn parse_duration_round_trips_format_duration() {
        assert_eq!(parse_duration(&format_duration(3661)), Some(3661));
        assert_eq!(parse_duration("not a duration"), None);
    }
}
