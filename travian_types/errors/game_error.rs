use thiserror::Error;
use uuid::Uuid;

use crate::{buildings::BuildingName, tribe::Tribe, units::UnitName};

/// Errors raised by domain logic: building rules, hero reservations, and
/// job planning/execution constraints.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Not enough resources")]
    NotEnoughResources,

    #[error("Not enough hero points for next level")]
    NotEnoughHeroPoints,

    #[error("Hero attribute over limit 100")]
    HeroAttributeOverflow,

    #[error("Hero is not dead")]
    HeroNotDead,

    #[error("Village slots are full")]
    VillageSlotsFull,

    #[error("Slot {slot_id} is already occupied")]
    SlotOccupied { slot_id: u8 },

    #[error("No building found on slot {slot_id}")]
    EmptySlot { slot_id: u8 },

    #[error("Building requirements not met: requires {building:?} at level {level}")]
    BuildingRequirementsNotMet { building: BuildingName, level: u8 },

    #[error("Building {building:?} not compatible with {tribe:?} tribe")]
    BuildingTribeMismatch {
        building: BuildingName,
        tribe: Tribe,
    },

    #[error("Building {0:?} not found")]
    BuildingNotFound(BuildingName),

    #[error("Building {0:?} can only be built in the capital")]
    CapitalConstraint(BuildingName),

    #[error("Building {0:?} can't be built in the capital")]
    NonCapitalConstraint(BuildingName),

    #[error("Building {0:?} can only be built once per village")]
    NoMultipleBuildingConstraint(BuildingName),

    #[error("Village {village_id} not owned by player {player_id:?}")]
    VillageNotOwned { village_id: u32, player_id: Uuid },

    #[error("Hero {hero_id:?} not owned by player {player_id:?}")]
    HeroNotOwned { hero_id: Uuid, player_id: Uuid },

    #[error("Building has already reached max level")]
    BuildingMaxLevelReached,

    #[error("Not enough units in stock to deploy")]
    NotEnoughUnits,

    #[error("Can't use {0:?} to train {1:?}")]
    InvalidTrainingBuilding(BuildingName, UnitName),

    #[error("Unit {0:?} not yet researched in the Academy")]
    UnitNotResearched(UnitName),

    #[error("Unit {0:?} not found for this tribe")]
    UnitNotFound(UnitName),

    #[error("{0} is an invalid level for {1:?}")]
    InvalidBuildingLevel(u8, BuildingName),

    #[error("Hero {hero_id:?} is not in village {village_id}")]
    HeroNotAtHome { hero_id: Uuid, village_id: u32 },

    #[error("No foundation slots available on this tribe's queue")]
    NoFoundationSlotsAvailable,

    #[error("Insufficient culture points: have {current}, need {required}")]
    InsufficientCulturePoints { current: u32, required: u32 },

    #[error("Not enough settlers to found a new village (need 3)")]
    InsufficientSettlers,

    #[error("Target coordinates are already occupied")]
    TargetOccupied,

    #[error("No scheduled job found with id {0}")]
    JobNotFound(Uuid),

    #[error("Job {0} is not pending and cannot be executed")]
    JobNotPending(Uuid),
}
