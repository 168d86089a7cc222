use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tribe::Tribe;
use crate::Resources;

/// Troop types a `TrainJob` can queue. Scoped to each tribe's base infantry
/// line, which is all the planning strategy trains; siege/cavalry rosters
/// are out of scope here.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum UnitName {
    Legionnaire,
    Maceman,
    Phalanx,
    Mercenary,
    Hoplite,
    Raider,
    SpearRecruit,
    /// Settler roster, shared across tribes: what matters to planning is the
    /// count sitting in a village, not which tribe's skin it wears.
    Settlers,
}

impl UnitName {
    /// `None` for `Settlers`, which has no single owning tribe.
    pub fn tribe(self) -> Option<Tribe> {
        match self {
            UnitName::Legionnaire => Some(Tribe::Romans),
            UnitName::Maceman => Some(Tribe::Teutons),
            UnitName::Phalanx => Some(Tribe::Gauls),
            UnitName::Mercenary => Some(Tribe::Huns),
            UnitName::Hoplite => Some(Tribe::Spartans),
            UnitName::Raider => Some(Tribe::Nors),
            UnitName::SpearRecruit => Some(Tribe::Egyptians),
            UnitName::Settlers => None,
        }
    }

    pub fn base_infantry_for(tribe: Tribe) -> UnitName {
        match tribe {
            Tribe::Romans => UnitName::Legionnaire,
            Tribe::Teutons => UnitName::Maceman,
            Tribe::Gauls => UnitName::Phalanx,
            Tribe::Huns => UnitName::Mercenary,
            Tribe::Spartans => UnitName::Hoplite,
            Tribe::Nors => UnitName::Raider,
            Tribe::Egyptians => UnitName::SpearRecruit,
        }
    }

    /// Resources to train one unit of this type, at a level 1 training
    /// building. Used by `fits`-as-count arithmetic to size `TrainJob`
    /// quantities against current stocks.
    pub fn base_cost(self) -> Resources {
        match self {
            UnitName::Legionnaire => Resources::new(120.0, 100.0, 150.0, 30.0),
            UnitName::Phalanx => Resources::new(100.0, 130.0, 55.0, 30.0),
            UnitName::Maceman => Resources::new(95.0, 75.0, 40.0, 40.0),
            UnitName::Mercenary => Resources::new(95.0, 70.0, 40.0, 40.0),
            UnitName::Hoplite => Resources::new(80.0, 100.0, 50.0, 40.0),
            UnitName::Raider => Resources::new(100.0, 70.0, 50.0, 35.0),
            UnitName::SpearRecruit => Resources::new(90.0, 80.0, 60.0, 30.0),
            UnitName::Settlers => Resources::new(4800.0, 5600.0, 5200.0, 4100.0),
        }
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitName::Legionnaire => "Legionnaire",
            UnitName::Maceman => "Maceman",
            UnitName::Phalanx => "Phalanx",
            UnitName::Mercenary => "Mercenary",
            UnitName::Hoplite => "Hoplite",
            UnitName::Raider => "Raider",
            UnitName::SpearRecruit => "Spear Recruit",
            UnitName::Settlers => "Settlers",
        };
        f.write_str(name)
    }
}
