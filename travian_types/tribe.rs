use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven playable tribes. The last three extend beyond the base game's
/// four to match the wider roster this automation targets; they share the
/// base game's building/queue rules.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum Tribe {
    Romans,
    Teutons,
    Gauls,
    Huns,
    Spartans,
    Nors,
    Egyptians,
}

impl Tribe {
    /// Whether this tribe's building queue keeps independent center and
    /// resource-field slots, letting both build concurrently.
    pub fn parallel_building_allowed(self) -> bool {
        matches!(self, Tribe::Romans | Tribe::Huns)
    }
}

impl Default for Tribe {
    fn default() -> Self {
        Tribe::Gauls
    }
}

impl fmt::Display for Tribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tribe::Romans => "Romans",
            Tribe::Teutons => "Teutons",
            Tribe::Gauls => "Gauls",
            Tribe::Huns => "Huns",
            Tribe::Spartans => "Spartans",
            Tribe::Nors => "Nors",
            Tribe::Egyptians => "Egyptians",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_romans_and_huns_build_in_parallel() {
        assert!(Tribe::Romans.parallel_building_allowed());
        assert!(Tribe::Huns.parallel_building_allowed());
        assert!(!Tribe::Gauls.parallel_building_allowed());
        assert!(!Tribe::Teutons.parallel_building_allowed());
        assert!(!Tribe::Spartans.parallel_building_allowed());
        assert!(!Tribe::Nors.parallel_building_allowed());
        assert!(!Tribe::Egyptians.parallel_building_allowed());
    }
}
