use serde::{Deserialize, Serialize};
use std::fmt;

/// Mod combination for a play, wrapping the raw `enabled_mods` bitset of the
/// osu! API.
///
/// `Mods::ANY` is a sentinel valid only as a leaderboard filter ("no mod
/// restriction") and never appears on a fetched play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mods(u32);

impl Mods {
    pub const NONE: Mods = Mods(0);
    pub const NO_FAIL: Mods = Mods(1);
    pub const EASY: Mods = Mods(2);
    pub const TOUCH_DEVICE: Mods = Mods(4);
    pub const HIDDEN: Mods = Mods(8);
    pub const HARD_ROCK: Mods = Mods(16);
    pub const SUDDEN_DEATH: Mods = Mods(32);
    pub const DOUBLE_TIME: Mods = Mods(64);
    pub const RELAX: Mods = Mods(128);
    pub const HALF_TIME: Mods = Mods(256);
    pub const NIGHTCORE: Mods = Mods(512);
    pub const FLASHLIGHT: Mods = Mods(1024);
    pub const SPUN_OUT: Mods = Mods(4096);
    pub const PERFECT: Mods = Mods(16384);

    /// Leaderboard filter sentinel: no restriction on mods.
    pub const ANY: Mods = Mods(u32::MAX);

    pub const fn from_bits(bits: u32) -> Mods {
        Mods(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_any(self) -> bool {
        self.0 == Mods::ANY.0
    }
}

impl Default for Mods {
    fn default() -> Self {
        Mods::NONE
    }
}

impl std::ops::BitOr for Mods {
    type Output = Mods;

    fn bitor(self, rhs: Mods) -> Mods {
        Mods(self.0 | rhs.0)
    }
}

const ACRONYMS: &[(Mods, &str)] = &[
    (Mods::NO_FAIL, "NF"),
    (Mods::EASY, "EZ"),
    (Mods::TOUCH_DEVICE, "TD"),
    (Mods::HIDDEN, "HD"),
    (Mods::HARD_ROCK, "HR"),
    (Mods::SUDDEN_DEATH, "SD"),
    (Mods::NIGHTCORE, "NC"),
    (Mods::DOUBLE_TIME, "DT"),
    (Mods::RELAX, "RX"),
    (Mods::HALF_TIME, "HT"),
    (Mods::FLASHLIGHT, "FL"),
    (Mods::SPUN_OUT, "SO"),
    (Mods::PERFECT, "PF")
];

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return write!(f, "Any");
        }
        if *self == Mods::NONE {
            return write!(f, "None");
        }

        // NC implies DT on the wire; print only the NC acronym
        let mut bits = *self;
        if bits.contains(Mods::NIGHTCORE) {
            bits = Mods(bits.0 & !Mods::DOUBLE_TIME.0);
        }

        for (m, acronym) in ACRONYMS {
            if bits.contains(*m) {
                write!(f, "{}", acronym)?;
            }
        }
        Ok(())
    }
}
