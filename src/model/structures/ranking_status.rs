use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;

/// Ranking state of a beatmap, matching the `approved` codes of the osu! API.
#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum RankingStatus {
    Graveyard = -2,
    WorkInProgress = -1,
    Pending = 0,
    Ranked = 1,
    Approved = 2,
    Qualified = 3,
    Loved = 4
}

impl TryFrom<i32> for RankingStatus {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            -2 => Ok(RankingStatus::Graveyard),
            -1 => Ok(RankingStatus::WorkInProgress),
            0 => Ok(RankingStatus::Pending),
            1 => Ok(RankingStatus::Ranked),
            2 => Ok(RankingStatus::Approved),
            3 => Ok(RankingStatus::Qualified),
            4 => Ok(RankingStatus::Loved),
            _ => Err(())
        }
    }
}
