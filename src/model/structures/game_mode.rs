use serde_repr::{Deserialize_repr, Serialize_repr};
use std::{convert::TryFrom, str::FromStr};
use strum_macros::EnumIter;

#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum GameMode {
    Osu = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3
}

impl TryFrom<i32> for GameMode {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(GameMode::Osu),
            1 => Ok(GameMode::Taiko),
            2 => Ok(GameMode::Catch),
            3 => Ok(GameMode::Mania),
            _ => Err(())
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "osu" | "standard" | "std" => Ok(GameMode::Osu),
            "taiko" => Ok(GameMode::Taiko),
            "catch" | "ctb" | "fruits" => Ok(GameMode::Catch),
            "mania" => Ok(GameMode::Mania),
            other => Err(format!("unknown game mode: {}", other))
        }
    }
}
