use std::str::FromStr;

/// Grade awarded for a play, ordered worst to best.
///
/// The API reports both `SS`/`X` and `SSH`/`XH` for the same grades
/// depending on context; both spellings parse to one variant, so aliased
/// grades compare equal under the derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayRank {
    D,
    C,
    B,
    A,
    S,
    Ss,
    Sh,
    Ssh
}

impl FromStr for PlayRank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(PlayRank::D),
            "C" => Ok(PlayRank::C),
            "B" => Ok(PlayRank::B),
            "A" => Ok(PlayRank::A),
            "S" => Ok(PlayRank::S),
            "SS" | "X" => Ok(PlayRank::Ss),
            "SH" => Ok(PlayRank::Sh),
            "SSH" | "XH" => Ok(PlayRank::Ssh),
            other => Err(format!("unknown play rank: {}", other))
        }
    }
}
