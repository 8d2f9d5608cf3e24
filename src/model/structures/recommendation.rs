use crate::model::structures::{beatmap::Beatmap, mods::Mods};

/// A finalized recommendation: one beatmap plus the representative play
/// statistics of the candidate group it was reduced from.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub beatmap: Beatmap,
    pub expected_performance: f64,
    pub expected_accuracy: f64,
    pub mods: Mods,
    /// Number of candidate plays in the group; always at least 1.
    pub popularity: usize
}
