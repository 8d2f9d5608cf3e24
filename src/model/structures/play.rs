use crate::model::structures::{mods::Mods, play_rank::PlayRank};

/// One recorded performance by one player on one beatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    pub player_id: i64,
    pub beatmap_id: i64,
    pub mods: Mods,
    pub rank: PlayRank,
    pub max_combo: i32,
    pub count_300: i32,
    pub count_100: i32,
    pub count_50: i32,
    pub count_miss: i32,
    pub performance_points: f64
}

impl Play {
    /// Hit accuracy in `[0, 1]`, derived from the hit counts with the
    /// standard scoring weights.
    pub fn accuracy(&self) -> f64 {
        let total_hits = self.count_300 + self.count_100 + self.count_50 + self.count_miss;
        if total_hits == 0 {
            return 0.0;
        }

        let weighted = 300 * self.count_300 + 100 * self.count_100 + 50 * self.count_50;
        weighted as f64 / (300 * total_hits) as f64
    }
}
