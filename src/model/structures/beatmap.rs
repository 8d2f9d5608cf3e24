use crate::model::structures::{game_mode::GameMode, ranking_status::RankingStatus};
use chrono::{DateTime, FixedOffset};
use std::time::Duration;

/// Full metadata for one beatmap, as returned by a metadata lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Beatmap {
    pub id: i64,
    pub set_id: i64,
    pub mode: GameMode,
    pub ranking_status: RankingStatus,
    pub creator: String,
    pub title: String,
    pub artist: String,
    pub difficulty_name: String,
    pub last_update: DateTime<FixedOffset>,
    pub duration: Duration,
    // Reported as null for some converted maps
    pub max_combo: i32,
    pub bpm: f64,
    pub stars: f64,
    pub approach_rate: f64,
    pub overall_difficulty: f64,
    pub circle_size: f64,
    pub drain_rate: f64
}
