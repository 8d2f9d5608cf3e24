use crate::model::structures::{
    beatmap::Beatmap, game_mode::GameMode, mods::Mods, play::Play, play_rank::PlayRank,
    ranking_status::RankingStatus
};
use chrono::{TimeZone, Utc};
use std::time::Duration;

pub fn generate_play(player_id: i64, beatmap_id: i64, performance_points: f64) -> Play {
    generate_ranked_play(player_id, beatmap_id, performance_points, PlayRank::S, Mods::NONE)
}

pub fn generate_ranked_play(
    player_id: i64,
    beatmap_id: i64,
    performance_points: f64,
    rank: PlayRank,
    mods: Mods
) -> Play {
    Play {
        player_id,
        beatmap_id,
        mods,
        rank,
        max_combo: 727,
        count_300: 900,
        count_100: 80,
        count_50: 10,
        count_miss: 10,
        performance_points
    }
}

pub fn generate_beatmap(id: i64) -> Beatmap {
    Beatmap {
        id,
        set_id: id * 10,
        mode: GameMode::Osu,
        ranking_status: RankingStatus::Ranked,
        creator: "peppy".to_string(),
        title: format!("Test Song {}", id),
        artist: "Test Artist".to_string(),
        difficulty_name: "Insane".to_string(),
        last_update: Utc.with_ymd_and_hms(2016, 8, 20, 0, 0, 0).unwrap().fixed_offset(),
        duration: Duration::from_secs(142),
        max_combo: 1337,
        bpm: 180.0,
        stars: 5.21,
        approach_rate: 9.0,
        overall_difficulty: 8.0,
        circle_size: 4.0,
        drain_rate: 6.0
    }
}

/// Seed history at the given performance values, one play per distinct
/// beatmap starting at id 1000.
pub fn generate_seed_plays(player_id: i64, performance_points: &[f64]) -> Vec<Play> {
    performance_points
        .iter()
        .enumerate()
        .map(|(i, pp)| generate_play(player_id, 1000 + i as i64, *pp))
        .collect()
}
