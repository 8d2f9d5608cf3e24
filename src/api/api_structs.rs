use crate::{
    error::RecommenderError,
    model::structures::{
        beatmap::Beatmap, game_mode::GameMode, mods::Mods, play::Play, ranking_status::RankingStatus
    }
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::time::Duration;

// The v1 API reports every numeric field as a JSON string. DTOs keep the
// wire shape; conversion parses into typed records.

#[derive(Debug, Deserialize)]
pub struct BeatmapDto {
    pub beatmap_id: String,
    pub beatmapset_id: String,
    pub approved: String,
    pub creator: String,
    pub last_update: String,
    pub artist: String,
    pub title: String,
    pub version: String,
    pub hit_length: String,
    pub max_combo: Option<String>,
    pub bpm: String,
    pub difficultyrating: String,
    pub diff_approach: String,
    pub diff_overall: String,
    pub diff_size: String,
    pub diff_drain: String
}

#[derive(Debug, Deserialize)]
pub struct ScoreDto {
    pub user_id: String,
    // Present in get_user_best, absent in get_scores (implied by the query)
    pub beatmap_id: Option<String>,
    pub enabled_mods: String,
    pub rank: String,
    pub maxcombo: String,
    pub count300: String,
    pub count100: String,
    pub count50: String,
    pub countmiss: String,
    pub pp: String
}

fn parse_i64(field: &str, value: &str) -> Result<i64, RecommenderError> {
    value
        .parse()
        .map_err(|_| RecommenderError::Malformed(format!("field '{}' is not an integer: '{}'", field, value)))
}

fn parse_i32(field: &str, value: &str) -> Result<i32, RecommenderError> {
    value
        .parse()
        .map_err(|_| RecommenderError::Malformed(format!("field '{}' is not an integer: '{}'", field, value)))
}

fn parse_f64(field: &str, value: &str) -> Result<f64, RecommenderError> {
    value
        .parse()
        .map_err(|_| RecommenderError::Malformed(format!("field '{}' is not a number: '{}'", field, value)))
}

impl BeatmapDto {
    pub fn into_beatmap(self, mode: GameMode) -> Result<Beatmap, RecommenderError> {
        let ranking_status = RankingStatus::try_from(parse_i32("approved", &self.approved)?)
            .map_err(|_| RecommenderError::Malformed(format!("unknown approval status: '{}'", self.approved)))?;

        let last_update = NaiveDateTime::parse_from_str(&self.last_update, "%Y-%m-%d %H:%M:%S")
            .map_err(|_| RecommenderError::Malformed(format!("bad last_update timestamp: '{}'", self.last_update)))?
            .and_utc()
            .fixed_offset();

        // max_combo is null for some converted maps
        let max_combo = match &self.max_combo {
            Some(raw) => parse_i32("max_combo", raw)?,
            None => 0
        };

        let hit_length = parse_f64("hit_length", &self.hit_length)?;
        if !hit_length.is_finite() || hit_length < 0.0 {
            return Err(RecommenderError::Malformed(format!("bad hit_length: '{}'", self.hit_length)));
        }

        Ok(Beatmap {
            id: parse_i64("beatmap_id", &self.beatmap_id)?,
            set_id: parse_i64("beatmapset_id", &self.beatmapset_id)?,
            mode,
            ranking_status,
            creator: self.creator,
            title: self.title,
            artist: self.artist,
            difficulty_name: self.version,
            last_update,
            duration: Duration::from_secs_f64(hit_length),
            max_combo,
            bpm: parse_f64("bpm", &self.bpm)?,
            stars: parse_f64("difficultyrating", &self.difficultyrating)?,
            approach_rate: parse_f64("diff_approach", &self.diff_approach)?,
            overall_difficulty: parse_f64("diff_overall", &self.diff_overall)?,
            circle_size: parse_f64("diff_size", &self.diff_size)?,
            drain_rate: parse_f64("diff_drain", &self.diff_drain)?
        })
    }
}

impl ScoreDto {
    /// Converts into a [`Play`]. `fallback_beatmap_id` supplies the map id
    /// for leaderboard responses, which omit it.
    pub fn into_play(self, fallback_beatmap_id: Option<i64>) -> Result<Play, RecommenderError> {
        let beatmap_id = match (&self.beatmap_id, fallback_beatmap_id) {
            (Some(raw), _) => parse_i64("beatmap_id", raw)?,
            (None, Some(id)) => id,
            (None, None) => {
                return Err(RecommenderError::Malformed("score record carries no beatmap id".to_string()))
            }
        };

        let rank = self
            .rank
            .parse()
            .map_err(|e: String| RecommenderError::Malformed(e))?;

        let mods_bits: u32 = self
            .enabled_mods
            .parse()
            .map_err(|_| RecommenderError::Malformed(format!("bad enabled_mods bitset: '{}'", self.enabled_mods)))?;

        Ok(Play {
            player_id: parse_i64("user_id", &self.user_id)?,
            beatmap_id,
            mods: Mods::from_bits(mods_bits),
            rank,
            max_combo: parse_i32("maxcombo", &self.maxcombo)?,
            count_300: parse_i32("count300", &self.count300)?,
            count_100: parse_i32("count100", &self.count100)?,
            count_50: parse_i32("count50", &self.count50)?,
            count_miss: parse_i32("countmiss", &self.countmiss)?,
            performance_points: parse_f64("pp", &self.pp)?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::structures::play_rank::PlayRank;
    use approx::assert_abs_diff_eq;

    const BEATMAP_JSON: &str = r#"{
        "beatmapset_id": "163112",
        "beatmap_id": "396105",
        "approved": "1",
        "hit_length": "150",
        "version": "Extra",
        "last_update": "2015-05-15 13:07:42",
        "artist": "FELT",
        "title": "Flower Flag (MZC Echoes the Spring Liquid Mix)",
        "creator": "Frostmourne",
        "bpm": "132",
        "difficultyrating": "5.74591",
        "diff_size": "4",
        "diff_overall": "8",
        "diff_approach": "9",
        "diff_drain": "6",
        "max_combo": "641"
    }"#;

    const USER_BEST_JSON: &str = r#"{
        "beatmap_id": "396105",
        "score": "17592449",
        "maxcombo": "620",
        "count300": "441",
        "count100": "5",
        "count50": "0",
        "countmiss": "0",
        "enabled_mods": "24",
        "user_id": "4504101",
        "rank": "SH",
        "pp": "260.117",
        "date": "2016-03-04 12:14:44"
    }"#;

    const LEADERBOARD_JSON: &str = r#"{
        "score_id": "2177560145",
        "score": "30720792",
        "username": "Rafis",
        "count300": "446",
        "count100": "0",
        "count50": "0",
        "countmiss": "0",
        "maxcombo": "641",
        "perfect": "1",
        "enabled_mods": "0",
        "user_id": "2558286",
        "rank": "X",
        "pp": "321.405"
    }"#;

    #[test]
    fn test_beatmap_conversion() {
        let dto: BeatmapDto = serde_json::from_str(BEATMAP_JSON).unwrap();
        let beatmap = dto.into_beatmap(GameMode::Osu).unwrap();

        assert_eq!(beatmap.id, 396105);
        assert_eq!(beatmap.set_id, 163112);
        assert_eq!(beatmap.ranking_status, RankingStatus::Ranked);
        assert_eq!(beatmap.creator, "Frostmourne");
        assert_eq!(beatmap.difficulty_name, "Extra");
        assert_eq!(beatmap.duration, Duration::from_secs(150));
        assert_eq!(beatmap.max_combo, 641);
        assert_abs_diff_eq!(beatmap.stars, 5.74591);
        assert_abs_diff_eq!(beatmap.approach_rate, 9.0);
    }

    #[test]
    fn test_beatmap_conversion_null_max_combo_defaults_to_zero() {
        let mut value: serde_json::Value = serde_json::from_str(BEATMAP_JSON).unwrap();
        value["max_combo"] = serde_json::Value::Null;

        let dto: BeatmapDto = serde_json::from_value(value).unwrap();
        let beatmap = dto.into_beatmap(GameMode::Osu).unwrap();

        assert_eq!(beatmap.max_combo, 0);
    }

    #[test]
    fn test_beatmap_conversion_rejects_bad_timestamp() {
        let mut value: serde_json::Value = serde_json::from_str(BEATMAP_JSON).unwrap();
        value["last_update"] = serde_json::Value::String("yesterday".to_string());

        let dto: BeatmapDto = serde_json::from_value(value).unwrap();
        assert!(matches!(
            dto.into_beatmap(GameMode::Osu),
            Err(RecommenderError::Malformed(_))
        ));
    }

    #[test]
    fn test_user_best_conversion() {
        let dto: ScoreDto = serde_json::from_str(USER_BEST_JSON).unwrap();
        let play = dto.into_play(None).unwrap();

        assert_eq!(play.player_id, 4504101);
        assert_eq!(play.beatmap_id, 396105);
        assert_eq!(play.rank, PlayRank::Sh);
        assert_eq!(play.mods, Mods::HIDDEN | Mods::HARD_ROCK);
        assert_eq!(play.max_combo, 620);
        assert_abs_diff_eq!(play.performance_points, 260.117);
    }

    #[test]
    fn test_leaderboard_conversion_uses_fallback_beatmap_id() {
        let dto: ScoreDto = serde_json::from_str(LEADERBOARD_JSON).unwrap();
        let play = dto.into_play(Some(396105)).unwrap();

        assert_eq!(play.beatmap_id, 396105);
        assert_eq!(play.player_id, 2558286);
        // "X" is the alias spelling of SS
        assert_eq!(play.rank, PlayRank::Ss);
    }

    #[test]
    fn test_leaderboard_conversion_without_fallback_fails() {
        let dto: ScoreDto = serde_json::from_str(LEADERBOARD_JSON).unwrap();
        assert!(matches!(
            dto.into_play(None),
            Err(RecommenderError::Malformed(_))
        ));
    }

    #[test]
    fn test_score_conversion_rejects_unknown_rank() {
        let mut value: serde_json::Value = serde_json::from_str(USER_BEST_JSON).unwrap();
        value["rank"] = serde_json::Value::String("Z".to_string());

        let dto: ScoreDto = serde_json::from_value(value).unwrap();
        assert!(matches!(dto.into_play(None), Err(RecommenderError::Malformed(_))));
    }
}
