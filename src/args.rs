use crate::{
    api::DEFAULT_API_ROOT,
    model::{recommender::RecommenderConfig, structures::game_mode::GameMode}
};
use clap::Parser;

#[derive(Parser, Clone)]
#[command(
    display_name = "osu! Recommender",
    long_about = "Recommends beatmaps to farm based on the scores of players \
                  who performed similarly to you on your own top plays"
)]
pub struct Args {
    /// Numeric osu! user id or username to recommend beatmaps for
    #[arg(short, long, env = "OSU_USER_ID", help = "osu! user id or username")]
    pub user_id: String,

    /// osu! API v1 key. Keys are issued at https://osu.ppy.sh/p/api
    #[arg(short, long, env = "OSU_API_KEY", hide_env_values = true, help = "osu! API v1 key")]
    pub api_key: String,

    #[arg(long, env = "OSU_API_ROOT", default_value = DEFAULT_API_ROOT, help = "Score service endpoint")]
    pub api_root: String,

    /// Game mode to scan (osu, taiko, catch, mania)
    #[arg(short, long, default_value = "osu", value_parser = parse_mode)]
    pub mode: GameMode,

    /// Only consider candidate plays graded S or better
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub only_full_combo: bool,

    /// How many of your own top plays seed the scan
    #[arg(long, default_value_t = 20)]
    pub own_play_count: usize,

    /// How many plays to keep from each similar player's history
    #[arg(long, default_value_t = 20)]
    pub others_play_count: usize,

    /// How many closest-scoring players to follow per seed play
    #[arg(long, default_value_t = 10)]
    pub similar_play_count: usize,

    /// Maximum number of recommendations to produce
    #[arg(long, default_value_t = 50)]
    pub recommendation_count: usize,

    /// Cap on simultaneous in-flight API requests
    #[arg(long, default_value_t = 16)]
    pub max_concurrent_requests: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

fn parse_mode(raw: &str) -> Result<GameMode, String> {
    raw.parse()
}

impl Args {
    pub fn recommender_config(&self) -> RecommenderConfig {
        RecommenderConfig {
            mode: self.mode,
            user_id: self.user_id.clone(),
            only_full_combo: self.only_full_combo,
            own_play_count_to_scan: self.own_play_count,
            others_play_count_to_scan: self.others_play_count,
            similar_play_count: self.similar_play_count,
            recommendation_count: self.recommendation_count,
            max_concurrent_requests: self.max_concurrent_requests
        }
    }
}
