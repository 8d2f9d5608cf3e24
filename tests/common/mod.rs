use async_trait::async_trait;
use osu_recommender::{
    api::ScoreSource,
    error::RecommenderError,
    model::structures::{beatmap::Beatmap, game_mode::GameMode, mods::Mods, play::Play}
};
use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
    sync::Once
};

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Deterministic in-memory [`ScoreSource`] for pipeline tests.
///
/// Unknown users resolve to empty histories (the service's valid "no ranked
/// plays" outcome); users and beatmaps registered as failing simulate a
/// transport error. Every call increments a shared counter.
#[derive(Default)]
pub struct StubScoreSource {
    user_plays: HashMap<String, Vec<Play>>,
    leaderboards: HashMap<i64, Vec<Play>>,
    beatmaps: HashMap<i64, Beatmap>,
    failing_users: HashSet<String>,
    failing_leaderboards: HashSet<i64>,
    calls: AtomicUsize
}

impl StubScoreSource {
    pub fn new() -> StubScoreSource {
        StubScoreSource::default()
    }

    pub fn with_user_plays(mut self, user_id: &str, plays: Vec<Play>) -> Self {
        self.user_plays.insert(user_id.to_string(), plays);
        self
    }

    pub fn with_leaderboard(mut self, beatmap_id: i64, plays: Vec<Play>) -> Self {
        self.leaderboards.insert(beatmap_id, plays);
        self
    }

    pub fn with_beatmap(mut self, beatmap: Beatmap) -> Self {
        self.beatmaps.insert(beatmap.id, beatmap);
        self
    }

    pub fn with_failing_user(mut self, user_id: &str) -> Self {
        self.failing_users.insert(user_id.to_string());
        self
    }

    pub fn with_failing_leaderboard(mut self, beatmap_id: i64) -> Self {
        self.failing_leaderboards.insert(beatmap_id);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn transport_failure() -> RecommenderError {
        RecommenderError::Malformed("simulated transport failure".to_string())
    }
}

#[async_trait]
impl ScoreSource for StubScoreSource {
    async fn beatmap(&self, _mode: GameMode, beatmap_id: i64) -> Result<Beatmap, RecommenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.beatmaps
            .get(&beatmap_id)
            .cloned()
            .ok_or(RecommenderError::NotFound { beatmap_id })
    }

    async fn user_top_plays(&self, _mode: GameMode, user_id: &str) -> Result<Vec<Play>, RecommenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_users.contains(user_id) {
            return Err(Self::transport_failure());
        }

        Ok(self.user_plays.get(user_id).cloned().unwrap_or_default())
    }

    async fn beatmap_top_plays(
        &self,
        _mode: GameMode,
        beatmap_id: i64,
        mods: Mods
    ) -> Result<Vec<Play>, RecommenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_leaderboards.contains(&beatmap_id) {
            return Err(Self::transport_failure());
        }

        let plays = self.leaderboards.get(&beatmap_id).cloned().unwrap_or_default();

        // The real service restricts to the exact mod combination
        Ok(plays
            .into_iter()
            .filter(|p| mods.is_any() || p.mods == mods)
            .collect())
    }
}
