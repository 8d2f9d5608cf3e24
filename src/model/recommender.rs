use crate::{
    api::ScoreSource,
    error::RecommenderError,
    model::{
        filter,
        structures::{
            beatmap::Beatmap, game_mode::GameMode, mods::Mods, play::Play, recommendation::Recommendation
        }
    },
    utils::progress_utils::ProgressReporter
};
use futures::future::join_all;
use indexmap::IndexMap;
use itertools::Itertools;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex}
};
use tokio::sync::{watch, Semaphore};
use tracing::{debug, warn};

/// Share of the progress range covered by the candidate scan; the group
/// reduction covers the rest.
const SCAN_PROGRESS_SHARE: f64 = 0.25;
const REDUCE_PROGRESS_SHARE: f64 = 0.75;

#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    pub mode: GameMode,
    /// Numeric id or username; passed through to the scoring service as-is.
    pub user_id: String,
    pub only_full_combo: bool,
    /// Upper bounds, not guarantees: the service may return fewer records
    /// at every stage.
    pub own_play_count_to_scan: usize,
    pub others_play_count_to_scan: usize,
    pub similar_play_count: usize,
    pub recommendation_count: usize,
    /// Cap on in-flight remote calls across all fan-out stages.
    pub max_concurrent_requests: usize
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        RecommenderConfig {
            mode: GameMode::Osu,
            user_id: String::new(),
            only_full_combo: false,
            own_play_count_to_scan: 20,
            others_play_count_to_scan: 20,
            similar_play_count: 10,
            recommendation_count: 50,
            max_concurrent_requests: 16
        }
    }
}

/// Acceptance range for candidate plays: from the user's weakest seed play
/// up to 120% of their strongest.
#[derive(Debug, Clone, Copy)]
struct PpWindow {
    min: f64,
    max: f64
}

impl PpWindow {
    fn from_seed(seed: &[Play]) -> PpWindow {
        let (min, max) = match seed
            .iter()
            .map(|p| p.performance_points)
            .minmax_by(|a, b| a.total_cmp(b))
        {
            itertools::MinMaxResult::NoElements => (0.0, 0.0),
            itertools::MinMaxResult::OneElement(pp) => (pp, pp),
            itertools::MinMaxResult::MinMax(min, max) => (min, max)
        };

        PpWindow {
            min: min.floor(),
            max: (max * 1.2).ceil()
        }
    }
}

/// Drives the three-stage recommendation pipeline against a
/// [`ScoreSource`].
///
/// Steps:
/// 1. Seed: fetch the user's own top plays, derive the performance window
///    and the set of beatmaps to exclude.
/// 2. Scan: for every seed play, fetch its leaderboard under the same mods,
///    then the histories of the players who scored closest to the seed
///    play; filtered survivors accumulate as candidates.
/// 3. Reduce: group candidates by beatmap, pick the median play of each
///    group, and resolve the group's beatmap metadata.
///
/// Remote failures are fatal only at the seed fetch; every later failure
/// drops its own unit of work and the run continues.
pub struct Recommender {
    source: Arc<dyn ScoreSource>,
    config: RecommenderConfig,
    limiter: Semaphore,
    progress: ProgressReporter
}

impl Recommender {
    pub fn new(source: Arc<dyn ScoreSource>, config: RecommenderConfig) -> Recommender {
        let limiter = Semaphore::new(config.max_concurrent_requests.max(1));

        Recommender {
            source,
            config,
            limiter,
            progress: ProgressReporter::new()
        }
    }

    /// Progress of the current run as monotonically increasing values in
    /// `[0, 1]`.
    pub fn progress(&self) -> watch::Receiver<f64> {
        self.progress.subscribe()
    }

    pub async fn recommend(&self) -> Result<Vec<Recommendation>, RecommenderError> {
        self.progress.reset();

        // Stage 1: the user's own history seeds the search
        let mut own_plays = self.fetch_user_top_plays(&self.config.user_id).await?;
        if own_plays.is_empty() {
            return Err(RecommenderError::NoData {
                user_id: self.config.user_id.clone()
            });
        }
        own_plays.sort_by(|a, b| b.performance_points.total_cmp(&a.performance_points));
        debug!(count = own_plays.len(), user_id = %self.config.user_id, "Obtained user's top plays");

        // Beatmaps the user already played never come back as
        // recommendations, including plays truncated out of the seed set
        let ignored: HashSet<i64> = own_plays.iter().map(|p| p.beatmap_id).collect();

        own_plays.truncate(self.config.own_play_count_to_scan);
        let seed = own_plays;

        let window = PpWindow::from_seed(&seed);
        debug!(
            seed_count = seed.len(),
            min_pp = window.min,
            max_pp = window.max,
            "Seeded recommendation scan"
        );

        // Stage 2: concurrent scan, one unit per seed play with a nested
        // fan-out per similar player
        let candidates = Mutex::new(Vec::new());
        let seed_count = seed.len();
        join_all(
            seed.iter()
                .map(|seed_play| self.scan_seed_play(seed_play, window, &ignored, &candidates, seed_count))
        )
        .await;

        let candidates = candidates.into_inner().expect("candidate mutex poisoned");
        debug!(candidate_count = candidates.len(), "Finished scanning for potential recommendations");

        // Stage 3: group by beatmap in discovery order; only the first
        // groups survive when there are more than requested
        let mut groups: IndexMap<i64, Vec<Play>> = IndexMap::new();
        for play in candidates {
            groups.entry(play.beatmap_id).or_default().push(play);
        }
        groups.truncate(self.config.recommendation_count);

        let group_count = groups.len();
        let results = join_all(
            groups
                .into_iter()
                .map(|(beatmap_id, group)| self.reduce_group(beatmap_id, group, group_count))
        )
        .await;

        self.progress.finish();
        Ok(results.into_iter().flatten().collect())
    }

    async fn scan_seed_play(
        &self,
        seed_play: &Play,
        window: PpWindow,
        ignored: &HashSet<i64>,
        candidates: &Mutex<Vec<Play>>,
        seed_count: usize
    ) {
        self.scan_seed_play_inner(seed_play, window, ignored, candidates).await;

        // Completion counts toward progress whether or not the scan
        // produced candidates
        self.progress.add(SCAN_PROGRESS_SHARE / seed_count as f64);
    }

    async fn scan_seed_play_inner(
        &self,
        seed_play: &Play,
        window: PpWindow,
        ignored: &HashSet<i64>,
        candidates: &Mutex<Vec<Play>>
    ) {
        let mut map_top_plays = match self.fetch_beatmap_top_plays(seed_play.beatmap_id, seed_play.mods).await {
            Ok(plays) => plays,
            Err(err) => {
                debug!(
                    beatmap_id = seed_play.beatmap_id,
                    error = %err,
                    "Skipping seed play, leaderboard fetch failed"
                );
                return;
            }
        };
        if map_top_plays.is_empty() {
            return;
        }
        debug!(
            beatmap_id = seed_play.beatmap_id,
            count = map_top_plays.len(),
            "Obtained top plays for seed beatmap"
        );

        // Players whose score on this map landed closest to the seed play
        map_top_plays.sort_by(filter::by_pp_distance(seed_play.performance_points));
        let similar_players: Vec<i64> = map_top_plays
            .iter()
            .take(self.config.similar_play_count)
            .map(|p| p.player_id)
            .unique()
            .collect();

        join_all(
            similar_players
                .into_iter()
                .map(|player_id| self.scan_similar_player(player_id, seed_play, window, ignored, candidates))
        )
        .await;
    }

    async fn scan_similar_player(
        &self,
        player_id: i64,
        seed_play: &Play,
        window: PpWindow,
        ignored: &HashSet<i64>,
        candidates: &Mutex<Vec<Play>>
    ) {
        let mut plays = match self.fetch_user_top_plays(&player_id.to_string()).await {
            Ok(plays) => plays,
            Err(err) => {
                debug!(
                    player_id,
                    beatmap_id = seed_play.beatmap_id,
                    error = %err,
                    "Skipping similar player, history fetch failed"
                );
                return;
            }
        };
        if plays.is_empty() {
            return;
        }
        debug!(player_id, beatmap_id = seed_play.beatmap_id, "Obtained top plays for similar player");

        plays.sort_by(filter::by_pp_distance(seed_play.performance_points));

        let survivors: Vec<Play> = plays
            .into_iter()
            .filter(|p| filter::within_window(p.performance_points, window.min, window.max))
            .filter(|p| filter::not_ignored(p.beatmap_id, ignored))
            .filter(|p| filter::passes_combo_gate(p.rank, self.config.only_full_combo))
            .take(self.config.others_play_count_to_scan)
            .collect();

        if survivors.is_empty() {
            return;
        }
        candidates.lock().expect("candidate mutex poisoned").extend(survivors);
    }

    async fn reduce_group(&self, beatmap_id: i64, group: Vec<Play>, group_count: usize) -> Option<Recommendation> {
        let result = self.reduce_group_inner(beatmap_id, group).await;
        self.progress.add(REDUCE_PROGRESS_SHARE / group_count as f64);

        result
    }

    async fn reduce_group_inner(&self, beatmap_id: i64, group: Vec<Play>) -> Option<Recommendation> {
        let popularity = group.len();
        debug!(beatmap_id, popularity, "Reducing candidate group");

        let median = median_by_performance(group);

        let beatmap = match self.fetch_beatmap(beatmap_id).await {
            Ok(beatmap) => beatmap,
            Err(err) => {
                warn!(beatmap_id, error = %err, "Dropping candidate group, metadata fetch failed");
                return None;
            }
        };

        Some(Recommendation {
            beatmap,
            expected_performance: median.performance_points,
            expected_accuracy: median.accuracy(),
            mods: median.mods,
            popularity
        })
    }

    // The limiter permit wraps each remote call individually so nested
    // fan-outs never hold a permit while waiting on child fetches.

    async fn fetch_user_top_plays(&self, user_id: &str) -> Result<Vec<Play>, RecommenderError> {
        let _permit = self.limiter.acquire().await.expect("limiter never closes");
        self.source.user_top_plays(self.config.mode, user_id).await
    }

    async fn fetch_beatmap_top_plays(&self, beatmap_id: i64, mods: Mods) -> Result<Vec<Play>, RecommenderError> {
        let _permit = self.limiter.acquire().await.expect("limiter never closes");
        self.source.beatmap_top_plays(self.config.mode, beatmap_id, mods).await
    }

    async fn fetch_beatmap(&self, beatmap_id: i64) -> Result<Beatmap, RecommenderError> {
        let _permit = self.limiter.acquire().await.expect("limiter never closes");
        self.source.beatmap(self.config.mode, beatmap_id).await
    }
}

/// Representative play of a candidate group: ascending-performance sort,
/// element at `len / 2` (the upper-middle entry for even-sized groups).
fn median_by_performance(mut group: Vec<Play>) -> Play {
    group.sort_by(|a, b| a.performance_points.total_cmp(&b.performance_points));
    let mid = group.len() / 2;
    group.swap_remove(mid)
}
