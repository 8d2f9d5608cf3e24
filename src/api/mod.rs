pub mod api_structs;

use crate::{
    api::api_structs::{BeatmapDto, ScoreDto},
    error::RecommenderError,
    model::structures::{beatmap::Beatmap, game_mode::GameMode, mods::Mods, play::Play}
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};

pub const DEFAULT_API_ROOT: &str = "https://osu.ppy.sh/api";

/// Data-access contract for the remote scoring service.
///
/// All three lookups return parsed, typed records; transport and encoding
/// stay behind this seam. The orchestrator never sees HTTP.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    /// Full metadata for one beatmap. Fails with [`RecommenderError::NotFound`]
    /// when the service has no such ranked map.
    async fn beatmap(&self, mode: GameMode, beatmap_id: i64) -> Result<Beatmap, RecommenderError>;

    /// The user's top plays, service-bounded to 100, descending performance.
    /// An empty list is a valid "no ranked plays" outcome, not an error.
    async fn user_top_plays(&self, mode: GameMode, user_id: &str) -> Result<Vec<Play>, RecommenderError>;

    /// Leaderboard of a beatmap, optionally restricted to an exact mod
    /// combination (`Mods::ANY` lifts the restriction).
    async fn beatmap_top_plays(
        &self,
        mode: GameMode,
        beatmap_id: i64,
        mods: Mods
    ) -> Result<Vec<Play>, RecommenderError>;
}

/// osu! API v1 implementation of [`ScoreSource`].
pub struct OsuApiClient {
    http: Client,
    api_root: String,
    api_key: String
}

impl OsuApiClient {
    pub fn new(api_root: impl Into<String>, api_key: impl Into<String>) -> OsuApiClient {
        let http = ClientBuilder::new().build().expect("Valid client configuration");

        OsuApiClient {
            http,
            api_root: api_root.into().trim_end_matches('/').to_string(),
            api_key: api_key.into()
        }
    }

    /// One cheap authenticated request to check that the endpoint and key
    /// are usable. The service answers errors as a JSON object rather than
    /// the expected array.
    pub async fn test_configuration(&self) -> bool {
        let response = self
            .http
            .get(format!("{}/get_beatmaps", self.api_root))
            .query(&[("k", self.api_key.as_str()), ("limit", "1")])
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => match response.json::<serde_json::Value>().await {
                Ok(value) => value.is_array(),
                Err(_) => false
            },
            _ => false
        }
    }

    fn mode_param(mode: GameMode) -> String {
        (mode as u8).to_string()
    }
}

#[async_trait]
impl ScoreSource for OsuApiClient {
    async fn beatmap(&self, mode: GameMode, beatmap_id: i64) -> Result<Beatmap, RecommenderError> {
        let mode_param = Self::mode_param(mode);
        let beatmap_param = beatmap_id.to_string();

        // a=1 includes converted maps, matching the lookup the pipeline needs
        let dtos: Vec<BeatmapDto> = self
            .http
            .get(format!("{}/get_beatmaps", self.api_root))
            .query(&[
                ("k", self.api_key.as_str()),
                ("m", mode_param.as_str()),
                ("b", beatmap_param.as_str()),
                ("limit", "1"),
                ("a", "1")
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let dto = dtos
            .into_iter()
            .next()
            .ok_or(RecommenderError::NotFound { beatmap_id })?;

        dto.into_beatmap(mode)
    }

    async fn user_top_plays(&self, mode: GameMode, user_id: &str) -> Result<Vec<Play>, RecommenderError> {
        let mode_param = Self::mode_param(mode);

        let dtos: Vec<ScoreDto> = self
            .http
            .get(format!("{}/get_user_best", self.api_root))
            .query(&[
                ("k", self.api_key.as_str()),
                ("m", mode_param.as_str()),
                ("u", user_id),
                ("limit", "100")
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        dtos.into_iter().map(|dto| dto.into_play(None)).collect()
    }

    async fn beatmap_top_plays(
        &self,
        mode: GameMode,
        beatmap_id: i64,
        mods: Mods
    ) -> Result<Vec<Play>, RecommenderError> {
        let mode_param = Self::mode_param(mode);
        let beatmap_param = beatmap_id.to_string();

        let mut request = self
            .http
            .get(format!("{}/get_scores", self.api_root))
            .query(&[
                ("k", self.api_key.as_str()),
                ("m", mode_param.as_str()),
                ("b", beatmap_param.as_str()),
                ("limit", "100")
            ]);

        // The Any sentinel means "no mod restriction": omit the parameter
        if !mods.is_any() {
            request = request.query(&[("mods", mods.bits().to_string())]);
        }

        let dtos: Vec<ScoreDto> = request.send().await?.error_for_status()?.json().await?;

        dtos.into_iter()
            .map(|dto| dto.into_play(Some(beatmap_id)))
            .collect()
    }
}
