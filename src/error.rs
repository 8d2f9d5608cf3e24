use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommenderError {
    #[error("Remote score service request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("Malformed response from remote score service: {0}")]
    Malformed(String),

    #[error("Beatmap {beatmap_id} is not ranked or does not exist")]
    NotFound { beatmap_id: i64 },

    #[error(
        "No top plays found for user '{user_id}'. Either the user id is incorrect, \
         the user has no ranked plays, or the account is restricted."
    )]
    NoData { user_id: String }
}

impl RecommenderError {
    /// True for failures originating at the remote service, either transport
    /// or payload. These are fatal only at the seed fetch.
    pub fn is_remote(&self) -> bool {
        matches!(self, RecommenderError::Remote(_) | RecommenderError::Malformed(_))
    }
}
