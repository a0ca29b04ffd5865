use thiserror::Error;

/// Failure modes shared by both fetchers. Every error is terminal for the
/// fetch that raised it; no partial profile or leaderboard is ever surfaced.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("empty response body")]
    NoData,

    #[error("profile document missing fields: {missing:?}")]
    ExtractionFailed { missing: Vec<&'static str> },

    #[error("leaderboard response matched no supported shape")]
    DecodingFailed,
}
