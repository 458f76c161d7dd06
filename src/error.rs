use thiserror::Error;

/// Failures talking to the upstream match feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The feed answers 400 for fixtures it has nothing on yet.
    #[error("feed has no data for this request yet")]
    NoData,

    #[error("feed returned HTTP {0}")]
    Status(u16),

    #[error("failed to decode feed response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FeedError {
    /// Whether this is an expected "nothing yet" answer rather than a fault.
    pub fn is_no_data(&self) -> bool {
        matches!(self, FeedError::NoData)
    }
}
