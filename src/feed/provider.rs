use async_trait::async_trait;
use serde_json::Value;

use crate::error::FeedError;

/// Trait that every upstream match feed must implement.
#[async_trait]
pub trait MatchFeed: Send + Sync {
    /// Raw records of the full football schedule.
    async fn fetch_matches(&self) -> Result<Vec<Value>, FeedError>;

    /// Raw detail record for one fixture, including its `sources`.
    /// `Ok(None)` when the feed answered without a record.
    async fn fetch_detail(&self, id: &str) -> Result<Option<Value>, FeedError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
