//! Read views over the latest feed snapshot.
//!
//! The service keeps only the raw records of the last successful fetch. Every
//! view normalizes them against the `now` it is given, so live minutes and
//! statuses keep moving between fetches. Nothing here fails: an empty or
//! missing snapshot yields empty views.

use rand::Rng;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::error::FeedError;
use crate::feed::MatchFeed;
use crate::models::{Competition, Match, MatchDetail, MatchStatus};
use crate::normalizer::{normalize, normalize_snapshot, stream_sources};
use crate::ranking::PriorityList;

pub struct MatchService {
    feed: Arc<dyn MatchFeed>,
    classifier: Classifier,
    priority: PriorityList,
    snapshot: RwLock<Vec<Value>>,
}

impl MatchService {
    pub fn new(feed: Arc<dyn MatchFeed>, classifier: Classifier, priority: PriorityList) -> Self {
        MatchService {
            feed,
            classifier,
            priority,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the schedule and replace the snapshot. On error the previous
    /// snapshot is kept.
    pub async fn refresh(&self) -> Result<usize, FeedError> {
        let records = self.feed.fetch_matches().await?;
        let count = records.len();
        *self.snapshot.write().await = records;
        Ok(count)
    }

    /// Every match in the snapshot, in feed order.
    pub async fn all_matches(&self, now: i64) -> Vec<Match> {
        let snapshot = self.snapshot.read().await;
        normalize_snapshot(&snapshot, now, &self.classifier)
    }

    async fn with_status(&self, status: MatchStatus, now: i64) -> Vec<Match> {
        self.all_matches(now)
            .await
            .into_iter()
            .filter(|m| m.status == status)
            .collect()
    }

    /// Live matches, priority competitions first.
    pub async fn live_matches(&self, now: i64) -> Vec<Match> {
        let live = self.with_status(MatchStatus::Live, now).await;
        self.priority.sort_by_priority(&live)
    }

    /// Upcoming matches, soonest first.
    pub async fn upcoming_matches(&self, now: i64) -> Vec<Match> {
        let upcoming = self.with_status(MatchStatus::Upcoming, now).await;
        self.priority.sort_chronologically(&upcoming)
    }

    pub fn all_competitions(&self) -> Vec<Competition> {
        self.classifier.registry().list_competitions()
    }

    /// Detail view: the detail endpoint first, then the snapshot entry with the
    /// same id (without stream sources).
    pub async fn match_detail(&self, id: &str, now: i64) -> Option<MatchDetail> {
        match self.feed.fetch_detail(id).await {
            Ok(Some(record)) => {
                let mut fixture = normalize(&record, now, &self.classifier);
                fixture.id = id.to_string();
                return Some(MatchDetail {
                    fixture,
                    sources: stream_sources(&record),
                });
            }
            Ok(None) => debug!("Feed has no detail record for {}", id),
            Err(e) if e.is_no_data() => debug!("No detail yet for {}", id),
            Err(e) => warn!("Detail fetch for {} failed: {}", id, e),
        }

        self.all_matches(now)
            .await
            .into_iter()
            .find(|m| m.id == id)
            .map(|fixture| MatchDetail {
                fixture,
                sources: Vec::new(),
            })
    }
}

fn refresh_jitter(interval: Duration) -> Duration {
    let max_ms = (interval.as_millis() / 20) as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
}

/// Spawns a background task that refreshes the snapshot every `interval`
/// (plus up to 5% jitter). The first refresh happens immediately.
pub fn spawn_refresher(service: Arc<MatchService>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Feed refresher started (provider={}, interval={:?})",
            service.feed.name(),
            interval
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            tokio::time::sleep(refresh_jitter(interval)).await;

            match service.refresh().await {
                Ok(count) => info!("Feed snapshot refreshed: {} records", count),
                Err(e) if e.is_no_data() => debug!("Feed has no schedule data yet"),
                Err(e) => warn!("Feed refresh failed, keeping previous snapshot: {}", e),
            }
        }
    })
}
