use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::provider::MatchFeed;
use crate::error::FeedError;

/// HTTP client for the sportsrc-style football feed.
/// Schedule: `GET {base}/?data=matches&category=football`
/// Detail:   `GET {base}/?data=detail&id={id}&category=football`
#[derive(Clone)]
pub struct FeedClient {
    http: Client,
    base_url: Url,
}

impl FeedClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid feed URL: {}", base_url))?;
        Ok(FeedClient { http, base_url })
    }

    fn schedule_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("data", "matches")
            .append_pair("category", "football");
        url
    }

    fn detail_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("data", "detail")
            .append_pair("id", id)
            .append_pair("category", "football");
        url
    }

    async fn get_json(&self, url: Url) -> Result<Value, FeedError> {
        debug!("Fetching feed {}", url);

        let resp = self.http.get(url).send().await.map_err(FeedError::Request)?;

        let status = resp.status();
        if status == StatusCode::BAD_REQUEST {
            return Err(FeedError::NoData);
        }
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        resp.json().await.map_err(FeedError::Decode)
    }
}

#[async_trait]
impl MatchFeed for FeedClient {
    fn name(&self) -> &str {
        "sportsrc"
    }

    async fn fetch_matches(&self) -> Result<Vec<Value>, FeedError> {
        let raw = self.get_json(self.schedule_url()).await?;
        Ok(parse_schedule_response(raw))
    }

    async fn fetch_detail(&self, id: &str) -> Result<Option<Value>, FeedError> {
        let raw = self.get_json(self.detail_url(id)).await?;
        Ok(parse_detail_response(raw))
    }
}

/// The schedule comes back either as a bare array or as `{ "data": [...] }`.
/// Anything else is an empty schedule.
pub fn parse_schedule_response(raw: Value) -> Vec<Value> {
    match raw {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => vec![],
        },
        _ => vec![],
    }
}

/// Detail answers wrap the record in `data`.
pub fn parse_detail_response(mut raw: Value) -> Option<Value> {
    match raw.get_mut("data").map(Value::take) {
        Some(record @ Value::Object(_)) => Some(record),
        _ => None,
    }
}
