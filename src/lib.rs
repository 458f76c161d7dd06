//! Football match normalization, competition classification and ranking.
//!
//! ```text
//!  feed snapshot ──▶ normalizer ──(classifier + registry)──▶ Vec<Match> ──▶ ranking
//! ```
//!
//! The core (`registry`, `normalizer`, `classifier`, `ranking`) is synchronous
//! and pure. `feed`, `service` and `api` are the async shell around it.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod normalizer;
pub mod ranking;
pub mod registry;
pub mod service;

pub use classifier::{Classification, Classifier, Rule};
pub use error::FeedError;
pub use models::{Competition, CompetitionKind, LiveMinute, Match, MatchDetail, MatchStatus, Team};
pub use ranking::PriorityList;
pub use registry::RosterRegistry;
pub use service::MatchService;
