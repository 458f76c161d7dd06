pub mod client;
pub mod provider;

pub use client::FeedClient;
pub use provider::MatchFeed;
