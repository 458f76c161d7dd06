use clap::Parser;

/// Football feed normalizer and match listing API
#[derive(Parser, Debug, Clone)]
#[command(name = "matchday-engine", version, about)]
pub struct Config {
    /// Upstream football feed base URL
    #[arg(long, env = "FEED_URL", default_value = "https://api.sportsrc.org")]
    pub feed_url: String,

    /// API listen address
    #[arg(long, env = "API_ADDR", default_value = "0.0.0.0:8080")]
    pub api_addr: String,

    /// Seconds between feed snapshot refreshes
    #[arg(long, env = "REFRESH_SECS", default_value = "60")]
    pub refresh_secs: u64,

    /// Upstream request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,

    /// JSON roster file for an alternate season (built-in season when absent)
    #[arg(long, env = "ROSTER_FILE")]
    pub roster_file: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.refresh_secs < 5 {
            anyhow::bail!("refresh_secs must be at least 5");
        }
        if !(1..=120).contains(&self.request_timeout_secs) {
            anyhow::bail!("request_timeout_secs must be between 1 and 120");
        }
        if let Err(e) = url::Url::parse(&self.feed_url) {
            anyhow::bail!("feed_url is not a valid URL: {}", e);
        }
        Ok(())
    }
}
