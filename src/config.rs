use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// How refresh failures from the upstream API are treated.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Match-window failures abort the refresh; per-league failures become empty lists
    #[default]
    Mixed,
    /// Every upstream failure becomes an empty list
    Soft,
    /// Every upstream failure aborts the refresh
    Hard,
}

/// Football results page backed by football-data.org
#[derive(Parser, Debug, Clone)]
#[command(name = "football-times", version, about)]
pub struct Config {
    /// football-data.org API token, sent as the X-Auth-Token header
    #[arg(long, env = "FOOTBALL_API_TOKEN", default_value = "")]
    pub api_token: String,

    /// Seconds to wait before each standings / scorers call
    #[arg(long, env = "FOOTBALL_API_DELAY", default_value = "2")]
    pub api_delay_secs: u64,

    /// Seconds to wait before the match-window call
    #[arg(long, env = "FOOTBALL_MATCHES_DELAY", default_value = "10")]
    pub matches_delay_secs: u64,

    /// football-data.org API base URL
    #[arg(
        long,
        env = "FOOTBALL_API_URL",
        default_value = "https://api.football-data.org/v4"
    )]
    pub api_url: String,

    /// Path of the JSON snapshot cache
    #[arg(long, env = "CACHE_FILE", default_value = "matches_cache.json")]
    pub cache_file: PathBuf,

    /// Seconds a cached snapshot stays fresh
    #[arg(long, env = "CACHE_TTL_SECS", default_value = "300")]
    pub cache_ttl_secs: u64,

    /// Days before today included in the match window
    #[arg(long, env = "LOOKBACK_DAYS", default_value = "3")]
    pub lookback_days: u32,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "30")]
    pub http_timeout_secs: u64,

    /// News page listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:5000")]
    pub listen_addr: String,

    /// How upstream failures affect a refresh
    #[arg(long, env = "FAILURE_POLICY", value_enum, default_value_t = FailurePolicy::Mixed)]
    pub failure_policy: FailurePolicy,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cache_ttl_secs == 0 {
            anyhow::bail!("cache_ttl_secs must be positive");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be positive");
        }
        // football-data.org rejects match windows wider than 10 days
        if self.lookback_days > 10 {
            anyhow::bail!("lookback_days must be at most 10");
        }
        if self.api_token.is_empty() {
            warn!("FOOTBALL_API_TOKEN is empty; upstream calls will be unauthenticated");
        }
        Ok(())
    }

    pub fn api_delay(&self) -> Duration {
        Duration::from_secs(self.api_delay_secs)
    }

    pub fn matches_delay(&self) -> Duration {
        Duration::from_secs(self.matches_delay_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
