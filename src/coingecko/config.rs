use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_VS_CURRENCY: &str = "krw";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// CoinGecko client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API
    pub api_url: String,

    /// Demo/pro API key, sent as `x-cg-demo-api-key` when present
    pub api_key: Option<String>,

    /// Quote currency for prices (lowercase, e.g. `krw`)
    pub vs_currency: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Builds the configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_url: env::var("COINGECKO_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: env::var("COINGECKO_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            vs_currency: env::var("COINGECKO_VS_CURRENCY")
                .map(|currency| currency.to_lowercase())
                .unwrap_or_else(|_| DEFAULT_VS_CURRENCY.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
