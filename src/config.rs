use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub binance: ExchangeCredentials,
    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: String,
    /// Users allowed to query balances. Empty means everyone.
    #[serde(default)]
    pub allowed_user_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeCredentials {
    pub api_key: String,
    pub api_secret: String,
    /// Base URL for the exchange API
    #[serde(default = "default_binance_base_url")]
    pub base_url: String,
    /// How long a signed request stays valid after its timestamp (in milliseconds)
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
    /// Optional proxy, either "ip:port:user:pass" or "host:port"
    #[serde(default)]
    pub proxy_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Timeout for exchange API calls (in seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// Default values
fn default_binance_base_url() -> String {
    "https://api.binance.com".to_string()
}

fn default_recv_window_ms() -> u64 {
    5000
}

fn default_timeout_seconds() -> u64 {
    10
}

/// Binance rejects anything above one minute
const MAX_RECV_WINDOW_MS: u64 = 60_000;

impl AppConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .set_default("binance.base_url", default_binance_base_url())?
            .set_default("binance.recv_window_ms", default_recv_window_ms())?
            .set_default("request.timeout_seconds", default_timeout_seconds())?
            // Try to load from config file (optional)
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (prefix: APP_)
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("telegram.allowed_user_ids")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!("Telegram bot token is required");
        }

        if self.binance.api_key.is_empty() || self.binance.api_secret.is_empty() {
            anyhow::bail!("Binance API credentials are required");
        }

        if self.binance.base_url.is_empty() {
            anyhow::bail!("Binance base_url cannot be empty");
        }

        if self.binance.recv_window_ms == 0 || self.binance.recv_window_ms > MAX_RECV_WINDOW_MS {
            anyhow::bail!("recv_window_ms must be between 1 and {}", MAX_RECV_WINDOW_MS);
        }

        if self.request.timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        Ok(())
    }

    /// Get API timeout as Duration
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.request.timeout_seconds)
    }

    /// Whether the given Telegram user may run balance queries
    pub fn is_user_allowed(&self, user_id: u64) -> bool {
        self.telegram.allowed_user_ids.is_empty() || self.telegram.allowed_user_ids.contains(&user_id)
    }
}
