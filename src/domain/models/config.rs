use serde::{Deserialize, Serialize};

/// Main configuration structure for Samsara
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Oracle (external text generator) configuration
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Prediction engine configuration
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Available oracle providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleProvider {
    /// Anthropic Messages API over HTTP.
    AnthropicApi,
    /// Deterministic offline phrase pools.
    RuleBased,
    /// Scripted responses for tests.
    Mock,
    /// No oracle; predict always uses the fallback path.
    Disabled,
}

impl OracleProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnthropicApi => "anthropic_api",
            Self::RuleBased => "rule_based",
            Self::Mock => "mock",
            Self::Disabled => "disabled",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "anthropic_api" => Some(Self::AnthropicApi),
            "rule_based" => Some(Self::RuleBased),
            "mock" => Some(Self::Mock),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OracleConfig {
    /// Provider name: anthropic_api, rule_based, mock, disabled
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API key (falls back to ANTHROPIC_API_KEY env if unset)
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model to use for divination
    #[serde(default = "default_model")]
    pub model: String,

    /// API version header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Timeout for a single oracle call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Max tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_provider() -> String {
    "disabled".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_tokens() -> u32 {
    200
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Prediction engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PredictionConfig {
    /// Seed for the flavor-text random source; unset means OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
