//! Anthropic API oracle implementation.
//!
//! Makes direct HTTP calls to the Anthropic Messages API to phrase
//! divinations, as an alternative to the offline rule-based oracle.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::OracleConfig;
use crate::domain::ports::{Oracle, OraclePrompt};

/// Persona sent as the system prompt on every divination call.
const ORACLE_SYSTEM_PROMPT: &str = "You are The Ancient Oracle, an ancient mystical \
entity that sees through the veil of time. You speak in cryptic, poetic language \
about karma, fate, and destiny. Your predictions are mysterious and open to \
interpretation, but contain hidden wisdom about the future.";

/// Configuration for the Anthropic API oracle.
#[derive(Debug, Clone)]
pub struct AnthropicOracleConfig {
    /// API key; falls back to the ANTHROPIC_API_KEY env var when unset.
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Model to use.
    pub model: String,
    /// API version header.
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Max tokens to generate.
    pub max_tokens: u32,
}

impl Default for AnthropicOracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-5-haiku-20241022".to_string(),
            api_version: "2023-06-01".to_string(),
            timeout_secs: 10,
            max_tokens: 200,
        }
    }
}

impl AnthropicOracleConfig {
    /// Resolve the API key from config or environment.
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
    }

    /// Create config with explicit API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Create config with custom model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create config with custom base URL (used by tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl From<&OracleConfig> for AnthropicOracleConfig {
    fn from(config: &OracleConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_version: config.api_version.clone(),
            timeout_secs: config.timeout_secs,
            max_tokens: config.max_tokens,
        }
    }
}

/// Message role in Anthropic API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Cache control marker for Anthropic prompt caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheControl {
    #[serde(rename = "type")]
    pub control_type: String,
}

impl CacheControl {
    pub fn ephemeral() -> Self {
        Self {
            control_type: "ephemeral".to_string(),
        }
    }
}

/// System prompt content block with optional cache_control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<CacheControl>,
}

impl SystemContentBlock {
    /// Create a text block without caching.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            block_type: "text".to_string(),
            text: content.into(),
            cache_control: None,
        }
    }

    /// Create a text block with ephemeral cache_control.
    pub fn cached_text(content: impl Into<String>) -> Self {
        Self {
            block_type: "text".to_string(),
            text: content.into(),
            cache_control: Some(CacheControl::ephemeral()),
        }
    }
}

/// Content block in a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: Vec<ContentBlock>,
}

/// Request to the Anthropic Messages API.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    /// System prompt as content block array (supports cache_control markers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Vec<SystemContentBlock>>,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Usage information from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Response from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

/// Anthropic API oracle.
pub struct AnthropicOracle {
    config: AnthropicOracleConfig,
    client: Client,
}

impl AnthropicOracle {
    /// Create a new Anthropic API oracle.
    pub fn new(config: AnthropicOracleConfig) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::OracleFailure(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> DomainResult<Self> {
        Self::new(AnthropicOracleConfig::default())
    }

    /// Build the Messages API request for a divination prompt.
    ///
    /// The persona is sent as a content block array with a `cache_control`
    /// marker so repeated divinations reuse the cached system prefix.
    fn build_request(&self, prompt: &OraclePrompt) -> MessagesRequest {
        let messages = vec![Message {
            role: MessageRole::User,
            content: vec![ContentBlock::Text {
                text: prompt.render(),
            }],
        }];

        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            system: Some(vec![SystemContentBlock::cached_text(ORACLE_SYSTEM_PROMPT)]),
            messages,
            temperature: Some(0.8),
        }
    }

    /// Execute a single divination request.
    async fn request_divination(&self, prompt: &OraclePrompt) -> DomainResult<String> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| DomainError::OracleFailure("ANTHROPIC_API_KEY not set".to_string()))?;

        let api_request = self.build_request(prompt);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", &api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| DomainError::OracleFailure(format!("API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::OracleFailure(format!(
                "API error {status}: {body}"
            )));
        }

        let result: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DomainError::OracleFailure(format!("Failed to parse response: {e}")))?;

        // Concatenate the reply's text blocks
        let text = result
            .content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }
}

#[async_trait]
impl Oracle for AnthropicOracle {
    fn name(&self) -> &'static str {
        "anthropic_api"
    }

    async fn is_available(&self) -> DomainResult<bool> {
        Ok(self.config.get_api_key().is_some())
    }

    async fn divine(&self, prompt: &OraclePrompt) -> DomainResult<String> {
        self.request_divination(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Category, KarmaTier};

    fn test_prompt() -> OraclePrompt {
        OraclePrompt {
            tier: KarmaTier::Benevolent,
            dominant_category: Some(Category::Kindness),
            window_karma: 130.0,
            volatility: 12.25,
        }
    }

    #[test]
    fn test_config_default() {
        let config = AnthropicOracleConfig::default();
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_config_with_api_key() {
        let config = AnthropicOracleConfig::default().with_api_key("test-key");
        assert_eq!(config.api_key, Some("test-key".to_string()));
    }

    #[test]
    fn test_config_from_oracle_config() {
        let oracle_config = OracleConfig {
            provider: "anthropic_api".to_string(),
            api_key: Some("key".to_string()),
            base_url: "http://localhost:9999".to_string(),
            model: "claude-3-5-haiku-20241022".to_string(),
            api_version: "2023-06-01".to_string(),
            timeout_secs: 3,
            max_tokens: 128,
        };

        let config = AnthropicOracleConfig::from(&oracle_config);
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.max_tokens, 128);
    }

    #[test]
    fn test_build_request() {
        let config = AnthropicOracleConfig::default().with_api_key("test");
        let oracle = AnthropicOracle::new(config).unwrap();

        let api_request = oracle.build_request(&test_prompt());

        assert_eq!(api_request.messages.len(), 1);
        assert_eq!(api_request.max_tokens, 200);
        assert_eq!(api_request.temperature, Some(0.8));

        let system = api_request.system.as_ref().unwrap();
        assert!(system[0].text.starts_with("You are The Ancient Oracle"));
        assert!(system[0].cache_control.is_some());
    }

    #[test]
    fn test_request_serializes_prompt_fields() {
        let config = AnthropicOracleConfig::default().with_api_key("test");
        let oracle = AnthropicOracle::new(config).unwrap();

        let api_request = oracle.build_request(&test_prompt());
        let json = serde_json::to_value(&api_request).unwrap();

        let user_text = json["messages"][0]["content"][0]["text"].as_str().unwrap();
        assert!(user_text.contains("benevolent"));
        assert!(user_text.contains("kindness"));
    }
}
