//! Mock oracle for testing.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{Oracle, OraclePrompt};

/// Mock response configuration.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Divination text to return
    pub text: String,
    /// Whether to simulate failure
    pub fail: bool,
    /// Error message if failing
    pub error_message: Option<String>,
    /// Delay before responding, in milliseconds
    pub delay_ms: u64,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            text: "The karmic winds stir.".to_string(),
            fail: false,
            error_message: None,
            delay_ms: 0,
        }
    }
}

impl MockResponse {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            fail: true,
            error_message: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Mock oracle for testing.
///
/// Replays queued responses in order, falling back to a default response
/// once the queue is empty, and records every prompt it was asked.
pub struct MockOracle {
    default_response: MockResponse,
    queued: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<OraclePrompt>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self {
            default_response: MockResponse::default(),
            queued: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default_response(response: MockResponse) -> Self {
        Self {
            default_response: response,
            queued: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response for the next divination call.
    pub async fn push_response(&self, response: MockResponse) {
        let mut queued = self.queued.lock().await;
        queued.push_back(response);
    }

    /// All prompts seen so far, in call order.
    pub async fn prompts(&self) -> Vec<OraclePrompt> {
        let prompts = self.prompts.lock().await;
        prompts.clone()
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn is_available(&self) -> DomainResult<bool> {
        Ok(true)
    }

    async fn divine(&self, prompt: &OraclePrompt) -> DomainResult<String> {
        {
            let mut prompts = self.prompts.lock().await;
            prompts.push(prompt.clone());
        }

        let response = {
            let mut queued = self.queued.lock().await;
            queued
                .pop_front()
                .unwrap_or_else(|| self.default_response.clone())
        };

        if response.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(response.delay_ms)).await;
        }

        if response.fail {
            return Err(DomainError::OracleFailure(
                response
                    .error_message
                    .unwrap_or_else(|| "Mock failure".to_string()),
            ));
        }

        Ok(response.text)
    }
}
