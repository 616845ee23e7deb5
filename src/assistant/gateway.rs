//! Blocking client for the hosted messages endpoint.
//!
//! One request per user turn, no retries and no streaming. The network call
//! lives in [`AssistantGateway::send`]; everything after the bytes arrive is
//! the pure [`interpret_response`] so it can be exercised without a server.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config;
use crate::error::{Result, TcgpError};
use crate::models::{ApiMessage, ChatResponse};

use super::action::extract_filter_action;

// ---------------------------------------------------------------------------
// GatewaySettings
// ---------------------------------------------------------------------------

/// Connection settings for the messages endpoint.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub messages_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            messages_url: config::MESSAGES_URL.to_string(),
            api_key: None,
            model: config::DEFAULT_MODEL.to_string(),
            max_tokens: config::DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(120),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ApiMessage],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

// ---------------------------------------------------------------------------
// AssistantGateway
// ---------------------------------------------------------------------------

pub struct AssistantGateway {
    client: Client,
    settings: GatewaySettings,
    api_key: String,
}

impl AssistantGateway {
    /// Build a gateway.
    ///
    /// Fails with [`TcgpError::Configuration`] when no API key is set, so the
    /// chat feature can be disabled once instead of failing every turn.
    pub fn new(settings: GatewaySettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| TcgpError::Configuration("Anthropic API key not configured".into()))?;
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Send one conversation to the model and return its answer.
    ///
    /// `messages` must already be truncated and end with the new user turn.
    pub fn send(&self, messages: &[ApiMessage], system_prompt: &str) -> Result<ChatResponse> {
        let body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            system: system_prompt,
            messages,
        };

        debug!(
            model = %self.settings.model,
            turns = messages.len(),
            prompt_chars = system_prompt.len(),
            "sending chat request"
        );

        let resp = self
            .client
            .post(&self.settings.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", config::ANTHROPIC_VERSION)
            .json(&body)
            .send()?;

        let status = resp.status().as_u16();
        let text = resp.text()?;
        interpret_response(status, &text)
    }
}

/// Map a raw HTTP answer from the messages endpoint to a [`ChatResponse`].
///
/// - non-2xx: [`TcgpError::Upstream`] carrying `error.message` from the body
///   when present, else the raw body, else a generic status line.
/// - 2xx without content (or unparseable): [`TcgpError::EmptyResponse`].
/// - otherwise the first content block's text, with any filter action
///   extracted.
pub fn interpret_response(status: u16, body: &str) -> Result<ChatResponse> {
    if !(200..300).contains(&status) {
        let fallback = format!("API request failed with status {}", status);
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(v) => v
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or(fallback),
            Err(_) if !body.trim().is_empty() => body.to_string(),
            Err(_) => fallback,
        };
        warn!(status, %message, "chat upstream error");
        return Err(TcgpError::Upstream { status, message });
    }

    let parsed: MessagesResponse = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "unparseable chat response");
            return Err(TcgpError::EmptyResponse);
        }
    };

    let text = parsed
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or(TcgpError::EmptyResponse)?;

    let (text, filter_action) = extract_filter_action(&text);
    Ok(ChatResponse {
        text,
        filter_action,
    })
}
