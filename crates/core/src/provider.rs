//! Provider trait — the abstraction over the hosted LLM backend.
//!
//! A Provider knows how to send a role-tagged conversation to an LLM and get
//! text back. The coaching engine calls `complete()` without knowing which
//! backend is configured — pure polymorphism, and tests inject scripted
//! fakes.

use crate::error::ProviderError;
use crate::message::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g. "claude-sonnet-4-5")
    pub model: String,

    /// The conversation messages. System messages are extracted by the
    /// provider implementation to match its wire format.
    pub messages: Vec<ChatMessage>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A complete response from a provider.
///
/// The text may or may not be the structured JSON the prompt asked for —
/// the engine's parse chain handles both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderReply {
    /// The generated text, exactly as returned.
    pub text: String,

    /// Which model actually responded (may differ from requested).
    pub model: String,

    /// Token usage statistics.
    pub usage: Option<Usage>,
}

/// The core Provider trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    ///
    /// Exactly one call is made per non-crisis coaching turn; there is no
    /// retry or backoff at this layer.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderReply, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_via_serde() {
        let req: ProviderRequest = serde_json::from_str(
            r#"{"model":"claude-sonnet-4-5","messages":[{"role":"user","content":"hi"}]}"#,
        )
        .unwrap();
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.max_tokens.is_none());
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn reply_serialization() {
        let reply = ProviderReply {
            text: "You've got this.".into(),
            model: "claude-sonnet-4-5".into(),
            usage: Some(Usage {
                prompt_tokens: 100,
                completion_tokens: 20,
                total_tokens: 120,
            }),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains("You've got this."));
        assert!(json.contains("120"));
    }
}
