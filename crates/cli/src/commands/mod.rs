pub mod chat;
pub mod onboard;
pub mod profile;
pub mod serve;

use std::sync::Arc;

use summit_config::AppConfig;
use summit_engine::{CoachEngine, ModelSettings};
use summit_memory::ProfileStore;
use summit_providers::AnthropicProvider;

/// Build the engine shared by `serve` and `chat`.
///
/// A missing API key is fatal in strict mode; otherwise the engine runs in
/// a degraded mode where every provider call fails over to the canned
/// coaching fallback.
pub fn build_engine(config: &AppConfig) -> Result<Arc<CoachEngine>, Box<dyn std::error::Error>> {
    let api_key = match &config.api_key {
        Some(key) => key.clone(),
        None if config.strict => {
            return Err(concat!(
                "No API key configured and strict mode is enabled.\n",
                "Set SUMMIT_API_KEY or ANTHROPIC_API_KEY, or add api_key to ",
                "~/.summit/config.toml",
            )
            .into());
        }
        None => {
            tracing::warn!("No API key configured; coaching replies will use the offline fallback");
            String::new()
        }
    };

    let provider = Arc::new(AnthropicProvider::new(&api_key)?);
    let store = Arc::new(ProfileStore::new(config.memory.dir.clone()));
    Ok(Arc::new(CoachEngine::new(
        provider,
        store,
        ModelSettings::from(config),
    )))
}
