pub mod anthropic;
pub mod openai_image;

use std::sync::Arc;

use {partypilot_config::ProvidersConfig, secrecy::ExposeSecret};

use crate::model::{ImageProvider, TextProvider};

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-opus-20240229";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_IMAGE_MODEL: &str = "dall-e-3";

/// Shared HTTP client for provider adapters.
///
/// All adapters that don't need custom redirect/proxy settings reuse this
/// client to share connection pools, DNS cache, and TLS sessions.
pub fn shared_http_client() -> &'static reqwest::Client {
    static CLIENT: std::sync::LazyLock<reqwest::Client> =
        std::sync::LazyLock::new(reqwest::Client::new);
    &CLIENT
}

/// Key values that mean "nobody configured this yet": template artifacts
/// like `your-api-key-here` or `changeme` must not reach a provider.
const PLACEHOLDER_MARKERS: &[&str] = &["your-", "your_", "changeme", "placeholder"];

pub(crate) fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim().to_ascii_lowercase();
    key.is_empty() || key == "..." || PLACEHOLDER_MARKERS.iter().any(|m| key.contains(m))
}

/// Resolve an API key from config (Secret) or environment variable,
/// keeping the value wrapped in `Secret<String>` to avoid leaking it.
///
/// Empty and obvious placeholder values count as absent.
fn resolve_api_key(
    config: &ProvidersConfig,
    provider: &str,
    env_key: &str,
) -> Option<secrecy::Secret<String>> {
    config
        .get(provider)
        .and_then(|e| e.api_key.clone())
        .or_else(|| std::env::var(env_key).ok().map(secrecy::Secret::new))
        .filter(|s| !is_placeholder_key(s.expose_secret()))
}

fn base_url(config: &ProvidersConfig, provider: &str, default: &str) -> String {
    config
        .get(provider)
        .and_then(|e| e.base_url.clone())
        .unwrap_or_else(|| default.to_string())
}

fn model(config: &ProvidersConfig, provider: &str, default: &str) -> String {
    config
        .get(provider)
        .and_then(|e| e.model.clone())
        .unwrap_or_else(|| default.to_string())
}

/// The providers discovered from env + config at startup.
///
/// Either slot may be empty; endpoints that need a missing provider
/// short-circuit with a "not configured" error instead of calling out.
#[derive(Default)]
pub struct ProviderRegistry {
    text: Option<Arc<dyn TextProvider>>,
    image: Option<Arc<dyn ImageProvider>>,
}

impl ProviderRegistry {
    /// Discover providers from the environment and config.
    ///
    /// Anthropic (text): `ANTHROPIC_API_KEY` / `[providers.anthropic]`.
    /// OpenAI (images): `OPENAI_API_KEY` / `[providers.openai]`.
    pub fn from_env_with_config(config: &ProvidersConfig) -> Self {
        let mut registry = Self::default();

        if config.is_enabled("anthropic")
            && let Some(key) = resolve_api_key(config, "anthropic", "ANTHROPIC_API_KEY")
        {
            registry.text = Some(Arc::new(anthropic::AnthropicProvider::new(
                key,
                model(config, "anthropic", DEFAULT_ANTHROPIC_MODEL),
                base_url(config, "anthropic", DEFAULT_ANTHROPIC_BASE_URL),
            )));
        }

        if config.is_enabled("openai")
            && let Some(key) = resolve_api_key(config, "openai", "OPENAI_API_KEY")
        {
            registry.image = Some(Arc::new(openai_image::OpenAiImageProvider::new(
                key,
                model(config, "openai", DEFAULT_OPENAI_IMAGE_MODEL),
                base_url(config, "openai", DEFAULT_OPENAI_BASE_URL),
            )));
        }

        registry
    }

    pub fn text(&self) -> Option<Arc<dyn TextProvider>> {
        self.text.clone()
    }

    pub fn image(&self) -> Option<Arc<dyn ImageProvider>> {
        self.image.clone()
    }

    /// One line per provider slot, for startup logs and `doctor`.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match &self.text {
            Some(p) => lines.push(format!("text: {} ({})", p.name(), p.id())),
            None => lines.push("text: not configured".to_string()),
        }
        match &self.image {
            Some(p) => lines.push(format!("image: {}", p.name())),
            None => lines.push("image: not configured".to_string()),
        }
        lines
    }
}
