use std::sync::Arc;

use {
    partypilot_agents::{ImageProvider, PromptPack, ProviderRegistry, TextProvider},
    partypilot_config::{ChatConfig, InvitationConfig, PartypilotConfig},
};

use crate::error::ApiError;

/// Immutable per-process state shared by all handlers.
///
/// There is deliberately nothing mutable here: no session store, no cache,
/// no cross-request memory. The caller's message history is the only state.
pub struct GatewayState {
    pub registry: ProviderRegistry,
    pub prompts: PromptPack,
    pub chat: ChatConfig,
    pub invitation: InvitationConfig,
}

impl GatewayState {
    pub fn from_config(config: &PartypilotConfig) -> Self {
        Self {
            registry: ProviderRegistry::from_env_with_config(&config.providers),
            prompts: PromptPack::from_config(&config.prompts),
            chat: config.chat.clone(),
            invitation: config.invitation.clone(),
        }
    }

    /// The text provider, or the "not configured" error for the caller.
    pub fn text_provider(&self) -> Result<Arc<dyn TextProvider>, ApiError> {
        self.registry.text().ok_or(ApiError::NotConfigured {
            provider: "Anthropic",
            env_key: "ANTHROPIC_API_KEY",
        })
    }

    /// The image provider, or the "not configured" error for the caller.
    pub fn image_provider(&self) -> Result<Arc<dyn ImageProvider>, ApiError> {
        self.registry.image().ok_or(ApiError::NotConfigured {
            provider: "OpenAI",
            env_key: "OPENAI_API_KEY",
        })
    }
}
