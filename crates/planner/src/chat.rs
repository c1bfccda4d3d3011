//! The planning chat completion: persona prompt plus history in, normalized
//! reply out.

use {
    partypilot_agents::{ChatMessage, PromptPack, SamplingParams, TextProvider},
    partypilot_config::ChatConfig,
};

use crate::normalize::{ProviderReply, normalize_reply};

/// Run one planning chat completion over the caller's history.
///
/// The persona system prompt is prepended; the history itself is forwarded
/// verbatim and never mutated. Provider errors bubble up; format surprises
/// in the reply do not (see [`normalize_reply`]).
pub async fn run_chat(
    provider: &dyn TextProvider,
    prompts: &PromptPack,
    config: &ChatConfig,
    messages: &[ChatMessage],
) -> anyhow::Result<ProviderReply> {
    let mut convo = Vec::with_capacity(messages.len() + 1);
    convo.push(ChatMessage::system(prompts.system.clone()));
    convo.extend_from_slice(messages);

    let raw = provider
        .complete(&convo, SamplingParams {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
        .await?;

    Ok(normalize_reply(&raw))
}
