//! The invitation pipeline: extract facts, write the invitation text,
//! derive the image prompt, generate the image.
//!
//! The provider calls run strictly in sequence: each later call's input
//! depends on the previous call's output.

use serde::{Deserialize, Serialize};

use {
    partypilot_agents::{ChatMessage, ImageProvider, PromptPack, SamplingParams, TextProvider},
    partypilot_config::{ExtractionMode, InvitationConfig},
};

use crate::{extract, theme};

/// Shown when the model returns nothing usable for the invitation body.
pub const FALLBACK_INVITATION_TEXT: &str = "Join us for a special celebration!";

const INVITATION_TEMPERATURE: f32 = 0.7;

/// The assembled invitation handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResult {
    pub invitation_text: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dalle_prompt: Option<String>,
}

/// Strip a leading "Invitation Text:" label if the model echoes one, and
/// fall back to a fixed line when nothing usable remains.
fn clean_invitation_text(raw: &str) -> String {
    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();
    let trimmed = match lowered.strip_prefix("invitation text:") {
        Some(_) => trimmed["invitation text:".len()..].trim(),
        None => trimmed,
    };
    if trimmed.is_empty() {
        FALLBACK_INVITATION_TEXT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Run the full invitation pipeline over the caller's history.
pub async fn run_invitation(
    text_provider: &dyn TextProvider,
    image_provider: &dyn ImageProvider,
    prompts: &PromptPack,
    config: &InvitationConfig,
    messages: &[ChatMessage],
) -> anyhow::Result<InvitationResult> {
    // 1. Facts, per the configured policy. Never fails.
    let facts = match config.extraction {
        ExtractionMode::Regex => extract::extract_facts(messages),
        ExtractionMode::ModelAssisted => {
            extract::extract_facts_with_model(text_provider, prompts, messages).await
        },
    };
    tracing::debug!(?facts, "extracted party facts");

    // 2. Invitation text.
    let mut convo = messages.to_vec();
    convo.push(ChatMessage::user(prompts.invitation.clone()));
    let raw = text_provider
        .complete(&convo, SamplingParams {
            max_tokens: config.max_tokens,
            temperature: INVITATION_TEMPERATURE,
        })
        .await?;
    let invitation_text = clean_invitation_text(&raw);

    // 3. Image prompt, derived locally from the theme.
    let dalle_prompt = theme::image_prompt(&facts);

    // 4. One square image; the provider hands back a URL.
    let image = image_provider.generate(&dalle_prompt).await?;

    Ok(InvitationResult {
        invitation_text,
        image_url: image.url,
        dalle_prompt: Some(dalle_prompt),
    })
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use partypilot_agents::GeneratedImage;

    use super::*;

    struct ScriptedText {
        reply: String,
        calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedText {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextProvider for ScriptedText {
        fn name(&self) -> &str {
            "scripted"
        }

        fn id(&self) -> &str {
            "scripted-model"
        }

        async fn complete(
            &self,
            messages: &[ChatMessage],
            _params: SamplingParams,
        ) -> anyhow::Result<String> {
            self.calls.lock().unwrap().push(messages.to_vec());
            Ok(self.reply.clone())
        }
    }

    struct ScriptedImage {
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedImage {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageProvider for ScriptedImage {
        fn name(&self) -> &str {
            "scripted-image"
        }

        async fn generate(&self, prompt: &str) -> anyhow::Result<GeneratedImage> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(GeneratedImage {
                url: "https://img.example/invite.png".into(),
            })
        }
    }

    #[test]
    fn clean_strips_label_and_falls_back() {
        assert_eq!(
            clean_invitation_text("Invitation Text: You're invited!"),
            "You're invited!"
        );
        assert_eq!(
            clean_invitation_text("invitation text:\n  Come celebrate"),
            "Come celebrate"
        );
        assert_eq!(clean_invitation_text("   "), FALLBACK_INVITATION_TEXT);
        assert_eq!(clean_invitation_text("Plain text"), "Plain text");
    }

    #[tokio::test]
    async fn nature_conversation_end_to_end() {
        let text = ScriptedText::new("Join us on [DATE] at [TIME], [LOCATION]!");
        let image = ScriptedImage::new();
        let messages = [ChatMessage::user(
            "It's for Maria turning 8, a nature theme. Please create invitation!",
        )];

        let result = run_invitation(
            &text,
            &image,
            &PromptPack::default(),
            &InvitationConfig::default(),
            &messages,
        )
        .await
        .unwrap();

        assert_eq!(
            result.invitation_text,
            "Join us on [DATE] at [TIME], [LOCATION]!"
        );
        assert!(!result.image_url.is_empty());

        // The image prompt came from the nature branch, not the model.
        let prompts = image.prompts.lock().unwrap();
        assert!(prompts[0].contains("greenery"));
        assert!(prompts[0].contains("Maria"));
        assert_eq!(result.dalle_prompt.as_deref(), Some(prompts[0].as_str()));
    }

    #[tokio::test]
    async fn invitation_instruction_appended_to_history() {
        let text = ScriptedText::new("Come party!");
        let image = ScriptedImage::new();
        let prompts = PromptPack::default();
        let messages = [
            ChatMessage::user("party for Ben"),
            ChatMessage::assistant("Sounds great!"),
        ];

        run_invitation(
            &text,
            &image,
            &prompts,
            &InvitationConfig::default(),
            &messages,
        )
        .await
        .unwrap();

        let calls = text.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let sent = &calls[0];
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[..2], messages[..]);
        assert_eq!(sent[2], ChatMessage::user(prompts.invitation.clone()));
    }

    #[tokio::test]
    async fn serialized_result_uses_camel_case() {
        let result = InvitationResult {
            invitation_text: "hi".into(),
            image_url: "https://x".into(),
            dalle_prompt: Some("p".into()),
        };
        let val = serde_json::to_value(&result).unwrap();
        assert_eq!(val["invitationText"], "hi");
        assert_eq!(val["imageUrl"], "https://x");
        assert_eq!(val["dallePrompt"], "p");
    }

    #[tokio::test]
    async fn model_assisted_mode_issues_extraction_call_first() {
        let text = ScriptedText::new(r#"{"name": "Maria", "age": "8", "theme": "travel"}"#);
        let image = ScriptedImage::new();
        let config = InvitationConfig {
            extraction: ExtractionMode::ModelAssisted,
            ..InvitationConfig::default()
        };
        let prompts = PromptPack::default();

        let result = run_invitation(
            &text,
            &image,
            &prompts,
            &config,
            &[ChatMessage::user("plan it")],
        )
        .await
        .unwrap();

        let calls = text.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        // First call carries the extraction instruction, second the
        // invitation instruction.
        assert_eq!(
            calls[0].last().unwrap(),
            &ChatMessage::user(prompts.extraction.clone())
        );
        assert_eq!(
            calls[1].last().unwrap(),
            &ChatMessage::user(prompts.invitation.clone())
        );

        // The scripted reply doubles as the invitation text; what matters
        // here is that the extracted travel theme drove the vintage branch.
        assert!(result.dalle_prompt.unwrap().contains("world map"));
    }
}
