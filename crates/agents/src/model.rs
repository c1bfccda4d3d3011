use async_trait::async_trait;

// ── Typed chat messages ─────────────────────────────────────────────────────

/// Typed chat message for the provider interface.
///
/// Only contains provider-relevant fields; caller-side metadata (ids,
/// timestamps) cannot exist here, so it can never leak into API requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    System { content: String },
    User { content: String },
    Assistant { content: String },
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
        }
    }

    /// The message text, regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System { content } | Self::User { content } | Self::Assistant { content } => {
                content
            },
        }
    }
}

/// Convert caller JSON messages (`{role, content}`) to typed `ChatMessage`s.
///
/// Order is preserved. Entries with a missing or unknown `role` are skipped
/// with a warning; a non-string `content` is treated as empty.
pub fn values_to_chat_messages(values: &[serde_json::Value]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(values.len());
    for (i, val) in values.iter().enumerate() {
        let Some(role) = val["role"].as_str() else {
            tracing::warn!(index = i, "skipping message with missing/invalid role");
            continue;
        };
        let content = val["content"].as_str().unwrap_or("").to_string();
        match role {
            "system" => messages.push(ChatMessage::system(content)),
            "user" => messages.push(ChatMessage::user(content)),
            "assistant" => messages.push(ChatMessage::assistant(content)),
            other => {
                tracing::warn!(
                    index = i,
                    role = other,
                    "skipping message with unknown role"
                );
            },
        }
    }
    messages
}

// ── Provider traits ─────────────────────────────────────────────────────────

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Text-completion provider (Anthropic Messages API or compatible).
#[async_trait]
pub trait TextProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Model identifier (e.g. "claude-3-opus-20240229").
    fn id(&self) -> &str;

    /// Run one non-streaming completion over the ordered message history.
    ///
    /// System messages are delivered however the underlying API expects them;
    /// the rest of the history is forwarded verbatim, in order. Returns the
    /// generated text (possibly empty).
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: SamplingParams,
    ) -> anyhow::Result<String>;
}

/// A generated image, referenced by URL (the provider hosts the bytes).
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub url: String,
}

/// Image-generation provider (OpenAI Images API or compatible).
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Generate exactly one square image for the prompt, returning its URL.
    async fn generate(&self, prompt: &str) -> anyhow::Result<GeneratedImage>;
}
