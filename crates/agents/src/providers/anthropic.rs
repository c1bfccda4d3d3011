use {async_trait::async_trait, secrecy::ExposeSecret};

use tracing::{debug, trace, warn};

use crate::model::{ChatMessage, SamplingParams, TextProvider};

pub struct AnthropicProvider {
    api_key: secrecy::Secret<String>,
    model: String,
    base_url: String,
    client: &'static reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: secrecy::Secret<String>, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            client: super::shared_http_client(),
        }
    }
}

/// Convert a `ChatMessage` list to Anthropic format.
///
/// Returns `(system_text, anthropic_messages)`. System messages are extracted
/// (Anthropic takes them as a top-level `system` field, multiple ones merged
/// with blank lines); user/assistant messages are forwarded in order.
fn to_anthropic_messages(messages: &[ChatMessage]) -> (Option<String>, Vec<serde_json::Value>) {
    let mut system_text: Option<String> = None;
    let mut out = Vec::new();

    for msg in messages {
        match msg {
            ChatMessage::System { content } => {
                system_text = Some(match system_text {
                    Some(existing) => format!("{existing}\n\n{content}"),
                    None => content.clone(),
                });
            },
            ChatMessage::User { content } => {
                out.push(serde_json::json!({"role": "user", "content": content}));
            },
            ChatMessage::Assistant { content } => {
                out.push(serde_json::json!({"role": "assistant", "content": content}));
            },
        }
    }

    (system_text, out)
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn id(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: SamplingParams,
    ) -> anyhow::Result<String> {
        let (system_text, anthropic_messages) = to_anthropic_messages(messages);

        let mut body = serde_json::json!({
            "model": self.model,
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
            "messages": anthropic_messages,
        });

        if let Some(ref sys) = system_text {
            body["system"] = serde_json::Value::String(sys.clone());
        }

        debug!(
            model = %self.model,
            messages_count = anthropic_messages.len(),
            has_system = system_text.is_some(),
            "anthropic complete request"
        );
        trace!(body = %serde_json::to_string(&body).unwrap_or_default(), "anthropic request body");

        let http_resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = http_resp.status();
        if !status.is_success() {
            let body_text = http_resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body_text, "anthropic API error");
            anyhow::bail!("Anthropic API error HTTP {status}: {body_text}");
        }

        let resp = http_resp.json::<serde_json::Value>().await?;
        trace!(response = %resp, "anthropic raw response");

        let text = resp["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|b| {
                        if b["type"].as_str() == Some("text") {
                            b["text"].as_str()
                        } else {
                            None
                        }
                    })
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }
}
