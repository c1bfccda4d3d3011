use {async_trait::async_trait, secrecy::ExposeSecret};

use tracing::{debug, trace, warn};

use crate::model::{GeneratedImage, ImageProvider};

/// One square invitation background per request.
const IMAGE_COUNT: u32 = 1;
const IMAGE_SIZE: &str = "1024x1024";
const IMAGE_QUALITY: &str = "standard";

pub struct OpenAiImageProvider {
    api_key: secrecy::Secret<String>,
    model: String,
    base_url: String,
    client: &'static reqwest::Client,
}

impl OpenAiImageProvider {
    pub fn new(api_key: secrecy::Secret<String>, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            client: super::shared_http_client(),
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<GeneratedImage> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "n": IMAGE_COUNT,
            "size": IMAGE_SIZE,
            "quality": IMAGE_QUALITY,
        });

        debug!(model = %self.model, prompt_len = prompt.len(), "openai image request");
        trace!(body = %serde_json::to_string(&body).unwrap_or_default(), "openai image request body");

        let http_resp = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = http_resp.status();
        if !status.is_success() {
            let body_text = http_resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body_text, "openai image API error");
            anyhow::bail!("OpenAI image API error HTTP {status}: {body_text}");
        }

        let resp = http_resp.json::<serde_json::Value>().await?;
        trace!(response = %resp, "openai image raw response");

        let url = resp["data"][0]["url"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("OpenAI image response missing data[0].url"))?
            .to_string();

        Ok(GeneratedImage { url })
    }
}
