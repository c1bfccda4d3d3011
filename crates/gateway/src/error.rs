//! Error-to-JSON mapping for the HTTP surface.
//!
//! Every failure body carries both a diagnostic `error` and a `response` the
//! chat UI can drop straight into the conversation.

use {
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required provider has no usable API key.
    #[error("{provider} API key is not configured")]
    NotConfigured {
        provider: &'static str,
        env_key: &'static str,
    },

    /// A provider call failed (network, 4xx/5xx). Logged, never retried.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    /// The user-displayable line for the chat transcript.
    fn user_message(&self) -> String {
        match self {
            Self::NotConfigured { provider, env_key } => format!(
                "PartyPilot can't reach its {provider} service yet. The server needs the \
                 {env_key} environment variable (or the matching config entry) before it can \
                 help with that."
            ),
            Self::Upstream(_) => {
                "Sorry, I encountered a problem. Please try again.".to_string()
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match &self {
            Self::NotConfigured { .. } => self.to_string(),
            Self::Upstream(e) => {
                tracing::warn!(error = %e, "request failed upstream");
                "Failed to get a response".to_string()
            },
        };
        let body = serde_json::json!({
            "error": error,
            "response": self.user_message(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
