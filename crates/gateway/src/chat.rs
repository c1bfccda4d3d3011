//! Request handlers for the two POST endpoints.

use std::sync::Arc;

use {
    axum::{Json, extract::State},
    serde::Deserialize,
};

use {
    partypilot_agents::{ChatMessage, model::values_to_chat_messages},
    partypilot_planner::{Operation, dispatch, invitation, run_chat},
};

use crate::{error::ApiError, state::GatewayState};

/// The request body both endpoints accept: the full conversation so far.
///
/// Messages are kept as raw JSON here so unknown roles degrade gracefully
/// (skipped with a warning) instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
}

/// `POST /api/chat`: planning conversation.
///
/// The dispatcher runs first: when the latest user message asks for an
/// invitation, this endpoint answers with the invitation payload instead of
/// a chat reply.
pub async fn chat_handler(
    State(state): State<Arc<GatewayState>>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let messages = values_to_chat_messages(&req.messages);

    match dispatch::route(&messages) {
        Operation::GenerateInvitation => {
            tracing::debug!("invitation keywords detected in chat request");
            generate_invitation(&state, &messages).await.map(Json)
        },
        Operation::Chat => {
            let provider = state.text_provider()?;
            let reply =
                run_chat(provider.as_ref(), &state.prompts, &state.chat, &messages).await?;
            Ok(Json(reply.into_body()))
        },
    }
}

/// `POST /api/generate-invitation`: always generates an invitation,
/// regardless of keywords.
pub async fn invitation_handler(
    State(state): State<Arc<GatewayState>>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let messages = values_to_chat_messages(&req.messages);
    generate_invitation(&state, &messages).await.map(Json)
}

async fn generate_invitation(
    state: &GatewayState,
    messages: &[ChatMessage],
) -> Result<serde_json::Value, ApiError> {
    let text_provider = state.text_provider()?;
    let image_provider = state.image_provider()?;

    let result = invitation::run_invitation(
        text_provider.as_ref(),
        image_provider.as_ref(),
        &state.prompts,
        &state.invitation,
        messages,
    )
    .await?;

    serde_json::to_value(&result).map_err(|e| ApiError::Upstream(e.into()))
}
