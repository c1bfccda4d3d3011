use std::sync::Arc;

use {
    axum::{
        Router,
        response::Json,
        routing::{get, post},
    },
    tower_http::cors::{Any, CorsLayer},
    tracing::info,
};

use partypilot_config::PartypilotConfig;

use crate::{
    chat::{chat_handler, invitation_handler},
    state::GatewayState,
};

/// Build the gateway router (shared between production startup and tests).
pub fn build_gateway_app(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/generate-invitation", post(invitation_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the gateway HTTP server and serve until shutdown.
pub async fn start_gateway(config: PartypilotConfig) -> anyhow::Result<()> {
    let state = Arc::new(GatewayState::from_config(&config));
    for line in state.registry.summary() {
        info!(provider = %line, "provider");
    }

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let app = build_gateway_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("gateway listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "online" }))
}
