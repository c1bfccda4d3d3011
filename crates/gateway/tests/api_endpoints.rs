//! Integration tests for the JSON API, with both providers pointed at a
//! local mock upstream.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{Json, Router, routing::post};

use {
    partypilot_config::PartypilotConfig,
    partypilot_gateway::{GatewayState, build_gateway_app},
};

/// Serve a mock text + image upstream. The Messages endpoint always answers
/// with `chat_reply`; the Images endpoint returns one fixed URL.
async fn start_mock_upstream(chat_reply: &str) -> String {
    let reply = chat_reply.to_string();
    let app = Router::new()
        .route(
            "/v1/messages",
            post(move || {
                let reply = reply.clone();
                async move {
                    Json(serde_json::json!({
                        "content": [{"type": "text", "text": reply}],
                    }))
                }
            }),
        )
        .route(
            "/images/generations",
            post(|| async {
                Json(serde_json::json!({
                    "data": [{"url": "https://img.example/invite.png"}],
                }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn serve_app(config: PartypilotConfig) -> String {
    let state = Arc::new(GatewayState::from_config(&config));
    let app = build_gateway_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Gateway wired to a mock upstream that answers chats with `chat_reply`.
async fn start_gateway_with_reply(chat_reply: &str) -> String {
    let upstream = start_mock_upstream(chat_reply).await;
    let raw = format!(
        r#"
        [providers.anthropic]
        api_key = "sk-ant-test"
        base_url = "{upstream}"

        [providers.openai]
        api_key = "sk-oai-test"
        base_url = "{upstream}"
        "#
    );
    let config: PartypilotConfig = toml::from_str(&raw).unwrap();
    serve_app(config).await
}

/// Gateway with both providers explicitly disabled (env keys can't leak in).
async fn start_unconfigured_gateway() -> String {
    let config: PartypilotConfig = toml::from_str(
        r#"
        [providers.anthropic]
        enabled = false

        [providers.openai]
        enabled = false
        "#,
    )
    .unwrap();
    serve_app(config).await
}

fn messages_body(texts: &[&str]) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = texts
        .iter()
        .map(|t| serde_json::json!({"role": "user", "content": t}))
        .collect();
    serde_json::json!({ "messages": messages })
}

#[tokio::test]
async fn health_reports_online() {
    let base = start_unconfigured_gateway().await;
    let resp = reqwest::get(format!("{base}/api/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "online");
}

#[tokio::test]
async fn chat_prose_is_wrapped_in_response() {
    let base = start_gateway_with_reply("A garden party sounds lovely!").await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&messages_body(&["any outdoor ideas?"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["response"], "A garden party sounds lovely!");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn chat_plans_json_is_forwarded_wholesale() {
    let plans_reply = r#"{"plans": [
        {"concept": "Jungle Day", "theme": "nature", "venue": "Garden",
         "activities": [{"time": "14:00", "activity": "Hunt"}],
         "catering": "Fruit", "guestExperience": "Favors", "budget": "$300"},
        {"concept": "Space Camp", "theme": "space", "venue": "Planetarium",
         "activities": [], "catering": "Cake", "guestExperience": "Glow",
         "budget": "$450"},
        {"concept": "Pirate Cove", "theme": "pirate", "venue": "Beach",
         "activities": [], "catering": "Snacks", "guestExperience": "Maps",
         "budget": "$200"}
    ]}"#;
    let base = start_gateway_with_reply(plans_reply).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&messages_body(&["show me three full plans"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    let plans = body["plans"].as_array().unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0]["concept"], "Jungle Day");
    assert_eq!(plans[2]["budget"], "$200");
}

#[tokio::test]
async fn malformed_provider_json_degrades_to_text() {
    let broken = r#"{"plans": [unterminated"#;
    let base = start_gateway_with_reply(broken).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&messages_body(&["plans please"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["response"], broken);
}

#[tokio::test]
async fn chat_keyword_routes_to_invitation() {
    let base = start_gateway_with_reply("Join us on [DATE] at [TIME], [LOCATION]!").await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&messages_body(&[
            "It's for Maria turning 8, a nature theme",
            "please create invitation",
        ]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body["invitationText"],
        "Join us on [DATE] at [TIME], [LOCATION]!"
    );
    assert_eq!(body["imageUrl"], "https://img.example/invite.png");
}

#[tokio::test]
async fn generate_invitation_endpoint_needs_no_keyword() {
    let base = start_gateway_with_reply("You're invited!").await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/generate-invitation"))
        .json(&messages_body(&["It's for Maria turning 8, a nature theme"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["invitationText"], "You're invited!");
    assert!(!body["imageUrl"].as_str().unwrap().is_empty());
    // The image prompt came from the nature style branch.
    assert!(body["dallePrompt"].as_str().unwrap().contains("greenery"));
    assert!(body["dallePrompt"].as_str().unwrap().contains("Maria"));
}

#[tokio::test]
async fn missing_keys_give_displayable_500_on_chat() {
    let base = start_unconfigured_gateway().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&messages_body(&["hello"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not configured"));
    // `response` must stand on its own in the chat transcript.
    assert!(!body["response"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn missing_keys_give_displayable_500_on_invitation() {
    let base = start_unconfigured_gateway().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/generate-invitation"))
        .json(&messages_body(&["make the invitation"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not configured"));
    assert!(!body["response"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failure_is_a_generic_500() {
    // Providers configured, but the base URL points at a dead port.
    let config: PartypilotConfig = toml::from_str(
        r#"
        [providers.anthropic]
        api_key = "sk-ant-test"
        base_url = "http://127.0.0.1:1"

        [providers.openai]
        api_key = "sk-oai-test"
        base_url = "http://127.0.0.1:1"
        "#,
    )
    .unwrap();
    let base = serve_app(config).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&messages_body(&["hello"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to get a response");
    assert!(!body["response"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_roles_are_skipped_not_fatal() {
    let base = start_gateway_with_reply("still fine").await;
    let body = serde_json::json!({
        "messages": [
            {"role": "user", "content": "hi"},
            {"role": "tool", "content": "not a chat role"},
            {"content": "no role at all"},
        ]
    });
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let parsed: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(parsed["response"], "still fine");
}
