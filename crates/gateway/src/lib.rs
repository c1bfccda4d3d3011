//! HTTP gateway: the JSON surface the chat UI talks to.

pub mod chat;
pub mod error;
pub mod server;
pub mod state;

pub use {
    error::ApiError,
    server::{build_gateway_app, start_gateway},
    state::GatewayState,
};
