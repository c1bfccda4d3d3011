//! Typed chat messages, prompt pack, and AI provider adapters.

pub mod model;
pub mod prompt;
pub mod providers;

pub use {
    model::{ChatMessage, GeneratedImage, ImageProvider, SamplingParams, TextProvider},
    prompt::PromptPack,
    providers::ProviderRegistry,
};
