//! Configuration loading and env substitution.
//!
//! Config files: `partypilot.toml`, `partypilot.yaml`, or `partypilot.json`
//! Searched in `./` then `~/.config/partypilot/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{config_dir, discover_and_load, find_or_default_config_path, load_config},
    schema::{
        ChatConfig, ExtractionMode, InvitationConfig, PartypilotConfig, PromptsConfig,
        ProviderEntry, ProvidersConfig, ServerConfig,
    },
};
