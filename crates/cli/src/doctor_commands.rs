//! `partypilot doctor`: report what the gateway would run with.

use {
    partypilot_agents::ProviderRegistry,
    partypilot_config::{ExtractionMode, PartypilotConfig},
};

pub fn run(config: &PartypilotConfig) -> anyhow::Result<()> {
    println!("PartyPilot configuration check");
    println!();

    println!("server:");
    println!("  bind: {}:{}", config.server.bind, config.server.port);
    println!();

    println!("providers:");
    let registry = ProviderRegistry::from_env_with_config(&config.providers);
    for line in registry.summary() {
        println!("  {line}");
    }
    println!();

    println!("invitation:");
    let mode = match config.invitation.extraction {
        ExtractionMode::Regex => "regex (local pattern matching)",
        ExtractionMode::ModelAssisted => "model-assisted (extra completion call)",
    };
    println!("  extraction: {mode}");

    if registry.text().is_none() {
        println!();
        println!(
            "note: chat and invitations need ANTHROPIC_API_KEY (or [providers.anthropic] api_key)"
        );
    }
    if registry.image().is_none() {
        println!(
            "note: invitation images need OPENAI_API_KEY (or [providers.openai] api_key)"
        );
    }

    Ok(())
}
