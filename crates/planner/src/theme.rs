//! Theme → invitation image style mapping.
//!
//! The image prompt is derived locally from the extracted theme, never from
//! model output, so the same conversation always yields the same prompt.

use crate::extract::ExtractedPartyFacts;

/// Visual direction for the invitation background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStyle {
    /// Travel and adventure themes.
    VintageMap,
    /// Nature themes.
    Greenery,
    /// Everything else.
    Festive,
}

/// Map a theme string to its style branch. Total and deterministic: exactly
/// one branch applies, the default last.
pub fn style_for_theme(theme: &str) -> ImageStyle {
    let theme = theme.to_lowercase();
    if theme.contains("travel") || theme.contains("adventure") {
        ImageStyle::VintageMap
    } else if theme.contains("nature") {
        ImageStyle::Greenery
    } else {
        ImageStyle::Festive
    }
}

/// Build the image-generation prompt for the extracted facts.
pub fn image_prompt(facts: &ExtractedPartyFacts) -> String {
    let occasion = match &facts.age {
        Some(age) => format!("{}'s {age} birthday", facts.name),
        None => format!("{}'s birthday", facts.name),
    };

    match style_for_theme(&facts.theme) {
        ImageStyle::VintageMap => format!(
            "A beautifully illustrated digital birthday invitation background for {occasion}, \
             in a vintage travel style: an aged world map with compass roses, dotted journey \
             routes, postage stamps, and warm sepia tones. Leave open space in the center for \
             invitation text. No words or letters in the image."
        ),
        ImageStyle::Greenery => format!(
            "A beautifully illustrated digital birthday invitation background for {occasion}, \
             full of lush greenery: layered botanical leaves, delicate wildflowers, and soft \
             dappled sunlight. Leave open space in the center for invitation text. No words or \
             letters in the image."
        ),
        ImageStyle::Festive => format!(
            "A beautifully illustrated digital birthday invitation background for {occasion} \
             with a {} feel: colorful balloons, falling confetti, streamers, and a warm \
             celebratory glow. Leave open space in the center for invitation text. No words or \
             letters in the image.",
            facts.theme
        ),
    }
}
