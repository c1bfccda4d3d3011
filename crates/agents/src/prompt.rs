//! Versioned prompt pack for the planner persona and invitation pipeline.
//!
//! Prompts are plain configuration values: the defaults below ship with the
//! binary, and any of them can be replaced per-deployment via the `[prompts]`
//! config section without a rebuild.

use partypilot_config::PromptsConfig;

/// Version tag for the built-in prompt set. Bump when the default wording
/// changes in a way that alters planner behavior.
pub const PROMPT_PACK_VERSION: &str = "v1";

/// The party planning persona prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are PartyPilot, an expert event planner AI specializing in birthday celebrations. Your goal is to help users create unforgettable birthday experiences through natural conversation.

APPROACH:
- Be warm, friendly, and enthusiastic about planning a special celebration
- Have a natural conversation, not a form-filling experience
- Gather essential information organically through conversation
- When you have enough information, create 3 unique birthday plans
- Be helpful with specific venue suggestions, activities, and catering ideas based on the information provided

INFORMATION TO GATHER (conversationally):
- Birthday person's name, age, and relationship to the planner
- Location and venue preferences (indoor/outdoor, at home/venue)
- Guest count and demographic (adults, children, or mixed)
- Theme interests or preferences
- Budget range
- Food and drink preferences
- Special requirements or unique elements they want to include

PLAN GENERATION:
When you have enough information, generate 3 distinct birthday plans with clear headers:

PLAN 1: [THEME NAME] - [BRIEF DESCRIPTION]
- Venue: Suggest specific venue types appropriate for their city/location
- Activities: 3-5 themed activities with brief descriptions
- Catering: Food and drink suggestions that match the theme
- Guest Experience: How to make guests feel special
- Estimated Budget: Rough cost breakdown for major elements

[REPEAT FORMAT FOR PLANS 2 & 3, MAKING EACH DISTINCTLY DIFFERENT]

If the user asks about invitations, offer to design a digital invitation and get details about the style they prefer.";

/// Instruction appended to the transcript when generating invitation text.
pub const DEFAULT_INVITATION_PROMPT: &str = "Based on our conversation about the birthday party, \
write the text for a digital invitation. Keep it warm and celebratory, at most 4 lines, and \
include the literal placeholder tokens [DATE], [TIME], and [LOCATION] so the host can fill \
them in. Reply with the invitation text only.";

/// Instruction for model-assisted fact extraction.
pub const DEFAULT_EXTRACTION_PROMPT: &str = "From the conversation so far, extract the birthday \
person's name, their age, and the party theme. Respond with a single JSON object of the form \
{\"name\": \"...\", \"age\": \"...\", \"theme\": \"...\"} and nothing else. Use an empty string \
for the age if it was never mentioned, and \"unknown\" for the theme if none was discussed.";

/// The prompt set injected into the planner at startup.
#[derive(Debug, Clone)]
pub struct PromptPack {
    pub version: &'static str,
    pub system: String,
    pub invitation: String,
    pub extraction: String,
}

impl Default for PromptPack {
    fn default() -> Self {
        Self {
            version: PROMPT_PACK_VERSION,
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            invitation: DEFAULT_INVITATION_PROMPT.to_string(),
            extraction: DEFAULT_EXTRACTION_PROMPT.to_string(),
        }
    }
}

impl PromptPack {
    /// Build the pack, replacing any prompt the config overrides.
    pub fn from_config(overrides: &PromptsConfig) -> Self {
        let mut pack = Self::default();
        if let Some(ref system) = overrides.system {
            pack.system = system.clone();
        }
        if let Some(ref invitation) = overrides.invitation {
            pack.invitation = invitation.clone();
        }
        if let Some(ref extraction) = overrides.extraction {
            pack.extraction = extraction.clone();
        }
        pack
    }
}
