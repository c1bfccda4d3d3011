//! The conversation-to-structured-plan pipeline: operation routing, party
//! fact extraction, theme styling, provider-reply normalization, and the
//! invitation generation flow.

pub mod chat;
pub mod dispatch;
pub mod extract;
pub mod invitation;
pub mod normalize;
pub mod theme;

pub use {
    chat::run_chat,
    dispatch::{Operation, route},
    extract::ExtractedPartyFacts,
    invitation::{InvitationResult, run_invitation},
    normalize::{PartyPlan, ProviderReply, normalize_reply},
    theme::{ImageStyle, image_prompt, style_for_theme},
};
