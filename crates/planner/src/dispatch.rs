//! Operation routing: does the latest user message ask for an invitation?

use partypilot_agents::ChatMessage;

/// Which code path handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Chat,
    GenerateInvitation,
}

/// Phrases that switch a chat request over to invitation generation.
pub const INVITATION_KEYWORDS: &[&str] = &[
    "invitation",
    "invite",
    "i wish to receive the invitation",
    "generate invitation",
    "create invitation",
];

/// Pick the operation for a conversation using the default keyword table.
pub fn route(messages: &[ChatMessage]) -> Operation {
    route_with_keywords(messages, INVITATION_KEYWORDS)
}

/// Pick the operation: a case-insensitive substring hit of any keyword in the
/// most recent user message selects invitation generation. Only the latest
/// user message is consulted; earlier mentions don't re-trigger.
pub fn route_with_keywords(messages: &[ChatMessage], keywords: &[&str]) -> Operation {
    let Some(text) = latest_user_text(messages) else {
        return Operation::Chat;
    };
    let text = text.to_lowercase();
    if keywords
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()))
    {
        Operation::GenerateInvitation
    } else {
        Operation::Chat
    }
}

/// The content of the most recent user message, if any.
pub fn latest_user_text(messages: &[ChatMessage]) -> Option<&str> {
    messages.iter().rev().find_map(|msg| match msg {
        ChatMessage::User { content } => Some(content.as_str()),
        _ => None,
    })
}
