//! Provider-reply normalization.
//!
//! The text provider answers a planning chat with whatever its prompt variant
//! produced: prose, a JSON object with a `plans` array, or something that
//! only looks like JSON. All of it maps into one tagged type; a parse failure
//! is a silent format fallback, never an error.

use serde::{Deserialize, Serialize};

/// A structured plan option, as produced by plan-emitting prompt variants.
///
/// Plans payloads are forwarded wholesale without validation; this type
/// documents the shape for consumers that want to deserialize entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyPlan {
    pub concept: String,
    pub theme: String,
    pub venue: String,
    pub activities: Vec<PlanActivity>,
    pub catering: String,
    pub guest_experience: String,
    pub budget: String,
}

/// One scheduled activity inside a [`PartyPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanActivity {
    pub time: String,
    pub activity: String,
}

/// What the raw provider text turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    /// A JSON object carrying a `plans` field; forwarded as-is.
    Plans(serde_json::Value),
    /// Some other JSON object; treated as opaque and forwarded wholesale.
    Structured(serde_json::Value),
    /// Not JSON (or not a JSON object): the raw text is the message.
    Prose(String),
}

/// Classify raw provider output.
///
/// Strict JSON parse first; anything unparseable (or a non-object value like
/// a bare number) degrades to prose. There are no retries and no schema
/// checks beyond "is there a `plans` field".
pub fn normalize_reply(raw: &str) -> ProviderReply {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(val @ serde_json::Value::Object(_)) => {
            if val.get("plans").is_some() {
                ProviderReply::Plans(val)
            } else {
                ProviderReply::Structured(val)
            }
        },
        Ok(_) | Err(_) => ProviderReply::Prose(raw.to_string()),
    }
}

impl ProviderReply {
    /// The JSON body to hand back to the caller.
    pub fn into_body(self) -> serde_json::Value {
        match self {
            Self::Plans(val) | Self::Structured(val) => val,
            Self::Prose(text) => serde_json::json!({ "response": text }),
        }
    }
}
