//! Party fact extraction: name, age, and theme from a free-form transcript.
//!
//! Two policies share one contract: a fact record always comes back with all
//! three fields populated, substituting fallbacks for anything not found.
//! Extraction never fails a request.

use std::sync::LazyLock;

use {
    regex::Regex,
    serde::{Deserialize, Serialize},
    tracing::warn,
};

use partypilot_agents::{ChatMessage, PromptPack, SamplingParams, TextProvider};

pub const FALLBACK_NAME: &str = "Special Person";
pub const FALLBACK_THEME: &str = "birthday";

/// Sentinel the extraction prompt asks the model to emit for a missing theme.
const UNKNOWN_THEME: &str = "unknown";

/// Sampling for the model-assisted extraction call: short and deterministic.
const EXTRACTION_PARAMS: SamplingParams = SamplingParams {
    max_tokens: 200,
    temperature: 0.0,
};

/// Best-effort, lossy projection of a conversation. May be wrong; never
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPartyFacts {
    pub name: String,
    pub age: Option<String>,
    pub theme: String,
}

impl Default for ExtractedPartyFacts {
    fn default() -> Self {
        Self {
            name: FALLBACK_NAME.to_string(),
            age: None,
            theme: FALLBACK_THEME.to_string(),
        }
    }
}

// ── Pattern tables ──────────────────────────────────────────────────────────
//
// All patterns run against lowercased text. Per field the table is ordered:
// the first capture of the first matching pattern wins, and a field found in
// an earlier message is never overridden by a later one.

const NAME_PATTERN_SOURCES: &[&str] = &[
    r"(?:name is|named|called)\s+([a-z][a-z'-]*)",
    r"([a-z][a-z'-]*)'s\s+birthday",
    r"([a-z][a-z'-]*)\s+(?:is\s+)?turning\s+\d",
    r"for\s+(?:my|our)\s+[a-z]+\s+([a-z][a-z'-]*)",
    r"for\s+([a-z][a-z'-]*)",
];

const AGE_PATTERN_SOURCES: &[&str] = &[
    r"turning\s+(\d{1,3})",
    r"(\d{1,3})(?:st|nd|rd|th)?\s+birthday",
    r"\b(\d{1,3})\s+years?\s+old",
    r"\bage\s+(\d{1,3})",
];

const THEME_PATTERN_SOURCES: &[&str] = &[
    r"([a-z][a-z-]*)[\s-]themed?\b",
    r"theme\s*(?:is|of|:)?\s*([a-z][a-z-]*)",
    r"([a-z][a-z-]*)\s+party\b",
];

/// Captures that are grammar, not names.
const NAME_STOPWORDS: &[&str] = &[
    "a", "an", "the", "my", "our", "her", "his", "their", "me", "us", "him", "them", "someone",
    "everyone", "friend", "daughter", "son", "she", "he", "it", "they", "i", "you", "we", "who",
];

/// Captures that are grammar or the fallback itself, not a theme.
const THEME_STOPWORDS: &[&str] = &[
    "a", "an", "the", "is", "was", "be", "would", "this", "that", "her", "his", "my", "our",
    "birthday", "surprise", "great", "fun", "big", "little",
];

static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(NAME_PATTERN_SOURCES));
static AGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(AGE_PATTERN_SOURCES));
static THEME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(THEME_PATTERN_SOURCES));

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .filter_map(|source| match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern = source, error = %e, "invalid extraction pattern");
                None
            },
        })
        .collect()
}

/// First non-stopword capture of the first matching pattern, in table order.
fn first_capture(patterns: &[Regex], text: &str, stopwords: &[&str]) -> Option<String> {
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            if let Some(m) = caps.get(1)
                && !stopwords.contains(&m.as_str())
            {
                return Some(m.as_str().to_string());
            }
        }
    }
    None
}

/// `mary-jane` → `Mary-Jane` (extraction lowercases everything first).
fn title_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

// ── Regex policy ────────────────────────────────────────────────────────────

/// Extract facts with the local pattern tables. Pure and network-free.
///
/// Only user messages are scanned: assistant turns routinely mention words
/// like "theme" while asking questions, which would pollute the tables.
pub fn extract_facts(messages: &[ChatMessage]) -> ExtractedPartyFacts {
    let mut name: Option<String> = None;
    let mut age: Option<String> = None;
    let mut theme: Option<String> = None;

    for msg in messages {
        let ChatMessage::User { content } = msg else {
            continue;
        };
        let text = content.to_lowercase();

        if name.is_none() {
            name = first_capture(&NAME_PATTERNS, &text, NAME_STOPWORDS);
        }
        if age.is_none() {
            age = first_capture(&AGE_PATTERNS, &text, &[]);
        }
        if theme.is_none() {
            theme = first_capture(&THEME_PATTERNS, &text, THEME_STOPWORDS);
        }

        if name.is_some() && age.is_some() && theme.is_some() {
            break;
        }
    }

    ExtractedPartyFacts {
        name: name
            .map(|n| title_case(&n))
            .unwrap_or_else(|| FALLBACK_NAME.to_string()),
        age,
        theme: theme.unwrap_or_else(|| FALLBACK_THEME.to_string()),
    }
}

// ── Model-assisted policy ───────────────────────────────────────────────────

/// Extract facts with a dedicated completion call.
///
/// The model is asked for a strict JSON object; anything that goes wrong
/// (provider error, malformed output) degrades to the fallback record.
pub async fn extract_facts_with_model(
    provider: &dyn TextProvider,
    prompts: &PromptPack,
    messages: &[ChatMessage],
) -> ExtractedPartyFacts {
    let mut convo = messages.to_vec();
    convo.push(ChatMessage::user(prompts.extraction.clone()));

    let raw = match provider.complete(&convo, EXTRACTION_PARAMS).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "fact extraction call failed, using fallbacks");
            return ExtractedPartyFacts::default();
        },
    };

    parse_model_facts(&raw).unwrap_or_default()
}

/// Parse the extraction reply, tolerating prose around the JSON object.
fn parse_model_facts(raw: &str) -> Option<ExtractedPartyFacts> {
    let start = raw.find('{')?;
    let val: serde_json::Value = serde_json::from_str(raw[start..].trim()).ok()?;

    let name = val["name"]
        .as_str()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_NAME.to_string());

    let age = match &val["age"] {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    };

    let theme = val["theme"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(UNKNOWN_THEME))
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_THEME.to_string());

    Some(ExtractedPartyFacts { name, age, theme })
}
