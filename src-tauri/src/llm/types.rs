//! Draft request/response types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback message used whenever generation fails ("Hello, I'd like to get
/// in touch with you.").
pub const FALLBACK_MESSAGE: &str = "مرحباً، أود التواصل معك.";

/// Stylistic mode for a generated draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageTone {
    Professional,
    Friendly,
    Funny,
    Short,
}

impl MessageTone {
    pub const ALL: [MessageTone; 4] = [
        MessageTone::Professional,
        MessageTone::Friendly,
        MessageTone::Funny,
        MessageTone::Short,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MessageTone::Professional => "professional",
            MessageTone::Friendly => "friendly",
            MessageTone::Funny => "funny",
            MessageTone::Short => "short",
        }
    }
}

impl fmt::Display for MessageTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageTone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown tone: {}", s))
    }
}

/// Outcome of a draft request. Either way there is text to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    Generated(String),
    Fallback,
}

impl DraftOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DraftOutcome::Fallback)
    }

    pub fn into_text(self) -> String {
        match self {
            DraftOutcome::Generated(text) => text,
            DraftOutcome::Fallback => FALLBACK_MESSAGE.to_string(),
        }
    }
}
