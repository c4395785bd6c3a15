//! Deep-link construction for wa.me chats.
//!
//! Pure functions: no I/O, no state. The caller opens the URL.

use crate::countries::Country;
use crate::error::ComposeError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

pub const CHAT_BASE_URL: &str = "https://wa.me/";
pub const MIN_PHONE_DIGITS: usize = 5;

/// Characters left unescaped by a browser's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A validated chat target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLink {
    /// Local number, digits only.
    pub local_number: String,
    /// Calling code + local number, no `+` or separators.
    pub dialable: String,
    pub url: String,
}

/// Keep only the ASCII digits of a user-typed phone number.
///
/// Other scripts' digits (Arabic-Indic included) are dropped like any other
/// character.
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Percent-encode a message body for the `text` query parameter.
pub fn encode_message(message: &str) -> String {
    utf8_percent_encode(message, COMPONENT).to_string()
}

/// Validate the number and build the chat link.
pub fn build_chat_link(
    country: &Country,
    raw_phone: &str,
    message: &str,
) -> Result<ChatLink, ComposeError> {
    let local_number = normalize_digits(raw_phone);
    if local_number.len() < MIN_PHONE_DIGITS {
        return Err(ComposeError::InvalidPhoneNumber {
            digits: local_number.len(),
            min: MIN_PHONE_DIGITS,
        });
    }

    let dialable = format!("{}{}", country.code, local_number);
    let url = format!("{}{}?text={}", CHAT_BASE_URL, dialable, encode_message(message));

    Ok(ChatLink {
        local_number,
        dialable,
        url,
    })
}
