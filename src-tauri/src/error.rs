//! Error types shared by the compose flow and the history store.
//!
//! Tauri command boundaries call `.map_err(|e| e.to_string())`, so every
//! variant renders a message fit to show in the UI.

use thiserror::Error;

/// Failures the user can see while composing or sending a chat.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// Fewer than the minimum number of digits after normalization.
    #[error("Invalid phone number: need at least {min} digits, got {digits}")]
    InvalidPhoneNumber { digits: usize, min: usize },

    /// AI draft requested with a blank topic.
    #[error("Enter a message topic before generating a draft")]
    EmptyTopic,

    /// An AI draft is already being generated.
    #[error("A draft is already being generated")]
    DraftInFlight,

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("No history entry with id {0}")]
    UnknownContact(String),

    /// A previous operation panicked while holding the composer lock.
    #[error("Composer state is unavailable after an internal error")]
    StatePoisoned,
}

/// History persistence failures. Read failures are recovered by the store;
/// write failures are logged by the store and returned by `persist()`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
