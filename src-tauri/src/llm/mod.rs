//! LLM domain: AI-assisted message drafts.
//!
//! External code should only use the items exported here.
//!
//!   - gemini.rs   `DraftWriter`, the Gemini `generateContent` client
//!   - prompts.rs  draft prompt + fixed sampling parameters
//!   - provider.rs API key resolution (env / OS keychain) and endpoint
//!   - types.rs    tones, draft outcome, fallback text

mod gemini;
pub mod prompts;
pub mod provider;
pub mod types;

pub use gemini::DraftWriter;
pub use types::{DraftOutcome, MessageTone, FALLBACK_MESSAGE};
