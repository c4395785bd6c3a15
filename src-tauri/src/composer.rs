//! Message composer: the application state behind the chat form.
//!
//! Holds the current draft (country, phone input, message body, AI topic)
//! and the recent-contacts store. The UI mutates it only through the named
//! operations below; the app shell keeps it in a `Mutex` as managed state.

use crate::countries::{self, Country};
use crate::error::ComposeError;
use crate::history::{ContactRecord, RecencyStore};
use crate::link::{self, ChatLink};
use crate::llm::{DraftWriter, MessageTone};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

/// Current form contents.
#[derive(Debug, Clone)]
pub struct Draft {
    pub country: &'static Country,
    /// Phone number as typed, before normalization.
    pub phone_input: String,
    pub message: String,
    pub topic: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            country: countries::default_country(),
            phone_input: String::new(),
            message: String::new(),
            topic: String::new(),
        }
    }
}

/// Snapshot of the form sent to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub country: Country,
    pub phone_number: String,
    pub message: String,
    pub topic: String,
    /// True while an AI draft is being generated; the tone buttons are
    /// disabled meanwhile.
    pub generating: bool,
}

/// A history entry with its country's flag resolved for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(flatten)]
    pub record: ContactRecord,
    pub flag: &'static str,
}

pub struct Composer {
    draft: Draft,
    history: RecencyStore,
    generating: bool,
}

impl Composer {
    pub fn new(history: RecencyStore) -> Self {
        Self {
            draft: Draft::default(),
            history,
            generating: false,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn view(&self) -> DraftView {
        DraftView {
            country: *self.draft.country,
            phone_number: self.draft.phone_input.clone(),
            message: self.draft.message.clone(),
            topic: self.draft.topic.clone(),
            generating: self.generating,
        }
    }

    pub fn select_country(&mut self, iso: &str) -> Result<&'static Country, ComposeError> {
        let country =
            countries::find(iso).ok_or_else(|| ComposeError::UnknownCountry(iso.to_string()))?;
        self.draft.country = country;
        Ok(country)
    }

    pub fn set_phone_number(&mut self, value: impl Into<String>) {
        self.draft.phone_input = value.into();
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.draft.message = value.into();
    }

    pub fn set_topic(&mut self, value: impl Into<String>) {
        self.draft.topic = value.into();
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Claim the AI slot. Returns the trimmed topic to send.
    pub fn begin_ai_draft(&mut self) -> Result<String, ComposeError> {
        let topic = self.draft.topic.trim();
        if topic.is_empty() {
            return Err(ComposeError::EmptyTopic);
        }
        if self.generating {
            return Err(ComposeError::DraftInFlight);
        }
        self.generating = true;
        Ok(topic.to_string())
    }

    /// Replace the message body with the generated text and release the
    /// AI slot. Any hand-written body is overwritten.
    pub fn finish_ai_draft(&mut self, text: String) {
        self.draft.message = text;
        self.generating = false;
    }

    /// Build the chat link for the current draft without recording it.
    pub fn preview_link(&self) -> Result<ChatLink, ComposeError> {
        link::build_chat_link(self.draft.country, &self.draft.phone_input, &self.draft.message)
    }

    /// Validate the draft, record the contact, and return the link to open.
    ///
    /// On an invalid number nothing is recorded.
    pub fn send(&mut self) -> Result<ChatLink, ComposeError> {
        let link = self.preview_link()?;
        let record = ContactRecord::new(&link.local_number, &link.dialable, self.draft.country.iso);
        log::info!(
            "[COMPOSE] Opening chat ({} digits, country {})",
            link.local_number.len(),
            self.draft.country.iso
        );
        self.history.record(record);
        Ok(link)
    }

    /// Load a history entry's country and number back into the form.
    ///
    /// Entries whose country is no longer listed fall back to the default.
    pub fn reuse(&mut self, id: &str) -> Result<(), ComposeError> {
        let record = self
            .history
            .get(id)
            .ok_or_else(|| ComposeError::UnknownContact(id.to_string()))?;
        self.draft.country = countries::find(&record.country_iso)
            .unwrap_or_else(countries::default_country);
        self.draft.phone_input = record.phone_number.clone();
        Ok(())
    }

    pub fn remove_contact(&mut self, id: &str) -> bool {
        self.history.remove(id)
    }

    pub fn history(&self) -> &RecencyStore {
        &self.history
    }

    pub fn history_items(&self) -> Vec<HistoryItem> {
        self.history
            .entries()
            .iter()
            .map(|record| HistoryItem {
                flag: countries::find(&record.country_iso)
                    .map(|c| c.flag)
                    .unwrap_or(countries::UNKNOWN_FLAG),
                record: record.clone(),
            })
            .collect()
    }
}

/// Lock the shared composer. A poisoned lock is an error, never recovered.
pub fn lock(composer: &Mutex<Composer>) -> Result<MutexGuard<'_, Composer>, ComposeError> {
    composer.lock().map_err(|_| ComposeError::StatePoisoned)
}

/// Releases the AI slot if the request future is dropped before finishing.
struct InFlight<'a>(&'a Mutex<Composer>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Ok(mut composer) = lock(self.0) {
            composer.generating = false;
        }
    }
}

/// Generate a draft for the current topic and put it in the message body.
///
/// The lock is not held while the request is outstanding, so the rest of
/// the form stays usable. Returns the new message body.
pub async fn request_ai_draft(
    composer: &Mutex<Composer>,
    writer: &DraftWriter,
    tone: MessageTone,
) -> Result<String, ComposeError> {
    let topic = lock(composer)?.begin_ai_draft()?;
    let _slot = InFlight(composer);

    let outcome = writer.generate(&topic, tone).await;
    if outcome.is_fallback() {
        log::warn!("[COMPOSE] Using fallback draft");
    }
    let text = outcome.into_text();
    lock(composer)?.finish_ai_draft(text.clone());
    Ok(text)
}
