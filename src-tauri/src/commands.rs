//! Tauri command handlers for the chat form and history view.
//!
//! Thin wrappers that bridge frontend invoke() calls to the composer.
//! Every mutation goes through a named `Composer` operation.

use crate::composer::{self, Composer, DraftView, HistoryItem};
use crate::countries::{self, Country};
use crate::link::ChatLink;
use crate::llm::{DraftWriter, MessageTone};
use std::sync::{Mutex, MutexGuard};
use tauri_plugin_opener::OpenerExt;

type ComposerState<'a> = tauri::State<'a, Mutex<Composer>>;

fn lock<'a>(state: &'a ComposerState<'_>) -> Result<MutexGuard<'a, Composer>, String> {
    composer::lock(state).map_err(|e| e.to_string())
}

/// Tauri command: list countries for the selector, filtered by `query`.
#[tauri::command]
pub fn get_countries(query: Option<String>) -> Vec<Country> {
    countries::search(query.as_deref().unwrap_or(""))
        .into_iter()
        .copied()
        .collect()
}

/// Tauri command: current form contents.
#[tauri::command]
pub fn get_draft(state: ComposerState<'_>) -> Result<DraftView, String> {
    Ok(lock(&state)?.view())
}

#[tauri::command]
pub fn select_country(state: ComposerState<'_>, iso: String) -> Result<DraftView, String> {
    let mut composer = lock(&state)?;
    composer.select_country(&iso).map_err(|e| e.to_string())?;
    Ok(composer.view())
}

#[tauri::command]
pub fn set_phone_number(state: ComposerState<'_>, value: String) -> Result<(), String> {
    lock(&state)?.set_phone_number(value);
    Ok(())
}

#[tauri::command]
pub fn set_message(state: ComposerState<'_>, value: String) -> Result<(), String> {
    lock(&state)?.set_message(value);
    Ok(())
}

#[tauri::command]
pub fn set_topic(state: ComposerState<'_>, value: String) -> Result<(), String> {
    lock(&state)?.set_topic(value);
    Ok(())
}

/// Tauri command: build the link for the current draft without sending.
#[tauri::command]
pub fn preview_link(state: ComposerState<'_>) -> Result<ChatLink, String> {
    lock(&state)?.preview_link().map_err(|e| e.to_string())
}

/// Tauri command: generate a message body with Gemini.
///
/// Returns the new body. Generation failures are not errors: the fallback
/// greeting is returned instead. Errors are a blank topic or a request
/// already in flight.
#[tauri::command]
pub async fn request_ai_draft(
    state: ComposerState<'_>,
    writer: tauri::State<'_, DraftWriter>,
    tone: String,
) -> Result<String, String> {
    let tone: MessageTone = tone.parse()?;
    composer::request_ai_draft(&state, &writer, tone)
        .await
        .map_err(|e| e.to_string())
}

/// Tauri command: validate, record the contact, and open the chat.
#[tauri::command]
pub fn send_message(app: tauri::AppHandle, state: ComposerState<'_>) -> Result<ChatLink, String> {
    let link = lock(&state)?.send().map_err(|e| e.to_string())?;
    app.opener()
        .open_url(&link.url, None::<&str>)
        .map_err(|e| format!("Failed to open chat: {}", e))?;
    log::info!("[ACTION] Opened chat link");
    Ok(link)
}

/// Tauri command: recent contacts, most recent first.
#[tauri::command]
pub fn get_history(state: ComposerState<'_>) -> Result<Vec<HistoryItem>, String> {
    Ok(lock(&state)?.history_items())
}

/// Tauri command: put a history entry's number back into the form.
#[tauri::command]
pub fn reuse_history_item(state: ComposerState<'_>, id: String) -> Result<DraftView, String> {
    let mut composer = lock(&state)?;
    composer.reuse(&id).map_err(|e| e.to_string())?;
    Ok(composer.view())
}

/// Tauri command: delete a history entry. Unknown ids are ignored.
#[tauri::command]
pub fn remove_history_item(
    state: ComposerState<'_>,
    id: String,
) -> Result<Vec<HistoryItem>, String> {
    let mut composer = lock(&state)?;
    composer.remove_contact(&id);
    Ok(composer.history_items())
}

/// Tauri command: copy text to the system clipboard.
///
/// Uses arboard for native clipboard access instead of navigator.clipboard.
#[tauri::command]
pub fn copy_to_clipboard(text: String) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard.set_text(&text).map_err(|e| e.to_string())?;
    log::info!("[ACTION] Copied {} chars to clipboard", text.len());
    Ok(())
}
