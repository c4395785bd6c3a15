//! Settings Tauri commands: Gemini credential management.
//!
//! Handles:
//! - Reporting whether a key is configured (env var or OS keychain)
//! - Saving a key to the OS keychain
//! - Testing the connection with the current key

use crate::llm::{provider, DraftWriter};

/// Tauri command: AI configuration for the settings panel.
#[tauri::command]
pub fn get_ai_config() -> provider::AiConfig {
    provider::ai_config()
}

/// Tauri command: save the Gemini API key to the OS keychain.
#[tauri::command]
pub fn save_api_key(api_key: String) -> Result<(), String> {
    provider::save_api_key(&api_key)
}

/// Tauri command: test the Gemini connection with a minimal request.
#[tauri::command]
pub async fn test_ai_connection(writer: tauri::State<'_, DraftWriter>) -> Result<bool, String> {
    writer.check_connection().await
}
