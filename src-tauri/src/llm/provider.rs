//! Gemini credential and endpoint resolution.
//!
//! The API key comes from the environment first, then the OS keychain.
//! A key found in the keychain is loaded into the environment so the rest
//! of the session reads it from one place.

use serde::Serialize;

pub const ENV_KEY: &str = "GEMINI_API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const KEYRING_SERVICE: &str = "direct-chat";
const KEYRING_ACCOUNT: &str = "gemini";

/// AI configuration summary exposed to the settings panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConfig {
    pub model: String,
    pub env_key: String,
    pub configured: bool,
}

pub fn ai_config() -> AiConfig {
    AiConfig {
        model: super::prompts::MODEL.to_string(),
        env_key: ENV_KEY.to_string(),
        configured: resolve_api_key().is_some(),
    }
}

/// Find the Gemini API key, or `None` if none is configured.
pub fn resolve_api_key() -> Option<String> {
    if let Ok(key) = std::env::var(ENV_KEY) {
        if !key.is_empty() {
            return Some(key);
        }
    }

    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT).ok()?;
    match entry.get_password() {
        Ok(key) if !key.is_empty() => {
            std::env::set_var(ENV_KEY, &key);
            log::info!("[SETTINGS] Loaded Gemini key from OS keychain");
            Some(key)
        }
        _ => None,
    }
}

/// Store the key in the OS keychain and make it live for this session.
pub fn save_api_key(api_key: &str) -> Result<(), String> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err("API key is empty".to_string());
    }
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)
        .map_err(|e| format!("Keyring error: {}", e))?;
    entry
        .set_password(api_key)
        .map_err(|e| format!("Failed to save key: {}", e))?;
    std::env::set_var(ENV_KEY, api_key);
    log::info!("[SETTINGS] Gemini API key saved");
    Ok(())
}

/// REST base URL, overridable for proxies and tests.
pub fn base_url() -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
