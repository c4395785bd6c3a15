//! Direct Chat: open a WhatsApp chat with any number without saving it
//! as a contact, optionally drafting the message with Gemini.
//!
//! The core (country directory, link builder, recent-contacts store,
//! composer, AI drafts) is plain Rust. The Tauri shell is behind the
//! `desktop` feature and only wires the core to the webview:
//!   - commands.rs           chat form + history commands
//!   - settings_commands.rs  Gemini key management

pub mod composer;
pub mod countries;
pub mod error;
pub mod history;
pub mod link;
pub mod llm;

#[cfg(feature = "desktop")]
mod commands;
#[cfg(feature = "desktop")]
pub mod settings_commands;

pub use composer::Composer;
pub use error::{ComposeError, StoreError};

/// Load `.env.local` → `.env` from the project root. First file found wins.
///
/// Uses CARGO_MANIFEST_DIR (compile-time path to src-tauri/) so the lookup
/// does not depend on the binary's working directory.
pub fn load_env() {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let project_root = manifest_dir.parent().unwrap_or(manifest_dir);

    for env_file in [".env.local", ".env"] {
        let path = project_root.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break;
        }
    }
}

/// Entry point, called by Tauri runtime.
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Mutex;

    load_env();
    env_logger::init();

    let storage = history::FileStorage::default_location();
    log::info!("[STARTUP] History file: {}", storage.path().display());
    let composer = Composer::new(history::RecencyStore::load(storage));

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(Mutex::new(composer))
        .manage(llm::DraftWriter::new())
        .invoke_handler(tauri::generate_handler![
            // Chat form + history (commands.rs)
            commands::get_countries,
            commands::get_draft,
            commands::select_country,
            commands::set_phone_number,
            commands::set_message,
            commands::set_topic,
            commands::preview_link,
            commands::request_ai_draft,
            commands::send_message,
            commands::get_history,
            commands::reuse_history_item,
            commands::remove_history_item,
            commands::copy_to_clipboard,
            // Settings (settings_commands.rs)
            settings_commands::get_ai_config,
            settings_commands::save_api_key,
            settings_commands::test_ai_connection,
        ])
        .setup(|_app| {
            log::info!("Direct Chat starting up");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running Direct Chat");
}
