//! Build script for the Direct Chat Tauri app.
//!
//! Only the desktop shell needs Tauri's generated context; the headless
//! core builds without it.

fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
