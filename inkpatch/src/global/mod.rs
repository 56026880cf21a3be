//! Global singletons.

pub mod settings;

pub use settings::Settings;

/// Directory for this application's preference files, `<preference dir>/inkpatch`.
#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base = dirs::preference_dir()?;
    base.push(env!("CARGO_PKG_NAME"));
    Some(base)
}

/// Get the shared global settings, loading them from disk on first access.
pub fn settings() -> &'static Settings {
    static ONCE: std::sync::OnceLock<Settings> = std::sync::OnceLock::new();
    ONCE.get_or_init(Settings::load)
}
