//! Application configuration
//!
//! Re-exports the shared types from courtside-types and adds persistence
//! plus platform defaults on top of them.

pub use courtside_types::{AppConfig, FetchSettings};

/// Default data directory: `~/.local/share/courtside` (or the platform
/// equivalent), falling back to the working directory.
fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("courtside"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_default()
}

/// Extension trait for AppConfig persistence.
pub trait AppConfigExt {
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn save(self) -> Result<(), confy::ConfyError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load("courtside", "config").unwrap_or_else(|_| Self::load_with_defaults())
    }

    /// Defaults used when no config file exists yet.
    fn load_with_defaults() -> Self {
        AppConfig::with_data_dir(default_data_dir())
    }

    fn save(self) -> Result<(), confy::ConfyError> {
        confy::store("courtside", "config", self)
    }
}
