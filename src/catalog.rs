use serde::{Deserialize, Serialize};

/// One language pack, as reported by either the central catalog (installable)
/// or the local server (installed). Both endpoints share this shape and just
/// populate different subsets of it, so every stat field defaults to
/// zero/false when a server omits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageEntry {
    /// Language code, e.g. "en", "fr". Unique within a list.
    pub code: String,
    /// Display name; entries with an empty name are skipped when rendering
    /// the installed table.
    #[serde(default)]
    pub name: String,
    /// Dotted version of the platform release the pack was built for.
    #[serde(default)]
    pub software_version: String,
    /// Monotonically increasing pack revision for a given software version.
    #[serde(default)]
    pub language_pack_version: u32,
    #[serde(default)]
    pub percent_translated: f64,
    #[serde(default)]
    pub subtitle_count: u32,
    /// Download size in bytes.
    #[serde(default)]
    pub zip_size: u64,
    /// Installed size in bytes.
    #[serde(default)]
    pub package_size: u64,
    #[serde(default)]
    pub beta: bool,
    /// Populated on the installable list only.
    #[serde(default)]
    pub num_exercises: u32,
}

impl LanguageEntry {
    /// Minimal entry for building test fixtures and defaults.
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            software_version: String::new(),
            language_pack_version: 0,
            percent_translated: 0.0,
            subtitle_count: 0,
            zip_size: 0,
            package_size: 0,
            beta: false,
            num_exercises: 0,
        }
    }
}
