use std::{
    fs,
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Directory holding the ledger export, user settings, and report files.
pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| PathBuf::from("data"));

pub fn operations_file() -> PathBuf {
    DATA_DIR.join("operations.csv")
}

pub fn settings_file() -> PathBuf {
    DATA_DIR.join("user_settings.json")
}

/// User-selected watchlists for the page payloads.
///
/// A missing list (as opposed to an empty file) is meaningful: the rate
/// lookup substitutes its default currencies and the stock lookup reports
/// the sentinel entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub user_currencies: Option<Vec<String>>,
    #[serde(default)]
    pub user_stocks: Option<Vec<String>>,
}

impl UserSettings {
    /// Loads settings from a JSON file. A missing file and malformed JSON
    /// both degrade to the empty settings object.
    pub fn load(path: &Path) -> UserSettings {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(file = %path.display(), %err, "settings file unavailable, using defaults");
                return UserSettings::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::error!(file = %path.display(), %err, "settings file is not valid JSON, using defaults");
                UserSettings::default()
            }
        }
    }
}
