// Application settings
// Loaded from ~/.config/tally/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // History
    #[serde(rename = "history.maxUndo")]
    pub max_undo: usize,

    // New tables
    #[serde(rename = "table.initialColumns")]
    pub initial_columns: usize,

    #[serde(rename = "table.headerPrefix")]
    pub header_prefix: String,

    // Session
    #[serde(rename = "session.confirmOnClose")]
    pub confirm_on_close: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_undo: 50,
            initial_columns: 3,
            header_prefix: "Column".to_string(),
            confirm_on_close: true,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tally");
        config_dir.join("settings.json")
    }

    /// Load settings from the user config directory, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings.sanitized(),
                Err(e) => {
                    log::warn!("Error parsing {}: {}", path.display(), e);
                    log::warn!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings text. Lines starting with // are comments.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    /// Clamp values that would break the table invariants
    fn sanitized(mut self) -> Self {
        if self.max_undo == 0 {
            log::warn!("history.maxUndo must be at least 1; using 1");
            self.max_undo = 1;
        }
        if self.initial_columns == 0 {
            log::warn!("table.initialColumns must be at least 1; using 1");
            self.initial_columns = 1;
        }
        if self.header_prefix.trim().is_empty() {
            self.header_prefix = Self::default().header_prefix;
        }
        self
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Undo depth (number of table states kept)
    "history.maxUndo": 50,

    // New tables
    "table.initialColumns": 3,
    "table.headerPrefix": "Column",

    // Ask to save unsaved changes before quitting
    "session.confirmOnClose": true
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
