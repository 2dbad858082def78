use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level browser settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BrowserSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub downloads: DownloadSettings,
    #[serde(default)]
    pub input: InputSettings,
    /// Shortcut overrides: action name (e.g. `"scroll_top"`) to key sequence
    /// (e.g. `"Ctrl+G Ctrl+G"`). Actions not listed keep their defaults.
    #[serde(default)]
    pub shortcuts: HashMap<String, String>,
}

/// General browser settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    pub homepage: String,
    pub user_agent: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            homepage: "http://google.com".to_string(),
            user_agent: format!(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/70.0.0.0 Safari/537.36 keyweb/{}",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

/// Web search provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    /// Base URL of the search provider.
    pub url: String,
    /// Query parameter that carries the search text.
    pub param: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            url: "https://google.com/search".to_string(),
            param: "q".to_string(),
        }
    }
}

/// Download delegation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DownloadSettings {
    /// Program launched with the resource URL as its only argument.
    pub helper: String,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            helper: "keyweb-dl".to_string(),
        }
    }
}

/// Keyboard, scrolling and zoom behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputSettings {
    /// Pixels scrolled by the directional scroll shortcuts.
    pub scroll_step: i32,
    /// Zoom factor change per zoom-in / zoom-out.
    pub zoom_step: f64,
    /// Maximum number of suggestion rows shown at once.
    pub max_suggestion_rows: usize,
    /// Milliseconds after which the first chord of a two-chord shortcut is
    /// forgotten. `None` remembers it until the next key press.
    pub chord_timeout_ms: Option<u64>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            scroll_step: 40,
            zoom_step: 0.1,
            max_suggestion_rows: 20,
            chord_timeout_ms: None,
        }
    }
}
