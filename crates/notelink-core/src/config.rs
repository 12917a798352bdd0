use serde::{Deserialize, Serialize};

/// Top-level configuration for Notelink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotelinkConfig {
    pub store: StoreConfig,
    pub editor: EditorConfig,
    pub autosave: AutosaveConfig,
}

/// Storage-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key prefix separating document records from anything else sharing
    /// the backend
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// Editor defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Filename staged for a fresh blank document
    #[serde(default = "default_filename")]
    pub default_filename: String,
}

/// Debounced autosave settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Quiet interval before an edit is persisted (milliseconds)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_namespace() -> String {
    crate::store::DEFAULT_NAMESPACE.to_string()
}

fn default_filename() -> String {
    "document.md".to_string()
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for NotelinkConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                namespace: default_namespace(),
            },
            editor: EditorConfig {
                default_filename: default_filename(),
            },
            autosave: AutosaveConfig {
                enabled: true,
                debounce_ms: default_debounce_ms(),
            },
        }
    }
}

impl NotelinkConfig {
    /// Load config from YAML content
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
