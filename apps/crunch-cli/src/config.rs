use std::path::Path;

use anyhow::Context;
use crunch_persist::StoreConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMPT: &str = "> ";

/// Shell configuration, read from a JSON file. Every field is optional.
///
/// ```json
/// { "prompt": "> ", "store": { "empty_aggregate": "nil" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub prompt: String,
    pub store: StoreConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl ShellConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening config {}", path.display()))?;
        serde_json::from_reader(file).with_context(|| format!("parsing config {}", path.display()))
    }
}
