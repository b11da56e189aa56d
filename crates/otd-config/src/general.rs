//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default output format for commands.
fn default_format() -> String {
    String::from("json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Output format used when `--format` is not given (`json`, `table`, `raw`).
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}
