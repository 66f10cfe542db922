use serde::{Deserialize, Serialize};

/// Cleaning passes applied to raw label options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCleaningConfig {
    /// Split each raw option on punctuation separators
    #[serde(rename = "split_on_symbols")]
    #[serde(default)]
    pub split_on_symbols: bool,

    #[serde(rename = "ignore_numbers")]
    #[serde(default)]
    pub ignore_numbers: bool,

    #[serde(rename = "strip_whitespace")]
    #[serde(default = "default_true")]
    pub strip_whitespace: bool,

    /// Remove `http(s)://` links
    #[serde(rename = "skip_links")]
    #[serde(default)]
    pub skip_links: bool,

    #[serde(rename = "capitalize")]
    #[serde(default)]
    pub capitalize: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LabelCleaningConfig {
    fn default() -> Self {
        Self {
            split_on_symbols: false,
            ignore_numbers: false,
            strip_whitespace: default_true(),
            skip_links: false,
            capitalize: false,
        }
    }
}

impl LabelCleaningConfig {
    /// A configuration with every pass disabled
    pub fn none() -> Self {
        Self {
            split_on_symbols: false,
            ignore_numbers: false,
            strip_whitespace: false,
            skip_links: false,
            capitalize: false,
        }
    }
}
