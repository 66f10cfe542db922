use serde::{Deserialize, Serialize};
use crate::config_manager::labels::LabelCleaningConfig;
use crate::config_manager::system::SystemConfig;

/// Main configuration, stored as JSON-LD or YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context: Option<serde_json::Value>,

    #[serde(rename = "system_config")]
    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(rename = "label_config")]
    #[serde(default)]
    pub label_config: LabelCleaningConfig,
}

impl Config {
    /// Load configuration, picking the format from the file extension
    pub fn load(path: &str) -> anyhow::Result<Self> {
        use crate::config_manager::utils::{load_text_file_with_guess_encoding, read_jsonld, validate_config};

        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            let json_value = read_jsonld(path)?;
            validate_config(&json_value)
        } else {
            if !std::path::Path::new(path).exists() {
                anyhow::bail!("Configuration file not found: {}", path);
            }
            let content = load_text_file_with_guess_encoding(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        }
    }
}
