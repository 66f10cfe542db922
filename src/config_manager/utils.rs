use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::config_manager::main::Config;

/// Read JSON-LD configuration file with environment variable substitution
pub fn read_jsonld(config_path: &str) -> Result<Value> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let content = load_text_file_with_guess_encoding(config_path)?;
    if content.trim().is_empty() {
        anyhow::bail!("Failed to read configuration file: {}", config_path);
    }

    // Replace environment variables: ${VAR_NAME}
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let content = pattern.replace_all(&content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });

    let json_value: Value = serde_json::from_str(&content)?;
    debug!("Read configuration from {}", config_path);
    Ok(json_value)
}

/// Validate configuration data against the Config model
pub fn validate_config(config_data: &Value) -> Result<Config> {
    let config: Config = serde_json::from_value(config_data.clone())?;
    Ok(config)
}

/// Load text file, dropping a UTF-8 BOM and falling back to GBK
pub fn load_text_file_with_guess_encoding(file_path: &str) -> Result<String> {
    let mut buffer = fs::read(file_path)?;

    if buffer.starts_with(&[0xEF, 0xBB, 0xBF]) {
        buffer.drain(0..3);
    }

    match String::from_utf8(buffer) {
        Ok(content) => Ok(content),
        Err(err) => {
            debug!("{} is not valid UTF-8, decoding as GBK", file_path);
            let (cow, _, _) = encoding_rs::GBK.decode(err.as_bytes());
            Ok(cow.to_string())
        }
    }
}
