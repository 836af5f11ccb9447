use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub aha: Option<AhaConfig>,
    pub openai: Option<OpenAiConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AhaConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
}

impl AppConfig {
    pub fn aha_base_url(&self) -> Option<String> {
        non_empty(self.aha.as_ref().and_then(|a| a.base_url.clone()))
    }

    /// Aha! API key from the config file, falling back to `AHA_API_KEY`.
    pub fn aha_api_key(&self) -> Option<String> {
        non_empty(self.aha.as_ref().and_then(|a| a.api_key.clone()))
            .or_else(|| non_empty(std::env::var("AHA_API_KEY").ok()))
    }

    /// OpenAI API key from the config file, falling back to `OPENAI_API_KEY`.
    /// `None` means the AI summary tier is skipped, not an error.
    pub fn openai_api_key(&self) -> Option<String> {
        non_empty(self.openai.as_ref().and_then(|o| o.api_key.clone()))
            .or_else(|| non_empty(std::env::var("OPENAI_API_KEY").ok()))
    }
}

/// Blank and whitespace-only values count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".groom")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}
