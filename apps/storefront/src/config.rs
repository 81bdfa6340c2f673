use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use client_core::{ImageServiceConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub regenerate_hero: bool,
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_BASE_URL.into(),
            regenerate_hero: false,
            output_dir: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_key: Option<String>,
    model: Option<String>,
    api_base_url: Option<String>,
    regenerate_hero: Option<bool>,
    output_dir: Option<PathBuf>,
}

impl Settings {
    pub fn image_service_config(&self) -> anyhow::Result<ImageServiceConfig> {
        let base_url = Url::parse(self.api_base_url.trim()).with_context(|| {
            format!("invalid image service base url '{}'", self.api_base_url)
        })?;
        Ok(ImageServiceConfig::new(
            self.api_key.clone(),
            self.model.clone(),
            base_url,
        ))
    }
}

pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file when present, then environment overrides.
pub fn load_settings_with(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if config_path.exists() {
        let raw = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config '{}'", config_path.display()))?;
        let file_cfg = toml::from_str::<FileSettings>(&raw)
            .with_context(|| format!("failed to parse config '{}'", config_path.display()))?;
        apply_file_settings(&mut settings, file_cfg);
    }

    for key in ["API_KEY", "GEMINI_API_KEY", "APP__API_KEY"] {
        if let Some(v) = env(key) {
            settings.api_key = Some(v);
        }
    }
    if let Some(v) = env("APP__MODEL") {
        settings.model = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__REGENERATE_HERO") {
        if let Some(parsed) = parse_flag(&v) {
            settings.regenerate_hero = parsed;
        }
    }
    if let Some(v) = env("APP__OUTPUT_DIR") {
        settings.output_dir = Some(PathBuf::from(v));
    }

    settings.api_key = settings
        .api_key
        .take()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_key {
        settings.api_key = Some(v);
    }
    if let Some(v) = file_cfg.model {
        settings.model = v;
    }
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.regenerate_hero {
        settings.regenerate_hero = v;
    }
    if let Some(v) = file_cfg.output_dir {
        settings.output_dir = Some(v);
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
