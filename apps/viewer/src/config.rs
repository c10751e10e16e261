use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use client_core::{
    ViewerOptions, DEFAULT_API_BASE_URL, DEFAULT_BATCH_SIZE, DEFAULT_BREED_IMAGE_COUNT,
};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "dog-viewer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub batch_size: usize,
    pub breed_image_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            breed_image_count: DEFAULT_BREED_IMAGE_COUNT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    batch_size: Option<usize>,
    breed_image_count: Option<usize>,
}

impl Settings {
    pub fn viewer_options(&self) -> ViewerOptions {
        ViewerOptions {
            batch_size: self.batch_size,
            breed_image_count: self.breed_image_count,
        }
    }

    /// Command-line flags win over everything else.
    pub fn with_overrides(mut self, api_base_url: Option<String>, batch_size: Option<usize>) -> Self {
        if let Some(v) = api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = batch_size {
            self.batch_size = v;
        }
        self.normalize();
        self
    }

    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file_cfg.batch_size {
            self.batch_size = v;
        }
        if let Some(v) = file_cfg.breed_image_count {
            self.breed_image_count = v;
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("DOG_VIEWER__API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = parse_count_var(&env, "DOG_VIEWER__BATCH_SIZE") {
            self.batch_size = v;
        }
        if let Some(v) = parse_count_var(&env, "DOG_VIEWER__BREED_IMAGE_COUNT") {
            self.breed_image_count = v;
        }
    }

    fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().to_string();
        if self.api_base_url.is_empty() {
            self.api_base_url = DEFAULT_API_BASE_URL.into();
        }
        self.batch_size = self.batch_size.max(1);
        self.breed_image_count = self.breed_image_count.max(1);
    }
}

fn parse_count_var(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = env(key)?;
    match raw.trim().parse::<usize>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(key, value = %raw, "ignoring unparsable count: {err}");
            None
        }
    }
}

pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with_env(explicit_path, |key| std::env::var(key).ok())
}

/// Defaults, then the config file, then the environment.
pub fn load_settings_with_env(
    explicit_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match explicit_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            settings.apply_file(file_cfg);
        }
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    settings.apply_env(env);
    settings.normalize();
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
