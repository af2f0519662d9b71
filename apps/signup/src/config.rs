use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use client_core::DEFAULT_REQUEST_TIMEOUT;
use serde::Deserialize;
use shared::messages::Language;
use tracing::warn;

const DEFAULT_CONFIG_FILE: &str = "signup.toml";

/// Missing keys in the settings file fall back to [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site_url: String,
    pub language: Language,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_url: "http://127.0.0.1:8888".into(),
            language: Language::En,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Defaults, then the TOML file, then environment overrides.
///
/// An explicitly named config file must exist; the default `signup.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let mut settings = match fs::read_to_string(&path) {
        Ok(raw) => parse_file(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => Settings::default(),
    };

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn parse_file(raw: &str) -> anyhow::Result<Settings> {
    let mut settings: Settings = toml::from_str(raw)?;
    if settings.request_timeout_secs == 0 {
        warn!("ignoring request_timeout_secs = 0 from config file");
        settings.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT.as_secs();
    }
    Ok(settings)
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SITE_URL") {
        settings.site_url = v;
    }
    if let Some(v) = lookup("APP__SITE_URL") {
        settings.site_url = v;
    }

    if let Some(v) = lookup("APP__LANGUAGE") {
        match v.parse() {
            Ok(language) => settings.language = language,
            Err(err) => warn!(%err, "ignoring APP__LANGUAGE"),
        }
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(secs) if secs > 0 => settings.request_timeout_secs = secs,
            _ => warn!(value = %v, "ignoring APP__REQUEST_TIMEOUT_SECS"),
        }
    }
}
