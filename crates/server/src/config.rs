use std::{collections::HashMap, fs, path::PathBuf};

use seat_engine::advisor::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub chart_dir: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            chart_dir: PathBuf::from("./data/charts"),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.into(),
        }
    }
}

/// Defaults, then `server.toml`, then the environment (after `.env`).
pub fn load_settings() -> Settings {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            warn!(%error, "failed to load .env file");
        }
    }

    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, &file_cfg),
            Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
        }
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("chart_dir") {
        settings.chart_dir = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("gemini_model") {
        settings.gemini_model = v.clone();
    }
    if let Some(v) = file_cfg.get("gemini_endpoint") {
        settings.gemini_endpoint = v.clone();
    }
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("CHART_DIR") {
        settings.chart_dir = PathBuf::from(v);
    }
    if let Some(v) = var("APP__CHART_DIR") {
        settings.chart_dir = PathBuf::from(v);
    }

    if let Some(v) = var("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()) {
        settings.gemini_api_key = Some(v);
    }

    if let Some(v) = var("GEMINI_MODEL") {
        settings.gemini_model = v;
    }
    if let Some(v) = var("APP__GEMINI_MODEL") {
        settings.gemini_model = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
