use std::{collections::HashMap, fs, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    /// json-server style data file (`{"foods": [...]}`).
    pub data_path: PathBuf,
    pub persist: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3333".into(),
            data_path: "server.json".into(),
            persist: true,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        tracing::warn!("ignoring unparseable server.toml");
        return;
    };

    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = file_cfg.get("data_path").and_then(toml::Value::as_str) {
        settings.data_path = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("persist").and_then(toml::Value::as_bool) {
        settings.persist = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("CATALOG_DATA_PATH") {
        settings.data_path = PathBuf::from(v);
    }
    if let Some(v) = lookup("APP__DATA_PATH") {
        settings.data_path = PathBuf::from(v);
    }

    if let Some(v) = lookup("APP__PERSIST") {
        if let Some(parsed) = parse_flag(&v) {
            settings.persist = parsed;
        }
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
