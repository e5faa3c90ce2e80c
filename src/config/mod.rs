use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::contract::ChainId;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Chain id used when none is given explicitly
    #[serde(default)]
    pub default_chain: Option<u64>,

    /// Override for the contracts database location
    #[serde(default)]
    pub contracts_db: Option<String>,
}

impl Config {
    pub fn default_chain_id(&self) -> Option<ChainId> {
        self.default_chain.map(ChainId)
    }
}

/// Load the config file, degrading to defaults on any failure.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("ABISCOPE_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("abiscope").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("abiscope").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "abiscope", "abiscope")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("abiscope"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("abiscope"));
    }
    directories::ProjectDirs::from("io", "abiscope", "abiscope")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn contracts_db_path(config: &Config) -> Option<PathBuf> {
    if let Some(path) = &config.contracts_db {
        return Some(PathBuf::from(path));
    }
    data_dir().map(|dir| dir.join("contracts.sqlite3"))
}
