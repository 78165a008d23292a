// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use xdg::BaseDirectories;

pub const APP_NAME: &str = "bolsatui";
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

// Main configuration structure, mapping to config.toml
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    "http://localhost:3000/offers".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            endpoint: default_endpoint(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    // Upper bound of the price filter; the control moves in price_step
    // increments between 0 and this.
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,
    #[serde(default = "default_price_step")]
    pub price_step: f64,
    #[serde(default = "default_sort")]
    pub default_sort: String, // "name", "price", "rating" or "unsorted"
}

fn default_refresh_interval_ms() -> u64 {
    500
}
fn default_price_ceiling() -> f64 {
    700.0
}
fn default_price_step() -> f64 {
    10.0
}
fn default_sort() -> String {
    "name".to_string()
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        InterfaceConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
            price_ceiling: default_price_ceiling(),
            price_step: default_price_step(),
            default_sort: default_sort(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // "debug", "info", "warn", "error"
    #[serde(default = "default_log_dir")]
    pub log_dir: String, // Path, can use ~
    #[serde(default = "default_rotate_daily")]
    pub rotate_daily: bool,
    #[serde(default = "default_retain_days")]
    pub retain_days: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.bolsatui/logs".to_string() // Using ~ for home dir, will need expansion
}
fn default_rotate_daily() -> bool {
    true
}
fn default_retain_days() -> u32 {
    7
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            log_dir: default_log_dir(),
            rotate_daily: default_rotate_daily(),
            retain_days: default_retain_days(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    #[serde(default = "default_quit")] pub quit: String,
    #[serde(default = "default_help")] pub help: String,
    #[serde(default = "default_search")] pub search: String,
    #[serde(default = "default_filters")] pub filters: String,
    #[serde(default = "default_sort_key")] pub sort: String,
    #[serde(default = "default_reload")] pub reload: String,
    #[serde(default = "default_next_tab")] pub next_tab: String,
    #[serde(default = "default_prev_tab")] pub prev_tab: String,
    #[serde(default = "default_up")] pub up: String,
    #[serde(default = "default_down")] pub down: String,
    #[serde(default = "default_enter")] pub enter: String,
    #[serde(default = "default_toggle")] pub toggle: String,
}

fn default_quit() -> String { "q".to_string() }
fn default_help() -> String { "?".to_string() }
fn default_search() -> String { "/".to_string() }
fn default_filters() -> String { "f".to_string() }
fn default_sort_key() -> String { "s".to_string() }
fn default_reload() -> String { "r".to_string() }
fn default_next_tab() -> String { "Tab".to_string() }
fn default_prev_tab() -> String { "BackTab".to_string() }
fn default_up() -> String { "Up".to_string() }
fn default_down() -> String { "Down".to_string() }
fn default_enter() -> String { "Enter".to_string() }
fn default_toggle() -> String { "Space".to_string() }

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            search: default_search(),
            filters: default_filters(),
            sort: default_sort_key(),
            reload: default_reload(),
            next_tab: default_next_tab(),
            prev_tab: default_prev_tab(),
            up: default_up(),
            down: default_down(),
            enter: default_enter(),
            toggle: default_toggle(),
        }
    }
}

impl Config {
    pub fn load(config_path_override: Option<&Path>) -> Result<Self> {
        let xdg_dirs = BaseDirectories::with_prefix(APP_NAME)?;
        let config_path = match config_path_override {
            Some(path) => {
                debug!("Using provided config path override: {}", path.display());
                path.to_path_buf()
            }
            None => xdg_dirs
                .find_config_file(DEFAULT_CONFIG_FILENAME)
                .with_context(|| {
                    format!(
                        "Could not find default config file '{}'",
                        DEFAULT_CONFIG_FILENAME
                    )
                })?,
        };

        info!("Loading configuration from {}", config_path.display());
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        let config: Config =
            toml::from_str(&config_str).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }
}
