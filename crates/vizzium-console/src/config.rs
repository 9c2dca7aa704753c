//! Configuration loading from TOML and environment variables.
//!
//! The debugger reads its configuration from:
//! 1. A TOML config file (only when one is given with `--config`)
//! 2. Environment variables (override TOML values)
//!
//! Environment variable prefix: VIZZIUM_

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vizzium_core::{
    parse_address, DEFAULT_MEMORY_MARGIN, DEFAULT_MEMORY_SIZE, DEFAULT_STATUS_WIDTH_PERCENT,
    DEFAULT_STEP_HOTKEY,
};

use crate::console::ConsoleSettings;

/// Top-level debugger configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VizziumConfig {
    /// Emulated machine.
    #[serde(default)]
    pub target: TargetConfig,
    /// Screen layout.
    #[serde(default)]
    pub view: ViewConfig,
    /// Key bindings.
    #[serde(default)]
    pub keys: KeysConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Memory size in bytes; a power of two up to 65536.
    #[serde(default = "default_memory_size")]
    pub memory_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// First address of the memory listing.
    #[serde(default)]
    pub base_address: u16,
    /// Screen rows not used by the memory listing.
    #[serde(default = "default_memory_margin")]
    pub memory_margin: u16,
    /// Width of the CPU status panel, in percent of the screen.
    #[serde(default = "default_status_width_percent")]
    pub status_width_percent: u16,
    /// Whether the CPU status panel is shown at startup.
    #[serde(default = "default_true")]
    pub show_status_panel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Normal-mode keys and the command each one runs.
    #[serde(default = "default_hotkeys")]
    pub hotkeys: BTreeMap<String, String>,
    /// Complete command names with Tab.
    #[serde(default)]
    pub tab_completion: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "vizzium_console=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// File to write logs to. The console owns the screen, so nothing is
    /// logged without one.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// -- Defaults --

fn default_true() -> bool {
    true
}
fn default_memory_size() -> usize {
    DEFAULT_MEMORY_SIZE
}
fn default_memory_margin() -> u16 {
    DEFAULT_MEMORY_MARGIN
}
fn default_status_width_percent() -> u16 {
    DEFAULT_STATUS_WIDTH_PERCENT
}
fn default_hotkeys() -> BTreeMap<String, String> {
    BTreeMap::from([(DEFAULT_STEP_HOTKEY.to_string(), "step".to_string())])
}
fn default_log_level() -> String {
    "info".to_string()
}

// -- Trait impls --

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            memory_size: default_memory_size(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_address: 0,
            memory_margin: default_memory_margin(),
            status_width_percent: default_status_width_percent(),
            show_status_panel: true,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            hotkeys: default_hotkeys(),
            tab_completion: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl VizziumConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: VizziumConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, with environment variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = if let Some(path) = path {
            if path.exists() {
                Self::from_file(path)?
            } else {
                tracing::warn!(
                    path = %path.display(),
                    "Config file not found, using defaults"
                );
                Self::default()
            }
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("VIZZIUM_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("VIZZIUM_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("VIZZIUM_MEMORY_SIZE") {
            match parse_size(&val) {
                Some(size) => self.target.memory_size = size,
                None => tracing::warn!(value = %val, "Ignoring invalid VIZZIUM_MEMORY_SIZE"),
            }
        }
        if let Ok(val) = std::env::var("VIZZIUM_BASE_ADDRESS") {
            match parse_address(&val, "base address") {
                Ok(address) => self.view.base_address = address,
                Err(e) => tracing::warn!(error = %e, "Ignoring invalid VIZZIUM_BASE_ADDRESS"),
            }
        }
    }

    /// Settings for the console. Hotkeys that are not a single character are
    /// skipped.
    pub fn console_settings(&self) -> ConsoleSettings {
        let mut hotkeys = Vec::with_capacity(self.keys.hotkeys.len());
        for (key, command) in &self.keys.hotkeys {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => hotkeys.push((c, command.clone())),
                _ => tracing::warn!(key = %key, "Hotkey must be a single character, skipping"),
            }
        }

        ConsoleSettings {
            base_address: self.view.base_address,
            memory_margin: self.view.memory_margin,
            show_status_panel: self.view.show_status_panel,
            hotkeys,
            tab_completion: self.keys.tab_completion,
        }
    }
}

/// Parse a byte count given in decimal or `0x`/`$` hex.
pub fn parse_size(value: &str) -> Option<usize> {
    let value = value.trim();
    if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .or_else(|| value.strip_prefix('$'))
    {
        usize::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}
