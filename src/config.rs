//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the clock-config.toml file.
//! It covers the window the clock opens, the environment variable a screensaver host
//! uses to hand over its own window, and how frames are shown in a terminal.

use crate::error::ClockError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "clock-config.toml";

/// Application configuration loaded from clock-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Window created when not embedded
    pub window: WindowConfig,
    /// Screensaver host integration
    pub embed: EmbedConfig,
    /// Terminal presentation
    pub terminal: TerminalConfig,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Initial width in device pixels
    pub width: u32,
    /// Initial height in device pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

/// Screensaver host integration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmbedConfig {
    /// Environment variable holding the host window id
    pub env_var: String,
}

/// Terminal presentation settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TerminalConfig {
    /// Characters from darkest to brightest
    pub shades: String,
    /// Clear the screen before each frame
    pub clear_screen: bool,
    /// Widest frame printed, in character cells
    #[serde(default = "default_columns")]
    pub columns: u32,
}

fn default_columns() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window: WindowConfig {
                width: 640,
                height: 480,
                title: "24clock".to_string(),
            },
            embed: EmbedConfig {
                env_var: "XSCREENSAVER_WINDOW".to_string(),
            },
            terminal: TerminalConfig {
                shades: " .:-=+*#%@".to_string(),
                clear_screen: true,
                columns: default_columns(),
            },
        }
    }
}

impl Config {
    /// Load configuration from clock-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("invalid config file {}: {}", path.display(), e);
                    warn!("using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!("no config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ClockError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!("configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
